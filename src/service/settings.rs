use super::PlannerService;
use crate::error::PlannerResult;
use crate::planner::queries::overview;
use crate::planner::{AppSettings, AppSettingsUpdate, Overview};
use tracing::info;

impl PlannerService {
    pub fn settings(&self) -> PlannerResult<AppSettings> {
        Ok(self.document()?.settings)
    }

    pub fn update_settings(&self, update: AppSettingsUpdate) -> PlannerResult<AppSettings> {
        let settings = self.mutate(|doc| {
            doc.settings = update.merged_into(doc.settings);
            Ok(doc.settings)
        })?;
        info!(?settings, "settings updated");
        Ok(settings)
    }

    /// Dashboard projection for today
    pub fn overview(&self) -> PlannerResult<Overview> {
        let doc = self.document()?;
        Ok(overview(
            &doc.tasks,
            &doc.habits,
            doc.timer_stats,
            self.clock.today(),
        ))
    }
}
