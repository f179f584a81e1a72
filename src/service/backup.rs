//! Export, import and reset of the whole document

use super::PlannerService;
use crate::error::PlannerResult;
use crate::planner::Document;
use crate::planner::snapshot::{self, Snapshot};
use tracing::info;

impl PlannerService {
    pub fn export_snapshot(&self) -> PlannerResult<Snapshot> {
        let document = self.document()?;
        Ok(snapshot::export_snapshot(&document, self.clock.now()))
    }

    /// Replace the document with a validated backup payload
    ///
    /// The current document stays as it is when the payload is rejected.
    pub fn import_data(&self, raw: &str) -> PlannerResult<Document> {
        let mut imported = snapshot::import_snapshot(raw)?;
        imported.reconcile_day(self.clock.today());
        self.store.save(&imported)?;
        info!(
            tasks = imported.tasks.len(),
            habits = imported.habits.len(),
            "imported backup"
        );
        Ok(imported)
    }

    /// Remove everything and start from the defaults
    pub fn clear_all_data(&self) -> PlannerResult<Document> {
        let document = self.store.clear()?;
        info!("all planner data cleared");
        Ok(document)
    }
}
