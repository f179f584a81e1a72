use crate::StudyPlannerHandler;
use crate::formatting;
use crate::planner::AppSettingsUpdate;
use crate::validation::planner_result;
use mcp_attr::Result as McpResult;

impl StudyPlannerHandler {
    pub async fn handle_get_settings(&self) -> McpResult<String> {
        let settings = planner_result(self.planner.settings())?;
        Ok(formatting::format_settings(&settings))
    }

    pub async fn handle_update_settings(
        &self,
        dark_mode: Option<bool>,
        notifications: Option<bool>,
    ) -> McpResult<String> {
        let settings = planner_result(self.planner.update_settings(AppSettingsUpdate {
            dark_mode,
            notifications,
        }))?;
        Ok(format!(
            "Settings updated\n{}",
            formatting::format_settings(&settings)
        ))
    }
}
