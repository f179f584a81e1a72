//! Backup handlers

use crate::StudyPlannerHandler;
use crate::planner::snapshot::backup_file_name;
use crate::validation::planner_result;
use mcp_attr::{Result as McpResult, bail_public};
use std::path::PathBuf;
use tracing::info;

impl StudyPlannerHandler {
    /// Writes `study-planner-backup-<date>.json` into `directory`, or the
    /// data directory when none is given.
    pub async fn handle_export_data(&self, directory: Option<String>) -> McpResult<String> {
        let dir = directory
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir.clone());

        let snapshot = planner_result(self.planner.export_snapshot())?;
        let json = planner_result(snapshot.to_json())?;
        // Named after the local date
        let path = dir.join(backup_file_name(self.planner.clock().today()));

        if let Err(e) = tokio::fs::create_dir_all(&dir).await {
            bail_public!(_, "Failed to create {}: {}", dir.display(), e);
        }
        if let Err(e) = tokio::fs::write(&path, json).await {
            bail_public!(_, "Failed to write {}: {}", path.display(), e);
        }
        info!(path = %path.display(), "exported backup");

        Ok(format!(
            "Exported {} task(s) and {} habit(s) to {}",
            snapshot.document.tasks.len(),
            snapshot.document.habits.len(),
            path.display()
        ))
    }

    /// Replaces all planner data with the contents of a backup file.
    pub async fn handle_import_data(&self, path: String) -> McpResult<String> {
        let raw = match tokio::fs::read_to_string(path.trim()).await {
            Ok(raw) => raw,
            Err(e) => bail_public!(_, "Failed to read {}: {}", path, e),
        };
        let document = planner_result(self.planner.import_data(&raw))?;
        self.runtime
            .reset_all(document.timer_settings, document.timer_stats);
        Ok(format!(
            "Data imported successfully: {} task(s), {} habit(s)",
            document.tasks.len(),
            document.habits.len()
        ))
    }

    /// Erases everything; refuses to run without `confirm`.
    pub async fn handle_clear_all_data(&self, confirm: bool) -> McpResult<String> {
        if !confirm {
            bail_public!(
                _,
                "Clearing deletes all planner data. Call again with confirm=true to proceed."
            );
        }
        let document = planner_result(self.planner.clear_all_data())?;
        self.runtime
            .reset_all(document.timer_settings, document.timer_stats);
        Ok("All data cleared".to_string())
    }
}
