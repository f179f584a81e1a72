//! Backup snapshots
//!
//! A snapshot is the document plus `exportDate` and `version`. Importing
//! checks the payload shape before anything is handed back, so a rejected
//! file can never reach the store.

use super::document::Document;
use super::instant;
use crate::error::{PlannerError, PlannerResult, StorageError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

pub const SNAPSHOT_VERSION: &str = "1.0";

/// Portable serialization of the document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(flatten)]
    pub document: Document,
    #[serde(serialize_with = "instant::canonical::serialize")]
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl Snapshot {
    /// Pretty-printed JSON text of the snapshot
    pub fn to_json(&self) -> PlannerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StorageError::Encode(e).into())
    }
}

/// Wrap a document for export
pub fn export_snapshot(document: &Document, now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        document: document.clone(),
        export_date: instant::truncate_to_millis(now),
        version: SNAPSHOT_VERSION.to_string(),
    }
}

/// File name used for exports made on `date`
///
/// `date` is the local calendar date (`Clock::today`), not the UTC date of
/// `exportDate`, so the two can differ around midnight.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("study-planner-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Parse and validate a backup payload into a replacement document
pub fn import_snapshot(raw: &str) -> PlannerResult<Document> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| PlannerError::validation(format!("Invalid backup file: {}", e)))?;

    let Some(object) = value.as_object() else {
        return Err(PlannerError::validation(
            "Invalid data format: backup must be a JSON object",
        ));
    };
    for field in ["tasks", "habits"] {
        if !object.get(field).is_some_and(Value::is_array) {
            return Err(PlannerError::validation(format!(
                "Invalid data format: '{}' must be present as an array",
                field
            )));
        }
    }

    // exportDate and version are not part of the document and are ignored here
    let document: Document = serde_json::from_value(value)
        .map_err(|e| PlannerError::validation(format!("Invalid data format: {}", e)))?;
    document.validate()?;
    Ok(document)
}
