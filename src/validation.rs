//! Argument parsing for MCP tools
//!
//! Every failure becomes an `INVALID_PARAMS` error with a message the client
//! may show to the user.

use crate::error::{PlannerError, PlannerResult};
use crate::planner::{Priority, TaskStatus};
use chrono::NaiveDate;
use mcp_attr::{Result as McpResult, bail_public};

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse a priority filter or field value
pub fn parse_priority(raw: &str) -> McpResult<Priority> {
    raw.trim().to_lowercase().parse::<Priority>().map_err(|_| {
        invalid_params(format!(
            "Invalid priority '{}'. Valid priorities: low, medium, high",
            raw
        ))
    })
}

/// Parse a task status filter or field value
pub fn parse_task_status(raw: &str) -> McpResult<TaskStatus> {
    raw.trim().to_lowercase().parse::<TaskStatus>().map_err(|_| {
        invalid_params(format!(
            "Invalid status '{}'. Valid statuses: pending, in-progress, completed",
            raw
        ))
    })
}

/// Parse an optional enum argument, treating "" like an absent one
pub fn parse_optional<T>(
    raw: Option<String>,
    parse: impl Fn(&str) -> McpResult<T>,
) -> McpResult<Option<T>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some),
    }
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date_filter(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Ids are opaque strings; only surrounding whitespace is dropped
pub fn normalize_id(id: &str) -> McpResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid_params("ID must not be empty".to_string()));
    }
    Ok(id.to_string())
}

/// Map a planner failure onto an MCP error
pub fn planner_result<T>(result: PlannerResult<T>) -> McpResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(PlannerError::Validation(message)) => Err(invalid_params(message)),
        Err(e) => bail_public!(_, "{}", e),
    }
}
