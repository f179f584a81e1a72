use super::instant::{self, parse_instant};
use crate::error::{PlannerError, PlannerResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "Invalid priority '{}'. Valid options are: low, medium, high",
                other
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

/// Task progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Next status in the pending → in-progress → completed → pending cycle
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!(
                "Invalid status '{}'. Valid options are: pending, in-progress, completed",
                other
            )),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        })
    }
}

/// A study task
///
/// Deserialization lives in `serde_impl.rs` because stored data may carry
/// the deadline under the legacy `dueDate` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "instant::canonical_option::serialize")]
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub category: String,
    pub status: TaskStatus,
    #[serde(serialize_with = "instant::canonical::serialize")]
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub deadline: Option<String>,
    pub priority: Priority,
    pub category: String,
    pub status: TaskStatus,
}

/// Partial update of a task; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    /// An empty string clears the deadline
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Normalize a caller-supplied deadline to a canonical instant
///
/// `None` and empty input mean "no deadline"; anything else must parse.
pub fn normalize_deadline(raw: Option<&str>) -> PlannerResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_instant(value).map(Some).ok_or_else(|| {
            PlannerError::validation(format!(
                "Invalid deadline '{}'. Use an ISO-8601 date or date-time (e.g., '2025-01-27T10:00:00')",
                value
            ))
        }),
    }
}

fn validate_title(title: &str) -> PlannerResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(PlannerError::validation("Task title is required"));
    }
    Ok(title.to_string())
}

impl Task {
    /// Build a task from caller input, assigning identity and creation time
    pub fn create(id: String, fields: NewTask, created_at: DateTime<Utc>) -> PlannerResult<Self> {
        let title = validate_title(&fields.title)?;
        let deadline = normalize_deadline(fields.deadline.as_deref())?;
        Ok(Self {
            id,
            title,
            description: fields.description,
            deadline,
            priority: fields.priority,
            category: fields.category,
            status: fields.status,
            created_at: instant::truncate_to_millis(created_at),
        })
    }

    /// Merge a partial update into this task
    ///
    /// Validation happens before any field is touched, so a rejected update
    /// leaves the task as it was.
    pub fn apply(&mut self, update: TaskUpdate) -> PlannerResult<()> {
        let title = update.title.as_deref().map(validate_title).transpose()?;
        let deadline = update
            .deadline
            .as_deref()
            .map(|raw| normalize_deadline(Some(raw)))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(deadline) = deadline {
            self.deadline = deadline;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }
}
