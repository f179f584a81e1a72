//! Deserialization of stored and imported tasks
//!
//! Older documents carry the deadline under `dueDate` (sometimes next to a
//! `deadline` key holding the same instant). Both are read through a helper
//! and folded into the single `deadline` field; `deadline` wins when both
//! are present.

use super::instant::parse_instant;
use super::task::{Priority, Task, TaskStatus};
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    status: Option<TaskStatus>,
    created_at: String,
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = TaskRecord::deserialize(deserializer)?;

        let raw_deadline = record
            .deadline
            .filter(|d| !d.trim().is_empty())
            .or(record.due_date.filter(|d| !d.trim().is_empty()));
        let deadline = match raw_deadline {
            Some(raw) => Some(parse_instant(&raw).ok_or_else(|| {
                D::Error::custom(format!("task '{}' has invalid deadline '{}'", record.id, raw))
            })?),
            None => None,
        };

        let created_at = parse_instant(&record.created_at).ok_or_else(|| {
            D::Error::custom(format!(
                "task '{}' has invalid createdAt '{}'",
                record.id, record.created_at
            ))
        })?;

        Ok(Task {
            id: record.id,
            title: record.title,
            description: record.description.unwrap_or_default(),
            deadline,
            priority: record.priority.unwrap_or_default(),
            category: record.category.unwrap_or_default(),
            status: record.status.unwrap_or_default(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_due_date_is_folded_into_deadline() {
        let json = r#"{
            "id": "1",
            "title": "Complete React Assignment",
            "description": "Build a todo app with React hooks",
            "dueDate": "2025-01-27T10:00:00.000Z",
            "priority": "high",
            "category": "Programming",
            "status": "in-progress",
            "createdAt": "2025-01-20T08:00:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(
            task.deadline,
            Some(Utc.with_ymd_and_hms(2025, 1, 27, 10, 0, 0).unwrap())
        );
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_deadline_wins_over_due_date() {
        let json = r#"{
            "id": "1",
            "title": "Read",
            "dueDate": "2025-01-27",
            "deadline": "2025-01-28T09:00:00.000Z",
            "createdAt": "2025-01-20T08:00:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(
            task.deadline,
            Some(Utc.with_ymd_and_hms(2025, 1, 28, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_null_and_missing_fields_default() {
        let json = r#"{
            "id": "1",
            "title": "Read",
            "dueDate": null,
            "createdAt": "2025-01-20T08:00:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.deadline.is_none());
        assert_eq!(task.description, "");
        assert_eq!(task.category, "");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_invalid_deadline_is_rejected() {
        let json = r#"{
            "id": "1",
            "title": "Read",
            "deadline": "Invalid Date",
            "createdAt": "2025-01-20T08:00:00.000Z"
        }"#;
        let err = serde_json::from_str::<Task>(json).unwrap_err();
        assert!(err.to_string().contains("invalid deadline"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let json = r#"{
            "id": "1",
            "title": "Read",
            "deadline": "2025-01-28T09:00:00.000Z",
            "createdAt": "2025-01-20T08:00:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        let again: Task = serde_json::from_str(&serde_json::to_string(&task).unwrap()).unwrap();
        assert_eq!(task, again);
    }
}
