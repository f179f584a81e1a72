//! Error types for the study planner engine
//!
//! Not-found outcomes are expressed as `Option::None` by the planner
//! operations and never appear here.

use thiserror::Error;

/// Failures of the persistence medium or of the persisted payload
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persisted data under key '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors reported by planner operations
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Malformed input: empty title, unparsable date, malformed backup payload
    #[error("{0}")]
    Validation(String),
    /// Backing medium unreadable or corrupt
    #[error("storage fault: {0}")]
    Storage(#[from] StorageError),
}

impl PlannerError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlannerError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PlannerError::Validation(_))
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
