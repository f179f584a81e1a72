//! Study planner domain models and business logic
//!
//! Split into submodules:
//! - `document`: the persisted root and its singletons
//! - `task`, `habit`: the two entity collections
//! - `timer`: the Pomodoro state machine
//! - `snapshot`: backup export/import
//! - `queries`: read-only projections used by the views
//! - `instant`: canonical instant strings
//! - `serde_impl`: task deserialization with legacy field folding

mod document;
mod habit;
pub mod instant;
pub mod queries;
mod serde_impl;
pub mod snapshot;
mod task;
pub mod timer;

pub use document::{
    AppSettings, AppSettingsUpdate, Document, TimerSettings, TimerSettingsUpdate, TimerStats,
    TimerStatsUpdate,
};
pub use habit::Habit;
pub use queries::{HabitSummary, Overview, TaskFilter, TaskSummary};
pub use snapshot::Snapshot;
pub use task::{NewTask, Priority, Task, TaskStatus, TaskUpdate, normalize_deadline};
pub use timer::{Completion, Notification, Phase, TimerEngine, TimerSnapshot};
