//! Study Planner MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a personal
//! study planner: tasks with deadlines, daily habits with streaks, and a
//! Pomodoro focus timer. All state lives in one JSON document that is
//! persisted after every change.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `StudyPlannerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `planner` module - Data model, streaks, timer state machine, backups
//! - **Persistence Layer**: `storage` module - Key-value medium holding the JSON document
//!
//! # Example
//!
//! ```no_run
//! use study_planner::{Config, StudyPlannerHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = StudyPlannerHandler::new("planner-data", &Config::default())?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
mod formatting;
mod handlers;
pub mod logging;
pub mod planner;
pub mod runtime;
pub mod service;
pub mod storage;
mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{PlannerError, PlannerResult, StorageError};
pub use planner::{
    AppSettings, Document, Habit, Phase, Priority, Task, TaskStatus, TimerSettings, TimerStats,
};
pub use runtime::TimerRuntime;
pub use service::PlannerService;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, Store};

/// MCP Server handler for the study planner
///
/// Holds the planner service, the live timer and the directory exports go
/// to by default. Cloning the inner `Arc`s lets the ticker task share the
/// timer with tool calls.
pub struct StudyPlannerHandler {
    pub(crate) planner: Arc<PlannerService>,
    pub(crate) runtime: TimerRuntime,
    pub(crate) data_dir: PathBuf,
}

impl StudyPlannerHandler {
    /// Create a handler storing its document under `data_dir`
    ///
    /// # Arguments
    /// * `data_dir` - Directory holding the planner document and default exports
    /// * `config` - Storage key and first-use defaults
    pub fn new(data_dir: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let store = Store::with_defaults(
            FileKeyValueStore::new(&data_dir),
            config.storage.key.clone(),
            config.default_document(),
        );
        Ok(Self::with_service(
            PlannerService::with_system_clock(store),
            data_dir,
        )?)
    }

    /// Create a handler around an existing service
    pub fn with_service(planner: PlannerService, data_dir: impl Into<PathBuf>) -> PlannerResult<Self> {
        let planner = Arc::new(planner);
        let runtime = TimerRuntime::new(planner.clone())?;
        Ok(Self {
            planner,
            runtime,
            data_dir: data_dir.into(),
        })
    }

    pub fn planner(&self) -> &PlannerService {
        &self.planner
    }

    pub fn runtime(&self) -> &TimerRuntime {
        &self.runtime
    }

    /// Start the background task that drives the timer
    pub fn spawn_ticker(&self, period: Duration) -> JoinHandle<()> {
        self.runtime.spawn_ticker(period)
    }
}

/// Personal study planner: tasks with deadlines, daily habits and a Pomodoro focus timer.
///
/// Key concepts:
/// - **Tasks**: title, deadline, priority (low/medium/high), category and status
///   (pending → in-progress → completed)
/// - **Habits**: toggled once per day; consecutive days build a streak
/// - **Timer**: Focus sessions alternate with short breaks, every Nth break is long.
///   Only focus sessions that run to zero count towards the stats.
///
/// IDs are numeric strings assigned on creation (e.g., "1737964800000").
#[mcp_server]
impl McpServer for StudyPlannerHandler {
    /// **List tasks**: All tasks in creation order, optionally filtered.
    /// **Filters**: search matches title/description (case-insensitive); priority low/medium/high; status pending/in-progress/completed.
    #[tool]
    async fn list_tasks(
        &self,
        /// Search text (optional)
        search: Option<String>,
        /// Priority filter: low/medium/high (optional)
        priority: Option<String>,
        /// Status filter: pending/in-progress/completed (optional)
        status: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_tasks(search, priority, status).await
    }

    /// **Add task**: Create a study task. Title and deadline are required.
    /// **Deadline**: YYYY-MM-DDTHH:MM (local time), YYYY-MM-DD, or RFC 3339.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn add_task(
        &self,
        /// Title: what needs doing
        title: String,
        /// Deadline, e.g. "2025-01-27T10:00"
        deadline: String,
        /// Description (optional)
        description: Option<String>,
        /// Priority: low/medium/high, default medium (optional)
        priority: Option<String>,
        /// Category, e.g. "Math" (optional)
        category: Option<String>,
        /// Status: pending/in-progress/completed, default pending (optional)
        status: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(title, deadline, description, priority, category, status)
            .await
    }

    /// **Update task**: Change any task field. Omitted fields stay as they are.
    /// **Tip**: Use empty string "" to clear description, category or deadline.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_task(
        &self,
        /// ID of task to update
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// New description, ""=clear (optional)
        description: Option<String>,
        /// New deadline, ""=clear (optional)
        deadline: Option<String>,
        /// New priority: low/medium/high (optional)
        priority: Option<String>,
        /// New category, ""=clear (optional)
        category: Option<String>,
        /// New status: pending/in-progress/completed (optional)
        status: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(id, title, description, deadline, priority, category, status)
            .await
    }

    /// **Advance task**: Move a task to its next status: pending → in-progress → completed → pending.
    #[tool]
    async fn advance_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_advance_task(id).await
    }

    /// **Delete task**: Remove a task permanently. Unknown IDs are ignored.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_task(id).await
    }

    /// **Tasks on a day**: Tasks whose deadline falls on the given local date.
    #[tool]
    async fn tasks_on(
        &self,
        /// Date YYYY-MM-DD, default today (optional)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_tasks_on(date).await
    }

    /// **Overview**: Today's dashboard: tasks due today, completion rates, streaks, upcoming deadlines and focus stats.
    #[tool]
    async fn overview(&self) -> McpResult<String> {
        self.handle_overview().await
    }

    /// **List habits**: All habits with today's completion and current streak.
    #[tool]
    async fn list_habits(&self) -> McpResult<String> {
        self.handle_list_habits().await
    }

    /// **Add habit**: Start tracking a daily habit.
    #[tool]
    async fn add_habit(
        &self,
        /// Habit name, e.g. "Read for 30 minutes"
        name: String,
    ) -> McpResult<String> {
        self.handle_add_habit(name).await
    }

    /// **Toggle habit**: Mark a habit done for today, or undo today's completion.
    /// Completing on consecutive days extends the streak; a gap restarts it at 1.
    #[tool]
    async fn toggle_habit(
        &self,
        /// Habit ID
        id: String,
    ) -> McpResult<String> {
        self.handle_toggle_habit(id).await
    }

    /// **Delete habit**: Stop tracking a habit. Unknown IDs are ignored.
    #[tool]
    async fn delete_habit(
        &self,
        /// Habit ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_habit(id).await
    }

    /// **Timer status**: Current phase, time left and progress. Also returns any session-complete notices since the last call.
    #[tool]
    async fn timer_status(&self) -> McpResult<String> {
        self.handle_timer_status().await
    }

    /// **Start timer**: Start or resume the countdown of the current phase.
    #[tool]
    async fn timer_start(&self) -> McpResult<String> {
        self.handle_timer_start().await
    }

    /// **Pause timer**: Stop the countdown, keeping the time left.
    #[tool]
    async fn timer_pause(&self) -> McpResult<String> {
        self.handle_timer_pause().await
    }

    /// **Reset timer**: Back to a full, paused focus session. Stats are kept.
    #[tool]
    async fn timer_reset(&self) -> McpResult<String> {
        self.handle_timer_reset().await
    }

    /// **Skip phase**: Jump to the next phase. A skipped focus session does not count.
    #[tool]
    async fn timer_skip(&self) -> McpResult<String> {
        self.handle_timer_skip().await
    }

    /// **Timer settings**: Focus and break lengths in minutes, and how many sessions come before a long break.
    #[tool]
    async fn get_timer_settings(&self) -> McpResult<String> {
        self.handle_get_timer_settings().await
    }

    /// **Update timer settings**: All values must be at least 1. A paused timer picks up the new length immediately.
    #[tool]
    async fn update_timer_settings(
        &self,
        /// Focus length in minutes (optional)
        focus_time: Option<u32>,
        /// Short break length in minutes (optional)
        short_break: Option<u32>,
        /// Long break length in minutes (optional)
        long_break: Option<u32>,
        /// Focus sessions before a long break (optional)
        sessions_until_long_break: Option<u32>,
    ) -> McpResult<String> {
        self.handle_update_timer_settings(
            focus_time,
            short_break,
            long_break,
            sessions_until_long_break,
        )
        .await
    }

    /// **Timer stats**: Focus sessions and minutes, today and in total.
    #[tool]
    async fn get_timer_stats(&self) -> McpResult<String> {
        self.handle_get_timer_stats().await
    }

    /// **Update timer stats**: Overwrite counters. Counters can only go up.
    #[tool]
    async fn update_timer_stats(
        &self,
        /// Sessions today (optional)
        sessions_today: Option<u32>,
        /// Focus minutes today (optional)
        focus_time_today: Option<u32>,
        /// Total sessions (optional)
        total_sessions: Option<u32>,
        /// Total focus minutes (optional)
        total_focus_time: Option<u32>,
    ) -> McpResult<String> {
        self.handle_update_timer_stats(
            sessions_today,
            focus_time_today,
            total_sessions,
            total_focus_time,
        )
        .await
    }

    /// **Settings**: Dark mode and notification preferences.
    #[tool]
    async fn get_settings(&self) -> McpResult<String> {
        self.handle_get_settings().await
    }

    /// **Update settings**: With notifications off, timer_status reports no session-complete notices.
    #[tool]
    async fn update_settings(
        &self,
        /// Dark mode on/off (optional)
        dark_mode: Option<bool>,
        /// Notifications on/off (optional)
        notifications: Option<bool>,
    ) -> McpResult<String> {
        self.handle_update_settings(dark_mode, notifications).await
    }

    /// **Export**: Write a JSON backup named study-planner-backup-YYYY-MM-DD.json.
    #[tool]
    async fn export_data(
        &self,
        /// Target directory, default the data directory (optional)
        directory: Option<String>,
    ) -> McpResult<String> {
        self.handle_export_data(directory).await
    }

    /// **Import**: Replace ALL planner data with a backup file. Rejected files change nothing.
    #[tool]
    async fn import_data(
        &self,
        /// Path of the backup JSON file
        path: String,
    ) -> McpResult<String> {
        self.handle_import_data(path).await
    }

    /// **Clear all data**: Delete every task, habit and stat and start over. Requires confirm=true.
    #[tool]
    async fn clear_all_data(
        &self,
        /// Must be true
        confirm: bool,
    ) -> McpResult<String> {
        self.handle_clear_all_data(confirm).await
    }
}
