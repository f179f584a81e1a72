//! Timer handlers
//!
//! Settings and stats changes are pushed into the live engine right after
//! they are persisted.

use crate::StudyPlannerHandler;
use crate::formatting;
use crate::planner::timer::format_clock;
use crate::planner::{TimerSettingsUpdate, TimerStatsUpdate};
use crate::validation::planner_result;
use mcp_attr::Result as McpResult;

impl StudyPlannerHandler {
    /// Current timer state; also hands out queued completion notices.
    pub async fn handle_timer_status(&self) -> McpResult<String> {
        let notifications = self.runtime.drain_notifications();
        Ok(formatting::format_timer_status(
            &self.runtime.snapshot(),
            &notifications,
        ))
    }

    pub async fn handle_timer_start(&self) -> McpResult<String> {
        let started = self.runtime.start();
        let snapshot = self.runtime.snapshot();
        if started {
            Ok(format!("Timer started: {} {}", snapshot.title, snapshot.clock))
        } else {
            Ok(format!("Timer already running: {} {}", snapshot.title, snapshot.clock))
        }
    }

    pub async fn handle_timer_pause(&self) -> McpResult<String> {
        let paused = self.runtime.pause();
        let snapshot = self.runtime.snapshot();
        if paused {
            Ok(format!("Timer paused at {} ({})", snapshot.clock, snapshot.title))
        } else {
            Ok(format!("Timer is not running ({} {})", snapshot.title, snapshot.clock))
        }
    }

    pub async fn handle_timer_reset(&self) -> McpResult<String> {
        self.runtime.reset();
        let snapshot = self.runtime.snapshot();
        Ok(format!("Timer reset: {} {}", snapshot.title, snapshot.clock))
    }

    pub async fn handle_timer_skip(&self) -> McpResult<String> {
        let completion = self.runtime.skip();
        let snapshot = self.runtime.snapshot();
        Ok(format!(
            "Skipped {}. Next: {} ({})",
            completion.finished.title(),
            completion.next.title(),
            format_clock(snapshot.remaining_seconds)
        ))
    }

    pub async fn handle_get_timer_settings(&self) -> McpResult<String> {
        let settings = planner_result(self.planner.timer_settings())?;
        Ok(formatting::format_timer_settings(&settings))
    }

    pub async fn handle_update_timer_settings(
        &self,
        focus_time: Option<u32>,
        short_break: Option<u32>,
        long_break: Option<u32>,
        sessions_until_long_break: Option<u32>,
    ) -> McpResult<String> {
        let update = TimerSettingsUpdate {
            focus_time,
            short_break,
            long_break,
            sessions_until_long_break,
        };
        let settings = planner_result(self.planner.update_timer_settings(update))?;
        self.runtime.apply_settings(settings);
        Ok(format!(
            "Timer settings updated\n{}",
            formatting::format_timer_settings(&settings)
        ))
    }

    pub async fn handle_get_timer_stats(&self) -> McpResult<String> {
        let stats = planner_result(self.planner.timer_stats())?;
        Ok(formatting::format_timer_stats(&stats))
    }

    pub async fn handle_update_timer_stats(
        &self,
        sessions_today: Option<u32>,
        focus_time_today: Option<u32>,
        total_sessions: Option<u32>,
        total_focus_time: Option<u32>,
    ) -> McpResult<String> {
        let update = TimerStatsUpdate {
            sessions_today,
            focus_time_today,
            total_sessions,
            total_focus_time,
        };
        let stats = planner_result(self.planner.update_timer_stats(update))?;
        self.runtime.sync_stats(stats);
        Ok(format!(
            "Timer stats updated\n{}",
            formatting::format_timer_stats(&stats)
        ))
    }
}
