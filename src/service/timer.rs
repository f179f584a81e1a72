//! Persisted timer settings and statistics

use super::PlannerService;
use crate::error::PlannerResult;
use crate::planner::{TimerSettings, TimerSettingsUpdate, TimerStats, TimerStatsUpdate};
use tracing::{debug, info};

impl PlannerService {
    pub fn timer_settings(&self) -> PlannerResult<TimerSettings> {
        Ok(self.document()?.timer_settings)
    }

    pub fn update_timer_settings(&self, update: TimerSettingsUpdate) -> PlannerResult<TimerSettings> {
        let settings = self.mutate(|doc| {
            let merged = update.merged_into(doc.timer_settings);
            merged.validate()?;
            doc.timer_settings = merged;
            Ok(merged)
        })?;
        info!(?settings, "timer settings updated");
        Ok(settings)
    }

    pub fn timer_stats(&self) -> PlannerResult<TimerStats> {
        Ok(self.document()?.timer_stats)
    }

    /// Merge counters; a counter may never go down
    pub fn update_timer_stats(&self, update: TimerStatsUpdate) -> PlannerResult<TimerStats> {
        let stats = self.mutate(|doc| {
            let merged = update.merged_into(doc.timer_stats)?;
            doc.timer_stats = merged;
            Ok(merged)
        })?;
        info!(?stats, "timer stats updated");
        Ok(stats)
    }

    /// Count one finished focus session of `minutes` into the stored counters
    pub(crate) fn record_focus_session(&self, minutes: u32) -> PlannerResult<TimerStats> {
        let stats = self.mutate(|doc| {
            doc.timer_stats.record_focus_session(minutes);
            Ok(doc.timer_stats)
        })?;
        debug!(minutes, total_sessions = stats.total_sessions, "focus session recorded");
        Ok(stats)
    }
}
