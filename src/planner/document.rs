use super::habit::Habit;
use super::task::Task;
use crate::error::{PlannerError, PlannerResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Pomodoro durations (minutes) and long-break cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerSettings {
    #[serde(alias = "focus_time")]
    pub focus_time: u32,
    #[serde(alias = "short_break")]
    pub short_break: u32,
    #[serde(alias = "long_break")]
    pub long_break: u32,
    #[serde(alias = "sessions_until_long_break")]
    pub sessions_until_long_break: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_time: 25,
            short_break: 5,
            long_break: 15,
            sessions_until_long_break: 4,
        }
    }
}

impl TimerSettings {
    pub fn validate(&self) -> PlannerResult<()> {
        for (name, value) in [
            ("focusTime", self.focus_time),
            ("shortBreak", self.short_break),
            ("longBreak", self.long_break),
            ("sessionsUntilLongBreak", self.sessions_until_long_break),
        ] {
            if value < 1 {
                return Err(PlannerError::validation(format!(
                    "Timer setting '{}' must be at least 1 (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Partial timer settings update
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerSettingsUpdate {
    pub focus_time: Option<u32>,
    pub short_break: Option<u32>,
    pub long_break: Option<u32>,
    pub sessions_until_long_break: Option<u32>,
}

impl TimerSettingsUpdate {
    pub fn merged_into(self, current: TimerSettings) -> TimerSettings {
        TimerSettings {
            focus_time: self.focus_time.unwrap_or(current.focus_time),
            short_break: self.short_break.unwrap_or(current.short_break),
            long_break: self.long_break.unwrap_or(current.long_break),
            sessions_until_long_break: self
                .sessions_until_long_break
                .unwrap_or(current.sessions_until_long_break),
        }
    }
}

/// Focus session counters (minutes for the time fields)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerStats {
    pub sessions_today: u32,
    pub focus_time_today: u32,
    pub total_sessions: u32,
    pub total_focus_time: u32,
}

impl TimerStats {
    /// Count one finished focus session of `minutes` length
    pub fn record_focus_session(&mut self, minutes: u32) {
        self.sessions_today = self.sessions_today.saturating_add(1);
        self.total_sessions = self.total_sessions.saturating_add(1);
        self.focus_time_today = self.focus_time_today.saturating_add(minutes);
        self.total_focus_time = self.total_focus_time.saturating_add(minutes);
    }
}

/// Partial timer stats update
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerStatsUpdate {
    pub sessions_today: Option<u32>,
    pub focus_time_today: Option<u32>,
    pub total_sessions: Option<u32>,
    pub total_focus_time: Option<u32>,
}

impl TimerStatsUpdate {
    /// Merge into `current`; counters may only grow
    pub fn merged_into(self, current: TimerStats) -> PlannerResult<TimerStats> {
        let pick = |name: &str, new: Option<u32>, old: u32| -> PlannerResult<u32> {
            match new {
                Some(value) if value < old => Err(PlannerError::validation(format!(
                    "Timer stat '{}' cannot decrease (current {}, requested {})",
                    name, old, value
                ))),
                Some(value) => Ok(value),
                None => Ok(old),
            }
        };
        Ok(TimerStats {
            sessions_today: pick("sessionsToday", self.sessions_today, current.sessions_today)?,
            focus_time_today: pick(
                "focusTimeToday",
                self.focus_time_today,
                current.focus_time_today,
            )?,
            total_sessions: pick("totalSessions", self.total_sessions, current.total_sessions)?,
            total_focus_time: pick(
                "totalFocusTime",
                self.total_focus_time,
                current.total_focus_time,
            )?,
        })
    }
}

/// Application preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    #[serde(alias = "dark_mode")]
    pub dark_mode: bool,
    pub notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications: true,
        }
    }
}

/// Partial application settings update
#[derive(Debug, Clone, Copy, Default)]
pub struct AppSettingsUpdate {
    pub dark_mode: Option<bool>,
    pub notifications: Option<bool>,
}

impl AppSettingsUpdate {
    pub fn merged_into(self, current: AppSettings) -> AppSettings {
        AppSettings {
            dark_mode: self.dark_mode.unwrap_or(current.dark_mode),
            notifications: self.notifications.unwrap_or(current.notifications),
        }
    }
}

/// The single persisted root of all planner state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub timer_settings: TimerSettings,
    #[serde(default)]
    pub timer_stats: TimerStats,
    #[serde(default)]
    pub settings: AppSettings,
}

impl Document {
    /// Empty collections with the given singletons
    pub fn with_settings(timer_settings: TimerSettings, settings: AppSettings) -> Self {
        Self {
            timer_settings,
            settings,
            ..Self::default()
        }
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn find_habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn find_habit_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == id)
    }

    /// Remove a task; returns whether anything was removed
    pub fn remove_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove a habit; returns whether anything was removed
    pub fn remove_habit(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        self.habits.len() != before
    }

    /// Generate an unused task id
    pub fn next_task_id(&self, now: DateTime<Utc>) -> String {
        generate_id(now, |id| self.find_task(id).is_some())
    }

    /// Generate an unused habit id
    pub fn next_habit_id(&self, now: DateTime<Utc>) -> String {
        generate_id(now, |id| self.find_habit(id).is_some())
    }

    /// Clear stale `completedToday` flags; returns how many habits changed
    pub fn reconcile_day(&mut self, today: NaiveDate) -> usize {
        self.habits
            .iter_mut()
            .filter_map(|h| h.reconcile_day(today).then_some(()))
            .count()
    }

    /// Check the structural invariants of a document coming from outside
    pub fn validate(&self) -> PlannerResult<()> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if task.id.trim().is_empty() {
                return Err(PlannerError::validation("Task with empty id"));
            }
            if !seen.insert(task.id.as_str()) {
                return Err(PlannerError::validation(format!(
                    "Duplicate task id '{}'",
                    task.id
                )));
            }
            if task.title.trim().is_empty() {
                return Err(PlannerError::validation(format!(
                    "Task '{}' has an empty title",
                    task.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for habit in &self.habits {
            if habit.id.trim().is_empty() {
                return Err(PlannerError::validation("Habit with empty id"));
            }
            if !seen.insert(habit.id.as_str()) {
                return Err(PlannerError::validation(format!(
                    "Duplicate habit id '{}'",
                    habit.id
                )));
            }
            if habit.name.trim().is_empty() {
                return Err(PlannerError::validation(format!(
                    "Habit '{}' has an empty name",
                    habit.id
                )));
            }
        }

        self.timer_settings.validate()
    }
}

/// Millisecond timestamp id, bumped until `taken` rejects it no longer
fn generate_id(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !taken(&id) {
            return id;
        }
        candidate += 1;
    }
}
