//! Pomodoro timer state machine
//!
//! The engine cycles Focus → (Short|Long)Break → Focus. It never runs the
//! next phase on its own: every completion leaves the timer paused at the
//! start of the next phase. Only a Focus phase that runs down to zero
//! counts towards the statistics; skipping never does.

use super::document::{TimerSettings, TimerStats};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Human-readable phase title
    pub fn title(self) -> &'static str {
        match self {
            Phase::Focus => "Focus Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Full length of this phase in seconds
    pub fn duration_seconds(self, settings: &TimerSettings) -> u32 {
        let minutes = match self {
            Phase::Focus => settings.focus_time,
            Phase::ShortBreak => settings.short_break,
            Phase::LongBreak => settings.long_break,
        };
        minutes.saturating_mul(60)
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Focus)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Focus => "focus",
            Phase::ShortBreak => "shortBreak",
            Phase::LongBreak => "longBreak",
        })
    }
}

/// Something the presentation layer should tell the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// The phase that just ended
    pub phase: Phase,
    pub title: String,
    pub message: String,
}

/// Outcome of leaving a phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub finished: Phase,
    pub next: Phase,
    /// Updated statistics when a focus session was counted
    pub stats: Option<TimerStats>,
    /// Present for natural completions only
    pub notification: Option<Notification>,
}

/// Read-only view of the timer for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub title: &'static str,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub running: bool,
    pub clock: String,
    pub progress_percent: f64,
}

/// Format seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    settings: TimerSettings,
    stats: TimerStats,
    phase: Phase,
    remaining_seconds: u32,
    running: bool,
}

impl TimerEngine {
    pub fn new(settings: TimerSettings, stats: TimerStats) -> Self {
        Self {
            remaining_seconds: Phase::Focus.duration_seconds(&settings),
            settings,
            stats,
            phase: Phase::Focus,
            running: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn stats(&self) -> &TimerStats {
        &self.stats
    }

    /// Returns false when the timer was already running
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    /// Returns false when the timer was already paused
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Option<Completion> {
        self.count_down().then(|| self.complete())
    }

    /// Take one second off a running phase; true when it just ran out
    ///
    /// The phase is left in place for the caller to complete.
    pub fn count_down(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    /// Finish the current phase as if its time ran out
    pub fn complete(&mut self) -> Completion {
        let finished = self.phase;
        match finished {
            Phase::Focus => {
                let mut stats = self.stats;
                stats.record_focus_session(self.settings.focus_time);
                self.finish_focus(stats)
            }
            Phase::ShortBreak | Phase::LongBreak => {
                let notification = Notification {
                    phase: finished,
                    title: "Break Complete!".to_string(),
                    message: "Ready to focus again? Start your next session.".to_string(),
                };
                self.enter(Phase::Focus);
                Completion {
                    finished,
                    next: Phase::Focus,
                    stats: None,
                    notification: Some(notification),
                }
            }
        }
    }

    /// Finish a Focus phase against counters that already include it
    ///
    /// `stats` becomes the engine's copy and its `sessions_today` picks the
    /// break that follows.
    pub fn finish_focus(&mut self, stats: TimerStats) -> Completion {
        self.stats = stats;
        let next = if self.long_break_due(stats.sessions_today) {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        };
        let message = format!(
            "Great job! You completed a {}-minute focus session. Take a {}-minute {}.",
            self.settings.focus_time,
            next.duration_seconds(&self.settings) / 60,
            next.title().to_lowercase()
        );
        self.enter(next);
        Completion {
            finished: Phase::Focus,
            next,
            stats: Some(stats),
            notification: Some(Notification {
                phase: Phase::Focus,
                title: "Focus Session Complete!".to_string(),
                message,
            }),
        }
    }

    /// Leave the current phase early without counting it
    pub fn skip(&mut self) -> Completion {
        let finished = self.phase;
        let next = match finished {
            Phase::Focus if self.long_break_due(self.stats.sessions_today.saturating_add(1)) => {
                Phase::LongBreak
            }
            Phase::Focus => Phase::ShortBreak,
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };
        self.enter(next);
        Completion {
            finished,
            next,
            stats: None,
            notification: None,
        }
    }

    /// Back to a paused, full-length Focus phase; stats are kept
    pub fn reset(&mut self) {
        self.enter(Phase::Focus);
    }

    /// Replace the settings copy
    ///
    /// A paused timer is rewound to the full length of its phase under the
    /// new settings; a running one keeps counting down.
    pub fn apply_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
        if !self.running {
            self.remaining_seconds = self.phase.duration_seconds(&self.settings);
        }
    }

    /// Replace the stats copy (after an external update or a clear)
    pub fn replace_stats(&mut self, stats: TimerStats) {
        self.stats = stats;
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let total = self.phase.duration_seconds(&self.settings);
        let progress_percent = if total == 0 {
            100.0
        } else {
            f64::from(total.saturating_sub(self.remaining_seconds)) / f64::from(total) * 100.0
        };
        TimerSnapshot {
            phase: self.phase,
            title: self.phase.title(),
            remaining_seconds: self.remaining_seconds,
            total_seconds: total,
            running: self.running,
            clock: format_clock(self.remaining_seconds),
            progress_percent,
        }
    }

    fn long_break_due(&self, sessions: u32) -> bool {
        let cadence = self.settings.sessions_until_long_break.max(1);
        sessions % cadence == 0
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining_seconds = phase.duration_seconds(&self.settings);
        self.running = false;
    }
}
