//! Live Pomodoro timer driven by a tokio interval
//!
//! The engine state is in memory only; completed focus sessions are written
//! through to the document so the counters survive a restart.

use crate::error::PlannerResult;
use crate::planner::{
    Completion, Notification, Phase, TimerEngine, TimerSettings, TimerSnapshot, TimerStats,
};
use crate::service::PlannerService;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct TimerRuntime {
    planner: Arc<PlannerService>,
    engine: Arc<Mutex<TimerEngine>>,
    inbox: Arc<Mutex<Vec<Notification>>>,
}

impl TimerRuntime {
    /// Engine seeded from the persisted settings and stats
    pub fn new(planner: Arc<PlannerService>) -> PlannerResult<Self> {
        let document = planner.document()?;
        let engine = TimerEngine::new(document.timer_settings, document.timer_stats);
        Ok(Self {
            planner,
            engine: Arc::new(Mutex::new(engine)),
            inbox: Arc::new(Mutex::new(Vec::new())),
        })
    }

    fn engine(&self) -> MutexGuard<'_, TimerEngine> {
        self.engine.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn inbox(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.inbox.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Advance one second; returns the completion when a phase ran out
    pub fn tick_once(&self) -> Option<Completion> {
        let completion = {
            let mut engine = self.engine();
            if !engine.count_down() {
                return None;
            }
            match engine.phase() {
                Phase::Focus => self.settle_focus(&mut engine),
                Phase::ShortBreak | Phase::LongBreak => engine.complete(),
            }
        };
        self.announce(&completion);
        Some(completion)
    }

    /// Count the finished session into the stored stats and let the engine
    /// continue from what was stored
    ///
    /// The engine lock is held across the write, so a completion never
    /// interleaves with another tick.
    fn settle_focus(&self, engine: &mut TimerEngine) -> Completion {
        match self.planner.record_focus_session(engine.settings().focus_time) {
            Ok(stats) => engine.finish_focus(stats),
            Err(e) => {
                warn!(error = %e, "failed to persist timer stats");
                engine.complete()
            }
        }
    }

    fn announce(&self, completion: &Completion) {
        info!(
            finished = %completion.finished,
            next = %completion.next,
            "timer phase completed"
        );
        let Some(notification) = &completion.notification else {
            return;
        };
        match self.planner.settings() {
            Ok(settings) if settings.notifications => self.inbox().push(notification.clone()),
            Ok(_) => debug!("notifications disabled, dropping completion notice"),
            Err(e) => warn!(error = %e, "failed to read settings for notification"),
        }
    }

    /// Tick the engine every `period` until the task is aborted
    pub fn spawn_ticker(&self, period: Duration) -> JoinHandle<()> {
        let runtime = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                runtime.tick_once();
            }
        })
    }

    pub fn start(&self) -> bool {
        let started = self.engine().start();
        if started {
            info!("timer started");
        }
        started
    }

    pub fn pause(&self) -> bool {
        let paused = self.engine().pause();
        if paused {
            info!("timer paused");
        }
        paused
    }

    pub fn reset(&self) {
        self.engine().reset();
        info!("timer reset");
    }

    /// Jump to the next phase without counting the current one
    pub fn skip(&self) -> Completion {
        // The break choice follows the stored sessionsToday
        let stored = self.planner.timer_stats();
        let mut engine = self.engine();
        match stored {
            Ok(stats) => engine.replace_stats(stats),
            Err(e) => warn!(error = %e, "failed to read timer stats, skipping on cached counters"),
        }
        let completion = engine.skip();
        drop(engine);
        info!(
            skipped = %completion.finished,
            next = %completion.next,
            "timer phase skipped"
        );
        completion
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine().snapshot()
    }

    pub fn stats(&self) -> TimerStats {
        *self.engine().stats()
    }

    /// Take every queued notification, oldest first
    pub fn drain_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inbox())
    }

    pub fn apply_settings(&self, settings: TimerSettings) {
        self.engine().apply_settings(settings);
    }

    pub fn sync_stats(&self, stats: TimerStats) {
        self.engine().replace_stats(stats);
    }

    /// Fresh engine after the document was replaced or cleared
    pub fn reset_all(&self, settings: TimerSettings, stats: TimerStats) {
        *self.engine() = TimerEngine::new(settings, stats);
        self.inbox().clear();
        info!("timer state reinitialised");
    }
}
