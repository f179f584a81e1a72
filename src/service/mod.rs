//! Planner operations over the persisted document
//!
//! Each mutating operation is a single load, mutate, save cycle through
//! [`Store::update`]. Reads reconcile the habit day rollover in memory; the
//! reconciled flags reach the medium with the next mutation.

mod backup;
mod habits;
mod settings;
mod tasks;
mod timer;

use crate::clock::{Clock, SystemClock};
use crate::error::PlannerResult;
use crate::planner::Document;
use crate::storage::Store;
use std::sync::Arc;

pub struct PlannerService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl PlannerService {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Service on the wall clock
    pub fn with_system_clock(store: Store) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current document as the views see it
    pub fn document(&self) -> PlannerResult<Document> {
        let mut document = self.store.load()?;
        document.reconcile_day(self.clock.today());
        Ok(document)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Document) -> PlannerResult<R>) -> PlannerResult<R> {
        let today = self.clock.today();
        self.store.update(|document| {
            document.reconcile_day(today);
            f(document)
        })
    }
}
