//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use std::sync::Arc;
use study_planner::{
    Config, FileKeyValueStore, FixedClock, MemoryKeyValueStore, PlannerService, Store,
    StudyPlannerHandler,
};
use tempfile::TempDir;

/// Fixed starting instant for every test clock
pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 27, 12, 0, 0).unwrap()
}

pub fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(start_instant()))
}

/// In-memory service on a fixed clock
pub fn get_test_service() -> (PlannerService, Arc<FixedClock>) {
    let clock = test_clock();
    let service = PlannerService::new(Store::new(MemoryKeyValueStore::new()), clock.clone());
    (service, clock)
}

/// File-backed service under `dir` using the given config
pub fn file_service(dir: &Path, config: &Config, clock: Arc<FixedClock>) -> PlannerService {
    let store = Store::with_defaults(
        FileKeyValueStore::new(dir),
        config.storage.key.clone(),
        config.default_document(),
    );
    PlannerService::new(store, clock)
}

/// Handler over a temporary data directory on a fixed clock
pub fn get_test_handler() -> (StudyPlannerHandler, Arc<FixedClock>, TempDir) {
    let dir = TempDir::new().unwrap();
    let clock = test_clock();
    let service = file_service(dir.path(), &Config::default(), clock.clone());
    let handler = StudyPlannerHandler::with_service(service, dir.path()).unwrap();
    (handler, clock, dir)
}

/// Extract the ID from a "... created with ID: <id>" response
pub fn extract_id_from_response(response: &str) -> String {
    let start = response.find("ID: ").expect("response carries an ID") + 4;
    response[start..]
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string()
}
