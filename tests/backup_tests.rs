//! Export, import and clear through the handler
mod common;

use serde_json::Value;
use study_planner::planner::snapshot::backup_file_name;
use study_planner::{Clock, Document};
use tempfile::TempDir;

async fn seed(handler: &study_planner::StudyPlannerHandler) {
    handler
        .handle_add_task(
            "Read chapter 5".to_string(),
            "2025-01-28T10:00:00Z".to_string(),
            Some("Biology".to_string()),
            Some("high".to_string()),
            None,
            None,
        )
        .await
        .unwrap();
    let response = handler.handle_add_habit("Flashcards".to_string()).await.unwrap();
    let habit_id = common::extract_id_from_response(&response);
    handler.handle_toggle_habit(habit_id).await.unwrap();
    handler
        .handle_update_timer_stats(Some(2), Some(50), Some(10), Some(250))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_export_writes_dated_snapshot() {
    let (handler, clock, _dir) = common::get_test_handler();
    seed(&handler).await;
    let out = TempDir::new().unwrap();

    let response = handler
        .handle_export_data(Some(out.path().display().to_string()))
        .await
        .unwrap();
    assert!(response.starts_with("Exported 1 task(s) and 1 habit(s)"));

    let path = out.path().join(backup_file_name(clock.today()));
    let json: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["exportDate"], "2025-01-27T12:00:00.000Z");
    assert_eq!(json["tasks"][0]["title"], "Read chapter 5");
    assert_eq!(json["tasks"][0]["deadline"], "2025-01-28T10:00:00.000Z");
    assert_eq!(json["habits"][0]["streak"], 1);
    assert_eq!(json["timerStats"]["totalFocusTime"], 250);
}

#[tokio::test]
async fn test_export_then_import_round_trip() {
    let (handler, clock, dir) = common::get_test_handler();
    seed(&handler).await;
    let before = handler.planner().document().unwrap();

    handler.handle_export_data(None).await.unwrap();
    let backup = dir.path().join(backup_file_name(clock.today()));
    assert!(backup.exists());

    handler.handle_clear_all_data(true).await.unwrap();
    assert_eq!(handler.planner().document().unwrap(), Document::default());

    let response = handler
        .handle_import_data(backup.display().to_string())
        .await
        .unwrap();
    assert_eq!(
        response,
        "Data imported successfully: 1 task(s), 1 habit(s)"
    );
    assert_eq!(handler.planner().document().unwrap(), before);
    // The live timer follows the imported counters
    assert_eq!(handler.runtime().stats().total_sessions, 10);
}

#[tokio::test]
async fn test_import_without_habits_changes_nothing() {
    let (handler, _clock, dir) = common::get_test_handler();
    seed(&handler).await;
    let before = handler.planner().store().load().unwrap();

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"tasks": []}"#).unwrap();
    let result = handler.handle_import_data(bad.display().to_string()).await;
    assert!(result.is_err());

    assert_eq!(handler.planner().store().load().unwrap(), before);
}

#[tokio::test]
async fn test_import_rejects_bad_entities() {
    let (handler, _clock, dir) = common::get_test_handler();

    let bad = dir.path().join("bad-deadline.json");
    std::fs::write(
        &bad,
        r#"{"tasks": [{"id": "1", "title": "x", "deadline": "soon", "createdAt": "2025-01-01T00:00:00.000Z"}], "habits": []}"#,
    )
    .unwrap();
    assert!(
        handler
            .handle_import_data(bad.display().to_string())
            .await
            .is_err()
    );

    let missing = dir.path().join("missing.json");
    assert!(
        handler
            .handle_import_data(missing.display().to_string())
            .await
            .is_err()
    );
    assert!(handler.planner().list_tasks().unwrap().is_empty());
}

#[tokio::test]
async fn test_import_accepts_legacy_due_date() {
    let (handler, _clock, dir) = common::get_test_handler();
    let legacy = dir.path().join("legacy.json");
    std::fs::write(
        &legacy,
        r#"{
            "tasks": [{"id": "1737964800000", "title": "Essay", "dueDate": "2025-02-01",
                       "priority": "low", "status": "in-progress",
                       "createdAt": "2025-01-20T08:00:00.000Z"}],
            "habits": [],
            "exportDate": "2025-01-27T10:00:00.000Z",
            "version": "1.0"
        }"#,
    )
    .unwrap();

    handler
        .handle_import_data(legacy.display().to_string())
        .await
        .unwrap();
    let tasks = handler.planner().list_tasks().unwrap();
    assert_eq!(
        tasks[0].deadline.unwrap().to_rfc3339(),
        "2025-02-01T00:00:00+00:00"
    );
    // Defaults fill in the singletons the payload omitted
    assert_eq!(handler.planner().timer_settings().unwrap().focus_time, 25);
}

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let (handler, _clock, _dir) = common::get_test_handler();
    seed(&handler).await;

    assert!(handler.handle_clear_all_data(false).await.is_err());
    assert_eq!(handler.planner().list_tasks().unwrap().len(), 1);

    handler.handle_timer_start().await.unwrap();
    handler.handle_clear_all_data(true).await.unwrap();
    assert!(handler.planner().list_tasks().unwrap().is_empty());
    assert!(handler.planner().list_habits().unwrap().is_empty());
    assert_eq!(handler.planner().timer_stats().unwrap().total_sessions, 0);
    assert!(!handler.runtime().snapshot().running);
}
