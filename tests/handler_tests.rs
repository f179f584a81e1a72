//! Tool-level behaviour: response text and error reporting
mod common;

#[tokio::test]
async fn test_add_and_list_tasks() {
    let (handler, _clock, _dir) = common::get_test_handler();

    let response = handler
        .handle_add_task(
            "Study React hooks".to_string(),
            "2025-01-28T14:00".to_string(),
            Some("useEffect and useMemo".to_string()),
            Some("high".to_string()),
            Some("Programming".to_string()),
            None,
        )
        .await
        .unwrap();
    assert!(response.starts_with("Task created with ID: "));
    let id = common::extract_id_from_response(&response);

    let list = handler.handle_list_tasks(None, None, None).await.unwrap();
    assert!(list.starts_with("Found 1 task(s):"));
    assert!(list.contains(&format!(
        "- [{}] Study React hooks (status: pending, priority: high)",
        id
    )));
    assert!(list.contains("Category: Programming"));

    let filtered = handler
        .handle_list_tasks(Some("USEMEMO".to_string()), None, Some("".to_string()))
        .await
        .unwrap();
    assert!(filtered.contains(&id));

    let none = handler
        .handle_list_tasks(None, Some("low".to_string()), None)
        .await
        .unwrap();
    assert_eq!(none, "No tasks found");
}

#[tokio::test]
async fn test_add_task_argument_errors() {
    let (handler, _clock, _dir) = common::get_test_handler();

    for (title, deadline, priority) in [
        ("Read", "", None),
        ("", "2025-01-28", None),
        ("Read", "tomorrow", None),
        ("Read", "2025-01-28", Some("urgent".to_string())),
    ] {
        let result = handler
            .handle_add_task(
                title.to_string(),
                deadline.to_string(),
                None,
                priority,
                None,
                None,
            )
            .await;
        assert!(result.is_err(), "{:?} {:?} should fail", title, deadline);
    }
    assert_eq!(
        handler.handle_list_tasks(None, None, None).await.unwrap(),
        "No tasks found"
    );
}

#[tokio::test]
async fn test_update_advance_delete() {
    let (handler, _clock, _dir) = common::get_test_handler();
    let response = handler
        .handle_add_task(
            "Essay".to_string(),
            "2025-02-01".to_string(),
            Some("draft".to_string()),
            None,
            None,
            None,
        )
        .await
        .unwrap();
    let id = common::extract_id_from_response(&response);

    let updated = handler
        .handle_update_task(
            format!(" {} ", id),
            Some("Final essay".to_string()),
            Some("".to_string()),
            None,
            None,
            None,
            Some("completed".to_string()),
        )
        .await
        .unwrap();
    assert!(updated.contains("Final essay (status: completed"));
    assert!(!updated.contains("Description"));

    let advanced = handler.handle_advance_task(id.clone()).await.unwrap();
    assert_eq!(advanced, format!("Task {} is now pending", id));

    assert!(
        handler
            .handle_update_task("missing".to_string(), None, None, None, None, None, None)
            .await
            .is_err()
    );
    assert!(handler.handle_advance_task("missing".to_string()).await.is_err());

    let deleted = handler.handle_delete_task(id.clone()).await.unwrap();
    assert_eq!(deleted, format!("Task {} deleted", id));
    let again = handler.handle_delete_task(id.clone()).await.unwrap();
    assert!(again.contains("nothing to delete"));
}

#[tokio::test]
async fn test_tasks_on_date() {
    let (handler, _clock, _dir) = common::get_test_handler();
    handler
        .handle_add_task(
            "Exam".to_string(),
            "2025-03-15T10:00".to_string(),
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let due = handler
        .handle_tasks_on(Some("2025-03-15".to_string()))
        .await
        .unwrap();
    assert!(due.contains("Exam"));

    let free = handler
        .handle_tasks_on(Some("2025-03-16".to_string()))
        .await
        .unwrap();
    assert_eq!(free, "No tasks due on 2025-03-16");

    assert!(handler.handle_tasks_on(Some("15.03.2025".to_string())).await.is_err());
}

#[tokio::test]
async fn test_habit_tools() {
    let (handler, _clock, _dir) = common::get_test_handler();
    assert_eq!(handler.handle_list_habits().await.unwrap(), "No habits found");
    assert!(handler.handle_add_habit(" ".to_string()).await.is_err());

    let response = handler.handle_add_habit("Meditate".to_string()).await.unwrap();
    let id = common::extract_id_from_response(&response);

    let toggled = handler.handle_toggle_habit(id.clone()).await.unwrap();
    assert!(toggled.starts_with("Habit Meditate completed for today"));
    assert!(toggled.contains("Streak: 1 day(s)"));

    let list = handler.handle_list_habits().await.unwrap();
    assert!(list.contains(&format!("- [{}] [x] Meditate", id)));

    let toggled = handler.handle_toggle_habit(id.clone()).await.unwrap();
    assert!(toggled.contains("no longer completed today"));

    assert!(handler.handle_toggle_habit("missing".to_string()).await.is_err());
    assert_eq!(
        handler.handle_delete_habit(id.clone()).await.unwrap(),
        format!("Habit {} deleted", id)
    );
}

#[tokio::test]
async fn test_settings_tools() {
    let (handler, _clock, _dir) = common::get_test_handler();
    let settings = handler.handle_get_settings().await.unwrap();
    assert!(settings.contains("Dark mode: on"));
    assert!(settings.contains("Notifications: on"));

    let updated = handler
        .handle_update_settings(Some(false), None)
        .await
        .unwrap();
    assert!(updated.contains("Dark mode: off"));
    assert!(updated.contains("Notifications: on"));
}

#[tokio::test]
async fn test_overview_text() {
    let (handler, _clock, _dir) = common::get_test_handler();
    let overview = handler.handle_overview().await.unwrap();
    assert!(overview.contains("Tasks: 0 total"));
    assert!(overview.contains("Due today:\n  nothing"));

    handler
        .handle_add_task(
            "Lab report".to_string(),
            "2025-02-03T17:00".to_string(),
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    let overview = handler.handle_overview().await.unwrap();
    assert!(overview.contains("Tasks: 1 total"));
    assert!(overview.contains("Lab report (2025-02-03 17:00)"));
}
