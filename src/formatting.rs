//! Formatting helper functions for the study planner MCP server
//!
//! Tool results are plain text. Every entity line starts with its id in
//! brackets so a client can pick ids out of a listing.

use crate::planner::instant::format_instant;
use crate::planner::{
    AppSettings, Habit, Notification, Overview, Task, TimerSettings, TimerSnapshot, TimerStats,
};
use chrono::Local;

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Deadline as local wall-clock time, or "none"
fn format_deadline(task: &Task) -> String {
    task.deadline
        .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// Format a single task with its details indented below
pub fn format_task(task: &Task) -> String {
    let mut result = format!(
        "- [{}] {} (status: {}, priority: {})\n",
        task.id, task.title, task.status, task.priority
    );
    result.push_str(&format!("  Deadline: {}\n", format_deadline(task)));
    if !task.category.is_empty() {
        result.push_str(&format!("  Category: {}\n", task.category));
    }
    if !task.description.is_empty() {
        result.push_str(&format!("  Description: {}\n", task.description));
    }
    result.push_str(&format!("  Created: {}\n", format_instant(&task.created_at)));
    result
}

pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }
    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str(&format_task(task));
    }
    result
}

pub fn format_habit(habit: &Habit) -> String {
    let mark = if habit.completed_today { "x" } else { " " };
    let mut result = format!("- [{}] [{}] {}\n", habit.id, mark, habit.name);
    result.push_str(&format!(
        "  Streak: {} day(s), total completions: {}\n",
        habit.streak, habit.total_completions
    ));
    if let Some(last) = habit.last_completed {
        result.push_str(&format!("  Last completed: {}\n", last));
    }
    result
}

pub fn format_habits(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "No habits found".to_string();
    }
    let mut result = format!("Found {} habit(s):\n\n", habits.len());
    for habit in habits {
        result.push_str(&format_habit(habit));
    }
    result
}

/// Timer display plus any notices that arrived since the last call
pub fn format_timer_status(snapshot: &TimerSnapshot, notifications: &[Notification]) -> String {
    let mut result = format!(
        "{}: {} ({})\nProgress: {:.0}%\n",
        snapshot.title,
        snapshot.clock,
        if snapshot.running { "running" } else { "paused" },
        snapshot.progress_percent
    );
    for notification in notifications {
        result.push_str(&format!(
            "\n{}\n  {}\n",
            notification.title, notification.message
        ));
    }
    result
}

pub fn format_timer_settings(settings: &TimerSettings) -> String {
    format!(
        "Timer settings:\n  Focus: {} min\n  Short break: {} min\n  Long break: {} min\n  Sessions until long break: {}\n",
        settings.focus_time,
        settings.short_break,
        settings.long_break,
        settings.sessions_until_long_break
    )
}

pub fn format_timer_stats(stats: &TimerStats) -> String {
    format!(
        "Timer stats:\n  Sessions today: {}\n  Focus time today: {} min\n  Total sessions: {}\n  Total focus time: {} min\n",
        stats.sessions_today, stats.focus_time_today, stats.total_sessions, stats.total_focus_time
    )
}

pub fn format_settings(settings: &AppSettings) -> String {
    format!(
        "Settings:\n  Dark mode: {}\n  Notifications: {}\n",
        on_off(settings.dark_mode),
        on_off(settings.notifications)
    )
}

/// Dashboard text
pub fn format_overview(overview: &Overview) -> String {
    let mut result = format!("Overview for {}\n\n", overview.date);

    result.push_str(&format!(
        "Tasks: {} total, {} completed, {} in progress, {} high priority ({:.0}% complete)\n",
        overview.tasks.total,
        overview.tasks.completed,
        overview.tasks.in_progress,
        overview.tasks.high_priority,
        overview.tasks.completion_rate
    ));
    result.push_str(&format!(
        "Habits: {}/{} done today, longest streak {} day(s), average streak {:.1}\n",
        overview.habits.completed_today,
        overview.habits.total,
        overview.habits.longest_streak,
        overview.habits.average_streak
    ));
    result.push_str(&format!(
        "Focus: {} session(s), {} min today\n",
        overview.timer_stats.sessions_today, overview.timer_stats.focus_time_today
    ));

    result.push_str("\nDue today:\n");
    if overview.todays_tasks.is_empty() {
        result.push_str("  nothing\n");
    }
    for task in &overview.todays_tasks {
        result.push_str(&format_task(task));
    }

    result.push_str("\nUpcoming deadlines:\n");
    if overview.upcoming.is_empty() {
        result.push_str("  nothing\n");
    }
    for task in &overview.upcoming {
        result.push_str(&format!(
            "- [{}] {} ({})\n",
            task.id,
            task.title,
            format_deadline(task)
        ));
    }

    if !overview.habits_done_today.is_empty() {
        result.push_str("\nHabits done today:\n");
        for habit in &overview.habits_done_today {
            result.push_str(&format!("- {} ({} day streak)\n", habit.name, habit.streak));
        }
    }
    result
}
