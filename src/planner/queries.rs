//! Read-only projections over tasks and habits
//!
//! These never mutate the document; callers pass in the collections they
//! loaded.

use super::document::TimerStats;
use super::habit::Habit;
use super::task::{Priority, Task, TaskStatus};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;

/// Number of entries shown in the upcoming-deadlines list
pub const UPCOMING_DEADLINES_LIMIT: usize = 5;

/// Task list filter; `None` matches everything
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let search_matches = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            task.title.to_lowercase().contains(&term)
                || task.description.to_lowercase().contains(&term)
        });
        let priority_matches = self.priority.is_none_or(|p| task.priority == p);
        let status_matches = self.status.is_none_or(|s| task.status == s);
        search_matches && priority_matches && status_matches
    }
}

pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Tasks whose deadline falls on `date` in local time
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| {
            t.deadline
                .is_some_and(|d| d.with_timezone(&Local).date_naive() == date)
        })
        .cloned()
        .collect()
}

/// Open tasks ordered by deadline, soonest first; tasks without a deadline last
pub fn upcoming_deadlines(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut open: Vec<Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .cloned()
        .collect();
    open.sort_by(|a, b| match (a.deadline, b.deadline) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    open.truncate(limit);
    open
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub high_priority: usize,
    pub completion_rate: f64,
}

pub fn summarize_tasks(tasks: &[Task]) -> TaskSummary {
    let with_status = |status| tasks.iter().filter(|t| t.status == status).count();
    let completed = with_status(TaskStatus::Completed);
    TaskSummary {
        total: tasks.len(),
        completed,
        in_progress: with_status(TaskStatus::InProgress),
        high_priority: tasks.iter().filter(|t| t.priority == Priority::High).count(),
        completion_rate: percent(completed, tasks.len()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitSummary {
    pub total: usize,
    pub completed_today: usize,
    pub completion_rate: f64,
    pub longest_streak: u32,
    pub average_streak: f64,
}

pub fn summarize_habits(habits: &[Habit]) -> HabitSummary {
    let completed_today = habits.iter().filter(|h| h.completed_today).count();
    let streak_sum: u64 = habits.iter().map(|h| u64::from(h.streak)).sum();
    HabitSummary {
        total: habits.len(),
        completed_today,
        completion_rate: percent(completed_today, habits.len()),
        longest_streak: habits.iter().map(|h| h.streak).max().unwrap_or(0),
        average_streak: if habits.is_empty() {
            0.0
        } else {
            streak_sum as f64 / habits.len() as f64
        },
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub date: NaiveDate,
    pub todays_tasks: Vec<Task>,
    pub tasks: TaskSummary,
    pub habits: HabitSummary,
    pub habits_done_today: Vec<Habit>,
    pub upcoming: Vec<Task>,
    pub timer_stats: TimerStats,
}

pub fn overview(
    tasks: &[Task],
    habits: &[Habit],
    timer_stats: TimerStats,
    today: NaiveDate,
) -> Overview {
    Overview {
        date: today,
        todays_tasks: tasks_due_on(tasks, today),
        tasks: summarize_tasks(tasks),
        habits: summarize_habits(habits),
        habits_done_today: habits.iter().filter(|h| h.completed_today).cloned().collect(),
        upcoming: upcoming_deadlines(tasks, UPCOMING_DEADLINES_LIMIT),
        timer_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::task::NewTask;
    use chrono::{DateTime, TimeZone, Utc};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap()
    }

    fn task(id: &str, title: &str, deadline: Option<&str>, priority: Priority, status: TaskStatus) -> Task {
        Task::create(
            id.to_string(),
            NewTask {
                title: title.to_string(),
                description: format!("about {}", title),
                deadline: deadline.map(str::to_string),
                priority,
                status,
                ..Default::default()
            },
            created(),
        )
        .unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            task("1", "Closures", Some("2025-01-28T10:00:00Z"), Priority::Medium, TaskStatus::Pending),
            task("2", "React", Some("2025-01-27T10:00:00Z"), Priority::High, TaskStatus::InProgress),
            task("3", "Chapter 5", Some("2025-01-26T10:00:00Z"), Priority::High, TaskStatus::Completed),
            task("4", "Someday", None, Priority::Low, TaskStatus::Pending),
        ]
    }

    #[test]
    fn test_filter_by_search_is_case_insensitive() {
        let filter = TaskFilter {
            search: Some("REACT".to_string()),
            ..Default::default()
        };
        let found = filter_tasks(&sample(), &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");

        // Description is searched too
        let filter = TaskFilter {
            search: Some("about chapter".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_tasks(&sample(), &filter)[0].id, "3");
    }

    #[test]
    fn test_filter_combines_criteria() {
        let filter = TaskFilter {
            priority: Some(Priority::High),
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        let found = filter_tasks(&sample(), &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");

        assert_eq!(filter_tasks(&sample(), &TaskFilter::default()).len(), 4);
    }

    #[test]
    fn test_upcoming_deadlines_order() {
        let upcoming = upcoming_deadlines(&sample(), 5);
        let ids: Vec<&str> = upcoming.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "4"]);

        assert_eq!(upcoming_deadlines(&sample(), 1).len(), 1);
    }

    #[test]
    fn test_tasks_due_on_uses_local_date() {
        let tasks = sample();
        let local_date = tasks[1].deadline.unwrap().with_timezone(&Local).date_naive();
        let due = tasks_due_on(&tasks, local_date);
        assert!(due.iter().any(|t| t.id == "2"));
        assert!(due.iter().all(|t| t.id != "4"));
    }

    #[test]
    fn test_task_summary() {
        let summary = summarize_tasks(&sample());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.high_priority, 2);
        assert!((summary.completion_rate - 25.0).abs() < f64::EPSILON);

        let empty = summarize_tasks(&[]);
        assert_eq!(empty.completion_rate, 0.0);
    }

    #[test]
    fn test_habit_summary() {
        let mut a = Habit::new("1".to_string(), "A".to_string(), created());
        a.streak = 15;
        a.completed_today = true;
        let mut b = Habit::new("2".to_string(), "B".to_string(), created());
        b.streak = 8;

        let summary = summarize_habits(&[a, b]);
        assert_eq!(summary.longest_streak, 15);
        assert_eq!(summary.completed_today, 1);
        assert!((summary.completion_rate - 50.0).abs() < f64::EPSILON);
        assert!((summary.average_streak - 11.5).abs() < f64::EPSILON);

        let empty = summarize_habits(&[]);
        assert_eq!(empty.longest_streak, 0);
        assert_eq!(empty.average_streak, 0.0);
    }
}
