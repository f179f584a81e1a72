use super::instant;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A daily habit with its completion streak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub completed_today: bool,
    #[serde(default)]
    pub total_completions: u32,
    /// Calendar date of the last completion (YYYY-MM-DD)
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    #[serde(with = "instant::canonical")]
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(id: String, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            streak: 0,
            completed_today: false,
            total_completions: 0,
            last_completed: None,
            created_at: instant::truncate_to_millis(created_at),
        }
    }

    /// Flip today's completion and recompute the streak
    ///
    /// Completing extends the streak when the last completion was yesterday
    /// (or when there is no streak yet) and otherwise restarts it at 1.
    /// Un-completing steps both counters back by one without going below
    /// zero; `last_completed` keeps pointing at the day it was set.
    pub fn toggle(&mut self, today: NaiveDate) {
        if self.completed_today {
            self.completed_today = false;
            self.total_completions = self.total_completions.saturating_sub(1);
            self.streak = self.streak.saturating_sub(1);
            return;
        }

        self.completed_today = true;
        self.total_completions = self.total_completions.saturating_add(1);

        let yesterday = today - Duration::days(1);
        if self.last_completed == Some(yesterday) || self.streak == 0 {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 1;
        }
        self.last_completed = Some(today);
    }

    /// Clear a `completed_today` flag left over from an earlier day
    ///
    /// Returns true when the flag was cleared.
    pub fn reconcile_day(&mut self, today: NaiveDate) -> bool {
        if self.completed_today && self.last_completed != Some(today) {
            self.completed_today = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()
    }

    fn habit() -> Habit {
        Habit::new(
            "h1".to_string(),
            "Read".to_string(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_first_completion_starts_streak() {
        let mut h = habit();
        h.toggle(today());
        assert!(h.completed_today);
        assert_eq!(h.streak, 1);
        assert_eq!(h.total_completions, 1);
        assert_eq!(h.last_completed, Some(today()));
    }

    #[test]
    fn test_completion_after_yesterday_extends_streak() {
        let mut h = habit();
        h.streak = 5;
        h.total_completions = 5;
        h.last_completed = Some(today() - Duration::days(1));

        h.toggle(today());
        assert_eq!(h.streak, 6);
        assert_eq!(h.total_completions, 6);
    }

    #[test]
    fn test_completion_after_gap_restarts_at_one() {
        let mut h = habit();
        h.streak = 5;
        h.total_completions = 9;
        h.last_completed = Some(today() - Duration::days(3));

        h.toggle(today());
        assert_eq!(h.streak, 1);
        assert_eq!(h.total_completions, 10);
        assert_eq!(h.last_completed, Some(today()));
    }

    #[test]
    fn test_double_toggle_restores_counters() {
        let mut h = habit();
        h.streak = 3;
        h.total_completions = 7;
        h.last_completed = Some(today() - Duration::days(1));

        h.toggle(today());
        h.toggle(today());
        assert!(!h.completed_today);
        assert_eq!(h.streak, 3);
        assert_eq!(h.total_completions, 7);
        // last_completed stays on today
        assert_eq!(h.last_completed, Some(today()));
    }

    #[test]
    fn test_uncomplete_never_goes_negative() {
        let mut h = habit();
        h.completed_today = true;
        h.toggle(today());
        assert_eq!(h.streak, 0);
        assert_eq!(h.total_completions, 0);
    }

    #[test]
    fn test_complete_at_counter_maximum_saturates() {
        let mut h = habit();
        h.total_completions = u32::MAX;
        h.streak = u32::MAX;
        h.last_completed = Some(today() - Duration::days(1));

        h.toggle(today());
        assert!(h.completed_today);
        assert_eq!(h.total_completions, u32::MAX);
        assert_eq!(h.streak, u32::MAX);

        h.toggle(today());
        assert_eq!(h.total_completions, u32::MAX - 1);
        assert_eq!(h.streak, u32::MAX - 1);
    }

    #[test]
    fn test_reconcile_day_clears_stale_flag() {
        let mut h = habit();
        h.toggle(today() - Duration::days(1));
        assert!(h.reconcile_day(today()));
        assert!(!h.completed_today);
        assert_eq!(h.streak, 1);

        // Completing on the next day continues the chain
        h.toggle(today());
        assert_eq!(h.streak, 2);
    }

    #[test]
    fn test_reconcile_day_keeps_todays_completion() {
        let mut h = habit();
        h.toggle(today());
        assert!(!h.reconcile_day(today()));
        assert!(h.completed_today);
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "id": "2",
            "name": "Code Review Practice",
            "streak": 8,
            "completedToday": false,
            "totalCompletions": 32,
            "lastCompleted": "2025-01-25",
            "createdAt": "2025-01-01T09:30:00.000Z"
        }"#;
        let h: Habit = serde_json::from_str(json).unwrap();
        assert_eq!(h.streak, 8);
        assert_eq!(h.last_completed, NaiveDate::from_ymd_opt(2025, 1, 25));
    }
}
