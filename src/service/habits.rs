//! Habit engine

use super::PlannerService;
use crate::error::{PlannerError, PlannerResult};
use crate::planner::Habit;
use crate::planner::instant::truncate_to_millis;
use tracing::info;

impl PlannerService {
    pub fn list_habits(&self) -> PlannerResult<Vec<Habit>> {
        Ok(self.document()?.habits)
    }

    pub fn add_habit(&self, name: &str) -> PlannerResult<Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::validation("Habit name must not be empty"));
        }
        let now = truncate_to_millis(self.clock.now());
        let habit = self.mutate(|doc| {
            let habit = Habit::new(doc.next_habit_id(now), name.to_string(), now);
            doc.habits.push(habit.clone());
            Ok(habit)
        })?;
        info!(id = %habit.id, name = %habit.name, "habit added");
        Ok(habit)
    }

    /// Flip today's completion and update the streak
    pub fn toggle_habit(&self, id: &str) -> PlannerResult<Option<Habit>> {
        let today = self.clock.today();
        let toggled = self.mutate(|doc| {
            Ok(doc.find_habit_mut(id).map(|habit| {
                habit.toggle(today);
                habit.clone()
            }))
        })?;
        if let Some(habit) = &toggled {
            info!(
                id,
                completed_today = habit.completed_today,
                streak = habit.streak,
                "habit toggled"
            );
        }
        Ok(toggled)
    }

    pub fn delete_habit(&self, id: &str) -> PlannerResult<bool> {
        let removed = self.mutate(|doc| Ok(doc.remove_habit(id)))?;
        if removed {
            info!(id, "habit deleted");
        }
        Ok(removed)
    }
}
