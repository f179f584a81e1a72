//! Habit handlers

use crate::StudyPlannerHandler;
use crate::formatting;
use crate::validation::{self, planner_result};
use mcp_attr::{Result as McpResult, bail_public};

impl StudyPlannerHandler {
    pub async fn handle_list_habits(&self) -> McpResult<String> {
        let habits = planner_result(self.planner.list_habits())?;
        Ok(formatting::format_habits(&habits))
    }

    pub async fn handle_add_habit(&self, name: String) -> McpResult<String> {
        let habit = planner_result(self.planner.add_habit(&name))?;
        Ok(format!("Habit created with ID: {} ({})", habit.id, habit.name))
    }

    /// Marks the habit done for today, or undoes today's completion.
    pub async fn handle_toggle_habit(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id)?;
        let Some(habit) = planner_result(self.planner.toggle_habit(&id))? else {
            bail_public!(_, "Habit '{}' does not exist", id);
        };
        let state = if habit.completed_today {
            "completed for today"
        } else {
            "no longer completed today"
        };
        Ok(format!(
            "Habit {} {}\n{}",
            habit.name,
            state,
            formatting::format_habit(&habit)
        ))
    }

    pub async fn handle_delete_habit(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id)?;
        if planner_result(self.planner.delete_habit(&id))? {
            Ok(format!("Habit {} deleted", id))
        } else {
            Ok(format!("No habit with ID {}; nothing to delete", id))
        }
    }
}
