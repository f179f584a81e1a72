//! Task handlers

use crate::StudyPlannerHandler;
use crate::formatting;
use crate::planner::{NewTask, TaskFilter, TaskUpdate};
use crate::validation::{self, planner_result};
use mcp_attr::{Result as McpResult, bail_public};

/// "" counts as not given
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl StudyPlannerHandler {
    /// Lists tasks, narrowed by the optional search/priority/status filters.
    pub async fn handle_list_tasks(
        &self,
        search: Option<String>,
        priority: Option<String>,
        status: Option<String>,
    ) -> McpResult<String> {
        let filter = TaskFilter {
            search: non_empty(search),
            priority: validation::parse_optional(priority, validation::parse_priority)?,
            status: validation::parse_optional(status, validation::parse_task_status)?,
        };
        let tasks = planner_result(self.planner.filter_tasks(&filter))?;
        Ok(formatting::format_tasks(&tasks))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn handle_add_task(
        &self,
        title: String,
        deadline: String,
        description: Option<String>,
        priority: Option<String>,
        category: Option<String>,
        status: Option<String>,
    ) -> McpResult<String> {
        if deadline.trim().is_empty() {
            bail_public!(_, "Deadline is required (e.g., '2025-01-27T10:00')");
        }
        let fields = NewTask {
            title,
            description: description.unwrap_or_default(),
            deadline: Some(deadline),
            priority: validation::parse_optional(priority, validation::parse_priority)?
                .unwrap_or_default(),
            category: category.unwrap_or_default(),
            status: validation::parse_optional(status, validation::parse_task_status)?
                .unwrap_or_default(),
        };
        let task = planner_result(self.planner.add_task(fields))?;
        Ok(format!(
            "Task created with ID: {}\n{}",
            task.id,
            formatting::format_task(&task)
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_task(
        &self,
        id: String,
        title: Option<String>,
        description: Option<String>,
        deadline: Option<String>,
        priority: Option<String>,
        category: Option<String>,
        status: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id)?;
        let update = TaskUpdate {
            title,
            description,
            deadline,
            priority: validation::parse_optional(priority, validation::parse_priority)?,
            category,
            status: validation::parse_optional(status, validation::parse_task_status)?,
        };
        match planner_result(self.planner.update_task(&id, update))? {
            Some(task) => Ok(format!(
                "Task {} updated\n{}",
                task.id,
                formatting::format_task(&task)
            )),
            None => bail_public!(_, "Task '{}' does not exist", id),
        }
    }

    /// Cycles pending, in-progress and completed.
    pub async fn handle_advance_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id)?;
        match planner_result(self.planner.advance_task_status(&id))? {
            Some(task) => Ok(format!("Task {} is now {}", task.id, task.status)),
            None => bail_public!(_, "Task '{}' does not exist", id),
        }
    }

    pub async fn handle_delete_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id)?;
        if planner_result(self.planner.delete_task(&id))? {
            Ok(format!("Task {} deleted", id))
        } else {
            Ok(format!("No task with ID {}; nothing to delete", id))
        }
    }

    /// Tasks due on a date, today when no date is given.
    pub async fn handle_tasks_on(&self, date: Option<String>) -> McpResult<String> {
        let date = match non_empty(date) {
            Some(raw) => validation::parse_date_filter(&raw)?,
            None => self.planner.clock().today(),
        };
        let tasks = planner_result(self.planner.tasks_on(date))?;
        if tasks.is_empty() {
            return Ok(format!("No tasks due on {}", date));
        }
        Ok(format!(
            "Due on {}:\n{}",
            date,
            formatting::format_tasks(&tasks)
        ))
    }

    pub async fn handle_overview(&self) -> McpResult<String> {
        let overview = planner_result(self.planner.overview())?;
        Ok(formatting::format_overview(&overview))
    }
}
