//! Task repository

use super::PlannerService;
use crate::error::PlannerResult;
use crate::planner::instant::truncate_to_millis;
use crate::planner::queries::{filter_tasks, tasks_due_on};
use crate::planner::{NewTask, Task, TaskFilter, TaskUpdate};
use chrono::NaiveDate;
use tracing::info;

impl PlannerService {
    /// All tasks in creation order
    pub fn list_tasks(&self) -> PlannerResult<Vec<Task>> {
        Ok(self.document()?.tasks)
    }

    pub fn filter_tasks(&self, filter: &TaskFilter) -> PlannerResult<Vec<Task>> {
        Ok(filter_tasks(&self.document()?.tasks, filter))
    }

    /// Tasks whose deadline falls on `date`
    pub fn tasks_on(&self, date: NaiveDate) -> PlannerResult<Vec<Task>> {
        Ok(tasks_due_on(&self.document()?.tasks, date))
    }

    pub fn add_task(&self, fields: NewTask) -> PlannerResult<Task> {
        let now = truncate_to_millis(self.clock.now());
        let task = self.mutate(|doc| {
            let task = Task::create(doc.next_task_id(now), fields, now)?;
            doc.tasks.push(task.clone());
            Ok(task)
        })?;
        info!(id = %task.id, title = %task.title, "task added");
        Ok(task)
    }

    /// Merge `update` into the task; `None` when no task has `id`
    pub fn update_task(&self, id: &str, update: TaskUpdate) -> PlannerResult<Option<Task>> {
        let updated = self.mutate(|doc| match doc.find_task_mut(id) {
            Some(task) => {
                task.apply(update)?;
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        })?;
        if updated.is_some() {
            info!(id, "task updated");
        }
        Ok(updated)
    }

    /// Move the task to the next status in the pending, in-progress, completed cycle
    pub fn advance_task_status(&self, id: &str) -> PlannerResult<Option<Task>> {
        let advanced = self.mutate(|doc| {
            Ok(doc.find_task_mut(id).map(|task| {
                task.status = task.status.next();
                task.clone()
            }))
        })?;
        if let Some(task) = &advanced {
            info!(id, status = %task.status, "task status advanced");
        }
        Ok(advanced)
    }

    /// Returns whether a task was removed
    pub fn delete_task(&self, id: &str) -> PlannerResult<bool> {
        let removed = self.mutate(|doc| Ok(doc.remove_task(id)))?;
        if removed {
            info!(id, "task deleted");
        }
        Ok(removed)
    }
}
