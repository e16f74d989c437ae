//! The scheduling engine: every user-facing operation, on top of a [`Repository`].
//!
//! The engine owns validation, recurrence classification and ordering rules.
//! Store-level `NotFound` / `Forbidden` errors never escape; they are mapped
//! to the task, column or occurrence error of the operation at hand.

use crate::config::EngineConfig;
use crate::dates::parse_date_or;
use crate::error::CoreError;
use crate::models::{
    Column, NewTaskData, OccurrencePatch, Task, TaskId, TaskPatch, TaskView, UpdateTaskData,
    UserId,
};
use crate::recurrence::classify;
use crate::repository::Repository;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};
use uuid::Uuid;

mod columns;
mod preset;
mod reposition;
mod window;

/// Source of "today" for defaults and presets.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct SchedulingEngine<R> {
    repo: R,
    config: EngineConfig,
    clock: Box<dyn Clock>,
}

impl<R: Repository> SchedulingEngine<R> {
    pub fn new(repo: R, config: EngineConfig) -> Self {
        Self::with_clock(repo, config, SystemClock)
    }

    pub fn with_clock(repo: R, config: EngineConfig, clock: impl Clock + 'static) -> Self {
        Self {
            repo,
            config,
            clock: Box::new(clock),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Create a task in a column, or on a date (today when no date is given).
    ///
    /// Date tasks go through the recurrence classifier; a recognised suffix is
    /// stripped from the stored body. Column tasks are never classified.
    pub async fn create_task(&self, user_id: UserId, data: NewTaskData) -> Result<TaskView, CoreError> {
        if data.body.trim().is_empty() {
            return Err(CoreError::InvalidInput("Task content is missing".to_string()));
        }

        if let Some(column_uuid) = data.column_uuid.as_deref().filter(|s| !s.trim().is_empty()) {
            let column = self.column_for_task(user_id, column_uuid).await?;
            let task = self
                .repo
                .create_task_on_column(&data.body, data.done, user_id, column.id)
                .await?;
            info!(user_id, task_id = task.id, column = %column.uuid, "task created in column");
            return Ok(TaskView::single(&task, Some(column.uuid)));
        }

        let date = parse_date_or(data.date.as_deref(), self.today())?;
        let (body, kind) = classify(&data.body);
        let task = self
            .repo
            .create_task_on_date(body, data.done, user_id, date, kind)
            .await?;
        info!(user_id, task_id = task.id, %date, %kind, "task created on date");

        if kind.is_recurring() {
            let status = self
                .repo
                .find_or_create_occurrence(task.id, date, task.order)
                .await?;
            return Ok(TaskView::occurrence(&task, &status));
        }
        Ok(TaskView::single(&task, None))
    }

    pub async fn get_task(&self, user_id: UserId, task_id: TaskId) -> Result<TaskView, CoreError> {
        let task = self.owned_task(user_id, task_id).await?;
        self.view_of(&task).await
    }

    /// Change a task's body, completion or order.
    ///
    /// With an `occurrence_id`, `done` and `order` land on that occurrence of
    /// a recurring task. Without one they land on the base task; for recurring
    /// tasks only the body can change that way.
    pub async fn update_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
        data: UpdateTaskData,
    ) -> Result<TaskView, CoreError> {
        let mut task = self.owned_task(user_id, task_id).await?;
        if data.body.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(CoreError::InvalidInput("Task content is missing".to_string()));
        }

        if let Some(occurrence_id) = data.occurrence_id {
            let status = self
                .repo
                .find_occurrence_by_id(occurrence_id)
                .await?
                .ok_or(CoreError::OccurrenceNotFound)?;
            if status.task_id != task.id {
                return Err(CoreError::OccurrenceNotValid);
            }

            if let Some(body) = data.body {
                let patch = TaskPatch {
                    body: Some(body),
                    ..Default::default()
                };
                task = self.repo.update_task(task.id, &patch).await.map_err(task_scope)?;
            }

            let patch = OccurrencePatch {
                done: data.done,
                order: data.order,
            };
            let status = if patch.is_empty() {
                status
            } else {
                self.repo
                    .update_occurrence(status.id, &patch)
                    .await
                    .map_err(|e| if e.is_not_found() { CoreError::OccurrenceNotFound } else { e })?
            };
            info!(user_id, task_id, occurrence_id, "occurrence updated");
            return Ok(TaskView::occurrence(&task, &status));
        }

        let patch = if task.is_recurring() {
            if data.done.is_some() || data.order.is_some() {
                debug!(task_id, "done/order without an occurrence ignored for recurring task");
            }
            TaskPatch {
                body: data.body,
                ..Default::default()
            }
        } else {
            TaskPatch {
                body: data.body,
                done: data.done,
                order: data.order,
            }
        };

        if !patch.is_empty() {
            task = self.repo.update_task(task.id, &patch).await.map_err(task_scope)?;
            info!(user_id, task_id, "task updated");
        }
        self.view_of(&task).await
    }

    /// Delete a task. Its occurrence rows are kept, orphaned.
    pub async fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Result<(), CoreError> {
        let task = self.owned_task(user_id, task_id).await?;
        self.repo.delete_task(task.id).await.map_err(task_scope)?;
        info!(user_id, task_id, "task deleted");
        Ok(())
    }

    /// Move every unfinished single task dated before `target` onto `target`.
    pub async fn move_unfinished_tasks(
        &self,
        user_id: UserId,
        target: NaiveDate,
    ) -> Result<Vec<TaskView>, CoreError> {
        let moved = self.repo.move_unfinished_before(user_id, target).await?;
        if !moved.is_empty() {
            info!(user_id, %target, count = moved.len(), "unfinished tasks moved");
        }
        Ok(moved.iter().map(|t| TaskView::single(t, None)).collect())
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    async fn owned_task(&self, user_id: UserId, task_id: TaskId) -> Result<Task, CoreError> {
        match self.repo.find_task_by_id(task_id).await? {
            Some(task) if task.user_id == user_id => Ok(task),
            _ => Err(CoreError::TaskNotFound),
        }
    }

    /// Resolve the column a new task goes into: unknown ids are "not found",
    /// someone else's column is "forbidden".
    async fn column_for_task(&self, user_id: UserId, column_uuid: &str) -> Result<Column, CoreError> {
        let uuid = Uuid::parse_str(column_uuid.trim()).map_err(|_| CoreError::ColumnNotFound)?;
        match self.repo.find_column_by_uuid(uuid).await? {
            None => Err(CoreError::ColumnNotFound),
            Some(column) if column.user_id != user_id => Err(CoreError::ColumnForbidden),
            Some(column) => Ok(column),
        }
    }

    /// Render a task in its own placement. Recurring tasks render as the
    /// occurrence on their anchor date.
    async fn view_of(&self, task: &Task) -> Result<TaskView, CoreError> {
        if task.is_recurring() {
            if let Some(anchor) = task.anchor_date {
                let status = self
                    .repo
                    .find_or_create_occurrence(task.id, anchor, task.order)
                    .await?;
                return Ok(TaskView::occurrence(task, &status));
            }
        }

        let column_uuid = match task.column_id {
            Some(column_id) => self.repo.find_column_by_id(column_id).await?.map(|c| c.uuid),
            None => None,
        };
        Ok(TaskView::single(task, column_uuid))
    }
}

/// Store misses on task rows surface as "task not found".
fn task_scope(err: CoreError) -> CoreError {
    match err {
        CoreError::NotFound(_) | CoreError::Forbidden(_) => CoreError::TaskNotFound,
        other => other,
    }
}
