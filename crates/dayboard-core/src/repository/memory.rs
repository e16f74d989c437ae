//! In-process store with the same contract as [`super::SqliteRepository`].
//!
//! Used by engine tests and by callers that want a throwaway board. Batch
//! operations work on a copy of the state and swap it in only on success.

use crate::error::CoreError;
use crate::models::{
    Column, ColumnId, ColumnPlacement, DatePlacement, OccurrenceId, OccurrencePatch,
    OccurrenceStatus, RecurrenceKind, Task, TaskId, TaskPatch, UserId,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct MemoryState {
    tasks: BTreeMap<TaskId, Task>,
    columns: BTreeMap<ColumnId, Column>,
    occurrences: BTreeMap<OccurrenceId, OccurrenceStatus>,
    last_task_id: TaskId,
    last_column_id: ColumnId,
    last_occurrence_id: OccurrenceId,
}

impl MemoryState {
    fn day_load(&self, user_id: UserId, date: NaiveDate) -> i64 {
        let singles = self
            .tasks
            .values()
            .filter(|t| t.user_id == user_id && !t.is_recurring() && t.anchor_date == Some(date))
            .count();
        let occurrences = self
            .occurrences
            .values()
            .filter(|s| s.date == date)
            .filter(|s| {
                self.tasks
                    .get(&s.task_id)
                    .is_some_and(|t| t.user_id == user_id && t.is_recurring())
            })
            .count();
        (singles + occurrences) as i64
    }

    fn insert_task(
        &mut self,
        body: &str,
        done: bool,
        user_id: UserId,
        column_id: Option<ColumnId>,
        anchor_date: Option<NaiveDate>,
        kind: RecurrenceKind,
        order: i64,
    ) -> Task {
        self.last_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: self.last_task_id,
            user_id,
            column_id,
            body: body.to_string(),
            done,
            order,
            recurring_kind: kind,
            anchor_date,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(task.id, task.clone());
        task
    }

    fn find_or_create_occurrence(
        &mut self,
        task_id: TaskId,
        date: NaiveDate,
        order: i64,
        done: bool,
    ) -> Result<OccurrenceStatus, CoreError> {
        if let Some(existing) = self
            .occurrences
            .values()
            .find(|s| s.task_id == task_id && s.date == date)
        {
            return Ok(existing.clone());
        }
        if !self.tasks.contains_key(&task_id) {
            return Err(CoreError::NotFound(format!("task {}", task_id)));
        }

        self.last_occurrence_id += 1;
        let now = Utc::now();
        let status = OccurrenceStatus {
            id: self.last_occurrence_id,
            task_id,
            date,
            done,
            order,
            created_at: now,
            updated_at: now,
        };
        self.occurrences.insert(status.id, status.clone());
        Ok(status)
    }

    /// Occurrence rows of the task stay behind, orphaned.
    fn remove_task(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.sort_by_key(|t| (t.order, t.id));
        tasks
    }
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored occurrence rows, across all users.
    pub async fn occurrence_count(&self) -> usize {
        self.state.lock().await.occurrences.len()
    }
}

#[async_trait]
impl super::TaskRepository for MemoryRepository {
    async fn create_task_on_column(
        &self,
        body: &str,
        done: bool,
        user_id: UserId,
        column_id: ColumnId,
    ) -> Result<Task, CoreError> {
        let mut state = self.state.lock().await;
        if !state.columns.contains_key(&column_id) {
            return Err(CoreError::NotFound(format!("column {}", column_id)));
        }
        let existing = state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id && t.column_id == Some(column_id))
            .count() as i64;
        Ok(state.insert_task(body, done, user_id, Some(column_id), None, RecurrenceKind::None, existing + 1))
    }

    async fn create_task_on_date(
        &self,
        body: &str,
        done: bool,
        user_id: UserId,
        date: NaiveDate,
        kind: RecurrenceKind,
    ) -> Result<Task, CoreError> {
        let mut state = self.state.lock().await;
        let order = state.day_load(user_id, date) + 1;
        let task = state.insert_task(body, done, user_id, None, Some(date), kind, order);
        if kind.is_recurring() {
            state.find_or_create_occurrence(task.id, date, order, done)?;
        }
        Ok(task)
    }

    async fn find_task_by_id(&self, id: TaskId) -> Result<Option<Task>, CoreError> {
        Ok(self.state.lock().await.tasks.get(&id).cloned())
    }

    async fn find_tasks_by_date(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let state = self.state.lock().await;
        let tasks = state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id && !t.is_recurring() && t.anchor_date == Some(date))
            .cloned()
            .collect();
        Ok(MemoryState::sorted(tasks))
    }

    async fn find_tasks_by_column(&self, user_id: UserId, column_id: ColumnId) -> Result<Vec<Task>, CoreError> {
        let state = self.state.lock().await;
        let tasks = state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id && !t.is_recurring() && t.column_id == Some(column_id))
            .cloned()
            .collect();
        Ok(MemoryState::sorted(tasks))
    }

    async fn find_recurring_tasks(&self, user_id: UserId) -> Result<Vec<Task>, CoreError> {
        let state = self.state.lock().await;
        let tasks = state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id && t.is_recurring())
            .cloned()
            .collect();
        Ok(MemoryState::sorted(tasks))
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, CoreError> {
        let mut state = self.state.lock().await;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFound(format!("task {}", id)))?;
        if let Some(body) = &patch.body {
            task.body = body.clone();
        }
        if let Some(done) = patch.done {
            task.done = done;
        }
        if let Some(order) = patch.order {
            task.order = order;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), CoreError> {
        if self.state.lock().await.remove_task(id) {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("task {}", id)))
        }
    }

    async fn verify_ownership(&self, task_ids: &[TaskId], user_id: UserId) -> Result<(), CoreError> {
        let state = self.state.lock().await;
        match task_ids
            .iter()
            .find(|id| state.tasks.get(*id).map_or(true, |t| t.user_id != user_id))
        {
            Some(stranger) => Err(CoreError::Forbidden(format!("task {}", stranger))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl super::ColumnRepository for MemoryRepository {
    async fn create_column(&self, user_id: UserId, name: &str) -> Result<Column, CoreError> {
        let mut state = self.state.lock().await;
        state.last_column_id += 1;
        let column = Column {
            id: state.last_column_id,
            uuid: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        state.columns.insert(column.id, column.clone());
        Ok(column)
    }

    async fn find_column_by_uuid(&self, uuid: Uuid) -> Result<Option<Column>, CoreError> {
        let state = self.state.lock().await;
        Ok(state.columns.values().find(|c| c.uuid == uuid).cloned())
    }

    async fn find_column_by_id(&self, id: ColumnId) -> Result<Option<Column>, CoreError> {
        Ok(self.state.lock().await.columns.get(&id).cloned())
    }

    async fn find_columns(&self, user_id: UserId) -> Result<Vec<Column>, CoreError> {
        let state = self.state.lock().await;
        Ok(state
            .columns
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn rename_column(&self, id: ColumnId, name: &str) -> Result<Column, CoreError> {
        let mut state = self.state.lock().await;
        let column = state
            .columns
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFound(format!("column {}", id)))?;
        column.name = name.to_string();
        Ok(column.clone())
    }

    async fn delete_column(&self, id: ColumnId) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if state.columns.remove(&id).is_none() {
            return Err(CoreError::NotFound(format!("column {}", id)));
        }
        let doomed: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|t| t.column_id == Some(id))
            .map(|t| t.id)
            .collect();
        for task_id in doomed {
            state.remove_task(task_id);
        }
        Ok(())
    }
}

#[async_trait]
impl super::OccurrenceRepository for MemoryRepository {
    async fn find_or_create_occurrence(
        &self,
        task_id: TaskId,
        date: NaiveDate,
        default_order: i64,
    ) -> Result<OccurrenceStatus, CoreError> {
        self.state
            .lock()
            .await
            .find_or_create_occurrence(task_id, date, default_order, false)
    }

    async fn find_occurrence_by_id(&self, id: OccurrenceId) -> Result<Option<OccurrenceStatus>, CoreError> {
        Ok(self.state.lock().await.occurrences.get(&id).cloned())
    }

    async fn update_occurrence(
        &self,
        id: OccurrenceId,
        patch: &OccurrencePatch,
    ) -> Result<OccurrenceStatus, CoreError> {
        let mut state = self.state.lock().await;
        let status = state
            .occurrences
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFound(format!("occurrence {}", id)))?;
        if let Some(done) = patch.done {
            status.done = done;
        }
        if let Some(order) = patch.order {
            status.order = order;
        }
        status.updated_at = Utc::now();
        Ok(status.clone())
    }
}

#[async_trait]
impl super::PlacementRepository for MemoryRepository {
    async fn apply_date_placements(
        &self,
        user_id: UserId,
        date: NaiveDate,
        placements: &[DatePlacement],
    ) -> Result<(), CoreError> {
        let mut guard = self.state.lock().await;
        let mut draft = guard.clone();
        let now = Utc::now();

        for placement in placements {
            match *placement {
                DatePlacement::Task { task_id, order } => {
                    let task = draft
                        .tasks
                        .get_mut(&task_id)
                        .filter(|t| t.user_id == user_id && !t.is_recurring())
                        .ok_or_else(|| CoreError::NotFound(format!("task {}", task_id)))?;
                    task.column_id = None;
                    task.anchor_date = Some(date);
                    task.order = order;
                    task.updated_at = now;
                }
                DatePlacement::Occurrence { task_id, order } => {
                    let recurring = draft
                        .tasks
                        .get(&task_id)
                        .is_some_and(|t| t.user_id == user_id && t.is_recurring());
                    if !recurring {
                        return Err(CoreError::NotFound(format!("recurring task {}", task_id)));
                    }
                    let status = draft.find_or_create_occurrence(task_id, date, order, false)?;
                    if let Some(row) = draft.occurrences.get_mut(&status.id) {
                        row.order = order;
                        row.updated_at = now;
                    }
                }
            }
        }

        *guard = draft;
        Ok(())
    }

    async fn apply_column_placements(
        &self,
        user_id: UserId,
        column_id: ColumnId,
        placements: &[ColumnPlacement],
    ) -> Result<(), CoreError> {
        let mut guard = self.state.lock().await;
        if !guard
            .columns
            .get(&column_id)
            .is_some_and(|c| c.user_id == user_id)
        {
            return Err(CoreError::Forbidden(format!("column {}", column_id)));
        }

        let mut draft = guard.clone();
        let now = Utc::now();
        for placement in placements {
            let task = draft
                .tasks
                .get_mut(&placement.task_id)
                .filter(|t| t.user_id == user_id && !t.is_recurring())
                .ok_or_else(|| CoreError::NotFound(format!("task {}", placement.task_id)))?;
            task.column_id = Some(column_id);
            task.anchor_date = None;
            task.order = placement.order;
            task.updated_at = now;
        }

        *guard = draft;
        Ok(())
    }

    async fn move_unfinished_before(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let mut state = self.state.lock().await;
        let mut stale: Vec<(NaiveDate, i64, TaskId)> = state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id && !t.is_recurring() && !t.done)
            .filter_map(|t| t.anchor_date.filter(|d| *d < date).map(|d| (d, t.order, t.id)))
            .collect();
        stale.sort();

        let mut next = state.day_load(user_id, date) + 1;
        let now = Utc::now();
        let mut moved = Vec::with_capacity(stale.len());
        for (_, _, task_id) in stale {
            if let Some(task) = state.tasks.get_mut(&task_id) {
                task.anchor_date = Some(date);
                task.order = next;
                task.updated_at = now;
                moved.push(task.clone());
                next += 1;
            }
        }
        Ok(moved)
    }
}
