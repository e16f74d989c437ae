use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    Column, ColumnId, ColumnPlacement, DatePlacement, OccurrenceId, OccurrencePatch,
    OccurrenceStatus, RecurrenceKind, Task, TaskId, TaskPatch, UserId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

pub mod columns;
pub mod memory;
pub mod occurrences;
pub mod placements;
pub mod tasks;

pub use memory::MemoryRepository;

// Traits are defined in this module and implemented in respective domain modules.
// Store errors are `NotFound` / `Forbidden`; the engine maps them to its own codes.

/// Domain-specific trait for task rows
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Append a single task to the end of a column.
    async fn create_task_on_column(
        &self,
        body: &str,
        done: bool,
        user_id: UserId,
        column_id: ColumnId,
    ) -> Result<Task, CoreError>;

    /// Append a task to the end of a day. Recurring tasks also get their
    /// occurrence row for `date`, carrying `done` and the same order.
    async fn create_task_on_date(
        &self,
        body: &str,
        done: bool,
        user_id: UserId,
        date: NaiveDate,
        kind: RecurrenceKind,
    ) -> Result<Task, CoreError>;

    async fn find_task_by_id(&self, id: TaskId) -> Result<Option<Task>, CoreError>;

    /// Single tasks anchored on `date`, by order.
    async fn find_tasks_by_date(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<Task>, CoreError>;

    async fn find_tasks_by_column(&self, user_id: UserId, column_id: ColumnId) -> Result<Vec<Task>, CoreError>;

    /// Every recurring task of the user, whatever its anchor.
    async fn find_recurring_tasks(&self, user_id: UserId) -> Result<Vec<Task>, CoreError>;

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, CoreError>;

    /// Removes the task. Its occurrence rows are left in place.
    async fn delete_task(&self, id: TaskId) -> Result<(), CoreError>;

    /// Fails with `Forbidden` unless every id names a task owned by `user_id`.
    async fn verify_ownership(&self, task_ids: &[TaskId], user_id: UserId) -> Result<(), CoreError>;
}

/// Domain-specific trait for column rows
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    async fn create_column(&self, user_id: UserId, name: &str) -> Result<Column, CoreError>;
    async fn find_column_by_uuid(&self, uuid: Uuid) -> Result<Option<Column>, CoreError>;
    async fn find_column_by_id(&self, id: ColumnId) -> Result<Option<Column>, CoreError>;
    async fn find_columns(&self, user_id: UserId) -> Result<Vec<Column>, CoreError>;
    async fn rename_column(&self, id: ColumnId, name: &str) -> Result<Column, CoreError>;
    /// Removes the column and every task in it.
    async fn delete_column(&self, id: ColumnId) -> Result<(), CoreError>;
}

/// Domain-specific trait for per-day occurrence rows of recurring tasks
#[async_trait]
pub trait OccurrenceRepository: Send + Sync {
    /// Returns the row for `(task_id, date)`, inserting it with `done = false`
    /// and `default_order` when missing. Never produces a duplicate.
    async fn find_or_create_occurrence(
        &self,
        task_id: TaskId,
        date: NaiveDate,
        default_order: i64,
    ) -> Result<OccurrenceStatus, CoreError>;

    async fn find_occurrence_by_id(&self, id: OccurrenceId) -> Result<Option<OccurrenceStatus>, CoreError>;

    async fn update_occurrence(
        &self,
        id: OccurrenceId,
        patch: &OccurrencePatch,
    ) -> Result<OccurrenceStatus, CoreError>;
}

/// Domain-specific trait for multi-row moves. Every method is all-or-nothing.
#[async_trait]
pub trait PlacementRepository: Send + Sync {
    async fn apply_date_placements(
        &self,
        user_id: UserId,
        date: NaiveDate,
        placements: &[DatePlacement],
    ) -> Result<(), CoreError>;

    async fn apply_column_placements(
        &self,
        user_id: UserId,
        column_id: ColumnId,
        placements: &[ColumnPlacement],
    ) -> Result<(), CoreError>;

    /// Move every unfinished single task dated before `date` onto `date`,
    /// appended after what is already there. Returns the moved tasks.
    async fn move_unfinished_before(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<Task>, CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository:
    TaskRepository + ColumnRepository + OccurrenceRepository + PlacementRepository
{
}

impl<T> Repository for T where
    T: TaskRepository + ColumnRepository + OccurrenceRepository + PlacementRepository
{
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
