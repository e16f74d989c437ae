use crate::error::CoreError;
use crate::models::{ColumnId, RecurrenceKind, Task, TaskId, TaskPatch, UserId};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashSet;
use tracing::debug;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn create_task_on_column(
        &self,
        body: &str,
        done: bool,
        user_id: UserId,
        column_id: ColumnId,
    ) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE user_id = ? AND column_id = ?")
                .bind(user_id)
                .bind(column_id)
                .fetch_one(&mut *tx)
                .await?;

        let now = Utc::now();
        let task: Task = sqlx::query_as(
            r#"INSERT INTO tasks (user_id, column_id, body, done, position, recurring_kind, anchor_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, NULL, ?, ?)
            RETURNING *"#,
        )
        .bind(user_id)
        .bind(column_id)
        .bind(body)
        .bind(done)
        .bind(existing + 1)
        .bind(RecurrenceKind::None)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(task)
    }

    async fn create_task_on_date(
        &self,
        body: &str,
        done: bool,
        user_id: UserId,
        date: NaiveDate,
        kind: RecurrenceKind,
    ) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let order = Self::day_load_in(&mut tx, user_id, date).await? + 1;
        let now = Utc::now();
        let task: Task = sqlx::query_as(
            r#"INSERT INTO tasks (user_id, column_id, body, done, position, recurring_kind, anchor_date, created_at, updated_at)
            VALUES (?, NULL, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#,
        )
        .bind(user_id)
        .bind(body)
        .bind(done)
        .bind(order)
        .bind(kind)
        .bind(date)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        if kind.is_recurring() {
            Self::find_or_create_occurrence_in(&mut tx, task.id, date, order, done).await?;
        }

        tx.commit().await?;
        Ok(task)
    }

    async fn find_task_by_id(&self, id: TaskId) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks_by_date(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE user_id = ? AND anchor_date = ? AND recurring_kind = 'none'
            ORDER BY position, id"#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn find_tasks_by_column(&self, user_id: UserId, column_id: ColumnId) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE user_id = ? AND column_id = ? AND recurring_kind = 'none'
            ORDER BY position, id"#,
        )
        .bind(user_id)
        .bind(column_id)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn find_recurring_tasks(&self, user_id: UserId) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE user_id = ? AND recurring_kind != 'none'
            ORDER BY position, id"#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let current: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("task {}", id)))?;

        let body = patch.body.as_deref().unwrap_or(&current.body);
        let done = patch.done.unwrap_or(current.done);
        let order = patch.order.unwrap_or(current.order);

        let task: Task = sqlx::query_as(
            "UPDATE tasks SET body = ?, done = ?, position = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(body)
        .bind(done)
        .bind(order)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }

    async fn verify_ownership(&self, task_ids: &[TaskId], user_id: UserId) -> Result<(), CoreError> {
        if task_ids.is_empty() {
            return Ok(());
        }

        let mut query_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id FROM tasks WHERE user_id = ");
        query_builder.push_bind(user_id);
        query_builder.push(" AND id IN (");
        let mut separated = query_builder.separated(", ");
        for id in task_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let owned: HashSet<TaskId> = query_builder
            .build_query_scalar::<TaskId>()
            .fetch_all(self.pool())
            .await?
            .into_iter()
            .collect();

        if let Some(stranger) = task_ids.iter().find(|id| !owned.contains(*id)) {
            debug!(task_id = stranger, user_id, "ownership check failed");
            return Err(CoreError::Forbidden(format!("task {}", stranger)));
        }
        Ok(())
    }
}

impl SqliteRepository {
    /// Number of entries already on `date` for the user: single tasks plus
    /// occurrence rows of recurring tasks.
    pub(crate) async fn day_load_in(
        conn: &mut SqliteConnection,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<i64, CoreError> {
        let singles: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tasks WHERE user_id = ? AND anchor_date = ? AND recurring_kind = 'none'",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        let occurrences: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM recurring_occurrence_status s
            JOIN tasks t ON t.id = s.task_id
            WHERE t.user_id = ? AND t.recurring_kind != 'none' AND s.date = ?"#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(singles + occurrences)
    }
}
