use crate::error::CoreError;
use crate::models::{OccurrenceId, OccurrencePatch, OccurrenceStatus, TaskId};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqliteConnection;

#[async_trait]
impl super::OccurrenceRepository for SqliteRepository {
    async fn find_or_create_occurrence(
        &self,
        task_id: TaskId,
        date: NaiveDate,
        default_order: i64,
    ) -> Result<OccurrenceStatus, CoreError> {
        let mut conn = self.pool().acquire().await?;
        Self::find_or_create_occurrence_in(&mut conn, task_id, date, default_order, false).await
    }

    async fn find_occurrence_by_id(&self, id: OccurrenceId) -> Result<Option<OccurrenceStatus>, CoreError> {
        let status = sqlx::query_as("SELECT * FROM recurring_occurrence_status WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(status)
    }

    async fn update_occurrence(
        &self,
        id: OccurrenceId,
        patch: &OccurrencePatch,
    ) -> Result<OccurrenceStatus, CoreError> {
        let mut tx = self.pool().begin().await?;

        let current: OccurrenceStatus =
            sqlx::query_as("SELECT * FROM recurring_occurrence_status WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("occurrence {}", id)))?;

        let status: OccurrenceStatus = sqlx::query_as(
            "UPDATE recurring_occurrence_status SET done = ?, position = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(patch.done.unwrap_or(current.done))
        .bind(patch.order.unwrap_or(current.order))
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(status)
    }
}

impl SqliteRepository {
    /// Insert-if-absent on the `(task_id, date)` key, then read the row back.
    /// Concurrent callers all end up with the same row.
    pub(crate) async fn find_or_create_occurrence_in(
        conn: &mut SqliteConnection,
        task_id: TaskId,
        date: NaiveDate,
        order: i64,
        done: bool,
    ) -> Result<OccurrenceStatus, CoreError> {
        let now = Utc::now();
        sqlx::query(
            r#"INSERT INTO recurring_occurrence_status (task_id, date, done, position, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(task_id, date) DO NOTHING"#,
        )
        .bind(task_id)
        .bind(date)
        .bind(done)
        .bind(order)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        let status = sqlx::query_as(
            "SELECT * FROM recurring_occurrence_status WHERE task_id = ? AND date = ?",
        )
        .bind(task_id)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;
        Ok(status)
    }
}
