use crate::error::CoreError;
use crate::models::{ColumnId, ColumnPlacement, DatePlacement, Task, UserId};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::debug;

// A failing row returns early; the open transaction is dropped and rolled back.

#[async_trait]
impl super::PlacementRepository for SqliteRepository {
    async fn apply_date_placements(
        &self,
        user_id: UserId,
        date: NaiveDate,
        placements: &[DatePlacement],
    ) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;
        let now = Utc::now();

        for placement in placements {
            match *placement {
                DatePlacement::Task { task_id, order } => {
                    let result = sqlx::query(
                        r#"UPDATE tasks SET column_id = NULL, anchor_date = ?, position = ?, updated_at = ?
                        WHERE id = ? AND user_id = ? AND recurring_kind = 'none'"#,
                    )
                    .bind(date)
                    .bind(order)
                    .bind(now)
                    .bind(task_id)
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;

                    if result.rows_affected() == 0 {
                        return Err(CoreError::NotFound(format!("task {}", task_id)));
                    }
                }
                DatePlacement::Occurrence { task_id, order } => {
                    let recurring: Option<i64> = sqlx::query_scalar(
                        "SELECT id FROM tasks WHERE id = ? AND user_id = ? AND recurring_kind != 'none'",
                    )
                    .bind(task_id)
                    .bind(user_id)
                    .fetch_optional(&mut *tx)
                    .await?;
                    if recurring.is_none() {
                        return Err(CoreError::NotFound(format!("recurring task {}", task_id)));
                    }

                    let status =
                        Self::find_or_create_occurrence_in(&mut tx, task_id, date, order, false)
                            .await?;
                    sqlx::query(
                        "UPDATE recurring_occurrence_status SET position = ?, updated_at = ? WHERE id = ?",
                    )
                    .bind(order)
                    .bind(now)
                    .bind(status.id)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        debug!(user_id, %date, rows = placements.len(), "date placements applied");
        Ok(())
    }

    async fn apply_column_placements(
        &self,
        user_id: UserId,
        column_id: ColumnId,
        placements: &[ColumnPlacement],
    ) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;

        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM columns WHERE id = ? AND user_id = ?")
                .bind(column_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if owned.is_none() {
            return Err(CoreError::Forbidden(format!("column {}", column_id)));
        }

        let now = Utc::now();
        for placement in placements {
            let result = sqlx::query(
                r#"UPDATE tasks SET column_id = ?, anchor_date = NULL, position = ?, updated_at = ?
                WHERE id = ? AND user_id = ? AND recurring_kind = 'none'"#,
            )
            .bind(column_id)
            .bind(placement.order)
            .bind(now)
            .bind(placement.task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(CoreError::NotFound(format!("task {}", placement.task_id)));
            }
        }

        tx.commit().await?;
        debug!(user_id, column_id, rows = placements.len(), "column placements applied");
        Ok(())
    }

    async fn move_unfinished_before(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let mut tx = self.pool().begin().await?;

        let stale: Vec<Task> = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE user_id = ? AND recurring_kind = 'none' AND done = 0
              AND anchor_date IS NOT NULL AND anchor_date < ?
            ORDER BY anchor_date, position, id"#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&mut *tx)
        .await?;

        if stale.is_empty() {
            return Ok(Vec::new());
        }

        let mut next = Self::day_load_in(&mut tx, user_id, date).await? + 1;
        let now = Utc::now();
        let mut moved = Vec::with_capacity(stale.len());
        for task in stale {
            let task: Task = sqlx::query_as(
                "UPDATE tasks SET anchor_date = ?, position = ?, updated_at = ? WHERE id = ? RETURNING *",
            )
            .bind(date)
            .bind(next)
            .bind(now)
            .bind(task.id)
            .fetch_one(&mut *tx)
            .await?;
            moved.push(task);
            next += 1;
        }

        tx.commit().await?;
        Ok(moved)
    }
}
