use crate::error::CoreError;
use crate::models::{Column, ColumnId, UserId};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::ColumnRepository for SqliteRepository {
    async fn create_column(&self, user_id: UserId, name: &str) -> Result<Column, CoreError> {
        let column = sqlx::query_as(
            "INSERT INTO columns (uuid, user_id, name, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;
        Ok(column)
    }

    async fn find_column_by_uuid(&self, uuid: Uuid) -> Result<Option<Column>, CoreError> {
        let column = sqlx::query_as("SELECT * FROM columns WHERE uuid = ?")
            .bind(uuid)
            .fetch_optional(self.pool())
            .await?;
        Ok(column)
    }

    async fn find_column_by_id(&self, id: ColumnId) -> Result<Option<Column>, CoreError> {
        let column = sqlx::query_as("SELECT * FROM columns WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(column)
    }

    async fn find_columns(&self, user_id: UserId) -> Result<Vec<Column>, CoreError> {
        let columns = sqlx::query_as("SELECT * FROM columns WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(self.pool())
            .await?;
        Ok(columns)
    }

    async fn rename_column(&self, id: ColumnId, name: &str) -> Result<Column, CoreError> {
        sqlx::query_as("UPDATE columns SET name = ? WHERE id = ? RETURNING *")
            .bind(name)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("column {}", id)))
    }

    async fn delete_column(&self, id: ColumnId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM columns WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("column {}", id)));
        }
        Ok(())
    }
}
