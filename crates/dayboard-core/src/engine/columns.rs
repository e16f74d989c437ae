use super::SchedulingEngine;
use crate::error::CoreError;
use crate::models::{Column, ColumnView, TaskView, UserId};
use crate::repository::Repository;
use tracing::info;
use uuid::Uuid;

impl<R: Repository> SchedulingEngine<R> {
    pub async fn create_column(&self, user_id: UserId, name: &str) -> Result<ColumnView, CoreError> {
        let name = checked_name(name)?;
        let column = self.repo.create_column(user_id, name).await?;
        info!(user_id, column = %column.uuid, "column created");
        Ok(ColumnView {
            uuid: column.uuid,
            name: column.name,
            tasks: Vec::new(),
        })
    }

    /// All of the user's columns with their tasks, in creation order.
    pub async fn list_columns(&self, user_id: UserId) -> Result<Vec<ColumnView>, CoreError> {
        let columns = self.repo.find_columns(user_id).await?;
        let mut views = Vec::with_capacity(columns.len());
        for column in columns {
            views.push(self.column_view(column).await?);
        }
        Ok(views)
    }

    pub async fn get_column(&self, user_id: UserId, column_uuid: &str) -> Result<ColumnView, CoreError> {
        let column = self.owned_column(user_id, column_uuid).await?;
        self.column_view(column).await
    }

    pub async fn rename_column(
        &self,
        user_id: UserId,
        column_uuid: &str,
        name: &str,
    ) -> Result<ColumnView, CoreError> {
        let name = checked_name(name)?;
        let column = self.owned_column(user_id, column_uuid).await?;
        let column = self
            .repo
            .rename_column(column.id, name)
            .await
            .map_err(column_scope)?;
        info!(user_id, column = %column.uuid, "column renamed");
        self.column_view(column).await
    }

    /// Delete a column and every task in it.
    pub async fn delete_column(&self, user_id: UserId, column_uuid: &str) -> Result<(), CoreError> {
        let column = self.owned_column(user_id, column_uuid).await?;
        self.repo.delete_column(column.id).await.map_err(column_scope)?;
        info!(user_id, column = %column.uuid, "column deleted");
        Ok(())
    }

    /// Someone else's column is indistinguishable from a missing one here.
    pub(super) async fn owned_column(&self, user_id: UserId, column_uuid: &str) -> Result<Column, CoreError> {
        let uuid = Uuid::parse_str(column_uuid.trim()).map_err(|_| CoreError::ColumnNotFound)?;
        match self.repo.find_column_by_uuid(uuid).await? {
            Some(column) if column.user_id == user_id => Ok(column),
            _ => Err(CoreError::ColumnNotFound),
        }
    }

    async fn column_view(&self, column: Column) -> Result<ColumnView, CoreError> {
        let tasks = self
            .repo
            .find_tasks_by_column(column.user_id, column.id)
            .await?
            .iter()
            .map(|t| TaskView::single(t, Some(column.uuid)))
            .collect();
        Ok(ColumnView {
            uuid: column.uuid,
            name: column.name,
            tasks,
        })
    }
}

fn checked_name(name: &str) -> Result<&str, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::InvalidInput("Column name is missing".to_string()));
    }
    Ok(name)
}

fn column_scope(err: CoreError) -> CoreError {
    match err {
        CoreError::NotFound(_) | CoreError::Forbidden(_) => CoreError::ColumnNotFound,
        other => other,
    }
}
