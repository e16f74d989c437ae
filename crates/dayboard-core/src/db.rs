use crate::config::StoreConfig;
use crate::error::CoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::debug;

// Re-export the pool for use in other parts of the core crate
pub use sqlx::SqlitePool as DbPool;

/// Opens a connection pool to the SQLite database and runs migrations.
///
/// The database file (and its parent directory) is created when missing.
/// Foreign keys are enforced on every connection.
pub async fn establish_connection(config: &StoreConfig) -> Result<SqlitePool, CoreError> {
    if let Some(parent) = Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    debug!(path = %config.database_path, "database ready");

    Ok(pool)
}
