use serde::{Deserialize, Serialize};

/// Settings for [`crate::engine::SchedulingEngine`], fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Optional cap on the days (both ends included) one window query may span.
    /// Unbounded when unset.
    pub max_window_days: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_window_days: None }
    }
}

/// Settings for opening the SQLite store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database_path: String,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: "dayboard.db".to_string(),
            max_connections: 5,
        }
    }
}
