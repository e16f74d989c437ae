//! # Dayboard Core Library
//!
//! A personal board of tasks: kanban columns plus per-day lists, where a task
//! whose text ends in `every day|week|month|year` recurs on the calendar.
//!
//! ## Core Modules
//!
//! - [`recurrence`]: Classifier for task text and the calendar matcher
//! - [`engine`]: Scheduling engine with every user-facing operation
//! - [`repository`]: Data access layer with Repository pattern (SQLite and in-memory)
//! - [`models`]: Core data structures, request and view types
//! - [`db`]: Database connection and migration management
//! - [`sweep`]: Slot computation for the nightly move-to-today sweep
//! - [`error`]: Error type with stable codes
//!
//! ## Example Usage
//!
//! ```rust
//! use dayboard_core::{
//!     config::EngineConfig,
//!     engine::{FixedClock, SchedulingEngine},
//!     models::{NewTaskData, RecurrenceKind},
//!     repository::MemoryRepository,
//! };
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dayboard_core::error::CoreError> {
//!     let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//!     let engine = SchedulingEngine::with_clock(
//!         MemoryRepository::new(),
//!         EngineConfig::default(),
//!         FixedClock(today),
//!     );
//!
//!     let task = engine
//!         .create_task(7, NewTaskData {
//!             body: "Water plants every week".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     assert_eq!(task.body, "Water plants");
//!     assert_eq!(task.recurring_kind, RecurrenceKind::Week);
//!
//!     let days = engine.get_window(7, "2024-01-01", "2024-01-14").await?;
//!     let hits: usize = days.iter().map(|d| d.tasks.len()).sum();
//!     assert_eq!(hits, 2);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dates;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod sweep;
