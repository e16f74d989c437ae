use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Opaque user identifier handed in by the identity layer.
pub type UserId = u32;
pub type TaskId = i64;
/// Internal column key. Never leaves the core; callers see [`Column::uuid`].
pub type ColumnId = i64;
pub type OccurrenceId = i64;

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type,
)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    #[default]
    None,
    Day,
    Week,
    Month,
    Year,
}

impl RecurrenceKind {
    /// Every kind that actually repeats, in the order the classifier tries them.
    pub const REPEATING: [RecurrenceKind; 4] = [
        RecurrenceKind::Day,
        RecurrenceKind::Week,
        RecurrenceKind::Month,
        RecurrenceKind::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::None => "none",
            RecurrenceKind::Day => "day",
            RecurrenceKind::Week => "week",
            RecurrenceKind::Month => "month",
            RecurrenceKind::Year => "year",
        }
    }

    #[inline]
    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrenceKind::None)
    }
}

impl std::fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence kind: {0}")]
pub struct ParseRecurrenceKindError(String);

impl FromStr for RecurrenceKind {
    type Err = ParseRecurrenceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RecurrenceKind::None),
            "day" => Ok(RecurrenceKind::Day),
            "week" => Ok(RecurrenceKind::Week),
            "month" => Ok(RecurrenceKind::Month),
            "year" => Ok(RecurrenceKind::Year),
            _ => Err(ParseRecurrenceKindError(s.to_string())),
        }
    }
}

/// A kanban item or a date-anchored item.
///
/// Exactly one of `column_id` / `anchor_date` is set. Recurring tasks always
/// carry an `anchor_date` and never a column; their per-day completion lives
/// in [`OccurrenceStatus`], so `done` is only meaningful for single tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub column_id: Option<ColumnId>,
    pub body: String,
    pub done: bool,
    #[sqlx(rename = "position")]
    pub order: i64,
    pub recurring_kind: RecurrenceKind,
    pub anchor_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a task currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Column(ColumnId),
    Date(NaiveDate),
}

impl Task {
    #[inline]
    pub fn is_recurring(&self) -> bool {
        self.recurring_kind.is_recurring()
    }

    pub fn placement(&self) -> Option<Placement> {
        match (self.column_id, self.anchor_date) {
            (Some(column_id), _) => Some(Placement::Column(column_id)),
            (None, Some(date)) => Some(Placement::Date(date)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Column {
    pub id: ColumnId,
    pub uuid: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Per-(task, date) override for one occurrence of a recurring task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OccurrenceStatus {
    pub id: OccurrenceId,
    pub task_id: TaskId,
    pub date: NaiveDate,
    pub done: bool,
    #[sqlx(rename = "position")]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Store-level patches and placement primitives
// ============================================================================

/// Fields of a base task that may be changed in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub body: Option<String>,
    pub done: Option<bool>,
    pub order: Option<i64>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.done.is_none() && self.order.is_none()
    }
}

/// Fields of an occurrence row that may be changed in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrencePatch {
    pub done: Option<bool>,
    pub order: Option<i64>,
}

impl OccurrencePatch {
    pub fn is_empty(&self) -> bool {
        self.done.is_none() && self.order.is_none()
    }
}

/// One row mutation of a reposition-to-date batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePlacement {
    /// Move a single task onto the date and give it `order`.
    Task { task_id: TaskId, order: i64 },
    /// Find or create the occurrence of a recurring task on the date and give it `order`.
    Occurrence { task_id: TaskId, order: i64 },
}

/// One row mutation of a reposition-to-column batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPlacement {
    pub task_id: TaskId,
    pub order: i64,
}

// ============================================================================
// Engine requests
// ============================================================================

/// Input of [`crate::engine::SchedulingEngine::create_task`].
///
/// Empty strings in `column_uuid` / `date` count as absent.
#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub body: String,
    pub done: bool,
    pub column_uuid: Option<String>,
    /// `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
}

/// Input of [`crate::engine::SchedulingEngine::update_task`].
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub body: Option<String>,
    pub done: Option<bool>,
    pub order: Option<i64>,
    /// Routes `done` / `order` to this occurrence instead of the base task.
    pub occurrence_id: Option<OccurrenceId>,
}

/// Destination of a reposition batch. Boundary strings, validated by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositionTarget {
    Column(String),
    Date(String),
}

// ============================================================================
// Views
// ============================================================================

/// A task as rendered for one placement.
///
/// For recurring tasks `done` and `order` come from the occurrence of `date`,
/// and `occurrence_id` names that row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: TaskId,
    pub body: String,
    pub done: bool,
    pub order: i64,
    pub recurring_kind: RecurrenceKind,
    pub date: Option<NaiveDate>,
    pub column_uuid: Option<Uuid>,
    pub occurrence_id: Option<OccurrenceId>,
}

impl TaskView {
    pub fn single(task: &Task, column_uuid: Option<Uuid>) -> Self {
        Self {
            id: task.id,
            body: task.body.clone(),
            done: task.done,
            order: task.order,
            recurring_kind: task.recurring_kind,
            date: task.anchor_date,
            column_uuid,
            occurrence_id: None,
        }
    }

    pub fn occurrence(task: &Task, status: &OccurrenceStatus) -> Self {
        Self {
            id: task.id,
            body: task.body.clone(),
            done: status.done,
            order: status.order,
            recurring_kind: task.recurring_kind,
            date: Some(status.date),
            column_uuid: None,
            occurrence_id: Some(status.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub uuid: Uuid,
    pub name: String,
    pub tasks: Vec<TaskView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(column_id: Option<ColumnId>, anchor_date: Option<NaiveDate>) -> Task {
        Task {
            id: 1,
            user_id: 9,
            column_id,
            body: "Buy milk".to_string(),
            done: false,
            order: 1,
            recurring_kind: RecurrenceKind::None,
            anchor_date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_recurrence_kind_round_trips_through_str() {
        for kind in RecurrenceKind::REPEATING {
            assert_eq!(kind.as_str().parse::<RecurrenceKind>(), Ok(kind));
        }
        assert_eq!("none".parse::<RecurrenceKind>(), Ok(RecurrenceKind::None));
        assert!("Week".parse::<RecurrenceKind>().is_err());
    }

    #[test]
    fn test_placement() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(task(Some(4), None).placement(), Some(Placement::Column(4)));
        assert_eq!(task(None, Some(date)).placement(), Some(Placement::Date(date)));
        assert_eq!(task(None, None).placement(), None);
    }

    #[test]
    fn test_patch_emptiness() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch { done: Some(true), ..Default::default() }.is_empty());
        assert!(OccurrencePatch::default().is_empty());
    }
}
