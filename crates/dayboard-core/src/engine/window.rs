use super::SchedulingEngine;
use crate::dates::{parse_date, DateRange};
use crate::error::CoreError;
use crate::models::{DayView, TaskView, UserId};
use crate::recurrence::matches;
use crate::repository::Repository;
use chrono::Datelike;
use tracing::debug;

impl<R: Repository> SchedulingEngine<R> {
    /// Per-day task lists for `[from, to]`, both ends included.
    ///
    /// Each day holds the recurring tasks occurring on it followed by its single
    /// tasks, sorted by order (recurring first on ties). Occurrence rows are
    /// created lazily on first view, seeded with the task's own order.
    pub async fn get_window(&self, user_id: UserId, from: &str, to: &str) -> Result<Vec<DayView>, CoreError> {
        let range = DateRange::new(parse_date(from)?, parse_date(to)?)?;
        if let Some(max) = self.config.max_window_days {
            if range.len_days() > i64::from(max) {
                return Err(CoreError::InvalidDateRange(format!(
                    "{} days requested, at most {} allowed",
                    range.len_days(),
                    max
                )));
            }
        }

        let recurring = self.repo.find_recurring_tasks(user_id).await?;
        let mut days = Vec::with_capacity(range.len_days() as usize);

        for date in range.iter() {
            let mut tasks: Vec<TaskView> = Vec::new();
            for task in &recurring {
                let Some(anchor) = task.anchor_date else {
                    continue;
                };
                if !matches(anchor, date, task.recurring_kind) {
                    continue;
                }
                let status = self
                    .repo
                    .find_or_create_occurrence(task.id, date, task.order)
                    .await?;
                tasks.push(TaskView::occurrence(task, &status));
            }

            let singles = self.repo.find_tasks_by_date(user_id, date).await?;
            tasks.extend(singles.iter().map(|t| TaskView::single(t, None)));
            // stable: recurring entries were pushed first
            tasks.sort_by_key(|view| view.order);

            days.push(DayView {
                date,
                weekday: date.weekday(),
                tasks,
            });
        }

        debug!(user_id, from = %range.from(), to = %range.to(), "window built");
        Ok(days)
    }
}
