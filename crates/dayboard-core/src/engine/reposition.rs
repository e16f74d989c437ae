use super::{task_scope, SchedulingEngine};
use crate::dates::parse_date;
use crate::error::CoreError;
use crate::models::{ColumnPlacement, DatePlacement, RepositionTarget, Task, TaskId, UserId};
use crate::recurrence::matches;
use crate::repository::Repository;
use std::collections::HashSet;
use tracing::{debug, info, warn};

impl<R: Repository> SchedulingEngine<R> {
    /// Place `task_ids` into a column or onto a date, in list order.
    ///
    /// The batch is all-or-nothing. Ownership of every id is checked before
    /// anything else. Orders start at 1. On a date, recurring tasks that do not
    /// occur there are left out and do not consume an order.
    pub async fn reposition(
        &self,
        user_id: UserId,
        task_ids: &[TaskId],
        target: RepositionTarget,
    ) -> Result<(), CoreError> {
        if let Err(err) = self.repo.verify_ownership(task_ids, user_id).await {
            warn!(user_id, count = task_ids.len(), "reposition rejected: {}", err);
            return Err(task_scope(err));
        }

        let mut seen = HashSet::with_capacity(task_ids.len());
        if let Some(dup) = task_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(CoreError::InvalidInput(format!("task {} listed twice", dup)));
        }

        let mut tasks = Vec::with_capacity(task_ids.len());
        for id in task_ids {
            tasks.push(self.owned_task(user_id, *id).await?);
        }

        match target {
            RepositionTarget::Column(column_uuid) => {
                let column = self.owned_column(user_id, &column_uuid).await?;
                if tasks.iter().any(Task::is_recurring) {
                    warn!(user_id, column = %column.uuid, "recurring task sent to a column");
                    return Err(CoreError::ColumnForbidden);
                }

                let placements: Vec<ColumnPlacement> = tasks
                    .iter()
                    .zip(1..)
                    .map(|(task, order)| ColumnPlacement {
                        task_id: task.id,
                        order,
                    })
                    .collect();
                self.repo
                    .apply_column_placements(user_id, column.id, &placements)
                    .await
                    .map_err(|e| match e {
                        CoreError::Forbidden(_) => CoreError::ColumnNotFound,
                        other => task_scope(other),
                    })?;
                info!(user_id, column = %column.uuid, count = placements.len(), "tasks moved to column");
            }
            RepositionTarget::Date(date) => {
                let date = parse_date(&date)?;
                let placements = plan_date_placements(&tasks, date);
                self.repo
                    .apply_date_placements(user_id, date, &placements)
                    .await
                    .map_err(task_scope)?;
                info!(user_id, %date, count = placements.len(), "tasks moved to date");
            }
        }
        Ok(())
    }
}

/// One shared counter across single and recurring entries, starting at 1.
fn plan_date_placements(tasks: &[Task], date: chrono::NaiveDate) -> Vec<DatePlacement> {
    let mut placements = Vec::with_capacity(tasks.len());
    let mut order = 1;
    for task in tasks {
        if !task.is_recurring() {
            placements.push(DatePlacement::Task {
                task_id: task.id,
                order,
            });
            order += 1;
            continue;
        }

        let occurs = task
            .anchor_date
            .is_some_and(|anchor| matches(anchor, date, task.recurring_kind));
        if occurs {
            placements.push(DatePlacement::Occurrence {
                task_id: task.id,
                order,
            });
            order += 1;
        } else {
            debug!(task_id = task.id, %date, "recurring task does not occur on target date");
        }
    }
    placements
}
