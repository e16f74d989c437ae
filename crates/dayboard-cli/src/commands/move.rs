use anyhow::{bail, Result};
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::models::RepositionTarget;
use dayboard_core::repository::Repository;

use crate::cli::MoveCommand;

pub async fn move_tasks<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: MoveCommand,
) -> Result<()> {
    let target = match (command.target.date, command.target.column) {
        (Some(date), None) => RepositionTarget::Date(date),
        (None, Some(column)) => RepositionTarget::Column(column),
        _ => bail!("exactly one of --date or --column is required"),
    };
    let label = match &target {
        RepositionTarget::Date(date) => format!("day {}", date),
        RepositionTarget::Column(column) => format!("column {}", column),
    };

    engine.reposition(user_id, &command.ids, target).await?;
    println!("Moved {} task(s) to {}", command.ids.len(), label);
    Ok(())
}
