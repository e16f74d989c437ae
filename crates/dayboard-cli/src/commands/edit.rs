use anyhow::Result;
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::models::UpdateTaskData;
use dayboard_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::{DeleteCommand, EditCommand, ShowCommand};
use crate::views::table::display_task;

pub async fn show_task<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: ShowCommand,
) -> Result<()> {
    let task = engine.get_task(user_id, command.id).await?;
    display_task(&task);
    Ok(())
}

pub async fn edit_task<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: EditCommand,
) -> Result<()> {
    let data = UpdateTaskData {
        body: command.text.clone(),
        done: command.done_flag(),
        order: command.order,
        occurrence_id: command.occurrence,
    };
    let task = engine.update_task(user_id, command.id, data).await?;

    match (task.occurrence_id, task.date) {
        (Some(_), Some(date)) => println!("Updated task '{}' for {}", task.body, date),
        _ => println!("Updated task '{}'", task.body),
    }
    Ok(())
}

pub async fn delete_task<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: DeleteCommand,
) -> Result<()> {
    let task = engine.get_task(user_id, command.id).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete task '{}'?", task.body))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    engine.delete_task(user_id, task.id).await?;
    println!("Deleted task '{}'", task.body);
    Ok(())
}
