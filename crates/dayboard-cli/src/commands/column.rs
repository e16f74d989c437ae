use anyhow::Result;
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::{ColumnCommand, ColumnSubcommand};
use crate::views::table::{display_column, display_columns};

pub async fn column_command<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: ColumnCommand,
) -> Result<()> {
    match command.command {
        ColumnSubcommand::Add(add) => {
            let column = engine.create_column(user_id, &add.name).await?;
            println!("Added column '{}' ({})", column.name, column.uuid);
        }
        ColumnSubcommand::List => {
            let columns = engine.list_columns(user_id).await?;
            display_columns(&columns);
        }
        ColumnSubcommand::Show(column) => {
            let column = engine.get_column(user_id, &column.uuid).await?;
            display_column(&column);
        }
        ColumnSubcommand::Rename(rename) => {
            let column = engine.rename_column(user_id, &rename.uuid, &rename.name).await?;
            println!("Renamed column to '{}'", column.name);
        }
        ColumnSubcommand::Delete(delete) => {
            let column = engine.get_column(user_id, &delete.uuid).await?;
            if !delete.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Delete column '{}' and its {} task(s)?",
                        column.name,
                        column.tasks.len()
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }
            engine.delete_column(user_id, &delete.uuid).await?;
            println!("Deleted column '{}'", column.name);
        }
    }
    Ok(())
}
