use anyhow::Result;
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::models::NewTaskData;
use dayboard_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;

pub async fn add_task<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: AddCommand,
) -> Result<()> {
    let data = NewTaskData {
        body: command.text,
        done: command.done,
        column_uuid: command.column,
        date: command.date,
    };
    let task = engine.create_task(user_id, data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    if task.recurring_kind.is_recurring() {
        println!(
            "{} Created recurring task: {}",
            "✓".style(success_style),
            task.body.bright_white().bold()
        );
        println!(
            "  {} Repeats every {} starting {}",
            "→".style(info_style),
            task.recurring_kind,
            task.date.map(|d| d.to_string()).unwrap_or_default()
        );
    } else {
        println!(
            "{} Created task: {}",
            "✓".style(success_style),
            task.body.bright_white().bold()
        );
        match (task.date, task.column_uuid) {
            (Some(date), _) => println!("  {} On {} at position {}", "→".style(info_style), date, task.order),
            (None, Some(uuid)) => println!("  {} In column {} at position {}", "→".style(info_style), uuid, task.order),
            (None, None) => {}
        }
    }
    println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());

    Ok(())
}
