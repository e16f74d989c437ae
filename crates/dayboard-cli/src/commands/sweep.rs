use anyhow::Result;
use chrono::Utc;
use dayboard_core::dates::parse_date_or;
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::repository::Repository;
use dayboard_core::sweep::SweepSlot;
use tracing::info;

use crate::cli::SweepCommand;

pub async fn sweep<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: SweepCommand,
) -> Result<()> {
    let target = if command.slot {
        let slot = SweepSlot::at(Utc::now());
        info!(offset_minutes = slot.offset_minutes, date = %slot.local_date, "sweep slot");
        slot.local_date
    } else {
        parse_date_or(command.date.as_deref(), engine.today())?
    };

    let moved = engine.move_unfinished_tasks(user_id, target).await?;
    if moved.is_empty() {
        println!("Nothing to move.");
    } else {
        println!("Moved {} unfinished task(s) to {}:", moved.len(), target);
        for task in &moved {
            println!("  {} {}", task.id, task.body);
        }
    }
    Ok(())
}
