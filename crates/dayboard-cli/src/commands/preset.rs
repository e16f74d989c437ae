use anyhow::Result;
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::repository::Repository;

pub async fn create_preset<R: Repository>(engine: &SchedulingEngine<R>, user_id: u32) -> Result<()> {
    engine.create_preset_for_new_user(user_id).await?;
    println!("Board ready. Try `dayboard window` or `dayboard column list`.");
    Ok(())
}
