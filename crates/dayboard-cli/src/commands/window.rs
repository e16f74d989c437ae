use anyhow::Result;
use chrono::Duration;
use dayboard_core::dates::{format_date, parse_date_or};
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::error::CoreError;
use dayboard_core::repository::Repository;

use crate::cli::WindowCommand;
use crate::views::table::display_window;

pub async fn show_window<R: Repository>(
    engine: &SchedulingEngine<R>,
    user_id: u32,
    command: WindowCommand,
) -> Result<()> {
    let from = parse_date_or(command.from.as_deref(), engine.today())?;
    let to = match command.to {
        Some(to) => to,
        None => {
            let span = Duration::days(i64::from(command.days.max(1)) - 1);
            let last = from.checked_add_signed(span).ok_or_else(|| {
                CoreError::InvalidDateRange(format!("{} days from {} is past the calendar", command.days, from))
            })?;
            format_date(last)
        }
    };

    let days = engine.get_window(user_id, &format_date(from), &to).await?;
    display_window(&days);
    Ok(())
}
