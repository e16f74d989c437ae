use clap::Parser;
use dayboard_core::db;
use dayboard_core::engine::SchedulingEngine;
use dayboard_core::error::{CoreError, ErrorKind};
use dayboard_core::repository::SqliteRepository;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod logging;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    };
    logging::init(&config.log_level);

    let db_pool = match db::establish_connection(&config.store()).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = ?e, path = %config.database_path, "could not open database");
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let engine = SchedulingEngine::new(SqliteRepository::new(db_pool), config.engine.clone());
    let user = cli.user;

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&engine, user, command).await,
        cli::Commands::Window(command) => {
            commands::window::show_window(&engine, user, command).await
        }
        cli::Commands::Show(command) => commands::edit::show_task(&engine, user, command).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&engine, user, command).await,
        cli::Commands::Delete(command) => {
            commands::edit::delete_task(&engine, user, command).await
        }
        cli::Commands::Move(command) => {
            commands::r#move::move_tasks(&engine, user, command).await
        }
        cli::Commands::Column(command) => {
            commands::column::column_command(&engine, user, command).await
        }
        cli::Commands::Preset => commands::preset::create_preset(&engine, user).await,
        cli::Commands::Sweep(command) => commands::sweep::sweep(&engine, user, command).await,
    };

    if let Err(e) = result {
        std::process::exit(handle_error(e));
    }
}

/// Print the error and pick an exit code from its kind.
fn handle_error(err: anyhow::Error) -> i32 {
    let error_style = Style::new().red().bold();

    let Some(core_error) = err.downcast_ref::<CoreError>() else {
        eprintln!("{} {}", "Error:".style(error_style), err);
        return 1;
    };

    match core_error.kind() {
        ErrorKind::Internal => {
            tracing::error!(error = ?core_error, "storage failure");
            eprintln!("{} Something went wrong while talking to the database", "Error:".style(error_style));
        }
        _ => {
            eprintln!(
                "{} {} {}",
                "Error:".style(error_style),
                core_error,
                format!("[{}]", core_error.code()).yellow()
            );
        }
    }

    match core_error.kind() {
        ErrorKind::NotFound => 3,
        ErrorKind::Forbidden => 4,
        ErrorKind::InvalidInput => 5,
        ErrorKind::Conflict => 6,
        ErrorKind::Internal => 1,
    }
}
