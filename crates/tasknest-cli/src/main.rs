use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tasknest_core::board::TaskBoard;
use tasknest_core::db;
use tasknest_core::error::CoreError;
use tasknest_core::repository::SqliteRepository;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod util;
mod views;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Warning:".yellow().bold(), e);
            config::Config::default()
        }
    };
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    logging::init(&config.log_level);
    tracing::debug!(database = %config.database_path, "starting");

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let mut board = TaskBoard::load(SqliteRepository::new(db_pool)).await;

    let result = match cli.command {
        Commands::Add(command) => commands::add::add_task(&mut board, command).await,
        Commands::List(command) => commands::list::list_tasks(&mut board, command, &config),
        Commands::Edit(command) => commands::edit::edit_task(&mut board, command).await,
        Commands::Done(command) => commands::status::set_completed(&mut board, command, true).await,
        Commands::Undo(command) => commands::status::set_completed(&mut board, command, false).await,
        Commands::Delete(command) => commands::delete::delete_task(&mut board, command).await,
        Commands::Category(command) => {
            commands::category::category_command(&mut board, command).await
        }
        Commands::Export(command) => commands::transfer::export(&board, command),
        Commands::Import(command) => commands::transfer::import(&mut board, command).await,
        Commands::Interactive => {
            board.set_status_filter(config.default_status);
            board.set_sort(config.default_sort);
            commands::interactive::run(&mut board).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::AmbiguousId(candidates)) => {
            eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
            eprintln!("Did you mean one of these?");
            for (id, title) in candidates {
                eprintln!("  {} ({})", id.yellow(), title);
            }
        }
        Some(CoreError::Validation(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(CoreError::NotFound(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
        }
        Some(core_error) if core_error.is_storage() => {
            eprintln!(
                "{} Could not reach the task store: {}",
                "Error:".style(error_style),
                core_error
            );
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
