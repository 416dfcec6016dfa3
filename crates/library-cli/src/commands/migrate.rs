//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use library_core::config::{AppConfig, StoreProvider};
use library_core::error::AppError;
use library_database::DatabasePool;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider != StoreProvider::Postgres {
        output::print_warning("The in-memory store has no schema; nothing to migrate.");
        return Ok(());
    }

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            let pool = DatabasePool::connect(&config.database).await?;
            library_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
