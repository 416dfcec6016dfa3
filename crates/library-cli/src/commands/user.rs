//! User management CLI commands.
//!
//! Self-registration only ever creates `User` accounts, so the first
//! administrator is bootstrapped from here.

use std::str::FromStr;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use library_auth::{PasswordHasher, PasswordPolicy};
use library_core::config::{AppConfig, StoreProvider};
use library_core::error::AppError;
use library_database::Repository;
use library_entity::UserRole;
use library_service::UserService;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user with an explicit role
    Create {
        /// Login name
        username: String,
        /// Display name
        #[arg(long)]
        fullname: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Role: user, editor or admin (or 0, 1, 2)
        #[arg(long, default_value = "admin")]
        role: String,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Full name
    fullname: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    if config.database.provider == StoreProvider::Memory {
        output::print_warning("Using the in-memory store; changes end with this process.");
    }

    let store = library_database::open_store(&config.database).await?;
    let users = UserService::new(
        Repository::new(store),
        PasswordHasher::new(&config.auth)?,
        PasswordPolicy::new(&config.auth),
    );

    match &args.command {
        UserCommand::Create {
            username,
            fullname,
            email,
            role,
        } => {
            let role = UserRole::from_str(role)?;
            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?;

            let user = users
                .create_user(username, fullname, email, &password, role)
                .await?;
            output::print_success(&format!("User '{}' created as {}", user.username, user.role));
        }
        UserCommand::List => {
            let rows: Vec<UserRow> = users
                .list()
                .await?
                .iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    username: u.username.clone(),
                    fullname: u.fullname.clone(),
                    email: u.email.clone(),
                    role: u.role.to_string(),
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
