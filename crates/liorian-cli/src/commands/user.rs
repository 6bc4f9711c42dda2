//! System user CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use liorian_auth::{CredentialService, NewSystemUser};
use liorian_core::config::AppConfig;
use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::SystemClock;
use liorian_entity::user::{SystemUser, UserType};

use crate::output::{self, OutputFormat};

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
    /// Create a user
    Add {
        /// Login email
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Role: admin, staff or candidate
        #[arg(short, long, default_value = "candidate")]
        role: UserType,
        /// Password; prompted for when omitted
        #[arg(long, env = "LIORIAN_USER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// List all users
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<UserType>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    role: String,
    status: String,
    created_at: String,
}

impl From<&SystemUser> for UserRow {
    fn from(u: &SystemUser) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.user_type.to_string(),
            status: u.status.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let store = super::open_store(config).await?;
    let credentials = CredentialService::new(store, Arc::new(SystemClock), &config.auth);

    match &args.command {
        UserCommand::Add {
            email,
            name,
            role,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt(format!("Password for {email}"))
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let user = credentials
                .add_user(NewSystemUser {
                    email: email.clone(),
                    name: name.clone(),
                    user_type: *role,
                    password,
                })
                .await?;

            match format {
                OutputFormat::Json => output::print_json(&user.profile()),
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "User '{}' created as {}",
                        user.email, user.user_type
                    ));
                }
            }
        }
        UserCommand::List { role } => {
            let rows: Vec<UserRow> = credentials
                .list_users()
                .await?
                .iter()
                .filter(|u| role.is_none_or(|r| u.user_type == r))
                .map(UserRow::from)
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
