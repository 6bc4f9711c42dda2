//! Sign-in state of this terminal.
//!
//! The configured key-value store plays the persistent store shared by
//! every window, and a separate file plays this terminal's window store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;

use liorian_auth::{AuthGrant, Authenticator, CredentialService, SessionManager, SimpleAuth};
use liorian_core::config::AppConfig;
use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{Clock, KeyValueStore, SystemClock};
use liorian_entity::session::SessionState;
use liorian_entity::user::UserType;
use liorian_storage::{FileKvStore, SerializedStore};

use crate::output::{self, OutputFormat};

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Window store file; defaults to `session-window.json` beside the
    /// key-value file
    #[arg(long)]
    pub window_file: Option<PathBuf>,

    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Sign in with email and password
    Login {
        /// Login email
        email: String,
        /// Role to sign in as
        #[arg(short, long, default_value = "candidate")]
        role: UserType,
        /// Password; prompted for when omitted
        #[arg(long, env = "LIORIAN_USER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show the session as this window sees it
    Status,
    /// Sign out
    Logout,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    state: SessionState,
    time_remaining_minutes: i64,
    last_activity: Option<i64>,
    simple_auth: bool,
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let shared = super::open_store(config).await?;
    let window_path = args
        .window_file
        .clone()
        .unwrap_or_else(|| default_window_file(&config.storage.kv.path));
    let window: Arc<dyn KeyValueStore> = Arc::new(SerializedStore::spawn(Arc::new(
        FileKvStore::open(&window_path).await?,
    )));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let manager = SessionManager::new(
        shared.clone(),
        window,
        clock.clone(),
        concat!("liorian-cli/", env!("CARGO_PKG_VERSION")),
        config.session.clone(),
    );
    let simple = SimpleAuth::new(shared.clone(), clock.clone());

    match &args.command {
        SessionCommand::Login {
            email,
            role,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt(format!("Password for {email}"))
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let credentials = CredentialService::new(shared, clock, &config.auth);
            let grant = credentials.authenticate(email, &password, &[*role]).await?;
            let grant = AuthGrant {
                user_type: grant.user.user_type,
                token: grant.token,
                user: serde_json::to_value(&grant.user)?,
            };

            let helpers: [&dyn Authenticator; 2] = [&manager, &simple];
            for helper in helpers {
                helper.login(&grant).await?;
            }
            output::print_success(&format!(
                "Signed in as {} ({}), dashboard {}",
                email,
                grant.user_type,
                grant.user_type.dashboard_route()
            ));
        }
        SessionCommand::Status => {
            let status = manager.session_status().await;
            let report = StatusReport {
                state: manager.session_state().await,
                time_remaining_minutes: status.minutes_remaining(),
                last_activity: status.last_activity,
                simple_auth: simple.is_authenticated().await,
            };
            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => print_status(&report),
            }
        }
        SessionCommand::Logout => {
            let outcome = manager.logout().await?;
            simple.logout().await?;
            output::print_success(&format!("Signed out; continue at {}", outcome.redirect_to));
        }
    }

    Ok(())
}

fn print_status(report: &StatusReport) {
    match &report.state {
        SessionState::Anonymous => output::print_kv("Session", "signed out"),
        SessionState::Authenticated {
            role,
            issued_at,
            last_seen_at,
        } => {
            output::print_kv("Session", "signed in");
            output::print_kv("Role", role.as_str());
            output::print_kv("Issued at", &issued_at.to_rfc3339());
            output::print_kv("Last seen at", &last_seen_at.to_rfc3339());
            output::print_kv(
                "Minutes remaining",
                &report.time_remaining_minutes.to_string(),
            );
        }
    }
    let simple = if report.simple_auth {
        "signed in"
    } else {
        "signed out"
    };
    output::print_kv("Lightweight helper", simple);
}

fn default_window_file(kv_path: &str) -> PathBuf {
    Path::new(kv_path)
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("session-window.json")
}
