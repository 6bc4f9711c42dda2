//! CLI command definitions and dispatch.

pub mod content;
pub mod session;
pub mod training;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use liorian_core::config::AppConfig;
use liorian_core::result::AppResult;
use liorian_core::traits::KeyValueStore;
use liorian_storage::build_kv_store;

use crate::output::OutputFormat;

/// Liorian: training site administration
#[derive(Debug, Parser)]
#[command(name = "liorian", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment
    #[arg(short, long, env = "LIORIAN_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Courses, services and posts
    Content(content::ContentArgs),
    /// System users allowed to sign in
    User(user::UserArgs),
    /// Sign-in state of this terminal
    Session(session::SessionArgs),
    /// Training records on the object store
    Training(training::TrainingArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> AppResult<()> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Content(args) => content::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Session(args) => session::execute(args, &config, self.format).await,
            Commands::Training(args) => training::execute(args, &config, self.format).await,
        }
    }

    fn load_config(&self) -> AppResult<AppConfig> {
        AppConfig::load_from(&self.config_dir, &self.env)
    }
}

/// Helper: open the configured key-value store
pub async fn open_store(config: &AppConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    tracing::debug!(
        provider = %config.storage.kv.provider,
        path = %config.storage.kv.path,
        "Opening key-value store"
    );
    if config.storage.kv.provider == "memory" {
        crate::output::print_warning("Key-value provider is 'memory'; changes will not persist");
    }
    build_kv_store(&config.storage.kv).await
}
