//! Training object store CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde_json::json;

use liorian_core::config::AppConfig;
use liorian_core::result::AppResult;
use liorian_core::traits::SystemClock;
use liorian_storage::build_object_store;
use liorian_training::TrainingStore;

use crate::output::{self, OutputFormat};

/// Arguments for training commands
#[derive(Debug, Args)]
pub struct TrainingArgs {
    /// Training subcommand
    #[command(subcommand)]
    pub command: TrainingCommand,
}

/// Training subcommands
#[derive(Debug, Subcommand)]
pub enum TrainingCommand {
    /// Write, read back and delete a probe object
    Health,
    /// Delete progress, quiz and report objects older than a threshold
    Cleanup {
        /// Age threshold in days; the configured retention when omitted
        #[arg(short, long)]
        days_old: Option<u32>,
    },
}

/// Execute training commands
pub async fn execute(
    args: &TrainingArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let objects = build_object_store(&config.storage.s3).await?;
    let training = TrainingStore::new(objects, Arc::new(SystemClock));

    match &args.command {
        TrainingCommand::Health => {
            training.test_connection().await?;
            match format {
                OutputFormat::Json => output::print_json(&json!({
                    "status": "connected",
                    "provider": training.provider_type(),
                })),
                OutputFormat::Table => output::print_success(&format!(
                    "Object store reachable ({})",
                    training.provider_type()
                )),
            }
        }
        TrainingCommand::Cleanup { days_old } => {
            let days_old = days_old.unwrap_or(config.content.training_retention_days);
            let deleted = training.cleanup_old_training_data(days_old).await?;
            match format {
                OutputFormat::Json => output::print_json(&json!({
                    "deleted": deleted,
                    "daysOld": days_old,
                })),
                OutputFormat::Table => output::print_success(&format!(
                    "Deleted {deleted} training objects older than {days_old} days"
                )),
            }
        }
    }

    Ok(())
}
