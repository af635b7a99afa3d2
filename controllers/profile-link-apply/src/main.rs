//! Trusted Profile Link Runner
//!
//! Applies a trusted profile link configuration from a YAML file and keeps
//! the resulting state in a YAML state file:
//! - apply: create, replace or leave the link as configured
//! - refresh: re-read the recorded link
//! - import: adopt an existing `<profile_id>/<link_id>`
//! - destroy: delete the recorded link
//!
//! Session settings come from `IAM_IDENTITY_ENDPOINT`, `IAM_TOKEN` and
//! `IAM_REQUEST_TIMEOUT_SECS`.

mod error;
mod runner;
mod state;

use clap::{Parser, Subcommand};
use profile_link::{Session, SessionConfig, TRUSTED_PROFILE_LINK_SCHEMA};
use runner::Runner;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "profile-link", version, about = "Manage IAM trusted profile links")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or replace the link so it matches the configuration
    Apply {
        /// Resource configuration (YAML)
        #[arg(long)]
        config: PathBuf,

        /// State file; created if missing
        #[arg(long, default_value = "profile-link.state.yaml")]
        state: PathBuf,
    },

    /// Re-read the recorded link from the IAM Identity service
    Refresh {
        #[arg(long, default_value = "profile-link.state.yaml")]
        state: PathBuf,
    },

    /// Adopt an existing link into the state file
    Import {
        /// Link identifier, e.g. "Profile-1234/link-5678"
        #[arg(long)]
        id: String,

        #[arg(long, default_value = "profile-link.state.yaml")]
        state: PathBuf,
    },

    /// Delete the recorded link
    Destroy {
        #[arg(long, default_value = "profile-link.state.yaml")]
        state: PathBuf,
    },

    /// Print the resource schema as JSON
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let runner = |state: PathBuf| -> anyhow::Result<Runner> {
        let config = SessionConfig::from_env()?;
        info!("IAM Identity endpoint: {}", config.iam_endpoint);
        Ok(Runner::new(Arc::new(Session::new(config)), state))
    };

    match cli.cmd {
        Command::Apply { config, state } => {
            let action = runner(state)?.apply(&config).await?;
            info!("Applied: {:?}", action);
        }
        Command::Refresh { state } => runner(state)?.refresh().await?,
        Command::Import { id, state } => runner(state)?.import(&id).await?,
        Command::Destroy { state } => runner(state)?.destroy().await?,
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&TRUSTED_PROFILE_LINK_SCHEMA.describe())?);
        }
    }

    Ok(())
}
