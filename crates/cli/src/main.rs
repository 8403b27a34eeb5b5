//! Incident Bridge CLI - Operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate the environment configuration
//! ib-cli config check
//!
//! # Verify the OpsGenie API key and connectivity
//! ib-cli opsgenie check
//!
//! # Sign a request body for local testing with curl
//! ib-cli sign --body 'command=%2Fincident&trigger_id=1&user_id=U1&channel_id=C1'
//! ib-cli sign --body @payload.txt --timestamp 1700000000
//! ```
//!
//! # Commands
//!
//! - `config check` - Load configuration and print a redacted summary
//! - `opsgenie check` - Call the OpsGenie alert count endpoint
//! - `sign` - Print Slack signature headers for a request body

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ib-cli")]
#[command(author, version, about = "Incident Bridge CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// OpsGenie utilities
    Opsgenie {
        #[command(subcommand)]
        action: OpsGenieAction,
    },
    /// Print Slack signature headers for a request body
    Sign {
        /// Request body, or `@path` to read it from a file
        #[arg(short, long)]
        body: String,

        /// Request timestamp in seconds (defaults to now)
        #[arg(short, long)]
        timestamp: Option<i64>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration from the environment
    Check,
}

#[derive(Subcommand)]
enum OpsGenieAction {
    /// Verify the API key and connectivity
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Check => commands::config::check()?,
        },
        Commands::Opsgenie { action } => match action {
            OpsGenieAction::Check => commands::opsgenie::check().await?,
        },
        Commands::Sign { body, timestamp } => commands::sign::run(&body, timestamp)?,
    }
    Ok(())
}
