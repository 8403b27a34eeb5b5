//! OpsGenie connectivity commands.
//!
//! # Usage
//!
//! ```bash
//! ib-cli opsgenie check
//! ```
//!
//! # Environment Variables
//!
//! Reads the full bridge configuration; see `ib-cli config check`.

use incident_bridge_server::config::{BridgeConfig, ConfigError};
use incident_bridge_server::opsgenie::{OpsGenieClient, OpsGenieError};
use thiserror::Error;

/// Errors that can occur while checking OpsGenie.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    OpsGenie(#[from] OpsGenieError),
}

/// Verify the configured API key against the OpsGenie API.
///
/// # Errors
///
/// Returns error if configuration fails to load or OpsGenie rejects the call.
pub async fn check() -> Result<(), CheckError> {
    let config = BridgeConfig::from_env()?;
    let client = OpsGenieClient::new(&config.opsgenie)?;

    tracing::info!("Checking OpsGenie at {}...", config.opsgenie.api_url);
    let count = client.ping().await?;

    tracing::info!("OpsGenie connection OK ({count} alerts visible to this key)");
    Ok(())
}
