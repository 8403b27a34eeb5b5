//! Configuration commands.
//!
//! # Usage
//!
//! ```bash
//! ib-cli config check
//! ```

use incident_bridge_server::config::{BridgeConfig, ConfigError};

/// Load configuration from the environment and print a redacted summary.
///
/// # Errors
///
/// Returns error if a required variable is missing or a value is invalid.
pub fn check() -> Result<(), ConfigError> {
    let config = BridgeConfig::from_env()?;

    tracing::info!("Configuration is valid");
    tracing::info!("  listen:           {}", config.socket_addr());
    tracing::info!("  slack api:        {}", config.slack.api_url);
    tracing::info!("  opsgenie api:     {}", config.opsgenie.api_url);
    tracing::info!("  opsgenie team:    {}", config.opsgenie.team_id);
    tracing::info!("  opsgenie domain:  {}", config.opsgenie.domain);
    tracing::info!(
        "  sentry:           {}",
        if config.sentry_dsn.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(())
}
