//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::opsgenie::{OpsGenieClient, OpsGenieError};
use crate::services::IncidentService;
use crate::slack::{SignatureVerifier, SlackClient, SlackError};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to create Slack client: {0}")]
    Slack(#[from] SlackError),
    #[error("failed to create OpsGenie client: {0}")]
    OpsGenie(#[from] OpsGenieError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and holds only the webhook
/// verifier and the incident service with its HTTP clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    verifier: SignatureVerifier,
    incidents: IncidentService,
}

impl AppState {
    /// Create a new application state with clients built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn new(config: &BridgeConfig) -> Result<Self, StateError> {
        let slack = SlackClient::new(&config.slack)?;
        let opsgenie = OpsGenieClient::new(&config.opsgenie)?;

        Ok(Self::with_clients(config, slack, opsgenie))
    }

    /// Create a new application state from prebuilt clients.
    #[must_use]
    pub fn with_clients(
        config: &BridgeConfig,
        slack: SlackClient,
        opsgenie: OpsGenieClient,
    ) -> Self {
        let verifier = SignatureVerifier::new(config.slack.signing_secret.clone());
        let incidents = IncidentService::new(slack, opsgenie);

        Self {
            inner: Arc::new(AppStateInner {
                verifier,
                incidents,
            }),
        }
    }

    /// Get a reference to the webhook signature verifier.
    #[must_use]
    pub fn verifier(&self) -> &SignatureVerifier {
        &self.inner.verifier
    }

    /// Get a reference to the incident service.
    #[must_use]
    pub fn incidents(&self) -> &IncidentService {
        &self.inner.incidents
    }
}
