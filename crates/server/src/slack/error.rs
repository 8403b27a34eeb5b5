//! Slack-related errors.

use thiserror::Error;

/// Errors that can occur when interacting with Slack.
#[derive(Debug, Error)]
pub enum SlackError {
    /// HTTP request failed.
    #[error("Slack request failed: {0}")]
    Request(String),

    /// Failed to parse response.
    #[error("Slack response error: {0}")]
    Response(String),

    /// Slack API returned an error.
    #[error("Slack API error: {0}")]
    Api(String),

    /// The trigger ID expired (or was already used) before the modal opened.
    #[error("Trigger ID expired, please try again")]
    ExpiredTrigger,

    /// Invalid webhook signature.
    #[error("Invalid Slack signature: {0}")]
    InvalidSignature(String),

    /// Failed to parse an inbound command or interaction payload.
    #[error("Invalid Slack payload: {0}")]
    InvalidPayload(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Response(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl SlackError {
    /// Map an `ok: false` error code from the Web API.
    pub(crate) fn from_api_code(code: Option<String>) -> Self {
        match code.as_deref() {
            Some("expired_trigger_id" | "exchanged_trigger_id" | "invalid_trigger_id") => {
                Self::ExpiredTrigger
            }
            Some(code) => Self::Api(code.to_string()),
            None => Self::Api("Unknown error".to_string()),
        }
    }
}
