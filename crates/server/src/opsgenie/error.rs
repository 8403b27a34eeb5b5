//! OpsGenie-related errors.

use thiserror::Error;

/// Errors that can occur when creating alerts in OpsGenie.
///
/// Every variant is fatal to the create operation. Failures after the
/// create call was accepted are absorbed into an unconfirmed result instead,
/// except an explicit `success: false` request status.
#[derive(Debug, Error)]
pub enum OpsGenieError {
    /// HTTP request failed or timed out.
    #[error("OpsGenie request failed: {0}")]
    Request(String),

    /// OpsGenie answered with an unexpected status.
    #[error("OpsGenie rejected the request: {status} - {body}")]
    Rejected { status: u16, body: String },

    /// Failed to parse response.
    #[error("OpsGenie response error: {0}")]
    Response(String),

    /// OpsGenie processed the request and reported that it failed.
    #[error("OpsGenie failed to create the alert: {0}")]
    CreationFailed(String),

    /// The API key cannot be used as a header value.
    #[error("Invalid OpsGenie API key: {0}")]
    InvalidApiKey(String),
}

impl From<reqwest::Error> for OpsGenieError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Response(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
