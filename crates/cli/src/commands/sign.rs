//! Request signing for local webhook testing.
//!
//! # Usage
//!
//! ```bash
//! ib-cli sign --body 'user_id=U1&channel_id=C1&trigger_id=1'
//! ib-cli sign --body @payload.txt
//! ```
//!
//! # Environment Variables
//!
//! - `SLACK_SIGNING_SECRET` - Slack app signing secret

use incident_bridge_server::slack::signature::{
    SIGNATURE_HEADER, SignatureVerifier, TIMESTAMP_HEADER,
};
use incident_bridge_server::slack::SlackError;
use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur while signing.
#[derive(Debug, Error)]
pub enum SignError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Body file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadBody {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Slack(#[from] SlackError),
}

/// Print the signature headers for `body` at `timestamp` (or now).
///
/// # Errors
///
/// Returns error if the signing secret is missing or the body file cannot
/// be read.
pub fn run(body: &str, timestamp: Option<i64>) -> Result<(), SignError> {
    dotenvy::dotenv().ok();

    let secret = std::env::var("SLACK_SIGNING_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or(SignError::MissingEnvVar("SLACK_SIGNING_SECRET"))?;

    let body = load_body(body)?;
    let timestamp = timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp())
        .to_string();

    let verifier = SignatureVerifier::new(SecretString::from(secret));
    let signature = verifier.sign(&timestamp, body.as_bytes())?;

    #[allow(clippy::print_stdout)]
    {
        println!("{TIMESTAMP_HEADER}: {timestamp}");
        println!("{SIGNATURE_HEADER}: {signature}");
    }

    Ok(())
}

/// Resolve `@path` arguments to the file's contents.
fn load_body(arg: &str) -> Result<String, SignError> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).map_err(|source| SignError::ReadBody {
            path: path.to_string(),
            source,
        }),
        None => Ok(arg.to_string()),
    }
}
