//! Slack request signature verification.
//!
//! Implements Slack's signing scheme:
//! <https://api.slack.com/authentication/verifying-requests-from-slack>
//!
//! The signature is computed over the raw request bytes, so verification
//! must happen before the body is parsed.

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::{debug, instrument};

use super::error::SlackError;

/// Header carrying the request timestamp (seconds since the epoch).
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Header carrying the `v0=<hex>` signature.
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Maximum allowed clock skew between Slack and us (5 minutes).
pub const MAX_TIMESTAMP_SKEW_SECS: i64 = 300;

const VERSION: &str = "v0";

type HmacSha256 = Hmac<Sha256>;

/// Verifies inbound webhook requests against the app signing secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    signing_secret: SecretString,
    max_skew_secs: i64,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("signing_secret", &"[REDACTED]")
            .field("max_skew_secs", &self.max_skew_secs)
            .finish()
    }
}

impl SignatureVerifier {
    /// Create a verifier with the default 5 minute skew tolerance.
    #[must_use]
    pub const fn new(signing_secret: SecretString) -> Self {
        Self {
            signing_secret,
            max_skew_secs: MAX_TIMESTAMP_SKEW_SECS,
        }
    }

    /// Verify a request from its headers and raw body.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::InvalidSignature` if either header is missing,
    /// the timestamp is stale, or the signature does not match.
    #[instrument(skip_all)]
    pub fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), SlackError> {
        let timestamp = header_str(headers, TIMESTAMP_HEADER)?;
        let signature = header_str(headers, SIGNATURE_HEADER)?;

        self.verify_at(timestamp, body, signature, chrono::Utc::now().timestamp())
    }

    /// Verify a signature against an explicit "now" (seconds since the epoch).
    ///
    /// # Errors
    ///
    /// See [`SignatureVerifier::verify`].
    pub fn verify_at(
        &self,
        timestamp: &str,
        body: &[u8],
        signature: &str,
        now: i64,
    ) -> Result<(), SlackError> {
        // Check timestamp to prevent replay attacks
        let ts: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SlackError::InvalidSignature("Invalid timestamp".to_string()))?;

        if now.abs_diff(ts) > self.max_skew_secs.unsigned_abs() {
            return Err(SlackError::InvalidSignature(
                "Request timestamp too old".to_string(),
            ));
        }

        let provided = signature
            .strip_prefix("v0=")
            .and_then(|hex_sig| hex::decode(hex_sig).ok())
            .ok_or_else(|| SlackError::InvalidSignature("Malformed signature".to_string()))?;

        // `verify_slice` compares in constant time
        self.mac_for(timestamp, body)?
            .verify_slice(&provided)
            .map_err(|_| SlackError::InvalidSignature("Signature mismatch".to_string()))?;

        debug!("Slack signature verified");

        Ok(())
    }

    /// Compute the `v0=<hex>` signature for a timestamp and body.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing secret cannot be used as an HMAC key.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> Result<String, SlackError> {
        let mac = self.mac_for(timestamp, body)?;
        Ok(format!(
            "{VERSION}={}",
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    fn mac_for(&self, timestamp: &str, body: &[u8]) -> Result<HmacSha256, SlackError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.expose_secret().as_bytes())
            .map_err(|e| SlackError::InvalidSignature(e.to_string()))?;

        mac.update(VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.trim().as_bytes());
        mac.update(b":");
        mac.update(body);

        Ok(mac)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, SlackError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SlackError::InvalidSignature(format!("Missing {name} header")))
}
