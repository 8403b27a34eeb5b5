//! Slack message builders for incident outcomes.
//!
//! Provides factory functions for building Block Kit messages for:
//! - Incident created (confirmed or unconfirmed)
//! - Incident creation failures
//! - Modal opening failures

use incident_bridge_core::AlertCreationResult;

use super::types::{Block, ContextElement, Text};

/// Fallback text for the incident created message.
pub const INCIDENT_CREATED_TEXT: &str = "Incident created successfully!";

/// Shown when the alert could not be created.
pub const INCIDENT_FAILED_TEXT: &str = "Failed to create incident. Please try again.";

/// Shown when the trigger ID expired before the modal could open.
pub const MODAL_EXPIRED_TEXT: &str =
    "The incident form took too long to open. Please run the command again.";

/// Shown when the modal could not be opened for any other reason.
pub const MODAL_FAILED_TEXT: &str =
    "Sorry, something went wrong while opening the incident form. Please try again.";

/// Build the success message for a created incident.
///
/// Unconfirmed results get an extra context line, since the ID shown is
/// OpsGenie's request ID rather than the alert ID.
#[must_use]
pub fn build_incident_created_message(result: &AlertCreationResult) -> Vec<Block> {
    let id = match &result.tiny_id {
        Some(tiny_id) => format!("{} (#{tiny_id})", result.id),
        None => result.id.clone(),
    };

    let mut blocks = vec![Block::Section {
        text: Text::mrkdwn(format!(
            "✅ *{INCIDENT_CREATED_TEXT}*\n\n*Title:* {}\n*Priority:* {} ({})\n*ID:* {id}",
            escape_mrkdwn(&result.title),
            result.priority,
            result.priority.label(),
        )),
    }];

    if !result.url.is_empty() {
        blocks.push(Block::Section {
            text: Text::mrkdwn(format!("🔗 <{}|View in OpsGenie>", result.url)),
        });
    }

    if result.is_degraded() {
        blocks.push(Block::Context {
            elements: vec![ContextElement::Mrkdwn {
                text: "OpsGenie accepted the request but has not confirmed the alert yet. \
                       The link may take a moment to work."
                    .to_string(),
            }],
        });
    }

    blocks
}

/// Build the message for a failed alert creation.
#[must_use]
pub fn build_incident_failed_message() -> Vec<Block> {
    build_error_message(INCIDENT_FAILED_TEXT)
}

/// Build the message for an expired modal trigger.
#[must_use]
pub fn build_modal_expired_message() -> Vec<Block> {
    vec![Block::Section {
        text: Text::mrkdwn(format!("⏰ {MODAL_EXPIRED_TEXT}")),
    }]
}

/// Build the message for a modal that failed to open.
#[must_use]
pub fn build_modal_failed_message() -> Vec<Block> {
    build_error_message(MODAL_FAILED_TEXT)
}

/// Escape the control characters of Slack's mrkdwn (`&`, `<` and `>`) in
/// user-supplied text.
#[must_use]
pub fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build a single-section error message.
#[must_use]
pub fn build_error_message(message: &str) -> Vec<Block> {
    vec![Block::Section {
        text: Text::mrkdwn(format!("❌ {message}")),
    }]
}
