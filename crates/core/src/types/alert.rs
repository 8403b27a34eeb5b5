//! Alert types sent to and received from the incident service.

use serde::{Deserialize, Serialize};

use super::incident::ChannelContext;
use super::priority::Priority;

/// Source recorded on every alert raised through the bridge.
pub const ALERT_SOURCE: &str = "Slack";

/// Tag marking alerts that originated from a Slack incident report.
pub const ALERT_TAG: &str = "slack-incident";

/// The Slack user who reported the incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    /// Slack user ID (e.g. `U01234`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Slack handle.
    pub username: String,
}

/// The Slack workspace the report came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Slack team ID.
    pub id: String,
    /// Team domain.
    pub name: String,
}

/// An alert to be raised in OpsGenie.
///
/// Built once per incident submission and discarded after the create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub source: String,
    pub tags: Vec<String>,
    pub reporter: Reporter,
    pub team: Team,
    /// Channel the `/incident` command was run in, when Slack handed it back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelContext>,
}

/// Outcome of a successful create-alert operation.
///
/// When the follow-up lookups fail after OpsGenie accepted the request, the
/// result is *degraded*: `id` holds the request ID, `title` and `priority`
/// are the submitted values, and `confirmed` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCreationResult {
    pub id: String,
    pub title: String,
    pub alias: String,
    pub priority: Priority,
    pub url: String,
    pub request_id: String,
    /// Short numeric ID shown in the OpsGenie UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiny_id: Option<String>,
    /// Whether the alert details were confirmed by OpsGenie.
    pub confirmed: bool,
}

impl AlertCreationResult {
    /// Returns `true` if the alert details could not be confirmed.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        !self.confirmed
    }
}
