//! OpsGenie Alert API request and response bodies.
//!
//! See: <https://docs.opsgenie.com/docs/alert-api>

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Entity recorded on alerts raised from Slack.
pub const ALERT_ENTITY: &str = "Slack Incident";

/// Body of `POST /v2/alerts`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAlertRequest {
    pub message: String,
    pub description: String,
    pub priority: String,
    pub responders: Vec<Responder>,
    pub tags: Vec<String>,
    pub source: String,
    pub alias: String,
    pub entity: String,
    pub details: BTreeMap<String, String>,
}

/// An alert responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Responder {
    #[serde(rename = "type")]
    pub responder_type: &'static str,
    pub id: String,
}

impl Responder {
    /// A team responder.
    #[must_use]
    pub const fn team(id: String) -> Self {
        Self {
            responder_type: "team",
            id,
        }
    }
}

/// Response to an accepted create request (HTTP 202).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertResponse {
    pub request_id: String,
}

/// Generic `{ "data": ... }` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Result of `GET /v2/alerts/requests/{requestId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatus {
    pub success: bool,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub alert_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Result of `GET /v2/alerts/{alertId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDetails {
    pub id: String,
    pub message: String,
    pub priority: String,
    #[serde(default)]
    pub tiny_id: Option<String>,
}

/// Result of `GET /v2/alerts/count`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertCount {
    pub count: u64,
}
