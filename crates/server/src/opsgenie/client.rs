//! OpsGenie Alert API client.
//!
//! Alert creation in OpsGenie is asynchronous: the create call only returns
//! a request ID. After a settle delay the request status is polled once to
//! learn the alert ID, and the alert itself is fetched for its details.

use std::collections::BTreeMap;
use std::time::Duration;

use incident_bridge_core::{Alert, AlertCreationResult};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::error::OpsGenieError;
use super::types::{
    ALERT_ENTITY, AlertCount, AlertDetails, CreateAlertRequest, CreateAlertResponse,
    DataEnvelope, RequestStatus, Responder,
};
use crate::config::OpsGenieConfig;

/// Default timeout applied to every API call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Time OpsGenie is given to process a create request before it is polled.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// OpsGenie API client for alert creation.
#[derive(Debug, Clone)]
pub struct OpsGenieClient {
    client: reqwest::Client,
    api_url: String,
    team_id: String,
    domain: String,
    settle_delay: Duration,
    timeout: Duration,
}

impl OpsGenieClient {
    /// Create a new OpsGenie API client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &OpsGenieConfig) -> Result<Self, OpsGenieError> {
        let mut headers = HeaderMap::new();

        let mut auth_value =
            HeaderValue::from_str(&format!("GenieKey {}", config.api_key.expose_secret()))
                .map_err(|e| OpsGenieError::InvalidApiKey(e.to_string()))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            team_id: config.team_id.clone(),
            domain: config.domain.clone(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Override the delay between the create call and the status poll.
    #[must_use]
    pub const fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Override the per-call request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Link to an alert in the OpsGenie web UI.
    #[must_use]
    pub fn alert_url(&self, id: &str) -> String {
        format!(
            "https://{}.app.opsgenie.com/alert/detail/{id}/details",
            self.domain
        )
    }

    /// Create an alert and resolve its details.
    ///
    /// When the create call is accepted but the follow-up lookups fail, an
    /// unconfirmed result keyed by the request ID is returned instead of an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns error if the create call fails or is not accepted, or if
    /// OpsGenie reports that processing the request failed.
    #[instrument(
        skip(self, alert),
        fields(reporter = %alert.reporter.id, priority = %alert.priority)
    )]
    pub async fn create_alert(&self, alert: &Alert) -> Result<AlertCreationResult, OpsGenieError> {
        let alias = alert_alias(&alert.reporter.id, chrono::Utc::now().timestamp());
        let request = self.create_request(alert, alias.clone());

        let response = self
            .client
            .post(format!("{}/alerts", self.api_url))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| OpsGenieError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::ACCEPTED {
            let body = response.text().await.unwrap_or_default();
            return Err(OpsGenieError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let accepted: CreateAlertResponse = response
            .json()
            .await
            .map_err(|e| OpsGenieError::Response(e.to_string()))?;
        let request_id = accepted.request_id;

        debug!(request_id = %request_id, "Alert creation request accepted");

        tokio::time::sleep(self.settle_delay).await;

        match self.resolve(&request_id).await {
            Ok(details) => {
                info!(alert_id = %details.id, request_id = %request_id, "Alert created");
                Ok(AlertCreationResult {
                    url: self.alert_url(&details.id),
                    priority: details.priority.parse().unwrap_or(alert.priority),
                    id: details.id,
                    title: details.message,
                    alias,
                    request_id,
                    tiny_id: details.tiny_id,
                    confirmed: true,
                })
            }
            Err(Lookup::Failed(reason)) => Err(OpsGenieError::CreationFailed(reason)),
            Err(Lookup::Unavailable(reason)) => {
                warn!(
                    request_id = %request_id,
                    reason = %reason,
                    "Could not confirm alert details, returning request ID"
                );
                Ok(AlertCreationResult {
                    url: self.alert_url(&request_id),
                    id: request_id.clone(),
                    title: alert.title.clone(),
                    alias,
                    priority: alert.priority,
                    request_id,
                    tiny_id: None,
                    confirmed: false,
                })
            }
        }
    }

    /// Check connectivity and the API key.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or OpsGenie rejects the key.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<u64, OpsGenieError> {
        let count: DataEnvelope<AlertCount> = self
            .get_json(&format!("{}/alerts/count", self.api_url))
            .await?;

        debug!(count = count.data.count, "OpsGenie connection verified");

        Ok(count.data.count)
    }

    fn create_request(&self, alert: &Alert, alias: String) -> CreateAlertRequest {
        let mut details = BTreeMap::from([
            ("reportedBy".to_string(), alert.reporter.username.clone()),
            ("slackUserId".to_string(), alert.reporter.id.clone()),
            ("slackUsername".to_string(), alert.reporter.name.clone()),
        ]);
        if !alert.team.name.is_empty() {
            details.insert("slackTeam".to_string(), alert.team.name.clone());
        }
        if let Some(channel) = alert.channel.as_ref().filter(|c| !c.channel_name.is_empty()) {
            details.insert("slackChannel".to_string(), channel.channel_name.clone());
        }

        CreateAlertRequest {
            message: alert.title.clone(),
            description: alert.description.clone(),
            priority: alert.priority.to_string(),
            responders: vec![Responder::team(self.team_id.clone())],
            tags: alert.tags.clone(),
            source: alert.source.clone(),
            alias,
            entity: ALERT_ENTITY.to_string(),
            details,
        }
    }

    /// Poll the request status once, then fetch the alert it created.
    async fn resolve(&self, request_id: &str) -> Result<AlertDetails, Lookup> {
        let status: DataEnvelope<RequestStatus> = self
            .get_json(&format!("{}/alerts/requests/{request_id}", self.api_url))
            .await
            .map_err(|e| Lookup::Unavailable(e.to_string()))?;
        let status = status.data;

        if !status.success {
            return Err(Lookup::Failed(
                status
                    .status
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }

        let alert_id = status
            .alert_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Lookup::Unavailable("request status has no alert ID".to_string()))?;

        let details: DataEnvelope<AlertDetails> = self
            .get_json(&format!("{}/alerts/{alert_id}", self.api_url))
            .await
            .map_err(|e| Lookup::Unavailable(e.to_string()))?;

        Ok(details.data)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, OpsGenieError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| OpsGenieError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpsGenieError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OpsGenieError::Response(e.to_string()))
    }
}

/// Why the follow-up lookups did not produce alert details.
enum Lookup {
    /// OpsGenie reported the request as failed.
    Failed(String),
    /// The status or details could not be retrieved.
    Unavailable(String),
}

/// Deduplication alias for an alert raised by `reporter_id` at `unix_seconds`.
#[must_use]
pub fn alert_alias(reporter_id: &str, unix_seconds: i64) -> String {
    format!("slack-incident-{reporter_id}-{unix_seconds}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use incident_bridge_core::{ALERT_SOURCE, ALERT_TAG, ChannelContext, Priority, Reporter, Team};
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> OpsGenieClient {
        OpsGenieClient::new(&OpsGenieConfig {
            api_key: SecretString::from("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string()),
            team_id: "team-42".to_string(),
            domain: "acme".to_string(),
            api_url: format!("{}/v2", server.uri()),
        })
        .unwrap()
        .with_settle_delay(Duration::ZERO)
    }

    fn alert() -> Alert {
        Alert {
            title: "T".to_string(),
            description: "Something broke".to_string(),
            priority: Priority::P2,
            source: ALERT_SOURCE.to_string(),
            tags: vec![ALERT_TAG.to_string()],
            reporter: Reporter {
                id: "U1".to_string(),
                name: "sam".to_string(),
                username: "sam".to_string(),
            },
            team: Team {
                id: "T1".to_string(),
                name: "acme".to_string(),
            },
            channel: Some(ChannelContext {
                channel_id: "C1".to_string(),
                channel_name: "ops".to_string(),
                team_domain: "acme".to_string(),
            }),
        }
    }

    async fn mount_create(server: &MockServer, request_id: &str) {
        Mock::given(method("POST"))
            .and(path("/v2/alerts"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "result": "Request will be processed",
                "took": 0.302,
                "requestId": request_id
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_create_alert_happy_path() {
        let server = MockServer::start().await;
        mount_create(&server, "X").await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/requests/X"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"success": true, "action": "Create", "alertId": "Y", "status": "Created alert"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/Y"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": "Y", "message": "T", "priority": "P2", "tinyId": "T-1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).create_alert(&alert()).await.unwrap();

        assert_eq!(result.id, "Y");
        assert_eq!(result.title, "T");
        assert_eq!(result.priority, Priority::P2);
        assert_eq!(result.request_id, "X");
        assert_eq!(result.tiny_id.as_deref(), Some("T-1"));
        assert_eq!(
            result.url,
            "https://acme.app.opsgenie.com/alert/detail/Y/details"
        );
        assert!(result.alias.starts_with("slack-incident-U1-"));
        assert!(result.confirmed);
    }

    #[tokio::test]
    async fn test_create_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/alerts"))
            .and(header(
                "authorization",
                "GenieKey 3fa85f64-5717-4562-b3fc-2c963f66afa6",
            ))
            .and(body_partial_json(json!({
                "message": "T",
                "description": "Something broke",
                "priority": "P2",
                "responders": [{"type": "team", "id": "team-42"}],
                "tags": ["slack-incident"],
                "source": "Slack",
                "entity": "Slack Incident",
                "details": {
                    "reportedBy": "sam",
                    "slackUserId": "U1",
                    "slackUsername": "sam",
                    "slackTeam": "acme",
                    "slackChannel": "ops"
                }
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"requestId": "X"})))
            .expect(1)
            .mount(&server)
            .await;

        // Lookups are unmocked, so the result is unconfirmed.
        let result = client(&server).create_alert(&alert()).await.unwrap();
        assert!(!result.confirmed);
    }

    #[tokio::test]
    async fn test_failed_status_poll_degrades() {
        let server = MockServer::start().await;
        mount_create(&server, "X").await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/requests/X"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server).create_alert(&alert()).await.unwrap();

        assert_eq!(result.id, "X");
        assert_eq!(result.request_id, "X");
        assert_eq!(result.title, "T");
        assert_eq!(result.priority, Priority::P2);
        assert!(result.url.contains('X'));
        assert!(result.is_degraded());
    }

    #[tokio::test]
    async fn test_failed_details_fetch_degrades() {
        let server = MockServer::start().await;
        mount_create(&server, "X").await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/requests/X"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"success": true, "alertId": "Y"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/Y"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client(&server).create_alert(&alert()).await.unwrap();

        assert_eq!(result.id, "X");
        assert!(!result.confirmed);
    }

    #[tokio::test]
    async fn test_status_poll_timeout_degrades() {
        let server = MockServer::start().await;
        mount_create(&server, "X").await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/requests/X"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"success": true, "alertId": "Y"}}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let result = client(&server)
            .with_timeout(Duration::from_millis(100))
            .create_alert(&alert())
            .await
            .unwrap();

        assert_eq!(result.id, "X");
        assert!(!result.confirmed);
    }

    #[tokio::test]
    async fn test_create_transport_error_is_fatal() {
        // Nothing listens on the discard port.
        let client = OpsGenieClient::new(&OpsGenieConfig {
            api_key: SecretString::from("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string()),
            team_id: "team-42".to_string(),
            domain: "acme".to_string(),
            api_url: "http://127.0.0.1:9/v2".to_string(),
        })
        .unwrap()
        .with_settle_delay(Duration::ZERO);

        let err = client.create_alert(&alert()).await.unwrap_err();
        assert!(matches!(err, OpsGenieError::Request(_)));
    }

    #[tokio::test]
    async fn test_create_timeout_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/alerts"))
            .respond_with(
                ResponseTemplate::new(202)
                    .set_body_json(json!({"requestId": "X"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .with_timeout(Duration::from_millis(100))
            .create_alert(&alert())
            .await
            .unwrap_err();
        assert!(matches!(err, OpsGenieError::Request(_)));
    }

    #[tokio::test]
    async fn test_unsuccessful_request_is_fatal() {
        let server = MockServer::start().await;
        mount_create(&server, "X").await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/requests/X"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"success": false, "action": "Create", "status": "Team does not exist"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/Y"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).create_alert(&alert()).await.unwrap_err();

        assert!(
            matches!(err, OpsGenieError::CreationFailed(ref reason) if reason == "Team does not exist")
        );
    }

    #[tokio::test]
    async fn test_rejected_create_does_not_poll() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/alerts"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "Request body is not processable"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).create_alert(&alert()).await.unwrap_err();

        assert!(
            matches!(err, OpsGenieError::Rejected { status: 400, ref body } if body.contains("not processable"))
        );
    }

    #[tokio::test]
    async fn test_success_status_other_than_accepted_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/alerts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"requestId": "X"})))
            .mount(&server)
            .await;

        let err = client(&server).create_alert(&alert()).await.unwrap_err();
        assert!(matches!(err, OpsGenieError::Rejected { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_unparsable_create_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/alerts"))
            .respond_with(ResponseTemplate::new(202).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).create_alert(&alert()).await.unwrap_err();
        assert!(matches!(err, OpsGenieError::Response(_)));
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/count"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"count": 7}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(client(&server).ping().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_ping_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/alerts/count"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Key is not authorized"))
            .mount(&server)
            .await;

        let err = client(&server).ping().await.unwrap_err();
        assert!(matches!(err, OpsGenieError::Rejected { status: 401, .. }));
    }

    #[test]
    fn test_alert_alias() {
        assert_eq!(alert_alias("U1", 1_700_000_000), "slack-incident-U1-1700000000");
    }
}
