//! Slack Web API client.
//!
//! Provides methods for opening modals and posting messages.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, instrument};

use super::error::SlackError;
use super::types::{Block, ModalView, OpenViewResponse, PostMessageResponse, SlackMessage};
use crate::config::SlackConfig;

/// Timeout applied to every Web API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Slack API client for opening views and posting messages.
#[derive(Clone)]
pub struct SlackClient {
    /// HTTP client.
    client: Client,
    /// Bot token for authentication.
    bot_token: SecretString,
    /// Web API base URL (no trailing slash).
    api_url: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("bot_token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a new Slack client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &SlackConfig) -> Result<Self, SlackError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            bot_token: config.bot_token.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Open a modal in response to a trigger.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::ExpiredTrigger` if the trigger ID is no longer
    /// usable, or another error if the request fails or Slack rejects it.
    #[instrument(skip(self, view), fields(callback_id = %view.callback_id))]
    pub async fn open_view(&self, trigger_id: &str, view: &ModalView) -> Result<(), SlackError> {
        #[derive(Serialize)]
        struct OpenView<'a> {
            trigger_id: &'a str,
            view: &'a ModalView,
        }

        let result: OpenViewResponse = self
            .post("views.open", &OpenView { trigger_id, view })
            .await?;

        if !result.ok {
            error!(error = ?result.error, "Slack API error opening view");
            return Err(SlackError::from_api_code(result.error));
        }

        debug!("Modal opened in Slack");

        Ok(())
    }

    /// Post a message to a channel or user.
    ///
    /// Passing a user ID as `channel` delivers the message as a DM from the bot.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or Slack returns an error.
    #[instrument(skip(self, blocks), fields(channel = %channel))]
    pub async fn post_message(
        &self,
        channel: &str,
        blocks: Vec<Block>,
        fallback_text: Option<&str>,
    ) -> Result<PostMessageResponse, SlackError> {
        let message = SlackMessage {
            channel: channel.to_string(),
            blocks,
            text: fallback_text.map(String::from),
        };

        let result: PostMessageResponse = self.post("chat.postMessage", &message).await?;

        if !result.ok {
            error!(
                error = ?result.error,
                "Slack API error posting message"
            );
            return Err(SlackError::from_api_code(result.error));
        }

        debug!(
            ts = ?result.ts,
            channel = ?result.channel,
            "Message posted to Slack"
        );

        Ok(result)
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> Result<R, SlackError>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.api_url))
            .bearer_auth(self.bot_token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| SlackError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Response(format!(
                "{method} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SlackError::Response(e.to_string()))
    }
}
