//! Slack Block Kit types and inbound webhook payloads.
//!
//! These types represent the subset of the Slack Block Kit specification
//! needed for the incident modal and the outcome messages, plus the slash
//! command and interaction payloads Slack posts to us.
//!
//! See: <https://api.slack.com/block-kit>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::SlackError;

/// A Slack message with blocks.
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage {
    /// Channel (or user) ID to post to.
    pub channel: String,
    /// Message blocks.
    pub blocks: Vec<Block>,
    /// Optional plain text fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Block Kit block types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Section block with text.
    Section { text: Text },
    /// Context block with small muted text.
    Context { elements: Vec<ContextElement> },
    /// Input block (modals only).
    Input {
        block_id: String,
        label: PlainText,
        element: InputElement,
        optional: bool,
    },
}

/// Text object types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    /// Plain text (no formatting).
    PlainText { text: String, emoji: bool },
    /// Markdown text (supports formatting).
    Mrkdwn { text: String },
}

impl Text {
    /// Create a plain text object.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    /// Create a markdown text object.
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

/// Plain text object (for labels, titles, and option text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub text_type: &'static str,
    pub text: String,
    pub emoji: bool,
}

impl PlainText {
    /// Create a new plain text object.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text",
            text: text.into(),
            emoji: true,
        }
    }
}

/// Context block elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextElement {
    /// Markdown text in context.
    Mrkdwn { text: String },
}

/// Interactive elements allowed inside an input block.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputElement {
    /// Free text input, single or multi line.
    PlainTextInput {
        action_id: String,
        multiline: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<PlainText>,
    },
    /// Single select menu over a fixed list of options.
    StaticSelect {
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<PlainText>,
        options: Vec<OptionObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        initial_option: Option<OptionObject>,
    },
}

/// An option in a select menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionObject {
    pub text: PlainText,
    pub value: String,
}

impl OptionObject {
    /// Create an option with a plain text label.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: PlainText::new(label),
            value: value.into(),
        }
    }
}

/// A modal view, as passed to `views.open`.
#[derive(Debug, Clone, Serialize)]
pub struct ModalView {
    #[serde(rename = "type")]
    pub view_type: &'static str,
    pub callback_id: String,
    pub title: PlainText,
    pub submit: PlainText,
    pub close: PlainText,
    pub blocks: Vec<Block>,
    pub private_metadata: String,
    pub clear_on_close: bool,
    pub notify_on_close: bool,
}

/// Synchronous response to a `view_submission`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSubmissionResponse {
    pub response_action: ResponseAction,
}

impl ViewSubmissionResponse {
    /// Close every view in the modal stack.
    #[must_use]
    pub const fn clear() -> Self {
        Self {
            response_action: ResponseAction::Clear,
        }
    }
}

/// `response_action` values for view submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseAction {
    Clear,
}

// =============================================================================
// Response Types
// =============================================================================

/// Response from posting a message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Channel ID where message was posted.
    #[serde(default)]
    pub channel: Option<String>,
    /// Message timestamp (unique ID).
    #[serde(default)]
    pub ts: Option<String>,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from opening a view.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenViewResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Error code if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Inbound Payloads
// =============================================================================

/// Slash command payload (form encoded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlashCommand {
    pub team_id: String,
    pub team_domain: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

impl SlashCommand {
    /// Parse a slash command from its raw `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::InvalidPayload` if `trigger_id`, `user_id`, or
    /// `channel_id` is missing or empty.
    pub fn from_form(body: &[u8]) -> Result<Self, SlackError> {
        let mut cmd = Self::default();

        for (key, value) in url::form_urlencoded::parse(body) {
            let field = match key.as_ref() {
                "team_id" => &mut cmd.team_id,
                "team_domain" => &mut cmd.team_domain,
                "channel_id" => &mut cmd.channel_id,
                "channel_name" => &mut cmd.channel_name,
                "user_id" => &mut cmd.user_id,
                "user_name" => &mut cmd.user_name,
                "command" => &mut cmd.command,
                "text" => &mut cmd.text,
                "response_url" => &mut cmd.response_url,
                "trigger_id" => &mut cmd.trigger_id,
                _ => continue,
            };
            *field = value.into_owned();
        }

        for (name, value) in [
            ("trigger_id", &cmd.trigger_id),
            ("user_id", &cmd.user_id),
            ("channel_id", &cmd.channel_id),
        ] {
            if value.is_empty() {
                return Err(SlackError::InvalidPayload(format!(
                    "Missing {name} in slash command"
                )));
            }
        }

        Ok(cmd)
    }
}

/// Interaction payload (`view_submission`, `block_actions`, ...).
///
/// Slack sends it as a JSON string in the `payload` form field.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionPayload {
    /// Type of interaction.
    #[serde(rename = "type")]
    pub interaction_type: String,
    /// User who triggered the interaction.
    pub user: InteractionUser,
    /// Workspace the interaction came from.
    #[serde(default)]
    pub team: Option<InteractionTeam>,
    /// The submitted view (for view interactions).
    #[serde(default)]
    pub view: Option<SubmittedView>,
    /// Trigger ID for opening follow-up modals.
    #[serde(default)]
    pub trigger_id: Option<String>,
}

impl InteractionPayload {
    /// Interaction type for modal submissions.
    pub const VIEW_SUBMISSION: &'static str = "view_submission";

    /// Parse an interaction from its raw form-encoded body.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::InvalidPayload` if there is no `payload` field or
    /// its JSON does not parse.
    pub fn from_form(body: &[u8]) -> Result<Self, SlackError> {
        let payload = url::form_urlencoded::parse(body)
            .find(|(key, _)| key == "payload")
            .map(|(_, value)| value)
            .ok_or_else(|| SlackError::InvalidPayload("Missing payload field".to_string()))?;

        serde_json::from_str(&payload)
            .map_err(|e| SlackError::InvalidPayload(format!("Failed to parse payload: {e}")))
    }

    /// Returns `true` for modal submissions.
    #[must_use]
    pub fn is_view_submission(&self) -> bool {
        self.interaction_type == Self::VIEW_SUBMISSION
    }
}

/// User who triggered an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionUser {
    /// Slack user ID.
    pub id: String,
    /// Username.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Workspace an interaction came from.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionTeam {
    /// Slack team ID.
    pub id: String,
    /// Team domain.
    #[serde(default)]
    pub domain: Option<String>,
}

/// A view as echoed back in a `view_submission`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedView {
    /// View ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Callback ID set when the view was opened.
    #[serde(default)]
    pub callback_id: String,
    /// Metadata set when the view was opened.
    #[serde(default)]
    pub private_metadata: String,
    /// Input values.
    pub state: ViewState,
}

/// Submitted input values, keyed by block ID then action ID.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub values: HashMap<String, HashMap<String, StateValue>>,
}

/// A single input's submitted value.
#[derive(Debug, Clone, Deserialize)]
pub struct StateValue {
    /// Element type (e.g. `plain_text_input`, `static_select`).
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    /// Value of a text input (null when left empty).
    #[serde(default)]
    pub value: Option<String>,
    /// Selected option of a select menu.
    #[serde(default)]
    pub selected_option: Option<SelectedOption>,
}

/// The option a user picked in a select menu.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOption {
    pub value: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_command_from_form() {
        let body = b"token=gIkuvaNzQIHg97ATvDxqgjtO&team_id=T0001&team_domain=acme\
&channel_id=C2147483705&channel_name=ops+alerts&user_id=U2147483697&user_name=Steve\
&command=%2Fincident&text=&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2F1234\
&trigger_id=13345224609.738474920.8088930838d88f008e0";

        let cmd = SlashCommand::from_form(body).unwrap();

        assert_eq!(cmd.team_domain, "acme");
        assert_eq!(cmd.channel_name, "ops alerts");
        assert_eq!(cmd.command, "/incident");
        assert_eq!(cmd.response_url, "https://hooks.slack.com/commands/1234");
        assert_eq!(cmd.trigger_id, "13345224609.738474920.8088930838d88f008e0");
    }

    #[test]
    fn test_slash_command_requires_trigger_id() {
        let result = SlashCommand::from_form(b"user_id=U1&channel_id=C1");
        assert!(
            matches!(result, Err(SlackError::InvalidPayload(msg)) if msg.contains("trigger_id"))
        );
    }

    #[test]
    fn test_interaction_from_form() {
        let json = r#"{"type":"view_submission","user":{"id":"U1","name":"sam"},"team":{"id":"T1","domain":"acme"},"view":{"id":"V1","callback_id":"incident_modal","private_metadata":"","state":{"values":{"title_block":{"title":{"type":"plain_text_input","value":"DB down"}}}}}}"#;
        let body: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("payload", json)
            .finish();

        let payload = InteractionPayload::from_form(body.as_bytes()).unwrap();

        assert!(payload.is_view_submission());
        assert_eq!(payload.user.id, "U1");
        let view = payload.view.unwrap();
        assert_eq!(view.callback_id, "incident_modal");
        assert_eq!(
            view.state.values["title_block"]["title"].value.as_deref(),
            Some("DB down")
        );
    }

    #[test]
    fn test_interaction_without_payload_field() {
        let result = InteractionPayload::from_form(b"foo=bar");
        assert!(matches!(result, Err(SlackError::InvalidPayload(_))));
    }

    #[test]
    fn test_interaction_with_bad_json() {
        let result = InteractionPayload::from_form(b"payload=%7Bnot-json");
        assert!(matches!(result, Err(SlackError::InvalidPayload(_))));
    }

    #[test]
    fn test_view_submission_response_json() {
        let json = serde_json::to_value(ViewSubmissionResponse::clear()).unwrap();
        assert_eq!(json, serde_json::json!({"response_action": "clear"}));
    }

    #[test]
    fn test_input_element_tags() {
        let element = InputElement::PlainTextInput {
            action_id: "title".to_string(),
            multiline: false,
            placeholder: None,
        };
        let json = serde_json::to_value(element).unwrap();
        assert_eq!(json["type"], "plain_text_input");
        assert!(json.get("placeholder").is_none());
    }
}
