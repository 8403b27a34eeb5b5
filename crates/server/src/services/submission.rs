//! Mapping of incident modal submissions to alerts.

use incident_bridge_core::{
    ALERT_SOURCE, ALERT_TAG, Alert, ChannelContext, IncidentSubmission, Reporter, Team,
};
use thiserror::Error;
use tracing::warn;

use crate::slack::modal::{
    DESCRIPTION_ACTION_ID, DESCRIPTION_BLOCK_ID, TITLE_ACTION_ID, TITLE_BLOCK_ID,
    URGENCY_ACTION_ID, URGENCY_BLOCK_ID,
};
use crate::slack::{InteractionPayload, StateValue, ViewState};

/// Errors from reading a submitted incident form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The interaction carries no view.
    #[error("Interaction has no view")]
    MissingView,

    /// An expected input is absent from the view state.
    #[error("Missing form field: {block_id}.{action_id}")]
    MissingField {
        block_id: &'static str,
        action_id: &'static str,
    },
}

/// Read the incident form values from a view state.
///
/// # Errors
///
/// Returns `SubmissionError::MissingField` if any of the three inputs is
/// absent, or if the title has no value. Slack enforces the required input,
/// so a present title is taken as submitted.
pub fn extract_submission(state: &ViewState) -> Result<IncidentSubmission, SubmissionError> {
    let title = input(state, TITLE_BLOCK_ID, TITLE_ACTION_ID)?
        .value
        .clone()
        .ok_or(SubmissionError::MissingField {
            block_id: TITLE_BLOCK_ID,
            action_id: TITLE_ACTION_ID,
        })?;

    let description = input(state, DESCRIPTION_BLOCK_ID, DESCRIPTION_ACTION_ID)?
        .value
        .clone()
        .unwrap_or_default();

    let urgency = input(state, URGENCY_BLOCK_ID, URGENCY_ACTION_ID)?
        .selected_option
        .as_ref()
        .map(|option| option.value.clone())
        .unwrap_or_default();

    Ok(IncidentSubmission {
        title,
        description,
        urgency,
    })
}

/// Build the alert for a submitted incident modal.
///
/// Channel context is taken from the view's private metadata when it
/// decodes; otherwise the alert is raised without it.
///
/// # Errors
///
/// Returns error if the payload has no view or the form values are incomplete.
pub fn map_submission(payload: &InteractionPayload) -> Result<Alert, SubmissionError> {
    let view = payload.view.as_ref().ok_or(SubmissionError::MissingView)?;
    let submission = extract_submission(&view.state)?;

    let channel = ChannelContext::from_metadata(&view.private_metadata).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable private metadata");
        None
    });

    Ok(build_alert(payload, submission, channel))
}

/// Assemble an alert from a submission and the submitting user and team.
#[must_use]
pub fn build_alert(
    payload: &InteractionPayload,
    submission: IncidentSubmission,
    channel: Option<ChannelContext>,
) -> Alert {
    let user = &payload.user;
    let name = user
        .name
        .clone()
        .or_else(|| user.username.clone())
        .unwrap_or_else(|| user.id.clone());
    let username = user.username.clone().unwrap_or_else(|| name.clone());

    let team = payload.team.as_ref().map_or_else(
        || Team {
            id: String::new(),
            name: String::new(),
        },
        |team| Team {
            id: team.id.clone(),
            name: team.domain.clone().unwrap_or_default(),
        },
    );

    Alert {
        priority: submission.priority(),
        title: submission.title,
        description: submission.description,
        source: ALERT_SOURCE.to_string(),
        tags: vec![ALERT_TAG.to_string()],
        reporter: Reporter {
            id: user.id.clone(),
            name,
            username,
        },
        team,
        channel,
    }
}

fn input<'a>(
    state: &'a ViewState,
    block_id: &'static str,
    action_id: &'static str,
) -> Result<&'a StateValue, SubmissionError> {
    state
        .values
        .get(block_id)
        .and_then(|block| block.get(action_id))
        .ok_or(SubmissionError::MissingField {
            block_id,
            action_id,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use incident_bridge_core::Priority;
    use serde_json::json;

    use super::*;
    use crate::opsgenie::alert_alias;

    fn payload(values: &serde_json::Value, metadata: &str) -> InteractionPayload {
        serde_json::from_value(json!({
            "type": "view_submission",
            "user": {"id": "U1", "username": "sam", "name": "sam"},
            "team": {"id": "T1", "domain": "acme"},
            "view": {
                "id": "V1",
                "callback_id": "incident_modal",
                "private_metadata": metadata,
                "state": {"values": values}
            }
        }))
        .unwrap()
    }

    fn values(
        title: Option<&str>,
        description: Option<&str>,
        urgency: Option<&str>,
    ) -> serde_json::Value {
        json!({
            "title_block": {"title": {"type": "plain_text_input", "value": title}},
            "description_block": {"description": {"type": "plain_text_input", "value": description}},
            "urgency_block": {"urgency": {
                "type": "static_select",
                "selected_option": urgency.map(|u| json!({"value": u, "text": {"type": "plain_text", "text": u}}))
            }}
        })
    }

    #[test]
    fn test_maps_submission_to_alert() {
        let payload = payload(&values(Some("DB down"), None, Some("critical")), "");

        let alert = map_submission(&payload).unwrap();

        assert_eq!(alert.title, "DB down");
        assert_eq!(alert.description, "");
        assert_eq!(alert.priority, Priority::P1);
        assert_eq!(alert.source, "Slack");
        assert!(alert.tags.contains(&"slack-incident".to_string()));
        assert_eq!(alert.reporter.id, "U1");
        assert_eq!(alert.team.name, "acme");
        assert!(alert.channel.is_none());
        assert!(alert_alias(&alert.reporter.id, 1_700_000_000).contains("U1"));
    }

    #[test]
    fn test_missing_urgency_selection_defaults_to_p3() {
        let payload = payload(&values(Some("Latency"), Some("p99 up"), None), "");
        let alert = map_submission(&payload).unwrap();

        assert_eq!(alert.priority, Priority::P3);
        assert_eq!(alert.description, "p99 up");
    }

    #[test]
    fn test_missing_title_value() {
        let payload = payload(&values(None, None, Some("low")), "");
        assert_eq!(
            map_submission(&payload).unwrap_err(),
            SubmissionError::MissingField {
                block_id: "title_block",
                action_id: "title"
            }
        );
    }

    #[test]
    fn test_title_is_passed_through_unchanged() {
        let padded = payload(&values(Some("  DB down \n"), None, None), "");
        assert_eq!(map_submission(&padded).unwrap().title, "  DB down \n");

        let blank = payload(&values(Some("   "), None, None), "");
        assert_eq!(map_submission(&blank).unwrap().title, "   ");
    }

    #[test]
    fn test_missing_block() {
        let payload = payload(
            &json!({"title_block": {"title": {"type": "plain_text_input", "value": "x"}}}),
            "",
        );
        assert!(matches!(
            map_submission(&payload),
            Err(SubmissionError::MissingField {
                block_id: "description_block",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_view() {
        let payload: InteractionPayload =
            serde_json::from_value(json!({"type": "view_submission", "user": {"id": "U1"}}))
                .unwrap();
        assert_eq!(
            map_submission(&payload).unwrap_err(),
            SubmissionError::MissingView
        );
    }

    #[test]
    fn test_channel_context_from_metadata() {
        let metadata = r#"{"channelId":"C1","channelName":"ops","teamDomain":"acme"}"#;
        let payload = payload(&values(Some("x"), None, Some("high")), metadata);

        let alert = map_submission(&payload).unwrap();
        assert_eq!(alert.channel.unwrap().channel_name, "ops");
    }

    #[test]
    fn test_unreadable_metadata_is_ignored() {
        let payload = payload(&values(Some("x"), None, Some("high")), "{broken");
        let alert = map_submission(&payload).unwrap();
        assert!(alert.channel.is_none());
        assert_eq!(alert.priority, Priority::P2);
    }

    #[test]
    fn test_reporter_falls_back_to_name() {
        let payload: InteractionPayload = serde_json::from_value(json!({
            "type": "view_submission",
            "user": {"id": "U9", "name": "alex"},
            "view": {"callback_id": "incident_modal", "state": {"values": values(Some("x"), None, None)}}
        }))
        .unwrap();

        let alert = map_submission(&payload).unwrap();
        assert_eq!(alert.reporter.name, "alex");
        assert_eq!(alert.reporter.username, "alex");
        assert_eq!(alert.team.id, "");
    }
}
