//! Incident form input and the channel context carried alongside it.

use serde::{Deserialize, Serialize};

use super::priority::{Priority, priority_for_urgency};

/// Values the user entered in the incident form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSubmission {
    /// Incident title (required by the form).
    pub title: String,
    /// Free-form description; empty when left blank.
    #[serde(default)]
    pub description: String,
    /// Raw urgency option value (`critical`, `high`, `medium`, `low`).
    #[serde(default)]
    pub urgency: String,
}

impl IncidentSubmission {
    /// The priority this submission maps to.
    #[must_use]
    pub fn priority(&self) -> Priority {
        priority_for_urgency(&self.urgency)
    }
}

/// Channel and team context attached to the modal as private metadata.
///
/// Slack hands the metadata back unchanged with the view submission, which
/// is the only way the submission knows where the command was run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContext {
    pub channel_id: String,
    pub channel_name: String,
    pub team_domain: String,
}

impl ChannelContext {
    /// Encode as the modal's `private_metadata` string.
    #[must_use]
    pub fn to_metadata(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Decode from a modal's `private_metadata` string.
    ///
    /// Returns `None` for empty metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata is not valid JSON for this type.
    pub fn from_metadata(metadata: &str) -> Result<Option<Self>, serde_json::Error> {
        if metadata.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(metadata).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_context_metadata_shape() {
        let ctx = ChannelContext {
            channel_id: "C123".to_string(),
            channel_name: "ops".to_string(),
            team_domain: "acme".to_string(),
        };

        let value: serde_json::Value =
            serde_json::from_str(&ctx.to_metadata()).expect("valid json");
        assert_eq!(value["channelId"], "C123");
        assert_eq!(value["channelName"], "ops");
        assert_eq!(value["teamDomain"], "acme");
    }

    #[test]
    fn test_channel_context_from_empty_metadata() {
        assert_eq!(ChannelContext::from_metadata("").ok(), Some(None));
    }

    #[test]
    fn test_channel_context_from_garbage_metadata() {
        assert!(ChannelContext::from_metadata("not json").is_err());
    }

    #[test]
    fn test_submission_priority() {
        let submission = IncidentSubmission {
            title: "DB down".to_string(),
            description: String::new(),
            urgency: "critical".to_string(),
        };
        assert_eq!(submission.priority(), Priority::P1);
    }
}
