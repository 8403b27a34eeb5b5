//! Incident reporting flows.
//!
//! Both flows run after Slack has been acknowledged, so every failure is
//! reported to the user as a DM rather than returned.

use incident_bridge_core::{Alert, ChannelContext};
use tracing::{error, info, instrument, warn};

use super::notifier::{Notification, Notifier};
use crate::opsgenie::OpsGenieClient;
use crate::slack::{SlackClient, SlackError, SlashCommand, build_incident_modal};

/// Orchestrates the command-to-modal and submission-to-alert flows.
#[derive(Debug, Clone)]
pub struct IncidentService {
    slack: SlackClient,
    opsgenie: OpsGenieClient,
    notifier: Notifier,
}

impl IncidentService {
    /// Create a new incident service.
    #[must_use]
    pub fn new(slack: SlackClient, opsgenie: OpsGenieClient) -> Self {
        Self {
            notifier: Notifier::new(slack.clone()),
            slack,
            opsgenie,
        }
    }

    /// Open the incident modal for a slash command.
    #[instrument(
        skip(self, command),
        fields(user_id = %command.user_id, channel_id = %command.channel_id)
    )]
    pub async fn open_modal(&self, command: &SlashCommand) {
        let context = ChannelContext {
            channel_id: command.channel_id.clone(),
            channel_name: command.channel_name.clone(),
            team_domain: command.team_domain.clone(),
        };
        let view = build_incident_modal(&context);

        let notification = match self.slack.open_view(&command.trigger_id, &view).await {
            Ok(()) => {
                info!("Incident modal opened");
                return;
            }
            Err(SlackError::ExpiredTrigger) => {
                warn!("Trigger expired before the incident modal opened");
                Notification::ModalExpired
            }
            Err(e) => {
                error!(error = %e, "Failed to open incident modal");
                Notification::ModalFailed
            }
        };

        self.notifier.notify(&command.user_id, &notification).await;
    }

    /// Raise an alert for a submitted incident and tell the reporter.
    #[instrument(skip(self, alert), fields(user_id = %alert.reporter.id))]
    pub async fn submit(&self, alert: Alert) {
        let notification = match self.opsgenie.create_alert(&alert).await {
            Ok(result) => Notification::IncidentCreated(result),
            Err(e) => {
                let event_id = sentry::capture_error(&e);
                error!(
                    error = %e,
                    sentry_event_id = %event_id,
                    "Failed to create incident"
                );
                Notification::IncidentFailed
            }
        };

        self.notifier
            .notify(&alert.reporter.id, &notification)
            .await;
    }
}
