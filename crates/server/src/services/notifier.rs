//! Delivery of incident outcomes to the reporting user.

use incident_bridge_core::AlertCreationResult;
use tracing::{error, instrument};

use crate::slack::messages::{
    INCIDENT_CREATED_TEXT, INCIDENT_FAILED_TEXT, MODAL_EXPIRED_TEXT, MODAL_FAILED_TEXT,
};
use crate::slack::{
    Block, SlackClient, build_incident_created_message, build_incident_failed_message,
    build_modal_expired_message, build_modal_failed_message,
};

/// An outcome to report back to a user.
#[derive(Debug, Clone)]
pub enum Notification {
    /// The alert was created (possibly unconfirmed).
    IncidentCreated(AlertCreationResult),
    /// The alert could not be created.
    IncidentFailed,
    /// The trigger ID expired before the modal opened.
    ModalExpired,
    /// The modal could not be opened.
    ModalFailed,
}

impl Notification {
    /// Block Kit body for this notification.
    #[must_use]
    pub fn blocks(&self) -> Vec<Block> {
        match self {
            Self::IncidentCreated(result) => build_incident_created_message(result),
            Self::IncidentFailed => build_incident_failed_message(),
            Self::ModalExpired => build_modal_expired_message(),
            Self::ModalFailed => build_modal_failed_message(),
        }
    }

    /// Plain text fallback for notifications and clients without blocks.
    #[must_use]
    pub const fn fallback_text(&self) -> &'static str {
        match self {
            Self::IncidentCreated(_) => INCIDENT_CREATED_TEXT,
            Self::IncidentFailed => INCIDENT_FAILED_TEXT,
            Self::ModalExpired => MODAL_EXPIRED_TEXT,
            Self::ModalFailed => MODAL_FAILED_TEXT,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::IncidentCreated(_) => "incident_created",
            Self::IncidentFailed => "incident_failed",
            Self::ModalExpired => "modal_expired",
            Self::ModalFailed => "modal_failed",
        }
    }
}

/// Sends notifications to users as direct messages from the bot.
#[derive(Debug, Clone)]
pub struct Notifier {
    slack: SlackClient,
}

impl Notifier {
    /// Create a notifier that posts through `slack`.
    #[must_use]
    pub const fn new(slack: SlackClient) -> Self {
        Self { slack }
    }

    /// Deliver a notification to a user.
    ///
    /// Delivery failures are logged and otherwise ignored.
    #[instrument(skip(self, notification), fields(kind = notification.kind()))]
    pub async fn notify(&self, user_id: &str, notification: &Notification) {
        if let Err(e) = self
            .slack
            .post_message(
                user_id,
                notification.blocks(),
                Some(notification.fallback_text()),
            )
            .await
        {
            error!(user_id = %user_id, error = %e, "Failed to deliver notification");
        }
    }
}
