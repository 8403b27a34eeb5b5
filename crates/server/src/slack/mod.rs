//! Slack integration for incident reporting.
//!
//! This module provides:
//! - [`SignatureVerifier`] for authenticating inbound webhooks
//! - [`SlackClient`] for opening modals and posting messages
//! - Block Kit types and the inbound command/interaction payloads
//! - The incident modal and outcome message builders
//!
//! # Flow
//!
//! 1. A user runs the slash command, Slack posts it to `/slack/commands`
//! 2. The incident modal is opened with the command's trigger ID
//! 3. The user submits the modal, Slack posts it to `/slack/interactivity`
//! 4. An OpsGenie alert is created from the submitted values
//! 5. The user receives a DM with the outcome

mod client;
mod error;
pub mod messages;
pub mod modal;
pub mod signature;
mod types;

pub use client::SlackClient;
pub use error::SlackError;
pub use messages::{
    build_error_message, build_incident_created_message, build_incident_failed_message,
    build_modal_expired_message, build_modal_failed_message,
};
pub use modal::{INCIDENT_CALLBACK_ID, build_incident_modal};
pub use signature::SignatureVerifier;
pub use types::{
    Block, ContextElement, InputElement, InteractionPayload, InteractionTeam, InteractionUser,
    ModalView, OpenViewResponse, OptionObject, PlainText, PostMessageResponse, ResponseAction,
    SelectedOption, SlackMessage, SlashCommand, StateValue, SubmittedView, Text, ViewState,
    ViewSubmissionResponse,
};
