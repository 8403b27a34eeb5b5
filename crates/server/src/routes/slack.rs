//! Slack webhook handlers for slash commands and interactions.
//!
//! Slack expects an acknowledgement within three seconds, so both handlers
//! verify and parse synchronously and hand the slow work to a spawned task.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{Instrument, debug, info, instrument};

use crate::error::AppError;
use crate::services::map_submission;
use crate::slack::{
    INCIDENT_CALLBACK_ID, InteractionPayload, SlashCommand, ViewSubmissionResponse,
};
use crate::state::AppState;

/// Create Slack webhook routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/slack/commands", post(handle_command))
        .route("/slack/interactivity", post(handle_interaction))
}

/// Handle a slash command by opening the incident modal.
///
/// Responds with an empty 200; the modal is opened in the background.
#[instrument(skip(state, headers, body))]
async fn handle_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    state.verifier().verify(&headers, &body)?;

    let command = SlashCommand::from_form(&body)?;

    info!(
        command = %command.command,
        user_id = %command.user_id,
        channel_id = %command.channel_id,
        "Received slash command"
    );

    let incidents = state.incidents().clone();
    tokio::spawn(
        async move {
            incidents.open_modal(&command).await;
        }
        .instrument(tracing::Span::current()),
    );

    Ok(StatusCode::OK)
}

/// Handle an interaction webhook.
///
/// Incident modal submissions are mapped to an alert before responding, so
/// malformed forms are rejected with 400. The alert itself is created in
/// the background and the modal is closed immediately.
#[instrument(skip(state, headers, body))]
async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    state.verifier().verify(&headers, &body)?;

    let payload = InteractionPayload::from_form(&body)?;

    let is_incident_submission = payload.is_view_submission()
        && payload
            .view
            .as_ref()
            .is_some_and(|view| view.callback_id == INCIDENT_CALLBACK_ID);

    if !is_incident_submission {
        debug!(
            interaction_type = %payload.interaction_type,
            "Ignoring interaction"
        );
        return Ok(StatusCode::OK.into_response());
    }

    let alert = map_submission(&payload)?;

    info!(
        user_id = %alert.reporter.id,
        priority = %alert.priority,
        "Received incident submission"
    );

    let incidents = state.incidents().clone();
    tokio::spawn(
        async move {
            incidents.submit(alert).await;
        }
        .instrument(tracing::Span::current()),
    );

    Ok(Json(ViewSubmissionResponse::clear()).into_response())
}
