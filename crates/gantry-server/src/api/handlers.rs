//! API endpoint handlers

use super::types::{AppState, HealthResponse, HookResponse};
use crate::error::ServerError;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use gantry_core::Event;
use tracing::{info, warn};

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Webhook endpoint: decode the event envelope, evaluate it against the
/// loaded rules, and report the aggregated dispatch outcome.
///
/// Partial action failures still produce a response body; only a matching
/// error (an unknown filter outcome) is a hard 500 without one.
pub(super) async fn hook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ServerError> {
    let event = Event::from_json(&body)?;
    info!(
        event_type = event.event_type,
        event_id = event.id,
        "Received service hook event"
    );

    let outcome = state.evaluator.evaluate(&event).await?;

    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        warn!(event_type = event.event_type, %outcome, "Event dispatch had failures");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((
        status,
        Json(HookResponse {
            event_type: event.event_type,
            outcome,
        }),
    ))
}
