//! Request and response types

use gantry_engine::{DispatchOutcome, Evaluator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Rule evaluator; immutable after startup
    pub evaluator: Arc<Evaluator>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Webhook response: the aggregated outcome of evaluating one event
#[derive(Debug, Serialize)]
pub struct HookResponse {
    pub event_type: String,

    #[serde(flatten)]
    pub outcome: DispatchOutcome,
}
