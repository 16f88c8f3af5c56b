//! Router creation and configuration

use super::handlers::{health, hook};
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use gantry_engine::Evaluator;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(evaluator: Arc<Evaluator>) -> Router {
    let state = AppState { evaluator };

    Router::new()
        .route("/healthz", get(health))
        .route("/hooks", post(hook))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
