//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Server error type
#[derive(Error, Debug)]
pub enum ServerError {
    /// The request body is not a decodable event envelope
    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    /// Rule evaluation could not complete
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ServerError::Evaluation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<gantry_core::CoreError> for ServerError {
    fn from(err: gantry_core::CoreError) -> Self {
        ServerError::InvalidPayload(err.to_string())
    }
}

impl From<gantry_engine::EngineError> for ServerError {
    fn from(err: gantry_engine::EngineError) -> Self {
        ServerError::Evaluation(err.to_string())
    }
}
