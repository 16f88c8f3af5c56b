//! HTTP API
//!
//! - types: Request/response type definitions
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration

mod handlers;
mod router;
pub mod types;

pub use router::create_router;
pub use types::{AppState, HealthResponse, HookResponse};
