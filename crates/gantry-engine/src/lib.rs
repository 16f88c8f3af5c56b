//! Gantry Engine - rule matching and action dispatch
//!
//! Given a loaded rule set and one decoded event, the engine decides which
//! rules match and turns each matched rule's actions into concurrent remote
//! operations through the cluster gateway, aggregating per-operation results
//! into a single outcome.

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod gateway;
pub mod matcher;
pub mod outcome;
pub mod template;

// Re-export commonly used types
pub use dispatcher::Dispatcher;
pub use error::EngineError;
pub use evaluator::Evaluator;
pub use gateway::{ClusterGateway, DryRunGateway, GatewayError, ResourceRef};
pub use outcome::DispatchOutcome;
pub use template::MinijinjaRenderer;
