//! Gantry webhook server
//!
//! Receives CI/CD service hook events over HTTP, matches them against the
//! configured rules, and dispatches the resulting cluster actions.

use anyhow::Result;
use gantry_engine::{DryRunGateway, Evaluator, MinijinjaRenderer};
use gantry_server::api;
use gantry_server::config::ServerConfig;
use gantry_server::rules_loader::load_rules;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = ServerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let renderer = Arc::new(MinijinjaRenderer::new());
    let rules = load_rules(&config.rules_path, renderer.as_ref())?;

    let evaluator = Evaluator::new(rules, Arc::new(DryRunGateway), renderer);
    let app = api::create_router(Arc::new(evaluator));

    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/healthz", addr);
    info!("  Webhook endpoint: POST http://{}/hooks", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gantry_server=info,gantry_engine=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
