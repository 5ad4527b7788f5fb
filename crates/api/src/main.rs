//! Aura HTTP API.
//!
//! Serves task, alarm, category, message and settings CRUD plus the chat
//! assistant endpoint. Requests are attributed to the user named in the
//! `X-User-Id` header, which an upstream authenticator sets.

mod config;
mod error;
mod extract;
mod routes;
mod state;

use std::sync::Arc;

use brain_core::{Brain, BrainError};
use database::{seed, Database};
use openai_brain::OpenAiBrain;
use orchestrator::{ExtractorConfig, Orchestrator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting Aura API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    if config.seed_demo {
        let demo = seed::seed_demo(db.pool()).await?;
        info!(user_id = demo.id, "Demo account ready");
    }

    // Language model is optional; without it the assistant matches keywords
    let brain = load_brain()?;
    let orchestrator = Orchestrator::with_brain(db.clone(), brain, ExtractorConfig::from_env());
    info!(extractor = orchestrator.extractor_name(), "Chat pipeline ready");

    // Build application state
    let state = AppState::new(db.clone(), orchestrator);

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Aura API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Aura API stopped");
    Ok(())
}

fn load_brain() -> Result<Option<Arc<dyn Brain>>, BrainError> {
    match OpenAiBrain::from_env() {
        Ok(brain) => Ok(Some(Arc::new(brain))),
        Err(BrainError::Configuration(reason)) => {
            info!("Language model disabled: {}", reason);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
