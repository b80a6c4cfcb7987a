//! Application setup and initialization
//!
//! Everything main.rs needs before the listener starts: configuration
//! checks, tracing, the database pool with migrations, the first
//! administrator, and the router.

pub mod bootstrap;
pub mod database;
pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use doacore_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first so validation warnings are visible
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment,
        port = config.server_port,
        "Configuration loaded and validated successfully"
    );

    // Setup database
    let pool = database::setup_database(&config).await?;

    let state = Arc::new(AppState::new(config.clone(), pool));

    if let Some(admin) = &config.bootstrap_admin {
        bootstrap::ensure_admin(&state.db, admin)
            .await
            .context("Failed to create the bootstrap administrator")?;
    }

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
