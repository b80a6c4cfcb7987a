//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    pub database: String,
    pub version: &'static str,
}

/// Run `SELECT 1` against the pool with a timeout.
async fn check_database(state: &AppState) -> Result<(), String> {
    match tokio::time::timeout(CHECK_TIMEOUT, sqlx::query("SELECT 1").execute(&state.db.pool)).await
    {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database health check failed");
            Err(format!("unhealthy: {}", e))
        }
        Err(_) => {
            tracing::error!("Database health check timed out");
            Err("timeout".to_string())
        }
    }
}

/// Liveness check: the process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness check: the database answers.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match check_database(&state).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ready", "database": "ready" })),
        ),
        Err(detail) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "not_ready", "database": detail })),
        ),
    }
}

/// Health summary with dependency status.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status_code, status, database) = match check_database(&state).await {
        Ok(()) => (StatusCode::OK, "healthy", "healthy".to_string()),
        Err(detail) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", detail),
    };

    (
        status_code,
        Json(HealthCheckResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
