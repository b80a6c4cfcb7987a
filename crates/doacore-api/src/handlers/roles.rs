use axum::{extract::State, Json};
use doacore_core::models::RoleRecord;
use std::sync::Arc;

use crate::error::HttpAppError;
use crate::state::AppState;

/// List the closed set of account roles
#[utoipa::path(
    get,
    path = "/api/funcoes",
    responses(
        (status = 200, description = "Roles", body = Vec<RoleRecord>),
        (status = 401, description = "Missing or invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state))]
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoleRecord>>, HttpAppError> {
    let roles = state.db.role_repository.list().await?;
    Ok(Json(roles))
}
