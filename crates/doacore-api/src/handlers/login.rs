//! Credential check and session token issue.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use doacore_core::models::{LoginRequest, UserProfile};
use doacore_core::{AppError, Role};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::password::{verify_against_dummy, verify_password};
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Profile of the signed-in account plus its session token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub perfil: UserProfile,
    pub token: String,
    pub expira_em: DateTime<Utc>,
}

/// Authenticate with email and secret
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Email or secret missing", body = crate::error::ErrorResponse),
        (status = 401, description = "Wrong email or secret", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(state, request))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpAppError> {
    let (email, senha) = match (request.email, request.senha) {
        (Some(email), Some(senha)) if !senha.is_empty() => (email, senha),
        _ => {
            return Err(AppError::InvalidInput("Email e senha são obrigatórios".to_string()).into())
        }
    };

    let credentials = state
        .db
        .account_repository
        .find_credentials_by_email(&email)
        .await?;

    let Some(credentials) = credentials else {
        verify_against_dummy(&senha);
        tracing::info!(reason = "unknown_email", "Login failed");
        return Err(AppError::InvalidCredentials.into());
    };

    if !verify_password(&senha, &credentials.senha)? {
        tracing::info!(account_id = credentials.id, reason = "wrong_secret", "Login failed");
        return Err(AppError::InvalidCredentials.into());
    }

    let role: Role = credentials.nome_funcao.parse().map_err(|e| {
        AppError::Internal(format!(
            "Account {} has an unknown role: {}",
            credentials.id, e
        ))
    })?;

    let equipes = state
        .db
        .account_repository
        .teams_for_account(credentials.id)
        .await?;

    let issued = state
        .auth
        .tokens
        .issue(credentials.id, &credentials.email, role)?;

    tracing::info!(
        account_id = credentials.id,
        role = %role,
        teams = equipes.len(),
        "Login succeeded"
    );

    Ok(Json(LoginResponse {
        perfil: UserProfile::new(credentials, equipes),
        token: issued.token,
        expira_em: issued.expires_at,
    }))
}
