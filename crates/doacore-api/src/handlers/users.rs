//! Account management handlers
//!
//! Listing is open to the Users and Teams views (team screens pick members
//! from it); every mutation belongs to the Users view. Secrets are hashed
//! here and never leave the database again.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use doacore_core::models::{Account, AccountFields, CreateAccountRequest, UpdateAccountRequest};
use doacore_core::{AppError, Role};
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::auth::models::Session;
use crate::auth::password::hash_password;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

const ACCOUNT_NOT_FOUND: &str = "Usuário não encontrado";

/// Resolve `funcao_id` to one of the known roles
async fn ensure_role(state: &AppState, funcao_id: i32) -> Result<Role, AppError> {
    let record = state
        .db
        .role_repository
        .find(funcao_id)
        .await?
        .ok_or_else(|| AppError::InvalidInput("Função inexistente".to_string()))?;

    record.nome_funcao.parse::<Role>().map_err(|_| {
        AppError::InvalidInput(format!("Função inválida: {}", record.nome_funcao))
    })
}

/// List accounts with their role name
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Accounts", body = Vec<Account>),
        (status = 401, description = "Missing or invalid session token"),
        (status = 403, description = "Role may not open the Users or Teams view")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, HttpAppError> {
    let accounts = state.db.account_repository.list().await?;
    Ok(Json(accounts))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 403, description = "Role may not open the Users view"),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, session, request), fields(actor = session.account_id))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    ValidatedJson(request): ValidatedJson<CreateAccountRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.check_required()?;
    request.validate().map_err(AppError::from)?;

    let CreateAccountRequest {
        nome: Some(nome),
        sobrenome: Some(sobrenome),
        email: Some(email),
        senha: Some(senha),
        funcao_id: Some(funcao_id),
    } = request
    else {
        return Err(AppError::Internal("Required fields vanished after check".to_string()).into());
    };

    let role = ensure_role(&state, funcao_id).await?;

    let fields = AccountFields {
        nome,
        sobrenome,
        email,
        senha_hash: Some(hash_password(&senha)?),
        funcao_id,
    };

    let account = state.db.account_repository.create(&fields).await?;

    tracing::info!(account_id = account.id, role = %role, "Account created");
    Ok((StatusCode::CREATED, Json(account)))
}

/// Update an account; an absent or blank `senha` keeps the current secret
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "Account id")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = Account),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 403, description = "Role may not open the Users view"),
        (status = 404, description = "Account not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, session, request), fields(actor = session.account_id))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
    ValidatedJson(mut request): ValidatedJson<UpdateAccountRequest>,
) -> Result<Json<Account>, HttpAppError> {
    request.check_required()?;
    request.validate().map_err(AppError::from)?;

    let UpdateAccountRequest {
        nome: Some(nome),
        sobrenome: Some(sobrenome),
        email: Some(email),
        senha,
        funcao_id: Some(funcao_id),
    } = request
    else {
        return Err(AppError::Internal("Required fields vanished after check".to_string()).into());
    };

    ensure_role(&state, funcao_id).await?;

    let fields = AccountFields {
        nome,
        sobrenome,
        email,
        senha_hash: senha.as_deref().map(hash_password).transpose()?,
        funcao_id,
    };

    let account = state
        .db
        .account_repository
        .update(id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound(ACCOUNT_NOT_FOUND.to_string()))?;

    tracing::info!(
        account_id = account.id,
        secret_changed = fields.senha_hash.is_some(),
        "Account updated"
    );
    Ok(Json(account))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 403, description = "Role may not open the Users view"),
        (status = 404, description = "Account not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Account still referenced", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, session), fields(actor = session.account_id))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if id == session.account_id {
        return Err(AppError::Conflict(
            "Não é possível excluir o próprio usuário".to_string(),
        )
        .into());
    }

    if !state.db.account_repository.delete(id).await? {
        return Err(AppError::NotFound(ACCOUNT_NOT_FOUND.to_string()).into());
    }

    tracing::info!(account_id = id, "Account deleted");
    Ok(Json(MessageResponse::new("Usuário excluído com sucesso")))
}
