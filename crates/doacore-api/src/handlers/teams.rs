use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use doacore_core::models::{
    AddMemberRequest, CreateTeamRequest, Team, TeamListing, TeamMember, DEFAULT_TEAM_FUNCTION,
};
use doacore_core::AppError;
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::auth::models::Session;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

const TEAM_NOT_FOUND: &str = "Equipe não encontrada";

/// List teams with the creator's full name
#[utoipa::path(
    get,
    path = "/api/equipes",
    responses(
        (status = 200, description = "Teams", body = Vec<TeamListing>),
        (status = 401, description = "Missing or invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "teams"
)]
#[tracing::instrument(skip(state))]
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TeamListing>>, HttpAppError> {
    let teams = state.db.team_repository.list().await?;
    Ok(Json(teams))
}

/// Create a team. The creator defaults to the signed-in account.
#[utoipa::path(
    post,
    path = "/api/equipes",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 403, description = "Role may not open the Teams view")
    ),
    security(("bearer_auth" = [])),
    tag = "teams"
)]
#[tracing::instrument(skip(state, session, request), fields(actor = session.account_id))]
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    session: Session,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    let team = request.into_new_team(session.account_id)?;

    let created = state.db.team_repository.create(&team).await?;

    tracing::info!(
        team_id = created.id_equipe,
        creator = created.id_criador,
        "Team created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a team; refused while donations reference it
#[utoipa::path(
    delete,
    path = "/api/equipes/{id}",
    params(("id" = i32, Path, description = "Team id")),
    responses(
        (status = 200, description = "Team deleted", body = MessageResponse),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Team has donations", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "teams"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.db.team_repository.delete(id).await? {
        return Err(AppError::NotFound(TEAM_NOT_FOUND.to_string()).into());
    }

    tracing::info!(team_id = id, "Team deleted");
    Ok(Json(MessageResponse::new("Equipe excluída com sucesso")))
}

#[utoipa::path(
    get,
    path = "/api/equipes/{id}/membros",
    params(("id" = i32, Path, description = "Team id")),
    responses(
        (status = 200, description = "Team members", body = Vec<TeamMember>),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "teams"
)]
#[tracing::instrument(skip(state))]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<TeamMember>>, HttpAppError> {
    if !state.db.team_repository.exists(id).await? {
        return Err(AppError::NotFound(TEAM_NOT_FOUND.to_string()).into());
    }

    let members = state.db.team_repository.list_members(id).await?;
    Ok(Json(members))
}

/// Add an account to a team
#[utoipa::path(
    post,
    path = "/api/equipes/{id}/membros",
    params(("id" = i32, Path, description = "Team id")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = MessageResponse),
        (status = 400, description = "Missing fields or unknown account", body = crate::error::ErrorResponse),
        (status = 409, description = "Account already in the team", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "teams"
)]
#[tracing::instrument(skip(state, request))]
pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Some(account_id) = request.id_usuario else {
        return Err(AppError::MissingField("id_usuario".to_string()).into());
    };
    request.validate().map_err(AppError::from)?;
    let funcao = request
        .funcao_na_equipe
        .as_deref()
        .unwrap_or(DEFAULT_TEAM_FUNCTION);

    state
        .db
        .team_repository
        .add_member(id, account_id, funcao)
        .await?;

    tracing::info!(team_id = id, account_id, funcao, "Member added to team");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Membro adicionado com sucesso")),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/equipes/{id}/membros/{id_usuario}",
    params(
        ("id" = i32, Path, description = "Team id"),
        ("id_usuario" = i32, Path, description = "Account id")
    ),
    responses(
        (status = 200, description = "Member removed", body = MessageResponse),
        (status = 404, description = "Membership not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "teams"
)]
#[tracing::instrument(skip(state))]
pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    Path((id, id_usuario)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state
        .db
        .team_repository
        .remove_member(id, id_usuario)
        .await?
    {
        return Err(AppError::NotFound("Membro não encontrado na equipe".to_string()).into());
    }

    tracing::info!(team_id = id, account_id = id_usuario, "Member removed from team");
    Ok(Json(MessageResponse::new("Membro removido com sucesso")))
}
