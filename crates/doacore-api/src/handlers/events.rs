use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use doacore_core::models::{CreateEventRequest, Event, EventListing};
use doacore_core::AppError;
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::auth::models::Session;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// List events with the organizer's full name
#[utoipa::path(
    get,
    path = "/api/eventos",
    responses(
        (status = 200, description = "Events", body = Vec<EventListing>),
        (status = 401, description = "Missing or invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
#[tracing::instrument(skip(state))]
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EventListing>>, HttpAppError> {
    let events = state.db.event_repository.list().await?;
    Ok(Json(events))
}

/// Create an event. The organizer defaults to the signed-in account.
#[utoipa::path(
    post,
    path = "/api/eventos",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 403, description = "Role may not open the Events view")
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
#[tracing::instrument(skip(state, session, request), fields(actor = session.account_id))]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    session: Session,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    let event = request.into_new_event(session.account_id)?;

    let created = state.db.event_repository.create(&event).await?;

    tracing::info!(
        event_id = created.id_evento,
        organizer = created.id_organizador,
        data_inicio = %created.data_inicio,
        "Event created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete an event; refused while donations reference it
#[utoipa::path(
    delete,
    path = "/api/eventos/{id}",
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Event has donations", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.db.event_repository.delete(id).await? {
        return Err(AppError::NotFound("Evento não encontrado".to_string()).into());
    }

    tracing::info!(event_id = id, "Event deleted");
    Ok(Json(MessageResponse::new("Evento excluído com sucesso")))
}
