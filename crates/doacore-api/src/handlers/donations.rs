//! Donation handlers
//!
//! Submissions are validated completely before anything is written, then
//! the donation and its line items are stored in one transaction. Totals are
//! always recomputed from the rows on read.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use doacore_core::models::{
    Donation, DonationDetail, DonationListing, DonationSubmission, DonationSummary, LineItem,
};
use doacore_core::validation::validate_donation;
use doacore_core::{AppError, StorageResultExt};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::MessageResponse;
use crate::auth::models::Session;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

const DONATION_NOT_FOUND: &str = "Doação não encontrada";

/// Acknowledgement of a stored donation
#[derive(Debug, Serialize, ToSchema)]
pub struct DonationCreated {
    pub message: String,
    pub id_doacao: i32,
    pub doacao: Donation,
}

/// Register a donation with its line items
#[utoipa::path(
    post,
    path = "/api/doacoes",
    request_body = DonationSubmission,
    responses(
        (status = 201, description = "Donation registered", body = DonationCreated),
        (status = 400, description = "Missing fields, invalid kind or unknown references", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid session token"),
        (status = 500, description = "Donation could not be stored", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "donations"
)]
#[tracing::instrument(skip(state, session, submission), fields(actor = session.account_id))]
pub async fn create_donation(
    State(state): State<Arc<AppState>>,
    session: Session,
    ValidatedJson(submission): ValidatedJson<DonationSubmission>,
) -> Result<impl IntoResponse, HttpAppError> {
    let donation = validate_donation(submission)?;

    let record = state
        .db
        .donation_repository
        .submit(&donation)
        .await
        .or_failure_message("Erro ao registrar doação")?;

    tracing::info!(
        donation_id = record.id_doacao,
        kind = %donation.kind,
        items = donation.itens.len(),
        donor = record.id_usuario,
        event_id = record.id_evento,
        team_id = record.id_equipe,
        "Donation registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(DonationCreated {
            message: "Doação registrada com sucesso".to_string(),
            id_doacao: record.id_doacao,
            doacao: record,
        }),
    ))
}

/// List donations with donor, event and team names
#[utoipa::path(
    get,
    path = "/api/doacoes",
    responses(
        (status = 200, description = "Donations, newest first", body = Vec<DonationListing>),
        (status = 401, description = "Missing or invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "donations"
)]
#[tracing::instrument(skip(state))]
pub async fn list_donations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DonationListing>>, HttpAppError> {
    let donations = state
        .db
        .donation_repository
        .list()
        .await
        .or_failure_message("Erro ao buscar doações")?;
    Ok(Json(donations))
}

/// Totals over every donation
#[utoipa::path(
    get,
    path = "/api/doacoes/resumo",
    responses(
        (status = 200, description = "Donation totals", body = DonationSummary),
        (status = 401, description = "Missing or invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "donations"
)]
#[tracing::instrument(skip(state))]
pub async fn donation_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DonationSummary>, HttpAppError> {
    let summary = state
        .db
        .donation_repository
        .summary()
        .await
        .or_failure_message("Erro ao calcular resumo de doações")?;
    Ok(Json(summary))
}

/// One donation with its line items
#[utoipa::path(
    get,
    path = "/api/doacoes/{id}",
    params(("id" = i32, Path, description = "Donation id")),
    responses(
        (status = 200, description = "Donation", body = DonationDetail),
        (status = 404, description = "Donation not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "donations"
)]
#[tracing::instrument(skip(state))]
pub async fn get_donation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<DonationDetail>, HttpAppError> {
    let doacao = state
        .db
        .donation_repository
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(DONATION_NOT_FOUND.to_string()))?;

    let itens = state.db.donation_repository.items(id).await?;

    Ok(Json(DonationDetail { doacao, itens }))
}

/// Line items of one donation
#[utoipa::path(
    get,
    path = "/api/doacoes/{id}/itens",
    params(("id" = i32, Path, description = "Donation id")),
    responses(
        (status = 200, description = "Line items", body = Vec<LineItem>),
        (status = 404, description = "Donation not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "donations"
)]
#[tracing::instrument(skip(state))]
pub async fn list_donation_items(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<LineItem>>, HttpAppError> {
    if !state.db.donation_repository.exists(id).await? {
        return Err(AppError::NotFound(DONATION_NOT_FOUND.to_string()).into());
    }

    let items = state
        .db
        .donation_repository
        .items(id)
        .await
        .or_failure_message("Erro ao buscar itens da doação")?;
    Ok(Json(items))
}

/// Delete a donation and its line items
#[utoipa::path(
    delete,
    path = "/api/doacoes/{id}",
    params(("id" = i32, Path, description = "Donation id")),
    responses(
        (status = 200, description = "Donation deleted", body = MessageResponse),
        (status = 403, description = "Role may not open the Events view"),
        (status = 404, description = "Donation not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "donations"
)]
#[tracing::instrument(skip(state, session), fields(actor = session.account_id))]
pub async fn delete_donation(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    if !state.db.donation_repository.delete(id).await? {
        return Err(AppError::NotFound(DONATION_NOT_FOUND.to_string()).into());
    }

    tracing::info!(donation_id = id, "Donation deleted");
    Ok(Json(MessageResponse::new("Doação excluída com sucesso")))
}
