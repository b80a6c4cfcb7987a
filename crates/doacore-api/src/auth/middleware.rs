use crate::auth::models::Session;
use crate::error::HttpAppError;
use crate::state::{AppState, DbState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use doacore_core::{AppError, Role};
use std::convert::Infallible;
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

/// Read the bearer token, if any. A header in another scheme is an error.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    value
        .strip_prefix(BEARER_PREFIX)
        .map(|token| Some(token.trim()))
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))
}

/// Reload the token's account. Deleted accounts lose access and role
/// changes apply to tokens issued before them.
async fn refresh_session(db: &DbState, session: Session) -> Result<Session, AppError> {
    let account = db
        .account_repository
        .get(session.account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sessão inválida".to_string()))?;

    let role: Role = account.nome_funcao.parse().map_err(|e| {
        AppError::Internal(format!("Account {} has an unknown role: {}", account.id, e))
    })?;

    if role != session.role {
        tracing::info!(
            account_id = account.id,
            token_role = %session.role,
            role = %role,
            "Session role differs from stored role"
        );
    }

    Ok(Session {
        account_id: account.id,
        email: account.email,
        role,
    })
}

/// Require a valid session token and expose it to handlers as [`Session`].
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(Some(token)) => token,
        Ok(None) => {
            tracing::debug!(path = %request.uri().path(), "Missing authorization header");
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
        Err(err) => return HttpAppError(err).into_response(),
    };

    let session = match state.auth.tokens.validate(token) {
        Ok(session) => session,
        Err(err) => return HttpAppError(err).into_response(),
    };

    match refresh_session(&state.db, session).await {
        Ok(session) => {
            tracing::debug!(account_id = session.account_id, role = %session.role, "Session authenticated");
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(err) => HttpAppError(err).into_response(),
    }
}

/// Session on public routes: `None` when the request is anonymous or its token is unusable.
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<Session>);

impl FromRequestParts<Arc<AppState>> for OptionalSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = match bearer_token(&parts.headers) {
            Ok(Some(token)) => match state.auth.tokens.validate(token) {
                Ok(session) => match refresh_session(&state.db, session).await {
                    Ok(session) => Some(session),
                    Err(err) => {
                        tracing::debug!(error = %err, "Ignoring session of unusable account");
                        None
                    }
                },
                Err(err) => {
                    tracing::debug!(error = %err, "Ignoring unusable session token");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring malformed authorization header");
                None
            }
        };

        Ok(OptionalSession(session))
    }
}
