use axum::{extract::Query, Json};
use doacore_core::{authorize, Access, AppError, View};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::middleware::OptionalSession;
use crate::error::HttpAppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AccessQuery {
    /// Client route, e.g. `/usuarios`
    pub rota: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessDecision {
    pub permitido: bool,
    /// Where the client should go instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destino: Option<String>,
}

impl From<Access> for AccessDecision {
    fn from(access: Access) -> Self {
        match access {
            Access::Allow => AccessDecision {
                permitido: true,
                destino: None,
            },
            Access::Redirect(view) => AccessDecision {
                permitido: false,
                destino: Some(view.path().to_string()),
            },
        }
    }
}

/// Ask whether the current session may open a client route
#[utoipa::path(
    get,
    path = "/api/acesso",
    params(AccessQuery),
    responses(
        (status = 200, description = "Gate decision", body = AccessDecision),
        (status = 400, description = "Route missing", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown route", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(session))]
pub async fn check_access(
    OptionalSession(session): OptionalSession,
    Query(query): Query<AccessQuery>,
) -> Result<Json<AccessDecision>, HttpAppError> {
    let rota = query
        .rota
        .ok_or_else(|| AppError::MissingField("rota".to_string()))?;

    let view = View::from_path(&rota)
        .ok_or_else(|| AppError::NotFound(format!("Rota desconhecida: {}", rota)))?;

    let access = authorize(session.as_ref().map(|s| s.role), view);
    tracing::debug!(?view, ?access, authenticated = session.is_some(), "Access evaluated");

    Ok(Json(access.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_names_target_path() {
        let decision: AccessDecision = Access::Redirect(View::Home).into();
        let json = serde_json::to_value(&decision).unwrap();

        assert_eq!(json, serde_json::json!({ "permitido": false, "destino": "/home" }));
    }

    #[test]
    fn test_allow_has_no_target() {
        let json = serde_json::to_value(AccessDecision::from(Access::Allow)).unwrap();
        assert_eq!(json, serde_json::json!({ "permitido": true }));
    }
}
