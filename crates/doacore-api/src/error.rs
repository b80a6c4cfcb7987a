//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Any `AppError`
//! converts with `?`, and every failure renders as the same `{message}` body
//! with the status the variant declares.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use doacore_core::{AppError, ErrorMetadata, LogLevel};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Error chain, outside production and only for non-sensitive errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from doacore-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "O corpo da requisição deve ser JSON".to_string()
            }
            other => format!("Corpo da requisição inválido: {}", other.body_text()),
        };
        HttpAppError(AppError::InvalidInput(message))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
/// Use this instead of `Json<T>` so invalid bodies keep the API error shape.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, error_code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, error_code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type,
                error_code,
                "Request failed"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| {
            let env = env.to_lowercase();
            env == "production" || env == "prod"
        })
        .unwrap_or(false)
}

fn error_body(app_error: &AppError, expose_details: bool) -> ErrorResponse {
    ErrorResponse {
        message: app_error.client_message(),
        details: expose_details.then(|| app_error.detailed_message()),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Details never leave the process in production or for sensitive errors.
        let expose_details = !is_production_env() && !app_error.is_sensitive();

        (status, Json(error_body(app_error, expose_details))).into_response()
    }
}
