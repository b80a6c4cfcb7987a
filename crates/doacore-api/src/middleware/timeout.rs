use crate::error::HttpAppError;
use axum::BoxError;
use doacore_core::AppError;
use tower::timeout::error::Elapsed;

pub const TIMEOUT_MESSAGE: &str = "A requisição excedeu o tempo limite";

/// Render errors raised by the tower timeout stack with the API error body.
pub async fn handle_timeout_error(err: BoxError) -> HttpAppError {
    if err.is::<Elapsed>() {
        HttpAppError(AppError::Timeout(TIMEOUT_MESSAGE.to_string()))
    } else {
        HttpAppError(AppError::Internal(format!("Unhandled middleware error: {}", err)))
    }
}
