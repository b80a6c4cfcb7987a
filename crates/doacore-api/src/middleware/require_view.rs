//! Server-side enforcement of the view policy.
//!
//! Each route group names the views it belongs to. A session whose role may
//! open none of them is refused with 403; the policy itself lives in
//! [`doacore_core::access`].

use crate::auth::models::Session;
use crate::constants::ACCESS_DENIED_MESSAGE;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use doacore_core::{authorize_any, AppError, View};

/// Route gate. Must run after `auth_middleware`.
pub async fn require_view(
    State(views): State<&'static [View]>,
    request: Request,
    next: Next,
) -> Response {
    let Some(session) = request.extensions().get::<Session>() else {
        return HttpAppError(AppError::Unauthorized(
            "Missing authorization header".to_string(),
        ))
        .into_response();
    };

    if !authorize_any(session.role, views) {
        tracing::info!(
            account_id = session.account_id,
            role = %session.role,
            path = %request.uri().path(),
            method = %request.method(),
            "Access denied by view policy"
        );
        return HttpAppError(AppError::Forbidden(ACCESS_DENIED_MESSAGE.to_string()))
            .into_response();
    }

    next.run(request).await
}
