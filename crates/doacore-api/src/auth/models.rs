use crate::error::HttpAppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use doacore_core::{AppError, Role};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i32, // account id
    pub email: String,
    pub role: Role,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Signed-in account, decoded from the bearer token and stored in request extensions
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: i32,
    pub email: String,
    pub role: Role,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Session {
            account_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| HttpAppError(AppError::Unauthorized("Sessão ausente".to_string())))
    }
}
