//! HS256 session tokens.

use crate::auth::models::{Session, SessionClaims};
use chrono::{DateTime, Duration, Utc};
use doacore_core::{AppError, Role};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// A freshly signed token and the instant it stops being accepted
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and validates session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self::with_lifetime(secret, Duration::hours(expiry_hours))
    }

    pub fn with_lifetime(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn issue(&self, account_id: i32, email: &str, role: Role) -> Result<IssuedToken, AppError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.lifetime;

        let claims = SessionClaims {
            sub: account_id,
            email: email.to_string(),
            role,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return the session it carries
    pub fn validate(&self, token: &str) -> Result<Session, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Sessão expirada".to_string())
                    }
                    _ => AppError::Unauthorized("Token inválido".to_string()),
                }
            })?;

        Ok(token_data.claims.into())
    }
}
