//! Error types module
//!
//! All failures surfaced by the service are unified under [`AppError`]. Each
//! variant describes how it is presented to clients through the
//! [`ErrorMetadata`] trait: the HTTP status, the client-facing message, whether
//! internal details must stay hidden, and the level at which it is logged.
//!
//! `From<sqlx::Error>` is gated behind the `sqlx` feature.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Message returned to clients when a storage failure has no more specific
/// per-operation message attached.
pub const GENERIC_FAILURE_MESSAGE: &str = "Erro no servidor";

/// Message returned for every failed credential check.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Usuário ou senha incorretos";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors caused by client input
    Debug,
    /// Recoverable issues worth noticing
    Warn,
    /// Unexpected failures
    Error,
}

/// Defines how an error is presented over HTTP
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code, used in logs only
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required field(s): {0}")]
    MissingField(String),

    #[error("Invalid donation kind: {0}")]
    InvalidKind(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Storage failure: {message}")]
    StorageFailure {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::StorageFailure {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            source: err.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Dados inválidos: {}", err))
    }
}

/// Attach a per-operation client message to storage failures.
///
/// Handlers use this so a failed insert answers "Erro ao registrar doação"
/// rather than the generic storage message. Other variants pass through.
pub trait StorageResultExt<T> {
    fn or_failure_message(self, message: &str) -> Result<T, AppError>;
}

impl<T> StorageResultExt<T> for Result<T, AppError> {
    fn or_failure_message(self, message: &str) -> Result<T, AppError> {
        self.map_err(|err| match err {
            AppError::StorageFailure { source, .. } => AppError::StorageFailure {
                message: message.to_string(),
                source,
            },
            other => other,
        })
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::MissingField(_) => (400, "MISSING_FIELD", false, LogLevel::Debug),
        AppError::InvalidKind(_) => (400, "INVALID_KIND", false, LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::InvalidCredentials => (401, "INVALID_CREDENTIALS", false, LogLevel::Debug),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", false, LogLevel::Debug),
        AppError::Forbidden(_) => (403, "FORBIDDEN", false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::Conflict(_) => (409, "CONFLICT", false, LogLevel::Debug),
        AppError::Timeout(_) => (408, "TIMEOUT", false, LogLevel::Warn),
        AppError::StorageFailure { .. } => (500, "STORAGE_FAILURE", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::MissingField(_) => "MissingField",
            AppError::InvalidKind(_) => "InvalidKind",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "NotFound",
            AppError::Conflict(_) => "Conflict",
            AppError::Timeout(_) => "Timeout",
            AppError::StorageFailure { .. } => "StorageFailure",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingField(fields) => {
                format!("Campos obrigatórios ausentes: {}", fields)
            }
            AppError::InvalidKind(kind) => format!("Tipo de doação inválido: {}", kind),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Forbidden(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Conflict(ref msg) => msg.clone(),
            AppError::Timeout(ref msg) => msg.clone(),
            AppError::StorageFailure { ref message, .. } => message.clone(),
            AppError::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            AppError::InternalWithSource { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_storage_failure() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::StorageFailure {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            source: anyhow::anyhow!("pool closed"),
        };
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_FAILURE");
        assert_eq!(err.client_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_failure_message_replaces_storage_message_only() {
        let failed: Result<(), AppError> = Err(AppError::StorageFailure {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            source: anyhow::anyhow!("connection reset"),
        });
        let err = failed
            .or_failure_message("Erro ao registrar doação")
            .unwrap_err();
        assert_eq!(err.client_message(), "Erro ao registrar doação");
        assert!(err.detailed_message().contains("connection reset"));

        let missing: Result<(), AppError> = Err(AppError::MissingField("valor".to_string()));
        let err = missing.or_failure_message("ignored").unwrap_err();
        assert!(matches!(err, AppError::MissingField(_)));
    }

    #[test]
    fn test_invalid_credentials_message_is_fixed() {
        let err = AppError::InvalidCredentials;
        assert_eq!(err.http_status_code(), 401);
        assert_eq!(err.client_message(), "Usuário ou senha incorretos");
        assert!(!err.is_sensitive());
    }

    #[test]
    fn test_missing_field_names_the_omission() {
        let err = AppError::MissingField("id_evento, tipo_doacao".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(
            err.client_message(),
            "Campos obrigatórios ausentes: id_evento, tipo_doacao"
        );
    }

    #[test]
    fn test_client_status_codes() {
        assert_eq!(AppError::InvalidKind("x".into()).http_status_code(), 400);
        assert_eq!(AppError::Forbidden("x".into()).http_status_code(), 403);
        assert_eq!(AppError::NotFound("x".into()).http_status_code(), 404);
        assert_eq!(AppError::Conflict("x".into()).http_status_code(), 409);
        assert_eq!(AppError::Timeout("x".into()).http_status_code(), 408);
        assert_eq!(AppError::Internal("x".into()).client_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_timeout_is_logged_as_warning_with_its_message() {
        let err = AppError::Timeout("A requisição excedeu o tempo limite".to_string());
        assert_eq!(err.error_code(), "TIMEOUT");
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert!(!err.is_sensitive());
        assert_eq!(err.client_message(), "A requisição excedeu o tempo limite");
    }
}
