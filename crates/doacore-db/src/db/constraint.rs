//! Translation of PostgreSQL constraint violations into [`AppError`]s.

use doacore_core::AppError;

/// Messages reported when a write trips a constraint.
///
/// Anything not covered here falls through to a storage failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintMessages<'a> {
    /// Unique violation, answered with 409
    pub unique: Option<&'a str>,
    /// Insert or update referencing a row that does not exist, answered with 400
    pub missing_reference: Option<&'a str>,
    /// Delete of a row other rows still reference, answered with 409
    pub still_referenced: Option<&'a str>,
}

impl ConstraintMessages<'_> {
    pub fn map(&self, err: sqlx::Error) -> AppError {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                if let Some(message) = self.unique {
                    return AppError::Conflict(message.to_string());
                }
            } else if db_err.is_foreign_key_violation() {
                if let Some(message) = self.still_referenced {
                    return AppError::Conflict(message.to_string());
                }
                if let Some(message) = self.missing_reference {
                    return AppError::InvalidInput(message.to_string());
                }
            } else if db_err.is_check_violation() {
                tracing::debug!(
                    constraint = db_err.constraint().unwrap_or_default(),
                    "Check constraint rejected write"
                );
                return AppError::InvalidInput("Dados inválidos".to_string());
            }
        }

        err.into()
    }
}
