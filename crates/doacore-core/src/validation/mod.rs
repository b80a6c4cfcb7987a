//! Submission validation shared by the write paths.

pub mod donation;
pub mod lenient;

pub use donation::validate_donation;

use crate::error::AppError;

/// Fail with [`AppError::MissingField`] naming every absent field, in order.
///
/// Each entry pairs a field name with whether a value was supplied.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingField(missing.join(", ")))
    }
}
