//! Account secret hashing with argon2.

use doacore_core::AppError;
use std::sync::OnceLock;

/// Hash a secret for storage as a PHC string
pub fn hash_password(password: &str) -> Result<String, AppError> {
    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Argon2,
    };

    use rand_core::OsRng;
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a secret against a stored hash. Comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    use argon2::{
        password_hash::{PasswordHash, PasswordVerifier},
        Argon2,
    };

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Run a verification that always fails, so a login for an unknown email
/// costs as much as one with a wrong secret.
pub fn verify_against_dummy(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| hash_password("doacore-unknown-account").ok());

    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
}
