//! First administrator
//!
//! A fresh database has roles but no accounts, and only an Administrator may
//! create accounts. When `ADMIN_EMAIL`/`ADMIN_PASSWORD` are configured the
//! account is created at startup unless that email already exists.

use crate::auth::password::hash_password;
use crate::state::DbState;
use doacore_core::models::AccountFields;
use doacore_core::{AppError, BootstrapAdmin, Role};

const ADMIN_GIVEN_NAME: &str = "Administrador";
const ADMIN_FAMILY_NAME: &str = "DoaCore";

pub async fn ensure_admin(db: &DbState, admin: &BootstrapAdmin) -> Result<(), AppError> {
    if db
        .account_repository
        .find_credentials_by_email(&admin.email)
        .await?
        .is_some()
    {
        tracing::debug!(email = %admin.email, "Bootstrap administrator already present");
        return Ok(());
    }

    let role = db
        .role_repository
        .list()
        .await?
        .into_iter()
        .find(|role| role.nome_funcao == Role::Administrator.as_str())
        .ok_or_else(|| AppError::Internal("Administrator role is not seeded".to_string()))?;

    let fields = AccountFields {
        nome: ADMIN_GIVEN_NAME.to_string(),
        sobrenome: ADMIN_FAMILY_NAME.to_string(),
        email: admin.email.clone(),
        senha_hash: Some(hash_password(&admin.password)?),
        funcao_id: role.id,
    };

    match db.account_repository.create(&fields).await {
        Ok(account) => {
            tracing::info!(account_id = account.id, email = %account.email, "Bootstrap administrator created");
            Ok(())
        }
        // Another instance won the race
        Err(AppError::Conflict(_)) => Ok(()),
        Err(err) => Err(err),
    }
}
