use doacore_core::{
    models::{Account, AccountCredentials, AccountFields, TeamSummary},
    AppError,
};
use sqlx::{PgPool, Postgres};

use super::constraint::ConstraintMessages;

const EMAIL_TAKEN: &str = "Email já cadastrado";

const ACCOUNT_WRITE: ConstraintMessages<'static> = ConstraintMessages {
    unique: Some(EMAIL_TAKEN),
    missing_reference: Some("Função inexistente"),
    still_referenced: None,
};

const ACCOUNT_DELETE: ConstraintMessages<'static> = ConstraintMessages {
    unique: None,
    missing_reference: None,
    still_referenced: Some(
        "Usuário possui doações, equipes ou eventos vinculados e não pode ser excluído",
    ),
};

/// Repository for the `users` table
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List accounts with their role name, newest first
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<Postgres, Account>(
            r#"
            SELECT u.id, u.nome, u.sobrenome, u.email, u.funcao_id, f.nome_funcao
            FROM users u
            JOIN funcoes f ON f.id = u.funcao_id
            ORDER BY u.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = id))]
    pub async fn get(&self, id: i32) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<Postgres, Account>(
            r#"
            SELECT u.id, u.nome, u.sobrenome, u.email, u.funcao_id, f.nome_funcao
            FROM users u
            JOIN funcoes f ON f.id = u.funcao_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Create an account. `account.senha_hash` must be set.
    #[tracing::instrument(skip(self, account), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create(&self, account: &AccountFields) -> Result<Account, AppError> {
        let senha_hash = account
            .senha_hash
            .as_deref()
            .ok_or_else(|| AppError::Internal("Account created without a secret".to_string()))?;

        let created = sqlx::query_as::<Postgres, Account>(
            r#"
            WITH inserted AS (
                INSERT INTO users (nome, sobrenome, email, senha, funcao_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, nome, sobrenome, email, funcao_id
            )
            SELECT i.id, i.nome, i.sobrenome, i.email, i.funcao_id, f.nome_funcao
            FROM inserted i
            JOIN funcoes f ON f.id = i.funcao_id
            "#,
        )
        .bind(&account.nome)
        .bind(&account.sobrenome)
        .bind(&account.email)
        .bind(senha_hash)
        .bind(account.funcao_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ACCOUNT_WRITE.map(e))?;

        Ok(created)
    }

    /// Update an account. The stored secret is kept when `account.senha_hash` is `None`.
    #[tracing::instrument(skip(self, account), fields(db.table = "users", db.operation = "update", db.record_id = id))]
    pub async fn update(&self, id: i32, account: &AccountFields) -> Result<Option<Account>, AppError> {
        let updated = sqlx::query_as::<Postgres, Account>(
            r#"
            WITH updated AS (
                UPDATE users
                SET nome = $2, sobrenome = $3, email = $4,
                    senha = COALESCE($5, senha), funcao_id = $6
                WHERE id = $1
                RETURNING id, nome, sobrenome, email, funcao_id
            )
            SELECT u.id, u.nome, u.sobrenome, u.email, u.funcao_id, f.nome_funcao
            FROM updated u
            JOIN funcoes f ON f.id = u.funcao_id
            "#,
        )
        .bind(id)
        .bind(&account.nome)
        .bind(&account.sobrenome)
        .bind(&account.email)
        .bind(account.senha_hash.as_deref())
        .bind(account.funcao_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ACCOUNT_WRITE.map(e))?;

        Ok(updated)
    }

    /// Delete an account; returns whether a row was removed
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "delete", db.record_id = id))]
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ACCOUNT_DELETE.map(e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Look up the credential row for an exact email match
    #[tracing::instrument(skip(self, email), fields(db.table = "users", db.operation = "select"))]
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountCredentials>, AppError> {
        let credentials = sqlx::query_as::<Postgres, AccountCredentials>(
            r#"
            SELECT u.id, u.nome, u.sobrenome, u.email, u.senha, u.funcao_id, f.nome_funcao
            FROM users u
            JOIN funcoes f ON f.id = u.funcao_id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    /// Teams the account is a member of
    #[tracing::instrument(skip(self), fields(db.table = "usuarios_equipes", db.operation = "select", db.record_id = account_id))]
    pub async fn teams_for_account(&self, account_id: i32) -> Result<Vec<TeamSummary>, AppError> {
        let teams = sqlx::query_as::<Postgres, TeamSummary>(
            r#"
            SELECT e.id_equipe, e.nome_equipe, e.descricao
            FROM usuarios_equipes ue
            JOIN equipes e ON e.id_equipe = ue.id_equipe
            WHERE ue.id_usuario = $1
            ORDER BY e.nome_equipe
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }
}
