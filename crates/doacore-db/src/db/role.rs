use doacore_core::{models::RoleRecord, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for the `funcoes` table
#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "funcoes", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<RoleRecord>, AppError> {
        let roles = sqlx::query_as::<Postgres, RoleRecord>(
            "SELECT id, nome_funcao FROM funcoes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    #[tracing::instrument(skip(self), fields(db.table = "funcoes", db.operation = "select", db.record_id = id))]
    pub async fn find(&self, id: i32) -> Result<Option<RoleRecord>, AppError> {
        let role = sqlx::query_as::<Postgres, RoleRecord>(
            "SELECT id, nome_funcao FROM funcoes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }
}
