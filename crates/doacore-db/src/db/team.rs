use doacore_core::{
    models::{NewTeam, Team, TeamListing, TeamMember},
    AppError,
};
use sqlx::{PgPool, Postgres};

use super::constraint::ConstraintMessages;

const TEAM_INSERT: ConstraintMessages<'static> = ConstraintMessages {
    unique: None,
    missing_reference: Some("Criador da equipe inexistente"),
    still_referenced: None,
};

const TEAM_DELETE: ConstraintMessages<'static> = ConstraintMessages {
    unique: None,
    missing_reference: None,
    still_referenced: Some("Equipe possui doações registradas e não pode ser excluída"),
};

const MEMBER_INSERT: ConstraintMessages<'static> = ConstraintMessages {
    unique: Some("Usuário já está na equipe"),
    missing_reference: Some("Equipe ou usuário inexistente"),
    still_referenced: None,
};

/// Repository for teams and their memberships
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List teams with the creator's full name, newest first
    #[tracing::instrument(skip(self), fields(db.table = "equipes", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<TeamListing>, AppError> {
        let teams = sqlx::query_as::<Postgres, TeamListing>(
            r#"
            SELECT e.id_equipe, e.nome_equipe, e.descricao, e.data_criacao,
                   u.nome || ' ' || u.sobrenome AS criador
            FROM equipes e
            JOIN users u ON u.id = e.id_criador
            ORDER BY e.data_criacao DESC, e.id_equipe DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    #[tracing::instrument(skip(self, team), fields(db.table = "equipes", db.operation = "insert"))]
    pub async fn create(&self, team: &NewTeam) -> Result<Team, AppError> {
        let created = sqlx::query_as::<Postgres, Team>(
            r#"
            INSERT INTO equipes (nome_equipe, descricao, id_criador)
            VALUES ($1, $2, $3)
            RETURNING id_equipe, nome_equipe, descricao, data_criacao, id_criador
            "#,
        )
        .bind(&team.nome_equipe)
        .bind(team.descricao.as_deref())
        .bind(team.id_criador)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TEAM_INSERT.map(e))?;

        Ok(created)
    }

    /// Delete a team. Memberships go with it; donations block the delete.
    #[tracing::instrument(skip(self), fields(db.table = "equipes", db.operation = "delete", db.record_id = id))]
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM equipes WHERE id_equipe = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| TEAM_DELETE.map(e))?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "equipes", db.operation = "select", db.record_id = id))]
    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM equipes WHERE id_equipe = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self), fields(db.table = "usuarios_equipes", db.operation = "select", db.record_id = team_id))]
    pub async fn list_members(&self, team_id: i32) -> Result<Vec<TeamMember>, AppError> {
        let members = sqlx::query_as::<Postgres, TeamMember>(
            r#"
            SELECT ue.id_usuario, u.nome, u.sobrenome, u.email, ue.funcao_na_equipe
            FROM usuarios_equipes ue
            JOIN users u ON u.id = ue.id_usuario
            WHERE ue.id_equipe = $1
            ORDER BY u.nome, u.sobrenome
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Add an account to a team. A second membership for the same pair is a conflict.
    #[tracing::instrument(skip(self), fields(db.table = "usuarios_equipes", db.operation = "insert", db.record_id = team_id))]
    pub async fn add_member(
        &self,
        team_id: i32,
        account_id: i32,
        funcao_na_equipe: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO usuarios_equipes (id_equipe, id_usuario, funcao_na_equipe)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(team_id)
        .bind(account_id)
        .bind(funcao_na_equipe)
        .execute(&self.pool)
        .await
        .map_err(|e| MEMBER_INSERT.map(e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "usuarios_equipes", db.operation = "delete", db.record_id = team_id))]
    pub async fn remove_member(&self, team_id: i32, account_id: i32) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM usuarios_equipes WHERE id_equipe = $1 AND id_usuario = $2")
                .bind(team_id)
                .bind(account_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
