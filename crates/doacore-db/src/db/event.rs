use doacore_core::{
    models::{Event, EventListing, NewEvent},
    AppError,
};
use sqlx::{PgPool, Postgres};

use super::constraint::ConstraintMessages;

const EVENT_INSERT: ConstraintMessages<'static> = ConstraintMessages {
    unique: None,
    missing_reference: Some("Organizador do evento inexistente"),
    still_referenced: None,
};

const EVENT_DELETE: ConstraintMessages<'static> = ConstraintMessages {
    unique: None,
    missing_reference: None,
    still_referenced: Some("Evento possui doações registradas e não pode ser excluído"),
};

/// Repository for the `eventos` table
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List events with the organizer's full name, latest start first
    #[tracing::instrument(skip(self), fields(db.table = "eventos", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<EventListing>, AppError> {
        let events = sqlx::query_as::<Postgres, EventListing>(
            r#"
            SELECT e.id_evento, e.nome_evento, e.descricao, e.data_inicio, e.data_fim, e.local,
                   u.nome || ' ' || u.sobrenome AS organizador
            FROM eventos e
            JOIN users u ON u.id = e.id_organizador
            ORDER BY e.data_inicio DESC, e.id_evento DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    #[tracing::instrument(skip(self, event), fields(db.table = "eventos", db.operation = "insert"))]
    pub async fn create(&self, event: &NewEvent) -> Result<Event, AppError> {
        let created = sqlx::query_as::<Postgres, Event>(
            r#"
            INSERT INTO eventos (nome_evento, descricao, data_inicio, data_fim, local, id_organizador)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id_evento, nome_evento, descricao, data_inicio, data_fim, local, id_organizador
            "#,
        )
        .bind(&event.nome_evento)
        .bind(event.descricao.as_deref())
        .bind(event.data_inicio)
        .bind(event.data_fim)
        .bind(event.local.as_deref())
        .bind(event.id_organizador)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| EVENT_INSERT.map(e))?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "eventos", db.operation = "delete", db.record_id = id))]
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM eventos WHERE id_evento = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| EVENT_DELETE.map(e))?;

        Ok(result.rows_affected() > 0)
    }
}
