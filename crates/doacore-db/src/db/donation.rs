use doacore_core::{
    models::{Donation, DonationListing, DonationSummary, KindCount, LineItem, NewDonation},
    AppError,
};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres};

use super::constraint::ConstraintMessages;
use super::transaction::TransactionGuard;

const DONATION_INSERT: ConstraintMessages<'static> = ConstraintMessages {
    unique: None,
    missing_reference: Some("Usuário, evento ou equipe inexistente"),
    still_referenced: None,
};

const LISTING_COLUMNS: &str = r#"
    SELECT d.id_doacao, d.id_usuario, d.id_evento, d.id_equipe, d.tipo_doacao, d.valor,
           d.data_doacao, d.observacoes,
           u.nome || ' ' || u.sobrenome AS usuario,
           e.nome_evento,
           eq.nome_equipe
    FROM doacoes d
    JOIN users u ON u.id = d.id_usuario
    JOIN eventos e ON e.id_evento = d.id_evento
    LEFT JOIN equipes eq ON eq.id_equipe = d.id_equipe
"#;

/// Repository for donations and their line items
#[derive(Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Write a donation and all of its line items atomically.
    ///
    /// The parent row is inserted first; its generated id binds every item.
    /// Any failure rolls the whole submission back.
    #[tracing::instrument(
        skip(self, donation),
        fields(
            db.table = "doacoes",
            db.operation = "insert",
            donation.kind = %donation.kind,
            donation.items = donation.itens.len()
        )
    )]
    pub async fn submit(&self, donation: &NewDonation) -> Result<Donation, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool, "submit_donation").await?;

        match insert_aggregate(tx.connection()?, donation).await {
            Ok(record) => {
                tx.commit().await?;
                Ok(record)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Failed to roll back donation submission");
                }
                Err(err)
            }
        }
    }

    /// List donations with donor, event and team names, newest first
    #[tracing::instrument(skip(self), fields(db.table = "doacoes", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<DonationListing>, AppError> {
        let query = format!("{} ORDER BY d.data_doacao DESC, d.id_doacao DESC", LISTING_COLUMNS);
        let donations = sqlx::query_as::<Postgres, DonationListing>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(donations)
    }

    #[tracing::instrument(skip(self), fields(db.table = "doacoes", db.operation = "select", db.record_id = id))]
    pub async fn get(&self, id: i32) -> Result<Option<DonationListing>, AppError> {
        let query = format!("{} WHERE d.id_doacao = $1", LISTING_COLUMNS);
        let donation = sqlx::query_as::<Postgres, DonationListing>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(donation)
    }

    #[tracing::instrument(skip(self), fields(db.table = "doacoes", db.operation = "select", db.record_id = id))]
    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM doacoes WHERE id_doacao = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Line items of one donation, in insertion order
    #[tracing::instrument(skip(self), fields(db.table = "itens_doacao", db.operation = "select", db.record_id = donation_id))]
    pub async fn items(&self, donation_id: i32) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<Postgres, LineItem>(
            r#"
            SELECT id_item, id_doacao, nome_item, quantidade, unidade
            FROM itens_doacao
            WHERE id_doacao = $1
            ORDER BY id_item
            "#,
        )
        .bind(donation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Totals recomputed over every donation
    #[tracing::instrument(skip(self), fields(db.table = "doacoes", db.operation = "select"))]
    pub async fn summary(&self) -> Result<DonationSummary, AppError> {
        let (total_doacoes, total_valor) = sqlx::query_as::<Postgres, (i64, Decimal)>(
            "SELECT COUNT(*), COALESCE(SUM(valor), 0) FROM doacoes",
        )
        .fetch_one(&self.pool)
        .await?;

        let por_tipo = sqlx::query_as::<Postgres, KindCount>(
            r#"
            SELECT tipo_doacao, COUNT(*) AS quantidade
            FROM doacoes
            GROUP BY tipo_doacao
            ORDER BY tipo_doacao
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(DonationSummary {
            total_doacoes,
            total_valor,
            por_tipo,
        })
    }

    /// Delete a donation; its line items cascade
    #[tracing::instrument(skip(self), fields(db.table = "doacoes", db.operation = "delete", db.record_id = id))]
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM doacoes WHERE id_doacao = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_aggregate(
    conn: &mut PgConnection,
    donation: &NewDonation,
) -> Result<Donation, AppError> {
    let record = sqlx::query_as::<Postgres, Donation>(
        r#"
        INSERT INTO doacoes (id_usuario, id_evento, id_equipe, tipo_doacao, valor, observacoes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id_doacao, id_usuario, id_evento, id_equipe, tipo_doacao, valor,
                  observacoes, data_doacao
        "#,
    )
    .bind(donation.id_usuario)
    .bind(donation.id_evento)
    .bind(donation.id_equipe)
    .bind(donation.kind.as_str())
    .bind(donation.valor)
    .bind(donation.observacoes.as_deref())
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DONATION_INSERT.map(e))?;

    if !donation.itens.is_empty() {
        let (names, rest): (Vec<&str>, Vec<(i32, &str)>) = donation
            .itens
            .iter()
            .map(|item| (item.nome_item.as_str(), (item.quantidade, item.unidade.as_str())))
            .unzip();
        let (quantities, units): (Vec<i32>, Vec<&str>) = rest.into_iter().unzip();

        let inserted = sqlx::query(
            r#"
            INSERT INTO itens_doacao (id_doacao, nome_item, quantidade, unidade)
            SELECT $1, item.nome_item, item.quantidade, item.unidade
            FROM UNNEST($2::text[], $3::int4[], $4::text[])
                AS item(nome_item, quantidade, unidade)
            "#,
        )
        .bind(record.id_doacao)
        .bind(&names)
        .bind(&quantities)
        .bind(&units)
        .execute(&mut *conn)
        .await
        .map_err(|e| DONATION_INSERT.map(e))?;

        if inserted.rows_affected() != donation.itens.len() as u64 {
            return Err(AppError::Internal(format!(
                "Expected {} line items, inserted {}",
                donation.itens.len(),
                inserted.rows_affected()
            )));
        }
    }

    Ok(record)
}
