//! Database transaction utilities
//!
//! Multi-statement writes (a donation and its line items) go through
//! [`TransactionGuard`] so that either every statement commits or none does.

use doacore_core::AppError;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

/// A database transaction wrapper with explicit commit/rollback
///
/// # Example
///
/// ```ignore
/// use doacore_db::db::transaction::TransactionGuard;
///
/// async fn example(pool: &sqlx::PgPool) -> Result<(), doacore_core::AppError> {
///     let mut tx = TransactionGuard::begin(pool, "example").await?;
///     sqlx::query("INSERT INTO ...").execute(tx.connection()?).await?;
///     tx.commit().await
/// }
/// ```
pub struct TransactionGuard<'a> {
    transaction: Option<Transaction<'a, Postgres>>,
    operation: &'static str,
}

impl<'a> TransactionGuard<'a> {
    /// Begin a new database transaction
    pub async fn begin(pool: &'a PgPool, operation: &'static str) -> Result<Self, AppError> {
        let transaction = pool.begin().await?;
        tracing::debug!(operation, "Transaction started");

        Ok(Self {
            transaction: Some(transaction),
            operation,
        })
    }

    /// Connection the statements of this transaction run on
    pub fn connection(&mut self) -> Result<&mut PgConnection, AppError> {
        self.transaction
            .as_mut()
            .map(|tx| &mut **tx)
            .ok_or_else(|| AppError::Internal("Transaction already finished".to_string()))
    }

    /// Commit the transaction
    pub async fn commit(mut self) -> Result<(), AppError> {
        if let Some(tx) = self.transaction.take() {
            tx.commit().await?;
            tracing::debug!(operation = self.operation, "Transaction committed");
        }
        Ok(())
    }

    /// Rollback the transaction
    pub async fn rollback(mut self) -> Result<(), AppError> {
        if let Some(tx) = self.transaction.take() {
            tx.rollback().await?;
            tracing::debug!(operation = self.operation, "Transaction rolled back");
        }
        Ok(())
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        // sqlx queues a rollback when an open transaction is dropped
        if self.transaction.is_some() {
            tracing::warn!(
                operation = self.operation,
                "Transaction was dropped without explicit commit or rollback - rolling back"
            );
        }
    }
}
