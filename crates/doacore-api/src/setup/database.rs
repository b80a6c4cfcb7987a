//! PostgreSQL pool and schema

use anyhow::{Context, Result};
use doacore_core::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Connect the pool and bring the schema up to date
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = connect_pool(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    tracing::info!(
        max_connections = config.db_max_connections,
        acquire_timeout_secs = config.db_timeout_seconds,
        "Connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    Ok(pool)
}

/// Apply the migrations embedded in `doacore-db`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrator = &doacore_db::MIGRATOR;
    migrator
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(known = migrator.iter().count(), "Database schema up to date");
    Ok(())
}
