//! Startup configuration checks
//!
//! `Config::validate` already rejects values that cannot work. This pass
//! repeats the security-relevant checks next to the warnings that only make
//! sense once tracing is up.

use anyhow::Result;
use doacore_core::Config;

const LONG_SESSION_HOURS: i64 = 24 * 7;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let env_var = std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .ok();
    if config.is_production() && env_var.is_none() {
        tracing::warn!(
            "Production mode configured but ENVIRONMENT/APP_ENV not exported - error details may leak"
        );
    }

    if !config.is_production() && config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows all origins; set CORS_ORIGINS before deploying");
    }

    if config.jwt_expiry_hours > LONG_SESSION_HOURS {
        tracing::warn!(
            jwt_expiry_hours = config.jwt_expiry_hours,
            "Session tokens live longer than a week"
        );
    }

    if config.db_max_connections as usize > config.http_concurrency_limit {
        tracing::warn!(
            db_max_connections = config.db_max_connections,
            http_concurrency_limit = config.http_concurrency_limit,
            "Pool is larger than the request concurrency limit; extra connections stay idle"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
