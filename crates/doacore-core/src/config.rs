//! Configuration module
//!
//! Settings are read from the environment (a `.env` file is honoured through
//! `dotenvy`) and validated once at startup so misconfiguration fails fast.

use std::env;

const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 12;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MIN_JWT_SECRET_LEN: usize = 32;
const MIN_ADMIN_PASSWORD_LEN: usize = 8;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub request_timeout_secs: u64,
    pub http_concurrency_limit: usize,
    pub environment: String,
    /// Administrator account created at startup when no account has this email
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials of the first administrator
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let bootstrap_admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            _ => {
                return Err(anyhow::anyhow!(
                    "ADMIN_EMAIL and ADMIN_PASSWORD must be set together"
                ))
            }
        };

        let config = Config {
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            server_port: match lookup("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: lookup("JWT_EXPIRY_HOURS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(JWT_EXPIRY_HOURS),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            http_concurrency_limit: lookup("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            environment,
            bootstrap_admin,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if !(self.database_url.starts_with("postgres://")
            || self.database_url.starts_with("postgresql://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS cannot be 0"));
        }

        if self.db_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS cannot be 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS cannot be 0"));
        }

        if let Some(admin) = &self.bootstrap_admin {
            if !admin.email.contains('@') {
                return Err(anyhow::anyhow!("ADMIN_EMAIL must be an email address"));
            }
            if admin.password.len() < MIN_ADMIN_PASSWORD_LEN {
                return Err(anyhow::anyhow!(
                    "ADMIN_PASSWORD must be at least {} characters long",
                    MIN_ADMIN_PASSWORD_LEN
                ));
            }
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "an-adequately-long-secret-for-signing-tokens";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/doacore"),
            ("JWT_SECRET", SECRET),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 4000);
        assert_eq!(config.jwt_expiry_hours, 12);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.is_production());
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_bootstrap_admin_needs_both_values() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/doacore"),
            ("JWT_SECRET", SECRET),
            ("ADMIN_EMAIL", "admin@doacore.org"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("ADMIN_PASSWORD"));

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/doacore"),
            ("JWT_SECRET", SECRET),
            ("ADMIN_EMAIL", "admin@doacore.org"),
            ("ADMIN_PASSWORD", "troque-esta-senha"),
        ]))
        .unwrap();
        let admin = config.bootstrap_admin.unwrap();
        assert_eq!(admin.email, "admin@doacore.org");
        assert!(!format!("{:?}", admin).contains("troque"));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/doacore"),
            ("JWT_SECRET", "short"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_missing_database_url_rejected() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", SECRET)])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/doacore"),
            ("JWT_SECRET", SECRET),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/doacore"),
            ("JWT_SECRET", SECRET),
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://doacore.org, https://admin.doacore.org"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.cors_origins.len(), 2);
    }
}
