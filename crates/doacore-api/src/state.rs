//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers and middleware can extract
//! only what they need via Axum's `FromRef`.

use crate::auth::jwt::TokenIssuer;
use doacore_core::Config;
use doacore_db::{
    AccountRepository, DonationRepository, EventRepository, RoleRepository, TeamRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

// ----- Sub-state types -----

/// Database pool and one repository per entity.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub account_repository: AccountRepository,
    pub role_repository: RoleRepository,
    pub team_repository: TeamRepository,
    pub event_repository: EventRepository,
    pub donation_repository: DonationRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            account_repository: AccountRepository::new(pool.clone()),
            role_repository: RoleRepository::new(pool.clone()),
            team_repository: TeamRepository::new(pool.clone()),
            event_repository: EventRepository::new(pool.clone()),
            donation_repository: DonationRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Session token issuing and validation.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenIssuer,
}

impl AuthState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            tokens: TokenIssuer::new(&config.jwt_secret, config.jwt_expiry_hours),
        }
    }
}

/// Security configuration (CORS, response headers).
#[derive(Clone)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub is_production: bool,
}

impl SecurityConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cors_origins: config.cors_origins.clone(),
            is_production: config.is_production(),
        }
    }
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub auth: AuthState,
    pub security: SecurityConfig,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self {
            db: DbState::new(pool),
            auth: AuthState::from_config(&config),
            security: SecurityConfig::from_config(&config),
            config,
        }
    }
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for AuthState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for SecurityConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.security.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
