#![allow(dead_code)]

pub mod auth;
pub mod fixtures;

use axum_test::TestServer;
use doacore_api::setup::database::run_migrations;
use doacore_api::setup::routes::setup_routes;
use doacore_api::state::AppState;
use doacore_core::Config;
use sqlx::postgres::PgPoolOptions;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

/// Secret shared by the test app and tokens minted in tests
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-that-is-at-least-32-characters";

/// Test application state
pub struct TestApp {
    pub server: TestServer,
    pub pool: sqlx::PgPool,
    pub state: Arc<AppState>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Get the database pool
    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

/// Setup a test application with an isolated database
pub async fn setup_test_app() -> TestApp {
    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container
        .get_host()
        .await
        .expect("Failed to resolve container host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to resolve container port");
    let connection_string = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&connection_string)
        .await
        .expect("Failed to connect to test database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let config = create_test_config(&connection_string);
    let state = Arc::new(AppState::new(config.clone(), pool.clone()));
    let router = setup_routes(&config, state.clone()).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        state,
        _container: container,
    }
}

/// Create a test configuration
pub fn create_test_config(database_url: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", database_url.to_string()),
        ("JWT_SECRET", TEST_JWT_SECRET.to_string()),
        ("ENVIRONMENT", "test".to_string()),
        ("CORS_ORIGINS", "*".to_string()),
    ]);

    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}
