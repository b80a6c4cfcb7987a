//! Route configuration and setup.
//!
//! Public routes need no session. Protected routes run `auth_middleware`
//! first; mutating groups then add a `require_view` gate naming the views
//! they belong to. Health checks live in [health](health).

mod health;

use crate::auth::middleware::auth_middleware;
use crate::constants::{api_path, MAX_REQUEST_BODY_BYTES};
use crate::handlers;
use crate::middleware::{
    handle_timeout_error, request_id_middleware, require_view, security_headers_middleware,
    RequestId,
};
use crate::state::AppState;
use anyhow::Context;
use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, Request},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Json, Router,
};
use doacore_core::{Config, View};
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Account list feeds both the Users screen and team member pickers
const ACCOUNT_READERS: &[View] = &[View::Users, View::Teams];
const ACCOUNT_MANAGERS: &[View] = &[View::Users];
const TEAM_MANAGERS: &[View] = &[View::Teams];
const EVENT_MANAGERS: &[View] = &[View::Events];

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let protected_routes =
        protected_routes().route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let app_state_routes = public_routes().merge(protected_routes);

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let http_concurrency_limit = config.http_concurrency_limit.max(1);
    tracing::info!(
        http_concurrency_limit,
        request_timeout_secs = config.request_timeout_secs,
        "HTTP concurrency limit and request timeout layers enabled"
    );

    let app = app_state_routes
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                ))),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(trace_layer)
        .layer(from_fn(request_id_middleware))
        .layer(from_fn_with_state(
            state.security.clone(),
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("CORS_ORIGINS contains an invalid origin")?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .route(&api_path(""), get(handlers::root::api_root))
        .route(&api_path("/login"), post(handlers::login::login))
        .route(&api_path("/acesso"), get(handlers::access::check_access))
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&api_path("/funcoes"), get(handlers::roles::list_roles))
        // Accounts
        .route(
            &api_path("/users"),
            get(handlers::users::list_users)
                .route_layer(from_fn_with_state(ACCOUNT_READERS, require_view))
                .merge(
                    post(handlers::users::create_user)
                        .route_layer(from_fn_with_state(ACCOUNT_MANAGERS, require_view)),
                ),
        )
        .route(
            &api_path("/users/{id}"),
            put(handlers::users::update_user)
                .delete(handlers::users::delete_user)
                .route_layer(from_fn_with_state(ACCOUNT_MANAGERS, require_view)),
        )
        // Teams
        .route(
            &api_path("/equipes"),
            get(handlers::teams::list_teams).merge(
                post(handlers::teams::create_team)
                    .route_layer(from_fn_with_state(TEAM_MANAGERS, require_view)),
            ),
        )
        .route(
            &api_path("/equipes/{id}"),
            delete(handlers::teams::delete_team)
                .route_layer(from_fn_with_state(TEAM_MANAGERS, require_view)),
        )
        .route(
            &api_path("/equipes/{id}/membros"),
            get(handlers::teams::list_members)
                .post(handlers::teams::add_member)
                .route_layer(from_fn_with_state(TEAM_MANAGERS, require_view)),
        )
        .route(
            &api_path("/equipes/{id}/membros/{id_usuario}"),
            delete(handlers::teams::remove_member)
                .route_layer(from_fn_with_state(TEAM_MANAGERS, require_view)),
        )
        // Events
        .route(
            &api_path("/eventos"),
            get(handlers::events::list_events).merge(
                post(handlers::events::create_event)
                    .route_layer(from_fn_with_state(EVENT_MANAGERS, require_view)),
            ),
        )
        .route(
            &api_path("/eventos/{id}"),
            delete(handlers::events::delete_event)
                .route_layer(from_fn_with_state(EVENT_MANAGERS, require_view)),
        )
        // Donations
        .route(
            &api_path("/doacoes"),
            get(handlers::donations::list_donations).post(handlers::donations::create_donation),
        )
        .route(
            &api_path("/doacoes/resumo"),
            get(handlers::donations::donation_summary),
        )
        .route(
            &api_path("/doacoes/{id}"),
            get(handlers::donations::get_donation).merge(
                delete(handlers::donations::delete_donation)
                    .route_layer(from_fn_with_state(EVENT_MANAGERS, require_view)),
            ),
        )
        .route(
            &api_path("/doacoes/{id}/itens"),
            get(handlers::donations::list_donation_items),
        )
}
