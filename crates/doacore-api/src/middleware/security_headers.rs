use crate::state::SecurityConfig;
use axum::http::{header, HeaderName, HeaderValue};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Sent on every response
const BASELINE: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

/// API bodies are JSON carrying profiles and tokens. The docs viewer loads
/// its own scripts and is left out.
const API_ONLY: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    ("cache-control", "no-store, private"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";
const DOCS_PATH: &str = "/docs";

/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(config): State<SecurityConfig>,
    request: Request,
    next: Next,
) -> Response {
    let is_docs = request.uri().path().starts_with(DOCS_PATH);
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    let api_only: &'static [(&str, &str)] = if is_docs { &[] } else { API_ONLY };
    for &(name, value) in BASELINE.iter().chain(api_only) {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    // Production runs behind TLS
    if config.is_production {
        headers.insert(header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
    }

    response
}
