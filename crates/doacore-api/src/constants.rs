//! API constants

/// API base path prefix
pub const API_BASE: &str = "/api";

/// Upper bound for JSON request bodies
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Message returned when a session's role cannot open a route
pub const ACCESS_DENIED_MESSAGE: &str = "Acesso negado";

/// Build a path under [`API_BASE`], e.g. `api_path("/doacoes")` is `/api/doacoes`.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}
