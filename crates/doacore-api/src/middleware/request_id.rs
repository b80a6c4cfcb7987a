use axum::http::{HeaderName, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 128;

/// Request ID extension type
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Accept an upstream request ID only when it is short printable ASCII.
fn inbound_request_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id.chars().all(|c| c.is_ascii_graphic())
        })
        .map(str::to_string)
}

/// Propagate the caller's X-Request-ID or generate one, then echo it on the response.
/// The ID is stored in request extensions so the trace span can carry it.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = inbound_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
