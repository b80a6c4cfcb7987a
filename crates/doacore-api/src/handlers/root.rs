use axum::Json;

use super::MessageResponse;

/// API banner
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "API is up", body = MessageResponse)
    ),
    tag = "health"
)]
pub async fn api_root() -> Json<MessageResponse> {
    Json(MessageResponse::new("API is running"))
}
