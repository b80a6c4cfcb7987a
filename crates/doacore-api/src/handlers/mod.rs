pub mod access;
pub mod donations;
pub mod events;
pub mod login;
pub mod roles;
pub mod root;
pub mod teams;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement body for mutations
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
