pub mod request_id;
pub mod require_view;
pub mod security_headers;
pub mod timeout;

pub use request_id::{request_id_middleware, RequestId};
pub use require_view::require_view;
pub use security_headers::security_headers_middleware;
pub use timeout::handle_timeout_error;
