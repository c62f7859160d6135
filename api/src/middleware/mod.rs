pub mod auth;
pub mod error_handler;

pub use auth::{derive_device_id, AuthContext, JwtAuth, DEVICE_ID_HEADER};
pub use error_handler::{ErrorHandlerMiddleware, RequestId, RequestIdExt, REQUEST_ID_HEADER};
