//! Authentication route handlers
//!
//! Login, token refresh and the two logout flavours. Logout routes rely on
//! the `JwtAuth` middleware having attached an `AuthContext`.

pub mod login;
pub mod logout;
pub mod logout_device;
pub mod refresh;

use actix_web::web;

pub use login::login;
pub use logout::logout;
pub use logout_device::logout_device;
pub use refresh::refresh;

/// Paths under `/api/v1/auth`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/refresh", web::post().to(refresh))
        .route("/logout", web::post().to(logout))
        .route("/logout-device", web::post().to(logout_device));
}
