//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

mod auth;
pub mod error;
pub mod health;
pub mod listings;
pub mod requests;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every session-protected endpoint on `cfg`.
///
/// Mount under `/api/v1` behind the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use foodshare::inbound::http::configure;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(listings::create_listing)
        .service(listings::list_available)
        .service(listings::claim_listing)
        .service(requests::create_request)
        .service(requests::list_requests)
        .service(requests::review_request);
}
