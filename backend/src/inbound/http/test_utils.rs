//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use crate::domain::ports::{DEMO_PASSWORD, demo_accounts};
use crate::domain::{FoodListingService, FoodRequestService, UserDirectoryService};
use crate::outbound::memory::{
    InMemoryFoodListingRepository, InMemoryFoodRequestRepository, InMemoryUserRepository,
};

use super::state::{HttpState, HttpStatePorts};
use super::validation::json_config;

pub const DONOR_EMAIL: &str = "donor@foodshare.test";
pub const NGO_EMAIL: &str = "ngo@foodshare.test";
pub const ADMIN_EMAIL: &str = "admin@foodshare.test";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over empty in-memory stores with the demo accounts seeded.
pub async fn memory_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::default());
    let listings = Arc::new(InMemoryFoodListingRepository::default());
    let requests = Arc::new(InMemoryFoodRequestRepository::default());
    let clock = Arc::new(DefaultClock);

    let directory = Arc::new(UserDirectoryService::new(users.clone()));
    directory
        .seed(&demo_accounts().expect("demo accounts"))
        .await
        .expect("seed demo accounts");

    let listing_service = Arc::new(FoodListingService::new(
        listings.clone(),
        users.clone(),
        clock.clone(),
    ));
    let request_service = Arc::new(FoodRequestService::new(requests, listings, users, clock));

    HttpState::new(HttpStatePorts {
        login: directory.clone(),
        registration: directory.clone(),
        current_user: directory,
        listings: listing_service.clone(),
        listings_query: listing_service,
        requests: request_service.clone(),
        requests_query: request_service,
    })
}

/// Application with every `/api/v1` route mounted over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(super::configure))
}

/// Log in as `email` with the shared password and return the session cookie.
pub async fn login_cookie<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": email, "password": DEMO_PASSWORD}))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login as {email} failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// Read a response body as JSON.
pub async fn read_json(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}
