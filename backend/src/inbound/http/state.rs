//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CurrentUserQuery, FoodListingCommand, FoodListingQuery, FoodRequestCommand, FoodRequestQuery,
    LoginService, UserRegistration,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub current_user: Arc<dyn CurrentUserQuery>,
    pub listings: Arc<dyn FoodListingCommand>,
    pub listings_query: Arc<dyn FoodListingQuery>,
    pub requests: Arc<dyn FoodRequestCommand>,
    pub requests_query: Arc<dyn FoodRequestQuery>,
}

/// Parameter object used to build [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub current_user: Arc<dyn CurrentUserQuery>,
    pub listings: Arc<dyn FoodListingCommand>,
    pub listings_query: Arc<dyn FoodListingQuery>,
    pub requests: Arc<dyn FoodRequestCommand>,
    pub requests_query: Arc<dyn FoodRequestQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use foodshare::domain::{FoodListingService, FoodRequestService, UserDirectoryService};
    /// use foodshare::inbound::http::state::{HttpState, HttpStatePorts};
    /// use foodshare::outbound::memory::{
    ///     InMemoryFoodListingRepository, InMemoryFoodRequestRepository, InMemoryUserRepository,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let listings = Arc::new(InMemoryFoodListingRepository::default());
    /// let requests = Arc::new(InMemoryFoodRequestRepository::default());
    /// let clock = Arc::new(DefaultClock);
    /// let listing_service = Arc::new(FoodListingService::new(
    ///     listings.clone(),
    ///     users.clone(),
    ///     clock.clone(),
    /// ));
    /// let request_service = Arc::new(FoodRequestService::new(
    ///     requests,
    ///     listings,
    ///     users.clone(),
    ///     clock,
    /// ));
    /// let directory = Arc::new(UserDirectoryService::new(users));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: directory.clone(),
    ///     registration: directory.clone(),
    ///     current_user: directory,
    ///     listings: listing_service.clone(),
    ///     listings_query: listing_service,
    ///     requests: request_service.clone(),
    ///     requests_query: request_service,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            current_user,
            listings,
            listings_query,
            requests,
            requests_query,
        } = ports;
        Self {
            login,
            registration,
            current_user,
            listings,
            listings_query,
            requests,
            requests_query,
        }
    }
}
