//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters.
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are implemented by
//! domain services and called from inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod current_user_query;
mod food_listing_command;
mod food_listing_query;
mod food_listing_repository;
mod food_request_command;
mod food_request_query;
mod food_request_repository;
mod login_service;
mod user_registration;
mod user_repository;

pub use current_user_query::CurrentUserQuery;
#[cfg(test)]
pub use current_user_query::MockCurrentUserQuery;
pub use food_listing_command::{ClaimListingRequest, CreateListingRequest, FoodListingCommand};
#[cfg(test)]
pub use food_listing_command::MockFoodListingCommand;
#[cfg(test)]
pub use food_listing_query::MockFoodListingQuery;
pub use food_listing_query::{AvailableListing, FoodListingQuery, UserSummary};
#[cfg(test)]
pub use food_listing_repository::MockFoodListingRepository;
pub use food_listing_repository::{FoodListingRepository, FoodListingRepositoryError};
#[cfg(test)]
pub use food_request_command::MockFoodRequestCommand;
pub use food_request_command::{CreateFoodRequest, FoodRequestCommand, ReviewFoodRequest};
#[cfg(test)]
pub use food_request_query::MockFoodRequestQuery;
pub use food_request_query::{FoodRequestQuery, RequestOverview};
#[cfg(test)]
pub use food_request_repository::MockFoodRequestRepository;
pub use food_request_repository::{FoodRequestRepository, FoodRequestRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{DEMO_PASSWORD, LoginService, demo_accounts};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
