//! Domain primitives, policy and services.
//!
//! Purpose: define the strongly typed entities of the food-sharing flow, the
//! single access policy gating every operation, and the services that drive
//! listing and request lifecycles through the ports in [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: API error payload and stable identifiers.
//! - `User`, `Role`, `Actor`: accounts and the caller identity.
//! - `FoodListing`, `FoodRequest`: the two lifecycle entities.
//! - `AccessPolicy` / `Action`: role and ownership rules.
//! - `FoodListingService`, `FoodRequestService`, `UserDirectoryService`.

pub mod access_policy;
pub mod auth;
pub mod error;
pub mod food_listing;
pub mod food_request;
pub mod listing_service;
pub mod ports;
pub mod quantity;
pub mod request_service;
mod service_support;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::access_policy::{AccessDenied, AccessPolicy, Action};
pub use self::auth::{
    LoginCredentials, LoginValidationError, RegisterUser, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::food_listing::{
    FoodListing, FoodListingRecord, LISTING_TEXT_MAX, ListingDraft, ListingId, ListingStatus,
    ListingTransitionError, ListingValidationError,
};
pub use self::food_request::{
    FoodRequest, FoodRequestRecord, RequestId, RequestStatus, RequestTransitionError,
    ReviewDecision,
};
pub use self::listing_service::FoodListingService;
pub use self::quantity::{QUANTITY_MAX, Quantity, QuantityError};
pub use self::request_service::FoodRequestService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Actor, Email, Role, USER_NAME_MAX, User, UserId, UserName, UserValidationError,
};
pub use self::user_directory_service::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use foodshare::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("only donors can add food"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
