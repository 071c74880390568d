//! In-memory adapters for the repository ports.
//!
//! Used when no database URL is configured and throughout the HTTP and
//! behaviour tests. Each store sits behind a `tokio` `RwLock`; conditional
//! transitions check and write under one write guard.

mod food_listings;
mod food_requests;
mod users;

pub use food_listings::InMemoryFoodListingRepository;
pub use food_requests::InMemoryFoodRequestRepository;
pub use users::InMemoryUserRepository;
