//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel row structs and domain
//! entities. Row structs (`models`) and table definitions (`schema`) stay
//! private to this module. Connections come from a `bb8` pool driven by
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use foodshare::outbound::persistence::{
//!     DbPool, DieselFoodListingRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! run_pending_migrations("postgres://localhost/foodshare").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/foodshare")).await?;
//! let listings = DieselFoodListingRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_food_listing_repository;
mod diesel_food_request_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_food_listing_repository::DieselFoodListingRepository;
pub use diesel_food_request_repository::DieselFoodRequestRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
