//! Outbound adapters implementing the domain's repository ports.
//!
//! - **memory**: in-process stores used for development and tests.
//! - **persistence**: PostgreSQL-backed repositories using Diesel.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
