//! Food-donation coordination backend.
//!
//! Donors post surplus food, NGOs request it and admins arbitrate. The
//! [`domain`] module owns the rules; [`inbound`] and [`outbound`] adapt them
//! to HTTP and storage.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
