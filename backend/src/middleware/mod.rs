//! Request middleware.
//!
//! Holds the [`Trace`] middleware that scopes a correlation id around every
//! request.

pub mod trace;

pub use trace::Trace;
