//! Driving port for self-service sign-up.

use async_trait::async_trait;

use crate::domain::{Error, RegisterUser, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Store a new account with a fresh id and the requested role.
    ///
    /// Fails with `conflict` when the email is already registered.
    async fn register(&self, request: RegisterUser) -> Result<User, Error>;
}
