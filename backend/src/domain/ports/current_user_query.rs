//! Driving port that turns a session user id into a full account.
//!
//! Inbound adapters call this on every authenticated request so the role
//! always comes from the user directory.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for resolving the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Load the account behind `id`.
    ///
    /// Fails with `unauthorized` when the account no longer exists.
    async fn current_user(&self, id: &UserId) -> Result<User, Error>;
}
