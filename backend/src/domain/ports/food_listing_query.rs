//! Driving port for browsing available food.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Actor, Email, Error, FoodListing, User, UserId, UserName};

/// Public view of a user attached to listings and requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().clone(),
            email: user.email().clone(),
        }
    }
}

/// An available listing with its donor attached.
///
/// `donor` is `None` when the donor account no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableListing {
    pub listing: FoodListing,
    pub donor: Option<UserSummary>,
}

/// Domain use-case port for listing reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodListingQuery: Send + Sync {
    /// Every listing whose status is `available`, oldest first.
    async fn list_available(&self, actor: &Actor) -> Result<Vec<AvailableListing>, Error>;
}
