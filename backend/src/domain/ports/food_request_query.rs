//! Driving port for the admin request overview.

use async_trait::async_trait;

use super::UserSummary;
use crate::domain::{Actor, Error, FoodListing, FoodRequest};

/// A request with its referenced listing and requesting NGO.
///
/// Either side is `None` when the reference does not resolve. Unknown
/// `food_id`s are accepted at creation, so a missing listing is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOverview {
    pub request: FoodRequest,
    pub food: Option<FoodListing>,
    pub ngo: Option<UserSummary>,
}

/// Domain use-case port for request reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodRequestQuery: Send + Sync {
    /// Every request regardless of status. Admin only.
    async fn list_all(&self, actor: &Actor) -> Result<Vec<RequestOverview>, Error>;
}
