//! Driving port for food request mutations.

use async_trait::async_trait;

use crate::domain::{Actor, Error, FoodRequest, ListingId, Quantity, RequestId, ReviewDecision};

/// NGO input for a new request.
///
/// `food_id` is taken as given; nothing checks that the listing exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFoodRequest {
    pub actor: Actor,
    pub food_id: ListingId,
    pub quantity: Quantity,
}

/// Admin decision on a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFoodRequest {
    pub actor: Actor,
    pub request_id: RequestId,
    pub decision: ReviewDecision,
}

/// Domain use-case port for creating and reviewing requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodRequestCommand: Send + Sync {
    /// Store a new `Pending` request raised by the acting NGO.
    async fn create_request(&self, request: CreateFoodRequest) -> Result<FoodRequest, Error>;

    /// Approve or reject a pending request.
    ///
    /// Fails with `forbidden` for non-admins, `not_found` for unknown ids and
    /// `conflict` once the request has left `Pending`.
    async fn review_request(&self, request: ReviewFoodRequest) -> Result<FoodRequest, Error>;
}
