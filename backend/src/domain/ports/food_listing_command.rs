//! Driving port for food listing mutations.

use async_trait::async_trait;

use crate::domain::{Actor, Error, FoodListing, ListingDraft, ListingId};

/// Donor input for a new listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListingRequest {
    pub actor: Actor,
    pub draft: ListingDraft,
}

/// Claim of an existing listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimListingRequest {
    pub actor: Actor,
    pub listing_id: ListingId,
}

/// Domain use-case port for creating and claiming listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodListingCommand: Send + Sync {
    /// Store a new `available` listing owned by the acting donor.
    ///
    /// Fails with `forbidden` for any role other than donor.
    async fn create_listing(&self, request: CreateListingRequest) -> Result<FoodListing, Error>;

    /// Move a listing to `claimed`.
    ///
    /// Fails with `not_found` when the listing does not exist, `forbidden`
    /// unless the actor is an admin or the owning donor, and `conflict` when
    /// the listing is no longer available.
    async fn claim_listing(&self, request: ClaimListingRequest) -> Result<FoodListing, Error>;
}
