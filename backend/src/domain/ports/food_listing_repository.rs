//! Port for food listing persistence.
use async_trait::async_trait;

use crate::domain::{FoodListing, ListingId, ListingStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by food listing repository adapters.
    pub enum FoodListingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "food listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "food listing repository query failed: {message}",
    }
}

/// Storage for food listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodListingRepository: Send + Sync {
    /// Persist a newly created listing.
    async fn insert(&self, listing: &FoodListing) -> Result<(), FoodListingRepositoryError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<FoodListing>, FoodListingRepositoryError>;

    /// Fetch every listing whose id appears in `ids`. Unknown ids are skipped.
    async fn find_by_ids(
        &self,
        ids: &[ListingId],
    ) -> Result<Vec<FoodListing>, FoodListingRepositoryError>;

    /// List listings in `status`, oldest first.
    async fn list_by_status(
        &self,
        status: ListingStatus,
    ) -> Result<Vec<FoodListing>, FoodListingRepositoryError>;

    /// Move a listing from `available` to `claimed` in one conditional write.
    ///
    /// Returns the updated listing, or `None` when no listing with `id` is
    /// still available. Of any number of concurrent calls for the same
    /// listing, at most one returns `Some`.
    async fn mark_claimed(
        &self,
        id: &ListingId,
    ) -> Result<Option<FoodListing>, FoodListingRepositoryError>;
}
