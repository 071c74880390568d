//! In-memory food listing store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FoodListingRepository, FoodListingRepositoryError};
use crate::domain::{FoodListing, ListingId, ListingStatus};

/// [`FoodListingRepository`] backed by a `Vec` in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFoodListingRepository {
    listings: RwLock<Vec<FoodListing>>,
}

impl InMemoryFoodListingRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FoodListingRepository for InMemoryFoodListingRepository {
    async fn insert(&self, listing: &FoodListing) -> Result<(), FoodListingRepositoryError> {
        let mut listings = self.listings.write().await;
        if listings.iter().any(|existing| existing.id() == listing.id()) {
            return Err(FoodListingRepositoryError::query(format!(
                "duplicate listing id {}",
                listing.id()
            )));
        }
        listings.push(listing.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<FoodListing>, FoodListingRepositoryError> {
        let listings = self.listings.read().await;
        Ok(listings.iter().find(|listing| listing.id() == *id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[ListingId],
    ) -> Result<Vec<FoodListing>, FoodListingRepositoryError> {
        let listings = self.listings.read().await;
        Ok(listings
            .iter()
            .filter(|listing| ids.contains(&listing.id()))
            .cloned()
            .collect())
    }

    async fn list_by_status(
        &self,
        status: ListingStatus,
    ) -> Result<Vec<FoodListing>, FoodListingRepositoryError> {
        let listings = self.listings.read().await;
        let mut matching: Vec<FoodListing> = listings
            .iter()
            .filter(|listing| listing.status() == status)
            .cloned()
            .collect();
        matching.sort_by_key(FoodListing::created_at);
        Ok(matching)
    }

    async fn mark_claimed(
        &self,
        id: &ListingId,
    ) -> Result<Option<FoodListing>, FoodListingRepositoryError> {
        let mut listings = self.listings.write().await;
        let Some(slot) = listings.iter_mut().find(|listing| listing.id() == *id) else {
            return Ok(None);
        };
        match slot.clone().claimed() {
            Ok(claimed) => {
                *slot = claimed.clone();
                Ok(Some(claimed))
            }
            Err(_) => Ok(None),
        }
    }
}
