//! Food listing domain service.
//!
//! Implements the listing command and query driving ports on top of the
//! listing repository, the user directory and a clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AvailableListing, ClaimListingRequest, CreateListingRequest, FoodListingCommand,
    FoodListingQuery, FoodListingRepository, UserRepository,
};
use crate::domain::service_support::{
    distinct, map_listing_repository_error, map_user_repository_error, summaries_by_id,
};
use crate::domain::{
    AccessPolicy, Action, Actor, Error, FoodListing, ListingId, ListingStatus,
    ListingTransitionError,
};

/// Listing service implementing [`FoodListingCommand`] and
/// [`FoodListingQuery`].
#[derive(Clone)]
pub struct FoodListingService<L, U> {
    listings: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<L, U> FoodListingService<L, U> {
    /// Create a service over the given repositories.
    pub fn new(listings: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listings,
            users,
            clock,
        }
    }
}

fn conflict(id: ListingId, err: ListingTransitionError) -> Error {
    Error::conflict(err.to_string()).with_details(serde_json::json!({
        "listingId": id.to_string(),
    }))
}

#[async_trait]
impl<L, U> FoodListingCommand for FoodListingService<L, U>
where
    L: FoodListingRepository,
    U: UserRepository,
{
    async fn create_listing(&self, request: CreateListingRequest) -> Result<FoodListing, Error> {
        let CreateListingRequest { actor, draft } = request;
        AccessPolicy::authorize(&actor, Action::CreateListing)?;

        let listing = FoodListing::create(
            ListingId::random(),
            draft,
            actor.id().clone(),
            self.clock.utc(),
        );
        self.listings
            .insert(&listing)
            .await
            .map_err(map_listing_repository_error)?;
        info!(
            listing_id = %listing.id(),
            donor_id = %listing.donor_id(),
            quantity = listing.quantity().get(),
            "food listing created"
        );
        Ok(listing)
    }

    async fn claim_listing(&self, request: ClaimListingRequest) -> Result<FoodListing, Error> {
        let ClaimListingRequest { actor, listing_id } = request;
        let listing = self
            .listings
            .find_by_id(&listing_id)
            .await
            .map_err(map_listing_repository_error)?
            .ok_or_else(|| Error::not_found(format!("food listing {listing_id} not found")))?;

        AccessPolicy::authorize(
            &actor,
            Action::ClaimListing {
                donor_id: listing.donor_id(),
            },
        )?;
        listing
            .status()
            .claim()
            .map_err(|err| conflict(listing_id, err))?;

        // A concurrent claim may have won between the read and this write.
        let claimed = self
            .listings
            .mark_claimed(&listing_id)
            .await
            .map_err(map_listing_repository_error)?
            .ok_or_else(|| conflict(listing_id, ListingTransitionError::AlreadyClaimed))?;
        info!(
            listing_id = %claimed.id(),
            claimed_by = %actor.id(),
            role = %actor.role(),
            "food listing claimed"
        );
        Ok(claimed)
    }
}

#[async_trait]
impl<L, U> FoodListingQuery for FoodListingService<L, U>
where
    L: FoodListingRepository,
    U: UserRepository,
{
    async fn list_available(&self, actor: &Actor) -> Result<Vec<AvailableListing>, Error> {
        AccessPolicy::authorize(actor, Action::ListAvailableListings)?;

        let listings = self
            .listings
            .list_by_status(ListingStatus::Available)
            .await
            .map_err(map_listing_repository_error)?;
        let donor_ids = distinct(listings.iter().map(|listing| listing.donor_id().clone()));
        let donors = if donor_ids.is_empty() {
            Vec::new()
        } else {
            self.users
                .find_by_ids(&donor_ids)
                .await
                .map_err(map_user_repository_error)?
        };
        let donors = summaries_by_id(&donors);

        Ok(listings
            .into_iter()
            .map(|listing| {
                let donor = donors.get(listing.donor_id()).cloned();
                AvailableListing { listing, donor }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
