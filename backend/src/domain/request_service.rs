//! Food request domain service.
//!
//! NGOs raise requests against listings; admins list and review them.
//! Reviewing never changes the referenced listing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateFoodRequest, FoodListingRepository, FoodRequestCommand, FoodRequestQuery,
    FoodRequestRepository, RequestOverview, ReviewFoodRequest, UserRepository,
};
use crate::domain::service_support::{
    distinct, map_listing_repository_error, map_request_repository_error,
    map_user_repository_error, summaries_by_id,
};
use crate::domain::{
    AccessPolicy, Action, Actor, Error, FoodRequest, RequestId, RequestTransitionError,
};

/// Request service implementing [`FoodRequestCommand`] and
/// [`FoodRequestQuery`].
#[derive(Clone)]
pub struct FoodRequestService<R, L, U> {
    requests: Arc<R>,
    listings: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, L, U> FoodRequestService<R, L, U> {
    /// Create a service over the given repositories.
    pub fn new(requests: Arc<R>, listings: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            requests,
            listings,
            users,
            clock,
        }
    }
}

fn conflict(id: RequestId, err: RequestTransitionError) -> Error {
    Error::conflict(err.to_string()).with_details(serde_json::json!({
        "requestId": id.to_string(),
    }))
}

#[async_trait]
impl<R, L, U> FoodRequestCommand for FoodRequestService<R, L, U>
where
    R: FoodRequestRepository,
    L: FoodListingRepository,
    U: UserRepository,
{
    async fn create_request(&self, request: CreateFoodRequest) -> Result<FoodRequest, Error> {
        let CreateFoodRequest {
            actor,
            food_id,
            quantity,
        } = request;
        AccessPolicy::authorize(&actor, Action::CreateRequest)?;

        let created = FoodRequest::create(
            RequestId::random(),
            food_id,
            quantity,
            actor.id().clone(),
            self.clock.utc(),
        );
        self.requests
            .insert(&created)
            .await
            .map_err(map_request_repository_error)?;
        info!(
            request_id = %created.id(),
            food_id = %created.food_id(),
            ngo_id = %created.ngo_id(),
            quantity = created.quantity().get(),
            "food request created"
        );
        Ok(created)
    }

    async fn review_request(&self, request: ReviewFoodRequest) -> Result<FoodRequest, Error> {
        let ReviewFoodRequest {
            actor,
            request_id,
            decision,
        } = request;
        AccessPolicy::authorize(&actor, Action::ReviewRequest)?;

        let current = self
            .requests
            .find_by_id(&request_id)
            .await
            .map_err(map_request_repository_error)?
            .ok_or_else(|| Error::not_found(format!("food request {request_id} not found")))?;
        let next = current
            .status()
            .review(decision)
            .map_err(|err| conflict(request_id, err))?;

        let reviewed = match self
            .requests
            .mark_reviewed(&request_id, next)
            .await
            .map_err(map_request_repository_error)?
        {
            Some(reviewed) => reviewed,
            None => {
                // Lost a race with another review; report the state that won.
                let status = self
                    .requests
                    .find_by_id(&request_id)
                    .await
                    .map_err(map_request_repository_error)?
                    .map_or(next, |latest| latest.status());
                return Err(conflict(
                    request_id,
                    RequestTransitionError::AlreadyReviewed { status },
                ));
            }
        };
        info!(
            request_id = %reviewed.id(),
            status = %reviewed.status(),
            reviewed_by = %actor.id(),
            "food request reviewed"
        );
        Ok(reviewed)
    }
}

#[async_trait]
impl<R, L, U> FoodRequestQuery for FoodRequestService<R, L, U>
where
    R: FoodRequestRepository,
    L: FoodListingRepository,
    U: UserRepository,
{
    async fn list_all(&self, actor: &Actor) -> Result<Vec<RequestOverview>, Error> {
        AccessPolicy::authorize(actor, Action::ListAllRequests)?;

        let requests = self
            .requests
            .list_all()
            .await
            .map_err(map_request_repository_error)?;
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let food_ids = distinct(requests.iter().map(FoodRequest::food_id));
        let listings: HashMap<_, _> = self
            .listings
            .find_by_ids(&food_ids)
            .await
            .map_err(map_listing_repository_error)?
            .into_iter()
            .map(|listing| (listing.id(), listing))
            .collect();

        let ngo_ids = distinct(requests.iter().map(|request| request.ngo_id().clone()));
        let ngos = self
            .users
            .find_by_ids(&ngo_ids)
            .await
            .map_err(map_user_repository_error)?;
        let ngos = summaries_by_id(&ngos);

        Ok(requests
            .into_iter()
            .map(|request| RequestOverview {
                food: listings.get(&request.food_id()).cloned(),
                ngo: ngos.get(request.ngo_id()).cloned(),
                request,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "request_service_tests.rs"]
mod tests;
