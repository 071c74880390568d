//! In-memory food request store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FoodRequestRepository, FoodRequestRepositoryError};
use crate::domain::{FoodRequest, RequestId, RequestStatus};

/// [`FoodRequestRepository`] backed by a `Vec` in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFoodRequestRepository {
    requests: RwLock<Vec<FoodRequest>>,
}

impl InMemoryFoodRequestRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FoodRequestRepository for InMemoryFoodRequestRepository {
    async fn insert(&self, request: &FoodRequest) -> Result<(), FoodRequestRepositoryError> {
        let mut requests = self.requests.write().await;
        if requests.iter().any(|existing| existing.id() == request.id()) {
            return Err(FoodRequestRepositoryError::query(format!(
                "duplicate request id {}",
                request.id()
            )));
        }
        requests.push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &RequestId,
    ) -> Result<Option<FoodRequest>, FoodRequestRepositoryError> {
        let requests = self.requests.read().await;
        Ok(requests.iter().find(|request| request.id() == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<FoodRequest>, FoodRequestRepositoryError> {
        let mut all = self.requests.read().await.clone();
        all.sort_by_key(FoodRequest::created_at);
        Ok(all)
    }

    async fn mark_reviewed(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Option<FoodRequest>, FoodRequestRepositoryError> {
        let mut requests = self.requests.write().await;
        let Some(slot) = requests.iter_mut().find(|request| request.id() == *id) else {
            return Ok(None);
        };
        if slot.status() != RequestStatus::Pending {
            return Ok(None);
        }
        let reviewed = FoodRequest::from_record(crate::domain::FoodRequestRecord {
            id: slot.id(),
            food_id: slot.food_id(),
            quantity: slot.quantity(),
            ngo_id: slot.ngo_id().clone(),
            status,
            created_at: slot.created_at(),
        });
        *slot = reviewed.clone();
        Ok(Some(reviewed))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{ListingId, Quantity, UserId};

    fn pending() -> FoodRequest {
        FoodRequest::create(
            RequestId::random(),
            ListingId::random(),
            Quantity::new(2).expect("quantity"),
            UserId::random(),
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn review_is_conditional_on_pending() {
        let repo = InMemoryFoodRequestRepository::new();
        let request = pending();
        repo.insert(&request).await.expect("insert");

        let approved = repo
            .mark_reviewed(&request.id(), RequestStatus::Approved)
            .await
            .expect("review");
        assert_eq!(approved.map(|r| r.status()), Some(RequestStatus::Approved));

        let again = repo
            .mark_reviewed(&request.id(), RequestStatus::Rejected)
            .await
            .expect("review");
        assert_eq!(again, None);
        let stored = repo.find_by_id(&request.id()).await.expect("lookup");
        assert_eq!(stored.map(|r| r.status()), Some(RequestStatus::Approved));
    }

    #[rstest]
    #[tokio::test]
    async fn list_all_includes_every_status() {
        let repo = InMemoryFoodRequestRepository::new();
        let first = pending();
        let second = pending();
        repo.insert(&first).await.expect("insert");
        repo.insert(&second).await.expect("insert");
        repo.mark_reviewed(&first.id(), RequestStatus::Rejected)
            .await
            .expect("review");

        let all = repo.list_all().await.expect("list");
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|r| r.status() == RequestStatus::Rejected));
        assert!(all.iter().any(|r| r.status() == RequestStatus::Pending));
    }
}
