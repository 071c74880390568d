//! Port for food request persistence.
use async_trait::async_trait;

use crate::domain::{FoodRequest, RequestId, RequestStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by food request repository adapters.
    pub enum FoodRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "food request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "food request repository query failed: {message}",
    }
}

/// Storage for food requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodRequestRepository: Send + Sync {
    /// Persist a newly created request.
    async fn insert(&self, request: &FoodRequest) -> Result<(), FoodRequestRepositoryError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: &RequestId,
    ) -> Result<Option<FoodRequest>, FoodRequestRepositoryError>;

    /// Every request regardless of status, oldest first.
    async fn list_all(&self) -> Result<Vec<FoodRequest>, FoodRequestRepositoryError>;

    /// Move a `Pending` request to `status` in one conditional write.
    ///
    /// Returns `None` when no pending request with `id` exists.
    async fn mark_reviewed(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Option<FoodRequest>, FoodRequestRepositoryError>;
}
