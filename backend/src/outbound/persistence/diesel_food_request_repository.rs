//! PostgreSQL-backed `FoodRequestRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FoodRequestRepository, FoodRequestRepositoryError};
use crate::domain::{FoodRequest, RequestId, RequestStatus};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FoodRequestRow, NewFoodRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::food_requests;

/// Diesel implementation of [`FoodRequestRepository`].
#[derive(Clone)]
pub struct DieselFoodRequestRepository {
    pool: DbPool,
}

impl DieselFoodRequestRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> FoodRequestRepositoryError {
    map_pool_error(error, FoodRequestRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> FoodRequestRepositoryError {
    map_diesel_error(
        error,
        FoodRequestRepositoryError::query,
        FoodRequestRepositoryError::connection,
    )
}

fn to_request(row: FoodRequestRow) -> Result<FoodRequest, FoodRequestRepositoryError> {
    FoodRequest::try_from(row).map_err(FoodRequestRepositoryError::query)
}

#[async_trait]
impl FoodRequestRepository for DieselFoodRequestRepository {
    async fn insert(&self, request: &FoodRequest) -> Result<(), FoodRequestRepositoryError> {
        let row =
            NewFoodRequestRow::try_from_request(request).map_err(FoodRequestRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(food_requests::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &RequestId,
    ) -> Result<Option<FoodRequest>, FoodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        food_requests::table
            .filter(food_requests::id.eq(id.as_uuid()))
            .select(FoodRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_request)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<FoodRequest>, FoodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<FoodRequestRow> = food_requests::table
            .select(FoodRequestRow::as_select())
            .order_by((food_requests::created_at.asc(), food_requests::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_request).collect()
    }

    async fn mark_reviewed(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Option<FoodRequest>, FoodRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(
            food_requests::table
                .filter(food_requests::id.eq(id.as_uuid()))
                .filter(food_requests::status.eq(RequestStatus::Pending.as_str())),
        )
        .set(food_requests::status.eq(status.as_str()))
        .returning(FoodRequestRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(diesel_error)?
        .map(to_request)
        .transpose()
    }
}
