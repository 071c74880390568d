//! PostgreSQL-backed `FoodListingRepository`.
//!
//! Claims are a single `UPDATE ... WHERE status = 'available' RETURNING *`,
//! so concurrent claims on one listing produce exactly one updated row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FoodListingRepository, FoodListingRepositoryError};
use crate::domain::{FoodListing, ListingId, ListingStatus};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FoodListingRow, NewFoodListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::food_listings;

/// Diesel implementation of [`FoodListingRepository`].
#[derive(Clone)]
pub struct DieselFoodListingRepository {
    pool: DbPool,
}

impl DieselFoodListingRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> FoodListingRepositoryError {
    map_pool_error(error, FoodListingRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> FoodListingRepositoryError {
    map_diesel_error(
        error,
        FoodListingRepositoryError::query,
        FoodListingRepositoryError::connection,
    )
}

fn to_listing(row: FoodListingRow) -> Result<FoodListing, FoodListingRepositoryError> {
    FoodListing::try_from(row).map_err(FoodListingRepositoryError::query)
}

#[async_trait]
impl FoodListingRepository for DieselFoodListingRepository {
    async fn insert(&self, listing: &FoodListing) -> Result<(), FoodListingRepositoryError> {
        let row =
            NewFoodListingRow::try_from_listing(listing).map_err(FoodListingRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(food_listings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<FoodListing>, FoodListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        food_listings::table
            .filter(food_listings::id.eq(id.as_uuid()))
            .select(FoodListingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_listing)
            .transpose()
    }

    async fn find_by_ids(
        &self,
        ids: &[ListingId],
    ) -> Result<Vec<FoodListing>, FoodListingRepositoryError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<FoodListingRow> = food_listings::table
            .filter(food_listings::id.eq_any(uuids))
            .select(FoodListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_listing).collect()
    }

    async fn list_by_status(
        &self,
        status: ListingStatus,
    ) -> Result<Vec<FoodListing>, FoodListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<FoodListingRow> = food_listings::table
            .filter(food_listings::status.eq(status.as_str()))
            .select(FoodListingRow::as_select())
            .order_by((food_listings::created_at.asc(), food_listings::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_listing).collect()
    }

    async fn mark_claimed(
        &self,
        id: &ListingId,
    ) -> Result<Option<FoodListing>, FoodListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(
            food_listings::table
                .filter(food_listings::id.eq(id.as_uuid()))
                .filter(food_listings::status.eq(ListingStatus::Available.as_str())),
        )
        .set(food_listings::status.eq(ListingStatus::Claimed.as_str()))
        .returning(FoodListingRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(diesel_error)?
        .map(to_listing)
        .transpose()
    }
}
