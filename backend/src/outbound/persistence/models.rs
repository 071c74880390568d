//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversions into domain
//! entities return `Err(String)` when a stored value no longer satisfies the
//! domain invariants.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Email, FoodListing, FoodListingRecord, FoodRequest, FoodRequestRecord, ListingId, Quantity,
    RequestId, User, UserId, UserName,
};

use super::schema::{food_listings, food_requests, users};

fn quantity_from_db(raw: i32) -> Result<Quantity, String> {
    u32::try_from(raw)
        .map_err(|err| err.to_string())
        .and_then(|value| Quantity::new(value).map_err(|err| err.to_string()))
        .map_err(|err| format!("invalid stored quantity {raw}: {err}"))
}

/// Quantities are bounded well below `i32::MAX`.
pub(crate) fn quantity_for_db(quantity: Quantity) -> Result<i32, String> {
    i32::try_from(quantity.get()).map_err(|err| format!("quantity out of range: {err}"))
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let name = UserName::new(&row.name).map_err(|err| format!("user {}: {err}", row.id))?;
        let email = Email::new(&row.email).map_err(|err| format!("user {}: {err}", row.id))?;
        let role = row
            .role
            .parse()
            .map_err(|err| format!("user {}: {err}", row.id))?;
        Ok(Self::new(UserId::from_uuid(row.id), name, email, role))
    }
}

/// Insertable and changeset struct for user upserts.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            role: user.role().as_str(),
        }
    }
}

/// Row struct for reading from the food_listings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = food_listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FoodListingRow {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub location: String,
    pub donor_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FoodListingRow> for FoodListing {
    type Error = String;

    fn try_from(row: FoodListingRow) -> Result<Self, Self::Error> {
        let quantity = quantity_from_db(row.quantity)?;
        let status = row.status.parse()?;
        Ok(Self::from_record(FoodListingRecord {
            id: ListingId::from_uuid(row.id),
            name: row.name,
            quantity,
            expiry_date: row.expiry_date,
            location: row.location,
            donor_id: UserId::from_uuid(row.donor_id),
            status,
            created_at: row.created_at,
        }))
    }
}

/// Insertable struct for new listings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_listings)]
pub(crate) struct NewFoodListingRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub location: &'a str,
    pub donor_id: Uuid,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewFoodListingRow<'a> {
    pub(crate) fn try_from_listing(listing: &'a FoodListing) -> Result<Self, String> {
        Ok(Self {
            id: *listing.id().as_uuid(),
            name: listing.name(),
            quantity: quantity_for_db(listing.quantity())?,
            expiry_date: listing.expiry_date(),
            location: listing.location(),
            donor_id: *listing.donor_id().as_uuid(),
            status: listing.status().as_str(),
            created_at: listing.created_at(),
        })
    }
}

/// Row struct for reading from the food_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = food_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FoodRequestRow {
    pub id: Uuid,
    pub food_id: Uuid,
    pub quantity: i32,
    pub ngo_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FoodRequestRow> for FoodRequest {
    type Error = String;

    fn try_from(row: FoodRequestRow) -> Result<Self, Self::Error> {
        let quantity = quantity_from_db(row.quantity)?;
        let status = row.status.parse()?;
        Ok(Self::from_record(FoodRequestRecord {
            id: RequestId::from_uuid(row.id),
            food_id: ListingId::from_uuid(row.food_id),
            quantity,
            ngo_id: UserId::from_uuid(row.ngo_id),
            status,
            created_at: row.created_at,
        }))
    }
}

/// Insertable struct for new requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_requests)]
pub(crate) struct NewFoodRequestRow<'a> {
    pub id: Uuid,
    pub food_id: Uuid,
    pub quantity: i32,
    pub ngo_id: Uuid,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewFoodRequestRow<'a> {
    pub(crate) fn try_from_request(request: &'a FoodRequest) -> Result<Self, String> {
        Ok(Self {
            id: *request.id().as_uuid(),
            food_id: *request.food_id().as_uuid(),
            quantity: quantity_for_db(request.quantity())?,
            ngo_id: *request.ngo_id().as_uuid(),
            status: request.status().as_str(),
            created_at: request.created_at(),
        })
    }
}
