//! Food listings posted by donors.
//!
//! A listing starts `available` and can only move to `claimed`. Nothing moves
//! it back, and its donor never changes after creation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Quantity, UserId};

/// Maximum length of the free-text listing fields.
pub const LISTING_TEXT_MAX: usize = 120;

/// Validation errors raised while building a listing draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("location must not be empty")]
    EmptyLocation,
    #[error("location must be at most {max} characters")]
    LocationTooLong { max: usize },
}

/// Illegal lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListingTransitionError {
    #[error("food listing has already been claimed")]
    AlreadyClaimed,
}

/// Opaque listing identifier assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Mint a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ListingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Visible to every authenticated user and open for requests.
    Available,
    /// Terminal. Hidden from the available list.
    Claimed,
}

impl ListingStatus {
    /// Storage and wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Claimed => "claimed",
        }
    }

    /// Next state after a successful claim.
    pub fn claim(self) -> Result<Self, ListingTransitionError> {
        match self {
            Self::Available => Ok(Self::Claimed),
            Self::Claimed => Err(ListingTransitionError::AlreadyClaimed),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "claimed" => Ok(Self::Claimed),
            other => Err(format!("unknown listing status: {other}")),
        }
    }
}

fn bounded_text(
    raw: &str,
    empty: ListingValidationError,
    too_long: ListingValidationError,
) -> Result<String, ListingValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > LISTING_TEXT_MAX {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Donor-supplied listing fields, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    name: String,
    quantity: Quantity,
    expiry_date: NaiveDate,
    location: String,
}

impl ListingDraft {
    /// Validate donor input. Text fields are trimmed.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use foodshare::domain::{ListingDraft, Quantity};
    ///
    /// let draft = ListingDraft::new(
    ///     " Bread ",
    ///     Quantity::new(10).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
    ///     "Main St pantry",
    /// )
    /// .unwrap();
    /// assert_eq!(draft.name(), "Bread");
    /// ```
    pub fn new(
        name: &str,
        quantity: Quantity,
        expiry_date: NaiveDate,
        location: &str,
    ) -> Result<Self, ListingValidationError> {
        let name = bounded_text(
            name,
            ListingValidationError::EmptyName,
            ListingValidationError::NameTooLong {
                max: LISTING_TEXT_MAX,
            },
        )?;
        let location = bounded_text(
            location,
            ListingValidationError::EmptyLocation,
            ListingValidationError::LocationTooLong {
                max: LISTING_TEXT_MAX,
            },
        )?;
        Ok(Self {
            name,
            quantity,
            expiry_date,
            location,
        })
    }

    /// Food name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offered quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Best-before date.
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Pickup location.
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Stored field set used to rebuild a listing read back from persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodListingRecord {
    pub id: ListingId,
    pub name: String,
    pub quantity: Quantity,
    pub expiry_date: NaiveDate,
    pub location: String,
    pub donor_id: UserId,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

/// Surplus food posted by a donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodListing {
    id: ListingId,
    name: String,
    quantity: Quantity,
    expiry_date: NaiveDate,
    location: String,
    donor_id: UserId,
    status: ListingStatus,
    created_at: DateTime<Utc>,
}

impl FoodListing {
    /// Create a new `available` listing owned by `donor_id`.
    pub fn create(
        id: ListingId,
        draft: ListingDraft,
        donor_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ListingDraft {
            name,
            quantity,
            expiry_date,
            location,
        } = draft;
        Self {
            id,
            name,
            quantity,
            expiry_date,
            location,
            donor_id,
            status: ListingStatus::Available,
            created_at,
        }
    }

    /// Rebuild a listing from stored fields.
    pub fn from_record(record: FoodListingRecord) -> Self {
        let FoodListingRecord {
            id,
            name,
            quantity,
            expiry_date,
            location,
            donor_id,
            status,
            created_at,
        } = record;
        Self {
            id,
            name,
            quantity,
            expiry_date,
            location,
            donor_id,
            status,
            created_at,
        }
    }

    /// Apply the claim transition, keeping every other field.
    pub fn claimed(self) -> Result<Self, ListingTransitionError> {
        let status = self.status.claim()?;
        Ok(Self { status, ..self })
    }

    /// Listing identifier.
    pub fn id(&self) -> ListingId {
        self.id
    }

    /// Food name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offered quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Best-before date.
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Pickup location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Donor that created the listing.
    pub fn donor_id(&self) -> &UserId {
        &self.donor_id
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ListingStatus {
        self.status
    }

    /// Server-side creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
