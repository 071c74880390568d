//! Requests raised by NGOs against food listings.
//!
//! A request starts `Pending` and an admin review moves it to `Approved` or
//! `Rejected`. Reviews never touch the referenced listing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ListingId, Quantity, UserId};

/// Opaque request identifier assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
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

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Review state of a request.
///
/// Serialised capitalised (`"Pending"`) to stay compatible with existing
/// clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Storage and wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Next state after an admin decision. Only pending requests can be
    /// reviewed.
    pub fn review(self, decision: ReviewDecision) -> Result<Self, RequestTransitionError> {
        match self {
            Self::Pending => Ok(decision.outcome()),
            reviewed => Err(RequestTransitionError::AlreadyReviewed { status: reviewed }),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// Admin verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// Terminal status the decision leads to.
    pub fn outcome(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown review decision: {other}")),
        }
    }
}

/// Illegal review transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequestTransitionError {
    #[error("food request has already been reviewed ({status})")]
    AlreadyReviewed { status: RequestStatus },
}

/// Stored field set used to rebuild a request read back from persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodRequestRecord {
    pub id: RequestId,
    pub food_id: ListingId,
    pub quantity: Quantity,
    pub ngo_id: UserId,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// An NGO's ask against a listing.
///
/// `food_id` is not checked against existing listings and `quantity` is
/// never reconciled with the listing's quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequest {
    id: RequestId,
    food_id: ListingId,
    quantity: Quantity,
    ngo_id: UserId,
    status: RequestStatus,
    created_at: DateTime<Utc>,
}

impl FoodRequest {
    /// Create a new `Pending` request raised by `ngo_id`.
    pub fn create(
        id: RequestId,
        food_id: ListingId,
        quantity: Quantity,
        ngo_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            food_id,
            quantity,
            ngo_id,
            status: RequestStatus::Pending,
            created_at,
        }
    }

    /// Rebuild a request from stored fields.
    pub fn from_record(record: FoodRequestRecord) -> Self {
        let FoodRequestRecord {
            id,
            food_id,
            quantity,
            ngo_id,
            status,
            created_at,
        } = record;
        Self {
            id,
            food_id,
            quantity,
            ngo_id,
            status,
            created_at,
        }
    }

    /// Apply an admin decision, keeping every other field.
    pub fn reviewed(self, decision: ReviewDecision) -> Result<Self, RequestTransitionError> {
        let status = self.status.review(decision)?;
        Ok(Self { status, ..self })
    }

    /// Request identifier.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Referenced listing.
    pub fn food_id(&self) -> ListingId {
        self.food_id
    }

    /// Requested quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// NGO that raised the request.
    pub fn ngo_id(&self) -> &UserId {
        &self.ngo_id
    }

    /// Current review state.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Server-side creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
