//! Role and ownership rules for every food and request operation.
//!
//! All authorization branching lives here. Services describe what the actor
//! is attempting as an [`Action`], including any ownership facts the rule
//! needs, and [`AccessPolicy::authorize`] answers yes or no.

use super::{Actor, Error, Role, UserId};

/// Operation an actor is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Post a new food listing.
    CreateListing,
    /// Browse listings that are still available.
    ListAvailableListings,
    /// Claim the listing owned by `donor_id`.
    ClaimListing { donor_id: &'a UserId },
    /// Ask for food from a listing.
    CreateRequest,
    /// See every request with its listing and requester.
    ListAllRequests,
    /// Approve or reject a pending request.
    ReviewRequest,
}

impl Action<'_> {
    /// Short operation label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateListing => "create_listing",
            Self::ListAvailableListings => "list_available_listings",
            Self::ClaimListing { .. } => "claim_listing",
            Self::CreateRequest => "create_request",
            Self::ListAllRequests => "list_all_requests",
            Self::ReviewRequest => "review_request",
        }
    }
}

/// Refusal returned by [`AccessPolicy::authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("only donors can add food")]
    DonorOnly,
    #[error("only NGOs can request food")]
    NgoOnly,
    #[error("only admins can perform this action")]
    AdminOnly,
    #[error("only the owning donor or an admin can claim this food")]
    NotOwner,
}

impl From<AccessDenied> for Error {
    fn from(value: AccessDenied) -> Self {
        Error::forbidden(value.to_string())
    }
}

/// Stateless decision function over `(actor, action)`.
///
/// # Examples
/// ```
/// use foodshare::domain::{AccessPolicy, Action, Actor, Role, UserId};
///
/// let donor = Actor::new(UserId::random(), Role::Donor);
/// assert!(AccessPolicy::authorize(&donor, Action::CreateListing).is_ok());
/// assert!(AccessPolicy::authorize(&donor, Action::ListAllRequests).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide whether `actor` may perform `action`.
    pub fn authorize(actor: &Actor, action: Action<'_>) -> Result<(), AccessDenied> {
        let role = actor.role();
        let outcome = match action {
            Action::CreateListing => require(role == Role::Donor, AccessDenied::DonorOnly),
            Action::ListAvailableListings => Ok(()),
            Action::ClaimListing { donor_id } => match role {
                Role::Admin => Ok(()),
                Role::Donor if actor.id() == donor_id => Ok(()),
                Role::Donor | Role::Ngo => Err(AccessDenied::NotOwner),
            },
            Action::CreateRequest => require(role == Role::Ngo, AccessDenied::NgoOnly),
            Action::ListAllRequests | Action::ReviewRequest => {
                require(role == Role::Admin, AccessDenied::AdminOnly)
            }
        };
        if let Err(denied) = &outcome {
            tracing::debug!(
                user_id = %actor.id(),
                role = %role,
                action = action.name(),
                reason = %denied,
                "access denied"
            );
        }
        outcome
    }
}

fn require(allowed: bool, denied: AccessDenied) -> Result<(), AccessDenied> {
    if allowed { Ok(()) } else { Err(denied) }
}
