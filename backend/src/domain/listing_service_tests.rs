//! Tests for the food listing service.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    FoodListingRepositoryError, MockFoodListingRepository, MockUserRepository,
    UserPersistenceError,
};
use crate::domain::{
    Email, ErrorCode, FoodListingRecord, ListingDraft, Quantity, Role, User, UserId, UserName,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now());
    Arc::new(clock)
}

fn draft() -> ListingDraft {
    ListingDraft::new(
        "Bread",
        Quantity::new(10).expect("quantity"),
        NaiveDate::from_ymd_opt(2026, 10, 20).expect("date"),
        "Main St pantry",
    )
    .expect("valid draft")
}

fn listing(donor: &UserId, status: ListingStatus) -> FoodListing {
    let draft = draft();
    FoodListing::from_record(FoodListingRecord {
        id: ListingId::random(),
        name: draft.name().to_owned(),
        quantity: draft.quantity(),
        expiry_date: draft.expiry_date(),
        location: draft.location().to_owned(),
        donor_id: donor.clone(),
        status,
        created_at: now(),
    })
}

fn user(id: &UserId, role: Role) -> User {
    User::new(
        id.clone(),
        UserName::new("Corner Bakery").expect("name"),
        Email::new("bakery@example.org").expect("email"),
        role,
    )
}

#[fixture]
fn donor() -> Actor {
    Actor::new(UserId::random(), Role::Donor)
}

fn service(
    listings: MockFoodListingRepository,
    users: MockUserRepository,
) -> FoodListingService<MockFoodListingRepository, MockUserRepository> {
    FoodListingService::new(Arc::new(listings), Arc::new(users), clock())
}

#[rstest]
#[tokio::test]
async fn create_listing_stores_available_listing_owned_by_donor(donor: Actor) {
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_insert()
        .withf(|listing| listing.status() == ListingStatus::Available)
        .times(1)
        .return_once(|_| Ok(()));

    let created = service(listings, MockUserRepository::new())
        .create_listing(CreateListingRequest {
            actor: donor.clone(),
            draft: draft(),
        })
        .await
        .expect("donor may create");

    assert_eq!(created.donor_id(), donor.id());
    assert_eq!(created.status(), ListingStatus::Available);
    assert_eq!(created.created_at(), now());
    assert_eq!(created.name(), "Bread");
}

#[rstest]
#[case(Role::Ngo)]
#[case(Role::Admin)]
#[tokio::test]
async fn create_listing_rejects_non_donors(#[case] role: Role) {
    let mut listings = MockFoodListingRepository::new();
    listings.expect_insert().never();

    let err = service(listings, MockUserRepository::new())
        .create_listing(CreateListingRequest {
            actor: Actor::new(UserId::random(), role),
            draft: draft(),
        })
        .await
        .expect_err("only donors create listings");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "only donors can add food");
}

#[rstest]
#[tokio::test]
async fn create_listing_maps_connection_failure(donor: Actor) {
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_insert()
        .return_once(|_| Err(FoodListingRepositoryError::connection("pool closed")));

    let err = service(listings, MockUserRepository::new())
        .create_listing(CreateListingRequest {
            actor: donor,
            draft: draft(),
        })
        .await
        .expect_err("storage is down");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn claim_listing_returns_not_found_before_checking_roles() {
    let mut listings = MockFoodListingRepository::new();
    listings.expect_find_by_id().return_once(|_| Ok(None));
    listings.expect_mark_claimed().never();

    let err = service(listings, MockUserRepository::new())
        .claim_listing(ClaimListingRequest {
            actor: Actor::new(UserId::random(), Role::Ngo),
            listing_id: ListingId::random(),
        })
        .await
        .expect_err("unknown listing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(Role::Donor, ListingStatus::Available)]
#[case(Role::Donor, ListingStatus::Claimed)]
#[case(Role::Ngo, ListingStatus::Available)]
#[tokio::test]
async fn claim_listing_forbids_non_owners_in_any_state(
    #[case] role: Role,
    #[case] status: ListingStatus,
) {
    let owner = UserId::random();
    let stored = listing(&owner, status);
    let listing_id = stored.id();
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    listings.expect_mark_claimed().never();

    let err = service(listings, MockUserRepository::new())
        .claim_listing(ClaimListingRequest {
            actor: Actor::new(UserId::random(), role),
            listing_id,
        })
        .await
        .expect_err("not the owner");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(Role::Admin)]
#[case(Role::Donor)]
#[tokio::test]
async fn claim_listing_by_admin_or_owner_marks_claimed(#[case] role: Role) {
    let actor = Actor::new(UserId::random(), role);
    let owner = if role == Role::Donor {
        actor.id().clone()
    } else {
        UserId::random()
    };
    let stored = listing(&owner, ListingStatus::Available);
    let listing_id = stored.id();
    let claimed = stored.clone().claimed().expect("available listing");
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    listings
        .expect_mark_claimed()
        .withf(move |id| *id == listing_id)
        .times(1)
        .return_once(move |_| Ok(Some(claimed)));

    let result = service(listings, MockUserRepository::new())
        .claim_listing(ClaimListingRequest { actor, listing_id })
        .await
        .expect("claim succeeds");

    assert_eq!(result.status(), ListingStatus::Claimed);
    assert_eq!(result.donor_id(), &owner);
}

#[rstest]
#[tokio::test]
async fn claim_listing_conflicts_when_already_claimed() {
    let stored = listing(&UserId::random(), ListingStatus::Claimed);
    let listing_id = stored.id();
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    listings.expect_mark_claimed().never();

    let err = service(listings, MockUserRepository::new())
        .claim_listing(ClaimListingRequest {
            actor: Actor::new(UserId::random(), Role::Admin),
            listing_id,
        })
        .await
        .expect_err("second claim");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn claim_listing_conflicts_when_conditional_update_loses_race() {
    let stored = listing(&UserId::random(), ListingStatus::Available);
    let listing_id = stored.id();
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    listings.expect_mark_claimed().return_once(|_| Ok(None));

    let err = service(listings, MockUserRepository::new())
        .claim_listing(ClaimListingRequest {
            actor: Actor::new(UserId::random(), Role::Admin),
            listing_id,
        })
        .await
        .expect_err("lost race");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn list_available_attaches_donor_in_repository_order(donor: Actor) {
    let first = listing(donor.id(), ListingStatus::Available);
    let orphan = listing(&UserId::random(), ListingStatus::Available);
    let second = listing(donor.id(), ListingStatus::Available);
    let stored = vec![first.clone(), orphan.clone(), second.clone()];
    let donor_user = user(donor.id(), Role::Donor);

    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_list_by_status()
        .withf(|status| *status == ListingStatus::Available)
        .return_once(move |_| Ok(stored));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .withf(|ids| ids.len() == 2)
        .return_once(move |_| Ok(vec![donor_user]));

    let available = service(listings, users)
        .list_available(&Actor::new(UserId::random(), Role::Ngo))
        .await
        .expect("any role may browse");

    assert_eq!(available.len(), 3);
    assert_eq!(available[0].listing, first);
    assert_eq!(
        available[0].donor.as_ref().map(|d| d.id.clone()),
        Some(donor.id().clone())
    );
    assert_eq!(available[1].listing, orphan);
    assert!(available[1].donor.is_none());
    assert_eq!(available[2].listing, second);
    assert!(available[2].donor.is_some());
}

#[rstest]
#[tokio::test]
async fn list_available_skips_user_lookup_when_empty(donor: Actor) {
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_list_by_status()
        .return_once(|_| Ok(Vec::new()));
    let mut users = MockUserRepository::new();
    users.expect_find_by_ids().never();

    let available = service(listings, users)
        .list_available(&donor)
        .await
        .expect("empty list");
    assert!(available.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_available_maps_user_query_failure_to_internal(donor: Actor) {
    let stored = vec![listing(donor.id(), ListingStatus::Available)];
    let mut listings = MockFoodListingRepository::new();
    listings
        .expect_list_by_status()
        .return_once(move |_| Ok(stored));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .return_once(|_| Err(UserPersistenceError::query("bad sql")));

    let err = service(listings, users)
        .list_available(&donor)
        .await
        .expect_err("user lookup fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
