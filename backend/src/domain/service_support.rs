//! Internal helpers shared by the food and user services.

use std::collections::HashMap;

use crate::domain::ports::{
    FoodListingRepositoryError, FoodRequestRepositoryError, UserPersistenceError, UserSummary,
};
use crate::domain::{Error, User, UserId};

pub(crate) fn map_listing_repository_error(error: FoodListingRepositoryError) -> Error {
    match error {
        FoodListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("food listing repository unavailable: {message}"))
        }
        FoodListingRepositoryError::Query { message } => {
            Error::internal(format!("food listing repository error: {message}"))
        }
    }
}

pub(crate) fn map_request_repository_error(error: FoodRequestRepositoryError) -> Error {
    match error {
        FoodRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("food request repository unavailable: {message}"))
        }
        FoodRequestRepositoryError::Query { message } => {
            Error::internal(format!("food request repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

/// Distinct ids in first-seen order.
pub(crate) fn distinct<T: Clone + PartialEq>(ids: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Index user summaries by id for attaching to listings and requests.
pub(crate) fn summaries_by_id(users: &[User]) -> HashMap<UserId, UserSummary> {
    users
        .iter()
        .map(|user| (user.id().clone(), UserSummary::from(user)))
        .collect()
}
