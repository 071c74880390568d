//! Shared Diesel error mapping for the food repositories.
//!
//! Every repository port exposes `Connection` and `Query` variants; these
//! helpers take the two constructors so the mapping stays in one place.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto the port's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map a Diesel failure onto the port's query or connection error.
///
/// Messages are generic; the underlying error is logged at `debug`.
pub(crate) fn map_diesel_error<E>(
    error: diesel::result::Error,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FoodListingRepositoryError;
    use rstest::rstest;

    #[rstest]
    fn pool_error_becomes_connection_error() {
        let err = map_pool_error(
            PoolError::checkout("timed out"),
            FoodListingRepositoryError::connection,
        );
        assert_eq!(err, FoodListingRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_becomes_query_error() {
        let err = map_diesel_error(
            diesel::result::Error::NotFound,
            FoodListingRepositoryError::query,
            FoodListingRepositoryError::connection,
        );
        assert_eq!(err, FoodListingRepositoryError::query("record not found"));
    }
}
