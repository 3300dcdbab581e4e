//! Error mapping and row collection shared by the Diesel adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::TrackedEntityStoreError;

use super::pool::PoolError;

/// Map pool failures to store connection errors.
pub fn map_pool_error(error: PoolError) -> TrackedEntityStoreError {
    TrackedEntityStoreError::connection(error.message())
}

/// Map a Diesel failure of `operation` to a store error.
///
/// Closed connections are reported as connection errors; every other failure
/// is a query error carrying the database message.
pub fn map_diesel_error(error: DieselError, operation: &str) -> TrackedEntityStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(%error, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            TrackedEntityStoreError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => {
            TrackedEntityStoreError::query(format!("{operation}: {}", info.message()))
        }
        DieselError::DeserializationError(err) => {
            TrackedEntityStoreError::mapping(format!("{operation}: {err}"))
        }
        other => TrackedEntityStoreError::query(format!("{operation}: {other}")),
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
