//! Shared Diesel error classification for the coupon repositories.
//!
//! Each repository owns its port error type; these helpers reduce Diesel and
//! pool failures to a small set of kinds so every adapter maps them the
//! same way. Driver messages are logged at debug level and replaced by fixed
//! text before they reach the domain.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse outcome of a failed Diesel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique index rejected the write.
    UniqueViolation,
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// Any other query failure.
    Query(&'static str),
}

/// Classify a Diesel error, logging the driver detail.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        _ => DieselFailure::Query("database error"),
    }
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel error where a unique violation has no special meaning.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => query("unique constraint violated"),
        DieselFailure::Connection(message) => connection(message),
        DieselFailure::Query(message) => query(message),
    }
}
