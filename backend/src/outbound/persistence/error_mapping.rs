//! Shared mapping from driver errors to port error constructors.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors to a port's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl Fn(String) -> E) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map Diesel errors to a port's query or connection error.
///
/// Closed connections surface as connection errors; everything else is a
/// query error carrying the driver message for diagnostics.
pub(crate) fn map_diesel_error<E>(
    error: diesel::result::Error,
    query: impl Fn(String) -> E,
    connection: impl Fn(String) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::PointRepositoryError;
    use rstest::rstest;

    #[rstest]
    fn checkout_errors_map_to_connection() {
        let mapped = map_pool_error(PoolError::checkout("refused"), |message| {
            PointRepositoryError::connection(message)
        });
        assert!(matches!(mapped, PointRepositoryError::Connection { .. }));
        assert!(mapped.to_string().contains("refused"));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(
            diesel::result::Error::NotFound,
            PointRepositoryError::query,
            PointRepositoryError::connection,
        );
        assert!(matches!(mapped, PointRepositoryError::Query { .. }));
        assert!(mapped.to_string().contains("record not found"));
    }
}
