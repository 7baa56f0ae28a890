//! Folds pool and Diesel failures into [`CharacterRepositoryError`].
//!
//! Anything that means "the database is not reachable" becomes `Connection`
//! (HTTP 503); every other failure becomes `Query` (HTTP 500). Driver detail
//! is logged at debug and never copied into the error message.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::CharacterRepositoryError;

use super::pool::PoolError;

const CONNECTION_ERROR_MESSAGE: &str = "database connection error";

pub(super) fn pool_error(error: PoolError) -> CharacterRepositoryError {
    debug!(%error, "connection checkout failed");
    CharacterRepositoryError::connection(CONNECTION_ERROR_MESSAGE)
}

pub(super) fn diesel_error(error: DieselError) -> CharacterRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel query failed");
        }
        other => debug!(error = %other, "diesel query failed"),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => CharacterRepositoryError::connection(CONNECTION_ERROR_MESSAGE),
        DieselError::DeserializationError(_) => {
            CharacterRepositoryError::query("database row decode error")
        }
        _ => CharacterRepositoryError::query("database error"),
    }
}
