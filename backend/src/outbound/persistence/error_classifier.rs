//! Classification of store failures into repository-relevant kinds.
//!
//! The repository never inspects driver errors directly. It asks an
//! [`ErrorClassifier`] what kind of failure occurred and maps that kind onto
//! [`UserPersistenceError`](crate::domain::ports::UserPersistenceError)
//! variants. Swapping the classifier lets the same repository run against a
//! store with different error codes.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Store-agnostic kind of a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// A unique index rejected the write.
    UniqueViolation,
    /// A foreign key referenced a row that does not exist.
    ForeignKeyViolation,
    /// The connection dropped mid-statement.
    ConnectionLost,
    /// Anything the classifier does not recognise.
    Unrecognised,
}

/// Classifier function injected into the user repository.
pub type ErrorClassifier = fn(&DieselError) -> StoreErrorKind;

/// Classify a Diesel error raised by PostgreSQL.
///
/// Diesel's Postgres backend derives [`DatabaseErrorKind`] from SQLSTATE:
/// `23505` becomes `UniqueViolation` and `23503` becomes
/// `ForeignKeyViolation`.
///
/// # Examples
///
/// ```
/// use diesel::result::{DatabaseErrorKind, Error};
/// use user_registry::outbound::persistence::{classify_postgres_error, StoreErrorKind};
///
/// let error = Error::DatabaseError(
///     DatabaseErrorKind::UniqueViolation,
///     Box::new("duplicate key value".to_owned()),
/// );
/// assert_eq!(classify_postgres_error(&error), StoreErrorKind::UniqueViolation);
/// ```
pub fn classify_postgres_error(error: &DieselError) -> StoreErrorKind {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreErrorKind::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            StoreErrorKind::ForeignKeyViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => StoreErrorKind::ConnectionLost,
        _ => StoreErrorKind::Unrecognised,
    }
}

/// Human-readable store message for a Diesel error.
pub(crate) fn store_message(error: &DieselError) -> String {
    match error {
        DieselError::DatabaseError(_, info) => info.message().to_owned(),
        other => other.to_string(),
    }
}
