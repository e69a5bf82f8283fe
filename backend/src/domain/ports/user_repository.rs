//! Port abstraction for user persistence adapters and their errors.
//!
//! Adapters run every operation inside its own store transaction and report
//! failures through [`UserPersistenceError`], whose variants carry the kind of
//! failure rather than store-specific codes.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// A uniqueness constraint rejected the write (duplicate email or
        /// tombstone).
        UniqueConstraintViolation { message: String } =>
            "unique constraint violated: {message}",
        /// The referenced user does not exist.
        UserNotFound { message: String } => "user not found: {message}",
        /// The transaction could not be opened or committed.
        Transaction { message: String } => "user repository transaction failed: {message}",
        /// Any other failure reported by the store.
        Unclassified { message: String } => "user repository query failed: {message}",
    }
}

/// Transactional access to users and their deletion tombstones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the identifier the store assigned.
    async fn insert_new_user(&self, user: &NewUser) -> Result<UserId, UserPersistenceError>;

    /// Return every user without a deletion tombstone.
    ///
    /// Order is whatever the store yields; an empty store yields an empty
    /// vector.
    async fn get_all_users(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Record a deletion tombstone for `id`.
    ///
    /// Fails with [`UserPersistenceError::UniqueConstraintViolation`] when the
    /// user is already deleted and [`UserPersistenceError::UserNotFound`] when
    /// it never existed.
    async fn soft_delete_user(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
