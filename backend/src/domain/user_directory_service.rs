//! User directory domain service.
//!
//! Implements the driving ports over a [`UserRepository`], turning persistence
//! failures into client-facing domain errors. The HTTP adapter only inspects
//! the resulting [`ErrorCode`](crate::domain::ErrorCode), never the message.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId};

/// Message returned when a registration reuses an email address.
pub const EMAIL_TAKEN_MESSAGE: &str = "cannot insert user as this email is already used";
/// Message returned when deleting a user that already has a tombstone.
pub const ALREADY_DELETED_MESSAGE: &str =
    "Unable to delete this user as they have already been deleted";
/// Message returned when deleting a user that never existed.
pub const USER_NOT_FOUND_MESSAGE: &str = "Unable to delete this user as they do not exist";

/// User directory service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    repository: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// Map failures every operation shares; operation-specific kinds are handled
/// by the callers before falling back here.
fn map_infrastructure_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Transaction { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_register_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::UniqueConstraintViolation { .. } => {
            Error::invalid_request(EMAIL_TAKEN_MESSAGE)
                .with_details(json!({ "field": "email", "code": "email_taken" }))
        }
        other => map_infrastructure_error(other),
    }
}

fn map_soft_delete_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::UniqueConstraintViolation { .. } => {
            Error::invalid_request(ALREADY_DELETED_MESSAGE)
                .with_details(json!({ "code": "already_deleted" }))
        }
        UserPersistenceError::UserNotFound { .. } => {
            Error::invalid_request(USER_NOT_FOUND_MESSAGE)
                .with_details(json!({ "code": "user_not_found" }))
        }
        other => map_infrastructure_error(other),
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn register_user(&self, user: NewUser) -> Result<UserId, Error> {
        self.repository
            .insert_new_user(&user)
            .await
            .map_err(map_register_error)
    }

    async fn soft_delete_user(&self, id: UserId) -> Result<(), Error> {
        self.repository
            .soft_delete_user(id)
            .await
            .map_err(map_soft_delete_error)
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .get_all_users()
            .await
            .map_err(map_infrastructure_error)
    }
}
