//! Driving port for user registration and deletion.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, UserId};

/// Domain use-case port for mutating the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user and return its store-assigned identifier.
    async fn register_user(&self, user: NewUser) -> Result<UserId, Error>;

    /// Soft-delete a user, hiding it from listings.
    async fn soft_delete_user(&self, id: UserId) -> Result<(), Error>;
}
