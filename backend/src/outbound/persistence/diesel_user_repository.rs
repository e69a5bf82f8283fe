//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every operation checks out one pooled connection and runs a single
//! statement inside its own transaction. Failures are split into those raised
//! by the statement and those raised by the transaction boundary, so that a
//! failed `BEGIN` or `COMMIT` is never mistaken for a constraint violation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::error_classifier::{
    ErrorClassifier, StoreErrorKind, classify_postgres_error, store_message,
};
use super::models::{NewUserDeleteRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{user_deletes, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    classify: ErrorClassifier,
}

impl DieselUserRepository {
    /// Create a repository that classifies errors as PostgreSQL reports them.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use user_registry::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
    /// let repository = DieselUserRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            classify: classify_postgres_error,
        }
    }

    /// Replace the error classifier.
    pub fn with_classifier(mut self, classify: ErrorClassifier) -> Self {
        self.classify = classify;
        self
    }

    fn map_failure(&self, failure: TransactionFailure) -> UserPersistenceError {
        match failure {
            TransactionFailure::Boundary(error) => {
                debug!(error = %error, "transaction boundary failed");
                UserPersistenceError::transaction(store_message(&error))
            }
            TransactionFailure::Statement(error) => {
                let kind = (self.classify)(&error);
                debug!(?kind, error = %error, "diesel operation failed");
                let message = store_message(&error);
                match kind {
                    StoreErrorKind::UniqueViolation => {
                        UserPersistenceError::unique_constraint_violation(message)
                    }
                    StoreErrorKind::ForeignKeyViolation => {
                        UserPersistenceError::user_not_found(message)
                    }
                    StoreErrorKind::ConnectionLost | StoreErrorKind::Unrecognised => {
                        UserPersistenceError::unclassified(message)
                    }
                }
            }
        }
    }
}

/// Failure raised while running a repository transaction.
#[derive(Debug)]
enum TransactionFailure {
    /// The statement failed and the transaction was rolled back.
    Statement(diesel::result::Error),
    /// `BEGIN`, `COMMIT` or `ROLLBACK` failed.
    Boundary(diesel::result::Error),
}

impl From<diesel::result::Error> for TransactionFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Boundary(error)
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::transaction(message)
        }
    }
}

fn row_to_user(row: UserRow) -> User {
    let UserRow {
        id,
        username,
        email,
    } = row;
    User::from_store_row(id, username, email)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_new_user(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: user.username().as_ref(),
            email: user.email().as_ref(),
        };

        let id = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(users::table)
                        .values(&row)
                        .returning(users::id)
                        .get_result::<i32>(conn)
                        .await
                        .map_err(TransactionFailure::Statement)
                }
                .scope_boxed()
            })
            .await
            .map_err(|failure| self.map_failure(failure))?;

        debug!(user_id = id, "user inserted");
        Ok(UserId::new(id))
    }

    async fn get_all_users(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction(|conn| {
                async move {
                    users::table
                        .left_join(user_deletes::table)
                        .filter(user_deletes::user_id.nullable().is_null())
                        .select(UserRow::as_select())
                        .load::<UserRow>(conn)
                        .await
                        .map_err(TransactionFailure::Statement)
                }
                .scope_boxed()
            })
            .await
            .map_err(|failure| self.map_failure(failure))?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn soft_delete_user(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let tombstone = NewUserDeleteRow { user_id: id.get() };

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(user_deletes::table)
                    .values(&tombstone)
                    .execute(conn)
                    .await
                    .map_err(TransactionFailure::Statement)
            }
            .scope_boxed()
        })
        .await
        .map_err(|failure| self.map_failure(failure))?;

        debug!(user_id = id.get(), "user soft-deleted");
        Ok(())
    }
}
