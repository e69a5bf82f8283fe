//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of domain ports backed by PostgreSQL via Diesel,
//! with async support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Injected pool**: [`DbPool`] is an owned handle passed to adapters, so
//!   tests and the server can each build their own.
//! - **Pluggable classification**: store errors are interpreted by an
//!   [`ErrorClassifier`] before becoming domain persistence errors.
//!
//! # Example
//!
//! ```ignore
//! use user_registry::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod error_classifier;
mod models;
mod pool;
mod pool_health;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use error_classifier::{ErrorClassifier, StoreErrorKind, classify_postgres_error};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use pool_health::HEALTH_PROBE_TIMEOUT;
