//! Domain primitives, aggregates, and ports.
//!
//! Purpose: define the strongly typed user model, the transport agnostic
//! error payload, and the store health model shared by inbound and outbound
//! adapters. Types keep their invariants in constructors and document their
//! serialisation contracts in Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: stable failure payload for adapters.
//! - `User`, `NewUser`, `UserId`, `Username`, `EmailAddress`: the user model.
//! - `HealthReport`, `HealthStatus`, `PoolStatistics`: store health snapshot.
//! - `UserDirectoryService`: driving-port implementation over a repository.
//! - `TraceId`: request-scoped correlation identifier.

pub mod error;
pub mod health;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::error::{Error, ErrorCode};
pub use self::health::{HealthReport, HealthStatus, PoolStatistics, assess_load};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, NewUser, User, UserId, UserValidationError, Username};
pub use self::user_directory_service::UserDirectoryService;
