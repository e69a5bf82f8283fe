//! Store health snapshot and load heuristics.
//!
//! A [`HealthReport`] pairs the outcome of a liveness probe against the store
//! with a snapshot of connection pool counters. When the store is reachable
//! the counters are run through [`assess_load`] to pick a qualitative
//! message.

use std::time::Duration;

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

/// Message reported when no load heuristic trips.
pub const HEALTHY_MESSAGE: &str = "It's healthy";
/// Message reported when too many connections are open.
pub const HEAVY_LOAD_MESSAGE: &str = "The database is experiencing heavy load.";
/// Message reported when callers have waited on the pool too often.
pub const BOTTLENECK_MESSAGE: &str =
    "The database has a high number of wait events, indicating potential bottlenecks.";
/// Message reported when idle connections are reaped faster than they are used.
pub const IDLE_CLOSED_MESSAGE: &str =
    "Many idle connections are being closed, consider revising the connection pool settings.";
/// Message reported when connections keep hitting their maximum lifetime.
pub const LIFETIME_CLOSED_MESSAGE: &str = "Many connections are being closed due to max lifetime, consider increasing max lifetime or revising the connection usage pattern.";

/// Open connection count above which the store is considered heavily loaded.
pub const HEAVY_LOAD_OPEN_CONNECTIONS: u32 = 40;
/// Wait event count above which the pool is considered a bottleneck.
pub const BOTTLENECK_WAIT_COUNT: u64 = 1000;

/// Outcome of the liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Snapshot of connection pool counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PoolStatistics {
    /// Connections currently held by the pool, busy or idle.
    pub open_connections: u32,
    /// Connections checked out by callers.
    pub in_use: u32,
    /// Connections parked in the pool.
    pub idle: u32,
    /// Checkouts that had to wait for a connection.
    pub wait_count: u64,
    /// Total time spent waiting for connections.
    #[serde(serialize_with = "serialize_duration")]
    #[schema(value_type = String, example = "1.5ms")]
    pub wait_duration: Duration,
    /// Connections closed because they sat idle too long.
    pub max_idle_closed: u64,
    /// Connections closed because they reached their maximum lifetime.
    pub max_lifetime_closed: u64,
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&format_args!("{duration:?}"))
}

/// Pick the qualitative load message for a reachable store.
///
/// The heuristics are checked in order and the last one that trips wins.
///
/// # Examples
/// ```
/// use user_registry::domain::{PoolStatistics, assess_load};
/// use user_registry::domain::health::{HEALTHY_MESSAGE, HEAVY_LOAD_MESSAGE};
///
/// let quiet = PoolStatistics { open_connections: 2, idle: 2, ..Default::default() };
/// assert_eq!(assess_load(&quiet), HEALTHY_MESSAGE);
///
/// let busy = PoolStatistics { open_connections: 41, in_use: 41, ..Default::default() };
/// assert_eq!(assess_load(&busy), HEAVY_LOAD_MESSAGE);
/// ```
pub fn assess_load(statistics: &PoolStatistics) -> &'static str {
    let half_open = u64::from(statistics.open_connections / 2);
    let mut message = HEALTHY_MESSAGE;

    if statistics.open_connections > HEAVY_LOAD_OPEN_CONNECTIONS {
        message = HEAVY_LOAD_MESSAGE;
    }
    if statistics.wait_count > BOTTLENECK_WAIT_COUNT {
        message = BOTTLENECK_MESSAGE;
    }
    if statistics.max_idle_closed > half_open {
        message = IDLE_CLOSED_MESSAGE;
    }
    if statistics.max_lifetime_closed > half_open {
        message = LIFETIME_CLOSED_MESSAGE;
    }

    message
}

/// Result of a store health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthReport {
    #[schema(example = "up")]
    status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "It's healthy")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    statistics: PoolStatistics,
}

impl HealthReport {
    /// Report a reachable store, deriving the message from the counters.
    pub fn up(statistics: PoolStatistics) -> Self {
        Self {
            status: HealthStatus::Up,
            message: Some(assess_load(&statistics).to_owned()),
            error: None,
            statistics,
        }
    }

    /// Report an unreachable store.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::{HealthReport, HealthStatus, PoolStatistics};
    ///
    /// let report = HealthReport::down("connection refused", PoolStatistics::default());
    /// assert_eq!(report.status(), HealthStatus::Down);
    /// assert_eq!(report.error(), Some("db down: connection refused"));
    /// ```
    pub fn down(cause: impl std::fmt::Display, statistics: PoolStatistics) -> Self {
        Self {
            status: HealthStatus::Down,
            message: None,
            error: Some(format!("db down: {cause}")),
            statistics,
        }
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn statistics(&self) -> &PoolStatistics {
        &self.statistics
    }
}
