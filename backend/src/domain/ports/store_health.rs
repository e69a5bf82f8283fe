//! Port for probing the backing store's health.

use async_trait::async_trait;

use crate::domain::{HealthReport, PoolStatistics};

/// Liveness probe against the backing store.
///
/// Implementations never fail: an unreachable store is reported as a
/// [`HealthReport`] with status `down`.
#[async_trait]
pub trait StoreHealthProbe: Send + Sync {
    /// Ping the store and snapshot the connection pool counters.
    async fn check(&self) -> HealthReport;
}

/// Probe that always reports a quiet, reachable store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreHealthProbe;

#[async_trait]
impl StoreHealthProbe for FixtureStoreHealthProbe {
    async fn check(&self) -> HealthReport {
        HealthReport::up(PoolStatistics::default())
    }
}
