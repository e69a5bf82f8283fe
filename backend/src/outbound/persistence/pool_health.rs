//! Store health probe backed by the Diesel connection pool.

use std::time::Duration;

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tokio::time::timeout;
use tracing::warn;

use crate::domain::HealthReport;
use crate::domain::ports::StoreHealthProbe;

use super::pool::DbPool;

/// Upper bound on a health probe, covering checkout and the ping itself.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

impl DbPool {
    async fn ping(&self) -> Result<(), String> {
        let mut conn = self.get().await.map_err(|err| err.to_string())?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|err| err.to_string())?;
        Ok(())
    }
}

#[async_trait]
impl StoreHealthProbe for DbPool {
    async fn check(&self) -> HealthReport {
        let outcome = timeout(HEALTH_PROBE_TIMEOUT, self.ping()).await;
        let statistics = self.statistics();
        match outcome {
            Ok(Ok(())) => HealthReport::up(statistics),
            Ok(Err(cause)) => {
                warn!(error = %cause, "store health probe failed");
                HealthReport::down(cause, statistics)
            }
            Err(_) => {
                warn!(timeout = ?HEALTH_PROBE_TIMEOUT, "store health probe timed out");
                HealthReport::down(
                    format!("no response within {HEALTH_PROBE_TIMEOUT:?}"),
                    statistics,
                )
            }
        }
    }
}
