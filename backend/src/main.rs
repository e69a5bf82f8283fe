//! Service entry-point: loads settings, builds the pool and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_registry::inbound::http::health::HealthState;
use user_registry::outbound::persistence::{DbPool, PoolConfig};
use user_registry::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    info!(dsn = %settings.redacted_dsn(), "connecting to database");
    let pool = DbPool::connect_lazy(
        PoolConfig::new(settings.database_dsn()).with_max_size(settings.pool_max_size()),
    );

    let health_state = web::Data::new(HealthState::new(Arc::new(pool.clone())));
    let config = ServerConfig::new(settings.bind_addr(), pool);
    let server = create_server(health_state, config)?;
    server.await
}
