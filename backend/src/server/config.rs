//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use user_registry::outbound::persistence::DbPool;

/// Idle keep-alive window for client connections.
pub const KEEP_ALIVE: Duration = Duration::from_secs(60);
/// Deadline for a client to send its request head.
pub const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) keep_alive: Duration,
    pub(crate) client_request_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration over an injected connection pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            keep_alive: KEEP_ALIVE,
            client_request_timeout: CLIENT_REQUEST_TIMEOUT,
        }
    }

    /// Override the keep-alive window.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Production uses the default keep-alive")
    )]
    #[must_use]
    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Read back by configuration tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use user_registry::outbound::persistence::PoolConfig;

    #[rstest]
    #[tokio::test]
    async fn defaults_follow_server_timeouts() {
        let pool = DbPool::connect_lazy(
            PoolConfig::new("host=127.0.0.1 port=1 dbname=none").with_min_idle(None),
        );
        let addr: SocketAddr = "127.0.0.1:8080".parse().expect("socket address");
        let config = ServerConfig::new(addr, pool).with_keep_alive(Duration::from_secs(5));

        assert_eq!(config.bind_addr(), addr);
        assert_eq!(config.keep_alive, Duration::from_secs(5));
        assert_eq!(config.client_request_timeout, CLIENT_REQUEST_TIMEOUT);
    }
}
