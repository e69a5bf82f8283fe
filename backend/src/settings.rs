//! Service configuration loaded via OrthoConfig.
//!
//! Keys are read unprefixed from the environment (for example `APP_PORT` or
//! `POSTGRES_DB`), from matching CLI flags, or from a configuration file.
//! Every key is optional; accessors supply the defaults.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_APP_PORT: u16 = 8080;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_POSTGRES_USER: &str = "postgres";
const DEFAULT_POSTGRES_PASSWORD: &str = "postgres";
const DEFAULT_POSTGRES_DB: &str = "golang_db";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Running mode selecting the in-network database port.
pub const DOCKER_RUNNING_MODE: &str = "docker";

/// Configuration values for the HTTP server and its database connection.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
pub struct AppSettings {
    /// HTTP listen port.
    pub app_port: Option<u16>,
    /// Database host name.
    pub db_host: Option<String>,
    /// `docker` selects `internal_db_port`; anything else the external one.
    pub running_mode: Option<String>,
    pub internal_db_port: Option<u16>,
    pub external_db_port: Option<u16>,
    pub postgres_user: Option<String>,
    pub postgres_password: Option<String>,
    pub postgres_db: Option<String>,
    /// Maximum number of pooled database connections.
    pub db_pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Port the HTTP server listens on.
    pub fn app_port(&self) -> u16 {
        self.app_port.unwrap_or(DEFAULT_APP_PORT)
    }

    /// Socket address the HTTP server binds, on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.app_port()))
    }

    pub fn db_host(&self) -> &str {
        self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST)
    }

    /// Database port chosen by the running mode.
    pub fn db_port(&self) -> u16 {
        let port = if self.running_mode.as_deref() == Some(DOCKER_RUNNING_MODE) {
            self.internal_db_port
        } else {
            self.external_db_port
        };
        port.unwrap_or(DEFAULT_DB_PORT)
    }

    pub fn postgres_user(&self) -> &str {
        self.postgres_user.as_deref().unwrap_or(DEFAULT_POSTGRES_USER)
    }

    pub fn postgres_db(&self) -> &str {
        self.postgres_db.as_deref().unwrap_or(DEFAULT_POSTGRES_DB)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.db_pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Key/value connection descriptor for the configured database.
    ///
    /// # Examples
    /// ```
    /// use user_registry::settings::AppSettings;
    ///
    /// let settings = AppSettings::default();
    /// assert_eq!(
    ///     settings.database_dsn(),
    ///     "user=postgres password=postgres dbname=golang_db port=5432 host=localhost sslmode=disable"
    /// );
    /// ```
    pub fn database_dsn(&self) -> String {
        self.render_dsn(
            self.postgres_password
                .as_deref()
                .unwrap_or(DEFAULT_POSTGRES_PASSWORD),
        )
    }

    /// [`Self::database_dsn`] with the password masked, safe for logs.
    pub fn redacted_dsn(&self) -> String {
        self.render_dsn("********")
    }

    fn render_dsn(&self, password: &str) -> String {
        format!(
            "user={} password={} dbname={} port={} host={} sslmode=disable",
            self.postgres_user(),
            password,
            self.postgres_db(),
            self.db_port(),
            self.db_host(),
        )
    }
}
