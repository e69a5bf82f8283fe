//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for the user handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Bundle the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_registry::domain::UserDirectoryService;
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let pool = DbPool::connect_lazy(PoolConfig::new("host=localhost dbname=users"));
    /// let service = Arc::new(UserDirectoryService::new(Arc::new(DieselUserRepository::new(pool))));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// # }
    /// ```
    pub fn new(users_command: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self {
            users_command,
            users_query,
        }
    }
}
