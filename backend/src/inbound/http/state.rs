//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::GatewayService;
use crate::domain::ports::{
    DatabaseHealth, SqlExecutionCommand, UserAccountsCommand, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub health: Arc<dyn DatabaseHealth>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub sql: Arc<dyn SqlExecutionCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub health: Arc<dyn DatabaseHealth>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub sql: Arc<dyn SqlExecutionCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl From<GatewayService> for HttpState {
    fn from(service: GatewayService) -> Self {
        let service = Arc::new(service);
        Self::new(HttpStatePorts {
            health: service.clone(),
            accounts: service.clone(),
            users: service.clone(),
            sql: service,
        })
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_gateway::domain::GatewayService;
    /// use user_gateway::inbound::http::state::{HttpState, HttpStatePorts};
    /// use user_gateway::test_support::InMemoryConnector;
    ///
    /// let service = Arc::new(GatewayService::new(Arc::new(InMemoryConnector::new())));
    /// let state = HttpState::new(HttpStatePorts {
    ///     health: service.clone(),
    ///     accounts: service.clone(),
    ///     users: service.clone(),
    ///     sql: service,
    /// });
    /// let _users = state.users.clone();
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            health,
            accounts,
            users,
            sql,
        } = ports;
        Self {
            health,
            accounts,
            users,
            sql,
        }
    }
}
