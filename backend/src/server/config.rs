//! HTTP server configuration object.

use std::sync::Arc;

use crate::domain::ports::SqlConnector;

/// Bind address and database connector used to build the HTTP server.
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) connector: Arc<dyn SqlConnector>,
}

impl ServerConfig {
    /// Construct a server configuration.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_gateway::server::ServerConfig;
    /// use user_gateway::test_support::InMemoryConnector;
    ///
    /// let config = ServerConfig::new("localhost", 9002, Arc::new(InMemoryConnector::new()));
    /// assert_eq!(config.bind_addr(), ("localhost", 9002));
    /// ```
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, connector: Arc<dyn SqlConnector>) -> Self {
        Self {
            host: host.into(),
            port,
            connector,
        }
    }

    /// Host and port the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// Base URL for log output.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
