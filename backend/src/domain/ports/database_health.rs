//! Driving port for the database liveness probe.

use async_trait::async_trait;

use crate::domain::Error;

/// Checks that the database server accepts connections and statements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Succeed when a trivial statement round-trips through a fresh session.
    async fn check(&self) -> Result<(), Error>;
}
