//! Driving port for the user listing.

use async_trait::async_trait;

use crate::domain::{Error, UserRecord};

/// Read-side use-case returning every user with its balance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Users ordered by identifier; missing balances read as zero.
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error>;
}
