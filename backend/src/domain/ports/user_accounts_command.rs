//! Driving port for account mutations.
//!
//! HTTP handlers call this port to create users and set balances without
//! knowing that the work happens inside a stored procedure.

use async_trait::async_trait;

use crate::domain::{BalanceUpsert, Error};

/// Create-or-update use-case for user balances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Create the user if absent and set its balance; returns the
    /// confirmation message.
    async fn upsert_balance(&self, request: &BalanceUpsert) -> Result<String, Error>;
}
