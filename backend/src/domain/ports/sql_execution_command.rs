//! Driving port for raw SQL execution.
//!
//! Callers are trusted: statements run verbatim with no whitelisting or
//! parameter binding.

use async_trait::async_trait;

use crate::domain::{Error, ExecutionResult, SqlExecutionRequest};

/// Executes caller-supplied statements and shapes the outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SqlExecutionCommand: Send + Sync {
    /// Run the statement against the requested database.
    async fn execute(&self, request: &SqlExecutionRequest) -> Result<ExecutionResult, Error>;
}
