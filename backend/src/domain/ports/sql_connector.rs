//! Driven port for opening database sessions.
//!
//! The gateway opens one session per operation and closes it before the
//! operation returns. Adapters never pool or reuse sessions.

use async_trait::async_trait;

use crate::domain::{ProcedureCall, ResultTable};

use super::define_port_error;

define_port_error! {
    /// Failures raised by database sessions.
    ///
    /// Messages are the driver's own and are passed to callers verbatim.
    pub enum SqlSessionError {
        /// The session could not be opened (network or authentication).
        Connection { message: String } => "{message}",
        /// A statement, procedure call or row conversion failed.
        Execution { message: String } => "{message}",
    }
}

/// Opens fresh sessions against the configured database server.
#[async_trait]
pub trait SqlConnector: Send + Sync {
    /// Open a session, selecting `database` when given.
    async fn connect(&self, database: Option<&str>)
    -> Result<Box<dyn SqlSession>, SqlSessionError>;
}

/// A live, exclusively owned database session.
#[async_trait]
pub trait SqlSession: Send {
    /// Run a read-shaped statement and materialise every row.
    ///
    /// Column names come from result metadata and are empty when the engine
    /// reports none.
    async fn fetch_table(&mut self, statement: &str) -> Result<ResultTable, SqlSessionError>;

    /// Run a statement and report the engine's affected-row count.
    async fn execute(&mut self, statement: &str) -> Result<u64, SqlSessionError>;

    /// Invoke a stored procedure with positional arguments.
    async fn call_procedure(&mut self, call: &ProcedureCall) -> Result<(), SqlSessionError>;

    /// Release the session.
    async fn close(self: Box<Self>) -> Result<(), SqlSessionError>;
}
