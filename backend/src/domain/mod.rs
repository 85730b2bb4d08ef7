//! Domain primitives, ports and the gateway service.
//!
//! Purpose: describe statements, procedure calls and their outcomes without
//! reference to HTTP or a particular database driver. Inbound adapters call
//! the driving ports; the persistence adapter implements [`ports::SqlConnector`].
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - SqlStatement / StatementKind / SqlExecutionRequest: raw statement input.
//! - ExecutionResult / ResultTable: shaped statement outcome.
//! - BalanceUpsert / UserRecord: user-account operations.
//! - GatewayService: implements every driving port over a connector.

pub mod error;
pub mod execution_result;
pub mod gateway_service;
pub mod ports;
pub mod procedure_call;
pub mod sql_statement;
pub mod trace_id;
pub mod user_account;

pub use self::error::{Error, ErrorCode};
pub use self::execution_result::{ExecutionResult, ResultTable, StatementOutcome};
pub use self::gateway_service::{GatewayService, LIVENESS_QUERY};
pub use self::procedure_call::{ProcedureArg, ProcedureCall};
pub use self::sql_statement::{SqlExecutionRequest, SqlStatement, StatementKind};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_account::{
    BalanceUpsert, LIST_USERS_QUERY, UPSERT_BALANCE_PROCEDURE, USER_MANAGEMENT_DATABASE,
    UserAccountValidationError, UserRecord,
};

