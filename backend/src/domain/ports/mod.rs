//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`DatabaseHealth`, `UserAccountsCommand`, `UsersQuery`,
//! `SqlExecutionCommand`) are called by inbound adapters. The driven port
//! `SqlConnector` is implemented by the persistence adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod database_health;
mod sql_connector;
mod sql_execution_command;
mod user_accounts_command;
mod users_query;

pub use database_health::DatabaseHealth;
#[cfg(test)]
pub use database_health::MockDatabaseHealth;
pub use sql_connector::{SqlConnector, SqlSession, SqlSessionError};
pub use sql_execution_command::SqlExecutionCommand;
#[cfg(test)]
pub use sql_execution_command::MockSqlExecutionCommand;
pub use user_accounts_command::UserAccountsCommand;
#[cfg(test)]
pub use user_accounts_command::MockUserAccountsCommand;
pub use users_query::UsersQuery;
#[cfg(test)]
pub use users_query::MockUsersQuery;
