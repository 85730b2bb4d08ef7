//! One-connection-per-operation MySQL adapter built on `sqlx`.
//!
//! Each [`MySqlConnector::connect`] call opens a dedicated connection that is
//! never pooled. Raw statements use the text protocol so arbitrary SQL,
//! including statements the server cannot prepare, runs unchanged. Procedure
//! calls are prepared so their arguments are bound rather than interpolated.

use std::fmt;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Connection, Either, Executor, MySql, Row, TypeInfo};
use tracing::debug;

use super::mysql_values::text_cell_to_json;
use crate::domain::ports::{SqlConnector, SqlSession, SqlSessionError};
use crate::domain::{ProcedureArg, ProcedureCall, ResultTable};

/// Credentials and address of the database server.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3306,
            user: "root".to_owned(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ConnectionSettings {
    /// Driver options, selecting `database` when given.
    #[must_use]
    pub fn connect_options(&self, database: Option<&str>) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password);
        match database {
            Some(name) => options.database(name),
            None => options,
        }
    }
}

/// [`SqlConnector`] opening a fresh MySQL connection per session.
///
/// # Examples
/// ```
/// use user_gateway::outbound::persistence::{ConnectionSettings, MySqlConnector};
///
/// let connector = MySqlConnector::new(ConnectionSettings::default());
/// assert_eq!(connector.settings().port, 3306);
/// ```
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    settings: ConnectionSettings,
}

impl MySqlConnector {
    /// Build a connector for `settings`.
    #[must_use]
    pub const fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }

    /// Settings the connector was built with.
    #[must_use]
    pub const fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Open a concrete session, for callers that need the adapter directly.
    ///
    /// # Errors
    /// Returns [`SqlSessionError::Connection`] with the driver message when
    /// the server is unreachable or rejects the credentials.
    pub async fn open(&self, database: Option<&str>) -> Result<MySqlSession, SqlSessionError> {
        debug!(
            host = %self.settings.host,
            port = self.settings.port,
            database = database.unwrap_or_default(),
            "opening database connection"
        );
        let connection = MySqlConnection::connect_with(&self.settings.connect_options(database))
            .await
            .map_err(|err| SqlSessionError::connection(driver_message(&err)))?;
        Ok(MySqlSession { connection })
    }
}

#[async_trait]
impl SqlConnector for MySqlConnector {
    async fn connect(
        &self,
        database: Option<&str>,
    ) -> Result<Box<dyn SqlSession>, SqlSessionError> {
        Ok(Box::new(self.open(database).await?))
    }
}

/// A single exclusively owned MySQL connection.
pub struct MySqlSession {
    connection: MySqlConnection,
}

/// Driver errors carry the server message verbatim for database errors.
fn driver_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_owned(),
        other => other.to_string(),
    }
}

fn execution_error(err: &sqlx::Error) -> SqlSessionError {
    SqlSessionError::execution(driver_message(err))
}

fn row_to_json(row: &MySqlRow) -> Result<Vec<serde_json::Value>, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| {
            let raw: Option<&[u8]> = row.try_get_unchecked(column.ordinal())?;
            Ok(text_cell_to_json(column.type_info().name(), raw))
        })
        .collect()
}

/// Rows of the first result set. The driver ends every result set with a
/// `Left` summary, so anything after the first one belongs to later
/// statements.
fn first_result_set<Q, R>(results: Vec<Either<Q, R>>) -> Vec<R> {
    results
        .into_iter()
        .map_while(|item| match item {
            Either::Right(row) => Some(row),
            Either::Left(_) => None,
        })
        .collect()
}

fn bind_arg<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    arg: &'q ProcedureArg,
) -> Query<'q, MySql, MySqlArguments> {
    match arg {
        ProcedureArg::Text(value) => query.bind(value.as_str()),
        ProcedureArg::Secret(value) => query.bind(value.as_str()),
        ProcedureArg::Decimal(value) => query.bind(*value),
    }
}

impl MySqlSession {
    /// Column names for a statement that produced no rows.
    async fn described_columns(&mut self, statement: &str) -> Vec<String> {
        match (&mut self.connection).describe(statement).await {
            Ok(described) => described
                .columns()
                .iter()
                .map(|column| column.name().to_owned())
                .collect(),
            Err(error) => {
                debug!(%error, "column metadata unavailable for empty result");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SqlSession for MySqlSession {
    /// Only the first result set is returned. Later statements in the same
    /// text still run, and their errors are still reported.
    async fn fetch_table(&mut self, statement: &str) -> Result<ResultTable, SqlSessionError> {
        let results: Vec<Either<_, MySqlRow>> = sqlx::raw_sql(statement)
            .fetch_many(&mut self.connection)
            .try_collect()
            .await
            .map_err(|err| execution_error(&err))?;
        let rows = first_result_set(results);

        let columns = match rows.first() {
            Some(first) => first
                .columns()
                .iter()
                .map(|column| column.name().to_owned())
                .collect(),
            None => self.described_columns(statement).await,
        };
        let values = rows
            .iter()
            .map(row_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| execution_error(&err))?;
        Ok(ResultTable::new(columns, values))
    }

    /// Sum of the server's affected-row counts. Rows returned by the
    /// statement are discarded and not counted, so `DESC t`, `WITH ... SELECT`
    /// or a row-returning `CALL` report `0`.
    async fn execute(&mut self, statement: &str) -> Result<u64, SqlSessionError> {
        let outcome = (&mut self.connection)
            .execute(sqlx::raw_sql(statement))
            .await
            .map_err(|err| execution_error(&err))?;
        Ok(outcome.rows_affected())
    }

    async fn call_procedure(&mut self, call: &ProcedureCall) -> Result<(), SqlSessionError> {
        let sql = call.placeholder_sql();
        let query = call
            .args()
            .iter()
            .fold(sqlx::query(&sql), |query, arg| bind_arg(query, arg));
        query
            .execute(&mut self.connection)
            .await
            .map_err(|err| execution_error(&err))?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), SqlSessionError> {
        let Self { connection } = *self;
        connection
            .close()
            .await
            .map_err(|err| SqlSessionError::connection(driver_message(&err)))
    }
}
