//! Gateway use-cases composed over the SQL connector port.
//!
//! Each operation opens a fresh session, does its work and closes the
//! session before returning, whatever the outcome. Driver messages are passed
//! through to callers verbatim.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tracing::{debug, error, warn};

use super::ports::{
    DatabaseHealth, SqlConnector, SqlExecutionCommand, SqlSession, SqlSessionError,
    UserAccountsCommand, UsersQuery,
};
use super::{
    BalanceUpsert, Error, ExecutionResult, LIST_USERS_QUERY, SqlExecutionRequest, StatementKind,
    StatementOutcome, USER_MANAGEMENT_DATABASE, UserRecord,
};

/// Statement used by the liveness probe.
pub const LIVENESS_QUERY: &str = "SELECT 1";

/// Implements every driving port on top of a [`SqlConnector`].
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use user_gateway::domain::GatewayService;
/// use user_gateway::outbound::persistence::{ConnectionSettings, MySqlConnector};
///
/// let connector = MySqlConnector::new(ConnectionSettings::default());
/// let service = GatewayService::new(Arc::new(connector));
/// ```
#[derive(Clone)]
pub struct GatewayService {
    connector: Arc<dyn SqlConnector>,
}

impl GatewayService {
    /// Build the service over `connector`.
    #[must_use]
    pub fn new(connector: Arc<dyn SqlConnector>) -> Self {
        Self { connector }
    }

    /// Run `work` inside a freshly opened session.
    ///
    /// The session is closed exactly once after `work` completes, on success
    /// and failure alike. A failed close is logged and does not mask the
    /// outcome of `work`.
    async fn with_session<T, F>(&self, database: Option<&str>, work: F) -> Result<T, SqlSessionError>
    where
        T: Send,
        F: for<'s> FnOnce(
                &'s mut (dyn SqlSession + 'static),
            ) -> BoxFuture<'s, Result<T, SqlSessionError>>
            + Send,
    {
        let target = database.unwrap_or("<server>");
        let mut session = self.connector.connect(database).await?;
        debug!(database = target, "database session opened");

        let outcome = work(session.as_mut()).await;

        match session.close().await {
            Ok(()) => debug!(database = target, "database session closed"),
            Err(error) => warn!(database = target, %error, "database session close failed"),
        }
        outcome
    }
}

fn operation_failed(error: &SqlSessionError) -> Error {
    Error::operation_failed(error.to_string())
}

#[async_trait]
impl DatabaseHealth for GatewayService {
    async fn check(&self) -> Result<(), Error> {
        self.with_session(None, |session| {
            Box::pin(async move { session.fetch_table(LIVENESS_QUERY).await.map(drop) })
        })
        .await
        .map_err(|error| {
            warn!(%error, "database health check failed");
            Error::service_unavailable(format!("Database connection failed: {error}"))
        })
    }
}

#[async_trait]
impl UserAccountsCommand for GatewayService {
    async fn upsert_balance(&self, request: &BalanceUpsert) -> Result<String, Error> {
        let call = request.procedure_call();
        self.with_session(Some(USER_MANAGEMENT_DATABASE), move |session| {
            Box::pin(async move { session.call_procedure(&call).await })
        })
        .await
        .map_err(|error| {
            warn!(%error, username = request.username(), "balance upsert failed");
            operation_failed(&error)
        })?;
        Ok(request.confirmation())
    }
}

#[async_trait]
impl UsersQuery for GatewayService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        let table = self
            .with_session(Some(USER_MANAGEMENT_DATABASE), |session| {
                Box::pin(async move { session.fetch_table(LIST_USERS_QUERY).await })
            })
            .await
            .map_err(|error| {
                warn!(%error, "user listing failed");
                operation_failed(&error)
            })?;

        table
            .into_records()
            .into_iter()
            .map(UserRecord::from_columns)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                error!(error = %err, "users row does not match the listing columns");
                Error::internal(format!("unexpected users row: {err}"))
            })
    }
}

#[async_trait]
impl SqlExecutionCommand for GatewayService {
    async fn execute(&self, request: &SqlExecutionRequest) -> Result<ExecutionResult, Error> {
        let statement = request.statement().clone();
        debug!(database = request.database(), %statement, "executing raw statement");
        let outcome = self
            .with_session(Some(request.database()), move |session| {
                Box::pin(async move {
                    match statement.kind() {
                        StatementKind::Tabular => session
                            .fetch_table(statement.as_str())
                            .await
                            .map(StatementOutcome::Rows),
                        StatementKind::Affected => session
                            .execute(statement.as_str())
                            .await
                            .map(StatementOutcome::RowsAffected),
                    }
                })
            })
            .await
            .map_err(|error| {
                warn!(%error, database = request.database(), "raw statement failed");
                operation_failed(&error)
            })?;
        Ok(ExecutionResult::from(outcome))
    }
}

#[cfg(test)]
mod tests;
