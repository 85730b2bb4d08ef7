//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::json;

use crate::domain::ports::{SqlConnector, SqlSession, SqlSessionError};
use crate::domain::{
    LIST_USERS_QUERY, LIVENESS_QUERY, ProcedureArg, ProcedureCall, ResultTable,
    UPSERT_BALANCE_PROCEDURE,
};

/// Message reported when the double refuses connections.
pub const REFUSED_MESSAGE: &str = "Can't connect to MySQL server on '127.0.0.1' (111)";

const CREATED_AT: &str = "2024-05-01T09:30:00";

#[derive(Debug, Clone)]
struct StoredUser {
    user_id: i64,
    username: String,
    balance: Option<f64>,
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<StoredUser>,
    tables: HashMap<String, ResultTable>,
    affected: HashMap<String, u64>,
    failures: HashMap<String, String>,
    databases: Vec<Option<String>>,
    statements: Vec<String>,
}

#[derive(Debug, Default)]
struct Shared {
    refuse: bool,
    opened: AtomicUsize,
    closed: AtomicUsize,
    store: Mutex<Store>,
}

impl Shared {
    fn store(&self) -> MutexGuard<'_, Store> {
        // A poisoned lock only means another test thread panicked mid-update.
        self.store
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// In-memory [`SqlConnector`] emulating the user management database.
///
/// Understands the liveness query, the user listing and the
/// `UpdateBalance` procedure. Other statements answer with tables, counts or
/// failures registered up front; a registered table also replaces the
/// built-in answer for the same statement. Every opened and closed session is counted.
///
/// # Examples
/// ```
/// use user_gateway::test_support::InMemoryConnector;
///
/// let connector = InMemoryConnector::new();
/// assert_eq!(connector.opened_sessions(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    shared: Arc<Shared>,
}

impl InMemoryConnector {
    /// Connector with an empty `users` table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector whose every connection attempt fails.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            shared: Arc::new(Shared {
                refuse: true,
                ..Shared::default()
            }),
        }
    }

    /// Insert a user that has no balance row.
    #[must_use]
    pub fn with_user_without_balance(self, username: &str) -> Self {
        {
            let mut store = self.shared.store();
            let user_id = next_user_id(&store.users);
            store.users.push(StoredUser {
                user_id,
                username: username.to_owned(),
                balance: None,
            });
        }
        self
    }

    /// Answer `statement` with `table`.
    #[must_use]
    pub fn with_table(self, statement: &str, table: ResultTable) -> Self {
        self.shared.store().tables.insert(statement.to_owned(), table);
        self
    }

    /// Answer `statement` with an affected-row count.
    #[must_use]
    pub fn with_affected(self, statement: &str, count: u64) -> Self {
        self.shared.store().affected.insert(statement.to_owned(), count);
        self
    }

    /// Fail `statement` with `message`.
    #[must_use]
    pub fn with_failure(self, statement: &str, message: &str) -> Self {
        self.shared
            .store()
            .failures
            .insert(statement.to_owned(), message.to_owned());
        self
    }

    /// Sessions opened so far.
    #[must_use]
    pub fn opened_sessions(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    /// Sessions closed so far.
    #[must_use]
    pub fn closed_sessions(&self) -> usize {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Database selected by each opened session, in order.
    #[must_use]
    pub fn selected_databases(&self) -> Vec<Option<String>> {
        self.shared.store().databases.clone()
    }

    /// Statements and procedure calls received, in order.
    #[must_use]
    pub fn received_statements(&self) -> Vec<String> {
        self.shared.store().statements.clone()
    }
}

fn next_user_id(users: &[StoredUser]) -> i64 {
    users.iter().map(|user| user.user_id).max().unwrap_or(0) + 1
}

#[async_trait]
impl SqlConnector for InMemoryConnector {
    async fn connect(
        &self,
        database: Option<&str>,
    ) -> Result<Box<dyn SqlSession>, SqlSessionError> {
        if self.shared.refuse {
            return Err(SqlSessionError::connection(REFUSED_MESSAGE));
        }
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        self.shared
            .store()
            .databases
            .push(database.map(str::to_owned));
        Ok(Box::new(InMemorySession {
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct InMemorySession {
    shared: Arc<Shared>,
}

impl InMemorySession {
    fn record(&self, statement: &str) -> Result<(), SqlSessionError> {
        let mut store = self.shared.store();
        store.statements.push(statement.to_owned());
        match store.failures.get(statement) {
            Some(message) => Err(SqlSessionError::execution(message.clone())),
            None => Ok(()),
        }
    }

    fn user_listing(&self) -> ResultTable {
        let store = self.shared.store();
        let mut users = store.users.clone();
        users.sort_by_key(|user| user.user_id);
        let rows = users
            .into_iter()
            .map(|user| {
                vec![
                    json!(user.user_id),
                    json!(user.username),
                    json!(user.balance.unwrap_or(0.0)),
                    json!(CREATED_AT),
                ]
            })
            .collect();
        ResultTable::new(
            ["user_id", "username", "balance", "created_at"]
                .map(str::to_owned)
                .to_vec(),
            rows,
        )
    }

    fn upsert_balance(&self, call: &ProcedureCall) -> Result<(), SqlSessionError> {
        let [
            ProcedureArg::Text(username),
            ProcedureArg::Secret(_),
            ProcedureArg::Decimal(balance),
        ] = call.args()
        else {
            return Err(SqlSessionError::execution(format!(
                "Incorrect number of arguments for PROCEDURE user_management.{}",
                call.name()
            )));
        };
        let mut store = self.shared.store();
        if let Some(user) = store
            .users
            .iter_mut()
            .find(|user| &user.username == username)
        {
            user.balance = Some(*balance);
            return Ok(());
        }
        let user_id = next_user_id(&store.users);
        store.users.push(StoredUser {
            user_id,
            username: username.clone(),
            balance: Some(*balance),
        });
        Ok(())
    }
}

#[async_trait]
impl SqlSession for InMemorySession {
    async fn fetch_table(&mut self, statement: &str) -> Result<ResultTable, SqlSessionError> {
        self.record(statement)?;
        let registered = self.shared.store().tables.get(statement).cloned();
        if let Some(table) = registered {
            return Ok(table);
        }
        if statement == LIVENESS_QUERY {
            return Ok(ResultTable::new(vec!["1".to_owned()], vec![vec![json!(1)]]));
        }
        if statement == LIST_USERS_QUERY {
            return Ok(self.user_listing());
        }
        Err(SqlSessionError::execution(format!(
            "You have an error in your SQL syntax near '{statement}'"
        )))
    }

    async fn execute(&mut self, statement: &str) -> Result<u64, SqlSessionError> {
        self.record(statement)?;
        Ok(self
            .shared
            .store()
            .affected
            .get(statement)
            .copied()
            .unwrap_or(0))
    }

    async fn call_procedure(&mut self, call: &ProcedureCall) -> Result<(), SqlSessionError> {
        self.record(&call.placeholder_sql())?;
        if call.name() == UPSERT_BALANCE_PROCEDURE {
            self.upsert_balance(call)
        } else {
            Err(SqlSessionError::execution(format!(
                "PROCEDURE user_management.{} does not exist",
                call.name()
            )))
        }
    }

    async fn close(self: Box<Self>) -> Result<(), SqlSessionError> {
        self.shared.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Parse the timestamp the double reports for every user.
#[must_use]
pub fn fixture_created_at() -> Option<NaiveDateTime> {
    CREATED_AT.parse().ok()
}

