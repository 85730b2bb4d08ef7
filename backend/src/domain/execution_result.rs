//! Uniform result envelope for executed statements.
//!
//! Statements either yield a table (columns plus rows) or an affected-row
//! count. [`ExecutionResult`] keeps the two apart so callers match
//! exhaustively instead of probing optional fields.

use serde_json::Value;

/// Columns and rows materialised from a read-shaped statement.
///
/// ## Invariants
/// - Column order follows the statement projection.
/// - Row order follows the order the engine returned them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Build a table from engine metadata and rows.
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Column names in projection order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in engine order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Split the table into its columns and rows.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }

    /// Pair every row with the column names.
    ///
    /// Cells beyond the last named column are dropped; missing cells are
    /// absent from the resulting object.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use user_gateway::domain::ResultTable;
    ///
    /// let table = ResultTable::new(
    ///     vec!["user_id".into(), "username".into()],
    ///     vec![vec![json!(1), json!("alice")]],
    /// );
    /// let records = table.into_records();
    /// assert_eq!(records[0]["username"], json!("alice"));
    /// ```
    #[must_use]
    pub fn into_records(self) -> Vec<serde_json::Map<String, Value>> {
        let Self { columns, rows } = self;
        rows.into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }
}

/// Raw outcome reported by the database for one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    /// The statement returned a result table.
    Rows(ResultTable),
    /// The statement modified rows; the count is driver defined for DDL.
    RowsAffected(u64),
}

/// Response shape for an executed statement.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use user_gateway::domain::{ExecutionResult, ResultTable, StatementOutcome};
///
/// let table = ResultTable::new(vec!["1".into()], vec![vec![json!(1)]]);
/// let result = ExecutionResult::from(StatementOutcome::Rows(table));
/// match result {
///     ExecutionResult::Tabular(table) => assert_eq!(table.rows().len(), 1),
///     ExecutionResult::Affected { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// Columns and rows for read-shaped statements.
    Tabular(ResultTable),
    /// Affected-row count for everything else.
    Affected {
        /// Rows modified as reported by the engine.
        affected_rows: u64,
    },
}

impl ExecutionResult {
    /// Number of rows in a tabular result; `None` for affected counts.
    #[must_use]
    pub fn row_count(&self) -> Option<usize> {
        match self {
            Self::Tabular(table) => Some(table.rows().len()),
            Self::Affected { .. } => None,
        }
    }
}

impl From<StatementOutcome> for ExecutionResult {
    fn from(outcome: StatementOutcome) -> Self {
        match outcome {
            StatementOutcome::Rows(table) => Self::Tabular(table),
            StatementOutcome::RowsAffected(affected_rows) => Self::Affected { affected_rows },
        }
    }
}
