//! Raw SQL statements submitted by trusted callers.
//!
//! Statements are executed verbatim. The only inspection performed is the
//! leading keyword, which decides whether the caller gets rows back or an
//! affected-row count.

use std::fmt;

use super::USER_MANAGEMENT_DATABASE;

/// Leading keywords whose statements produce a result table.
const TABULAR_KEYWORDS: [&str; 3] = ["SELECT", "SHOW", "DESCRIBE"];

/// Shape of the outcome a statement is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Produces columns and rows.
    Tabular,
    /// Produces an affected-row count.
    Affected,
}

impl StatementKind {
    /// Classify statement text by its leading keyword.
    ///
    /// A statement is tabular when, after trimming leading whitespace, it
    /// starts with one of the tabular keywords in any letter case. This is a
    /// plain prefix test, so `SELECTION` counts as tabular while `DESC` does
    /// not.
    ///
    /// # Examples
    /// ```
    /// use user_gateway::domain::StatementKind;
    ///
    /// assert_eq!(StatementKind::classify("  show tables"), StatementKind::Tabular);
    /// assert_eq!(StatementKind::classify("DELETE FROM users"), StatementKind::Affected);
    /// ```
    #[must_use]
    pub fn classify(statement: &str) -> Self {
        let trimmed = statement.trim_start();
        let starts_with = |keyword: &&str| {
            trimmed
                .get(..keyword.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
        };
        if TABULAR_KEYWORDS.iter().any(starts_with) {
            Self::Tabular
        } else {
            Self::Affected
        }
    }
}

/// A statement paired with its classification.
///
/// # Examples
/// ```
/// use user_gateway::domain::{SqlStatement, StatementKind};
///
/// let statement = SqlStatement::new("SELECT 1");
/// assert_eq!(statement.kind(), StatementKind::Tabular);
/// assert_eq!(statement.as_str(), "SELECT 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    text: String,
    kind: StatementKind,
}

impl SqlStatement {
    /// Wrap raw statement text without altering it.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = StatementKind::classify(&text);
        Self { text, kind }
    }

    /// Statement text exactly as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Expected outcome shape.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }
}

/// A statement and the database it runs against.
///
/// # Examples
/// ```
/// use user_gateway::domain::SqlExecutionRequest;
///
/// let request = SqlExecutionRequest::new("SHOW TABLES", None);
/// assert_eq!(request.database(), "user_management");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlExecutionRequest {
    statement: SqlStatement,
    database: String,
}

impl SqlExecutionRequest {
    /// Target `database`, or the user management database when omitted.
    pub fn new(statement: impl Into<String>, database: Option<String>) -> Self {
        Self {
            statement: SqlStatement::new(statement),
            database: database.unwrap_or_else(|| USER_MANAGEMENT_DATABASE.to_owned()),
        }
    }

    /// Statement to execute.
    #[must_use]
    pub const fn statement(&self) -> &SqlStatement {
        &self.statement
    }

    /// Database selected for the session.
    #[must_use]
    pub fn database(&self) -> &str {
        self.database.as_str()
    }
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SELECT 1")]
    #[case("select * from users")]
    #[case("   \n\tSelect user_id FROM users")]
    #[case("SHOW DATABASES")]
    #[case("show tables")]
    #[case("DESCRIBE users")]
    #[case("describe\tbalances")]
    #[case("SELECT*FROM users")]
    #[case("SELECTION")]
    #[case("showcase")]
    fn statements_led_by_tabular_keywords_are_tabular(#[case] statement: &str) {
        assert_eq!(StatementKind::classify(statement), StatementKind::Tabular);
    }

    #[rstest]
    #[case("INSERT INTO users (username) VALUES ('a')")]
    #[case("UPDATE balances SET balance = 0")]
    #[case("DELETE FROM users")]
    #[case("CREATE TABLE t (id INT)")]
    #[case("CALL UpdateBalance('a', 'b', 1.0)")]
    #[case("DESC users")]
    #[case("WITH x AS (SELECT 1) SELECT * FROM x")]
    #[case("(SELECT 1)")]
    #[case("SELEC 1")]
    #[case("é SELECT 1")]
    #[case("")]
    #[case("   ")]
    fn other_statements_report_affected_rows(#[case] statement: &str) {
        assert_eq!(StatementKind::classify(statement), StatementKind::Affected);
    }

    #[rstest]
    #[case(None, "user_management")]
    #[case(Some("inventory".to_owned()), "inventory")]
    fn execution_request_defaults_database(
        #[case] database: Option<String>,
        #[case] expected: &str,
    ) {
        let request = SqlExecutionRequest::new("SELECT 1", database);
        assert_eq!(request.database(), expected);
        assert_eq!(request.statement().kind(), StatementKind::Tabular);
    }

    #[rstest]
    fn statement_text_is_kept_verbatim() {
        let raw = "  SELECT 'x'  ; ";
        let statement = SqlStatement::new(raw);
        assert_eq!(statement.as_str(), raw);
        assert_eq!(statement.to_string(), raw);
    }
}
