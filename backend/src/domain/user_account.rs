//! User account requests and read models.
//!
//! Account persistence is owned by the database: creation and balance
//! updates go through the `UpdateBalance` procedure, and listing reads the
//! `users` and `balances` tables.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroizing;

use super::{ProcedureArg, ProcedureCall};

/// Database holding the `users` and `balances` tables.
pub const USER_MANAGEMENT_DATABASE: &str = "user_management";

/// Procedure that creates a user if absent and always sets its balance.
pub const UPSERT_BALANCE_PROCEDURE: &str = "UpdateBalance";

/// Every user joined with its balance, missing balances reported as zero.
pub const LIST_USERS_QUERY: &str = "SELECT u.user_id, u.username, \
    COALESCE(b.balance, 0.00) AS balance, u.created_at \
    FROM users u \
    LEFT JOIN balances b ON u.user_id = b.user_id \
    ORDER BY u.user_id";

/// Account payload rejected before any connection is opened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserAccountValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Request to create a user or update its balance.
///
/// ## Invariants
/// - `username` and `password` are non-empty strings, otherwise passed to
///   the procedure exactly as given. Whitespace is not trimmed and the
///   password is not hashed here.
///
/// # Examples
/// ```
/// use user_gateway::domain::BalanceUpsert;
///
/// let upsert = BalanceUpsert::try_from_parts("alice", "alicepass", 50.0).unwrap();
/// assert_eq!(
///     upsert.confirmation(),
///     "User 'alice' created/updated with balance $50.00"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceUpsert {
    username: String,
    password: Zeroizing<String>,
    balance: f64,
}

impl BalanceUpsert {
    /// Reject empty strings; every other value reaches the procedure as is.
    ///
    /// # Errors
    /// Returns [`UserAccountValidationError`] naming the empty field.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        balance: f64,
    ) -> Result<Self, UserAccountValidationError> {
        if username.is_empty() {
            return Err(UserAccountValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(UserAccountValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            balance,
        })
    }

    /// Username as submitted.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Requested balance.
    #[must_use]
    pub const fn balance(&self) -> f64 {
        self.balance
    }

    /// Procedure call with `(username, password, balance)` in that order.
    #[must_use]
    pub fn procedure_call(&self) -> ProcedureCall {
        ProcedureCall::new(UPSERT_BALANCE_PROCEDURE)
            .arg(ProcedureArg::Text(self.username.clone()))
            .arg(ProcedureArg::Secret(self.password.clone()))
            .arg(ProcedureArg::Decimal(self.balance))
    }

    /// Message reported once the procedure succeeds.
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!(
            "User '{}' created/updated with balance ${:.2}",
            self.username, self.balance
        )
    }
}

/// One row of the user listing.
///
/// ## Invariants
/// - `balance` is never absent: a missing or null balance reads as `0.0`.
/// - `created_at` is `None` when the stored value is null or is not a valid
///   calendar timestamp, such as the MySQL zero date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    user_id: i64,
    username: String,
    #[serde(default, deserialize_with = "balance_or_zero")]
    balance: f64,
    #[serde(default, deserialize_with = "timestamp_or_none")]
    created_at: Option<NaiveDateTime>,
}

fn timestamp_or_none<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text.parse().ok(),
        _ => None,
    })
}

fn balance_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl UserRecord {
    /// Construct a record directly.
    #[must_use]
    pub const fn new(
        user_id: i64,
        username: String,
        balance: f64,
        created_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            user_id,
            username,
            balance,
            created_at,
        }
    }

    /// Build a record from a row keyed by column name.
    ///
    /// # Errors
    /// Returns the deserialisation error when a column is missing or has an
    /// unexpected type.
    pub fn from_columns(row: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(row))
    }

    /// Database identifier.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Current balance, zero when no balance row exists.
    #[must_use]
    pub const fn balance(&self) -> f64 {
        self.balance
    }

    /// Creation timestamp as stored by the database.
    #[must_use]
    pub const fn created_at(&self) -> Option<NaiveDateTime> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", "pw", UserAccountValidationError::EmptyUsername)]
    #[case("alice", "", UserAccountValidationError::EmptyPassword)]
    fn invalid_payloads_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: UserAccountValidationError,
    ) {
        let err = BalanceUpsert::try_from_parts(username, password, 1.0)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("   ", "pw")]
    #[case(" alice ", " ")]
    fn whitespace_is_passed_through(#[case] username: &str, #[case] password: &str) {
        let upsert = BalanceUpsert::try_from_parts(username, password, 1.0)
            .expect("non-empty strings are accepted");
        assert_eq!(upsert.username(), username);
    }

    #[rstest]
    #[case(0.0, "$0.00")]
    #[case(123.45, "$123.45")]
    #[case(999.999, "$1000.00")]
    #[case(-5.5, "$-5.50")]
    fn confirmation_formats_two_decimals(#[case] balance: f64, #[case] suffix: &str) {
        let upsert = BalanceUpsert::try_from_parts("testuser", "password123", balance)
            .expect("valid upsert");
        assert_eq!(
            upsert.confirmation(),
            format!("User 'testuser' created/updated with balance {suffix}")
        );
    }

    #[rstest]
    fn procedure_call_passes_positional_arguments() {
        let upsert = BalanceUpsert::try_from_parts("alice", "alicepass", 50.0).expect("valid");
        let call = upsert.procedure_call();
        assert_eq!(call.name(), UPSERT_BALANCE_PROCEDURE);
        match call.args() {
            [
                ProcedureArg::Text(username),
                ProcedureArg::Secret(password),
                ProcedureArg::Decimal(balance),
            ] => {
                assert_eq!(username, "alice");
                assert_eq!(password.as_str(), "alicepass");
                assert!((balance - 50.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected arguments: {other:?}"),
        }
    }

    #[rstest]
    fn record_maps_from_named_columns() {
        let row = json!({
            "user_id": 7,
            "username": "alice",
            "balance": 50.0,
            "created_at": "2024-05-01T09:30:00"
        });
        let Value::Object(row) = row else {
            panic!("object literal");
        };
        let record = UserRecord::from_columns(row).expect("record");
        assert_eq!(record.user_id(), 7);
        assert_eq!(record.username(), "alice");
        assert!((record.balance() - 50.0).abs() < f64::EPSILON);
        assert!(record.created_at().is_some());
    }

    #[rstest]
    #[case(json!({"user_id": 1, "username": "bob", "balance": null, "created_at": null}))]
    #[case(json!({"user_id": 1, "username": "bob", "created_at": null}))]
    fn missing_balance_reads_as_zero(#[case] row: Value) {
        let Value::Object(row) = row else {
            panic!("object literal");
        };
        let record = UserRecord::from_columns(row).expect("record");
        assert!(record.balance().abs() < f64::EPSILON);
        let serialised = serde_json::to_value(&record).expect("serialise");
        assert_eq!(serialised["balance"], json!(0.0));
    }

    #[rstest]
    #[case::zero_date(json!("0000-00-00 00:00:00"))]
    #[case::zero_date_with_fraction(json!("0000-00-00 00:00:00.000000"))]
    #[case::null(Value::Null)]
    #[case::not_a_string(json!(20_240_501))]
    fn unusable_timestamps_do_not_fail_the_row(#[case] created_at: Value) {
        let Value::Object(row) = json!({
            "user_id": 3,
            "username": "carol",
            "balance": 10.0,
            "created_at": created_at
        }) else {
            panic!("object literal");
        };

        let record = UserRecord::from_columns(row).expect("record");

        assert_eq!(record.username(), "carol");
        assert!(record.created_at().is_none());
        let serialised = serde_json::to_value(&record).expect("serialise");
        assert_eq!(serialised["created_at"], Value::Null);
    }

    #[rstest]
    fn fractional_timestamps_are_kept() {
        let Value::Object(row) = json!({
            "user_id": 4,
            "username": "dave",
            "balance": 0.0,
            "created_at": "2024-05-01T09:30:00.250"
        }) else {
            panic!("object literal");
        };

        let record = UserRecord::from_columns(row).expect("record");

        let expected: NaiveDateTime = "2024-05-01T09:30:00.250".parse().expect("timestamp");
        assert_eq!(record.created_at(), Some(expected));
    }

    #[rstest]
    fn record_rejects_rows_without_username() {
        let Value::Object(row) = json!({"user_id": 1}) else {
            panic!("object literal");
        };
        assert!(UserRecord::from_columns(row).is_err());
    }
}
