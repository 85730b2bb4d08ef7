//! Behaviour of the gateway service over the in-memory connector.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::{ErrorCode, ResultTable};
use crate::test_support::{InMemoryConnector, REFUSED_MESSAGE};

#[fixture]
fn connector() -> InMemoryConnector {
    InMemoryConnector::new()
}

fn service(connector: &InMemoryConnector) -> GatewayService {
    GatewayService::new(Arc::new(connector.clone()))
}

fn upsert(username: &str, balance: f64) -> BalanceUpsert {
    BalanceUpsert::try_from_parts(username, "secret", balance).expect("valid upsert")
}

fn assert_balanced(connector: &InMemoryConnector, sessions: usize) {
    assert_eq!(connector.opened_sessions(), sessions);
    assert_eq!(connector.closed_sessions(), sessions);
}

#[rstest]
#[tokio::test]
async fn health_runs_liveness_query_without_database(connector: InMemoryConnector) {
    service(&connector).check().await.expect("healthy");

    assert_eq!(connector.selected_databases(), vec![None]);
    assert_eq!(connector.received_statements(), vec![LIVENESS_QUERY]);
    assert_balanced(&connector, 1);
}

#[rstest]
#[tokio::test]
async fn health_reports_unreachable_database() {
    let connector = InMemoryConnector::unreachable();

    let err = service(&connector).check().await.expect_err("unhealthy");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(
        err.detail(),
        format!("Database connection failed: {REFUSED_MESSAGE}")
    );
    assert_balanced(&connector, 0);
}

#[rstest]
#[tokio::test]
async fn select_is_shaped_as_table(connector: InMemoryConnector) {
    let request = SqlExecutionRequest::new("  select 1", None);

    let connector = connector.with_table(
        "  select 1",
        ResultTable::new(vec!["1".into()], vec![vec![json!(1)]]),
    );
    let result = service(&connector).execute(&request).await.expect("result");

    let ExecutionResult::Tabular(table) = result else {
        panic!("expected tabular result");
    };
    assert_eq!(table.columns(), ["1"]);
    assert_eq!(table.rows(), [vec![json!(1)]]);
    assert_eq!(
        connector.selected_databases(),
        vec![Some(USER_MANAGEMENT_DATABASE.to_owned())]
    );
    assert_balanced(&connector, 1);
}

#[rstest]
#[tokio::test]
async fn insert_is_shaped_as_affected_count(connector: InMemoryConnector) {
    let statement = "INSERT INTO audit(note) VALUES ('a'), ('b')";
    let connector = connector.with_affected(statement, 2);
    let request = SqlExecutionRequest::new(statement, Some("reporting".into()));

    let result = service(&connector).execute(&request).await.expect("result");

    assert_eq!(result, ExecutionResult::Affected { affected_rows: 2 });
    assert_eq!(
        connector.selected_databases(),
        vec![Some("reporting".to_owned())]
    );
    assert_balanced(&connector, 1);
}

#[rstest]
#[tokio::test]
async fn failing_statement_still_closes_session(connector: InMemoryConnector) {
    let statement = "DELETE FROM missing";
    let connector = connector.with_failure(statement, "Table 'user_management.missing' doesn't exist");
    let request = SqlExecutionRequest::new(statement, None);

    let err = service(&connector)
        .execute(&request)
        .await
        .expect_err("statement fails");

    assert_eq!(err.code(), ErrorCode::OperationFailed);
    assert_eq!(err.detail(), "Table 'user_management.missing' doesn't exist");
    assert_balanced(&connector, 1);
}

#[rstest]
#[tokio::test]
async fn refused_connection_fails_operations() {
    let connector = InMemoryConnector::unreachable();
    let gateway = service(&connector);

    let listing = gateway.list_users().await.expect_err("listing fails");
    let created = gateway
        .upsert_balance(&upsert("alice", 1.0))
        .await
        .expect_err("upsert fails");

    for err in [listing, created] {
        assert_eq!(err.code(), ErrorCode::OperationFailed);
        assert_eq!(err.detail(), REFUSED_MESSAGE);
    }
    assert_balanced(&connector, 0);
}

#[rstest]
#[tokio::test]
async fn upsert_confirms_with_two_decimals(connector: InMemoryConnector) {
    let message = service(&connector)
        .upsert_balance(&upsert("alice", 50.0))
        .await
        .expect("upsert");

    assert_eq!(message, "User 'alice' created/updated with balance $50.00");
    assert_eq!(
        connector.received_statements(),
        vec!["CALL UpdateBalance(?, ?, ?)"]
    );
    assert_balanced(&connector, 1);
}

#[rstest]
#[tokio::test]
async fn repeated_upsert_keeps_single_user(connector: InMemoryConnector) {
    let gateway = service(&connector);
    gateway
        .upsert_balance(&upsert("testuser", 123.45))
        .await
        .expect("first upsert");
    gateway
        .upsert_balance(&upsert("testuser", 999.99))
        .await
        .expect("second upsert");

    let users = gateway.list_users().await.expect("listing");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username(), "testuser");
    assert!((users[0].balance() - 999.99).abs() < f64::EPSILON);
    assert_balanced(&connector, 3);
}

#[rstest]
#[tokio::test]
async fn listing_reports_zero_for_missing_balance(connector: InMemoryConnector) {
    let connector = connector.with_user_without_balance("carol");
    let gateway = service(&connector);
    gateway
        .upsert_balance(&upsert("alice", 50.0))
        .await
        .expect("upsert");

    let users = gateway.list_users().await.expect("listing");

    let summary: Vec<_> = users
        .iter()
        .map(|user| (user.user_id(), user.username(), user.balance()))
        .collect();
    assert_eq!(summary, vec![(1, "carol", 0.0), (2, "alice", 50.0)]);
    assert_eq!(
        users[0].created_at(),
        crate::test_support::fixture_created_at()
    );
}

fn listing_columns() -> Vec<String> {
    ["user_id", "username", "balance", "created_at"]
        .map(str::to_owned)
        .to_vec()
}

#[rstest]
#[tokio::test]
async fn listing_tolerates_zero_timestamps(connector: InMemoryConnector) {
    let connector = connector.with_table(
        LIST_USERS_QUERY,
        ResultTable::new(
            listing_columns(),
            vec![vec![json!(1), json!("legacy"), json!(5.0), json!("0000-00-00 00:00:00")]],
        ),
    );

    let users = service(&connector).list_users().await.expect("users");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username(), "legacy");
    assert!(users[0].created_at().is_none());
    assert_balanced(&connector, 1);
}

#[rstest]
#[tokio::test]
async fn malformed_listing_row_is_internal_error(connector: InMemoryConnector) {
    let connector = connector.with_table(
        LIST_USERS_QUERY,
        ResultTable::new(
            listing_columns(),
            vec![vec![json!("not a number"), json!("x"), json!(0.0), json!(null)]],
        ),
    );

    let err = service(&connector).list_users().await.expect_err("bad row");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(err.detail().starts_with("unexpected users row"));
    assert_balanced(&connector, 1);
}
