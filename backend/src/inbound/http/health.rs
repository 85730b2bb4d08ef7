//! Health endpoints.
//!
//! `GET /health` round-trips to the database. The `/health/ready` and
//! `/health/live` probes only reflect process state for orchestrators and
//! never open a connection.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Body returned when the database answered the liveness query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "connected")]
    pub database: String,
}

impl HealthResponse {
    fn connected() -> Self {
        Self {
            status: "healthy".to_owned(),
            database: "connected".to_owned(),
        }
    }
}

/// Check that the database accepts connections and answers `SELECT 1`.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 500, description = "Database connection failed", body = ErrorSchema)
    ),
    operation_id = "healthCheck"
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> ApiResult<web::Json<HealthResponse>> {
    state.health.check().await?;
    Ok(web::Json(HealthResponse::connected()))
}

/// Readiness flag shared with the readiness probe.
#[derive(Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Not ready yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the server as ready to take traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Readiness flag.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe: 200 once the server is bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 200 whenever the process can answer HTTP.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive")
    )
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HealthState::probe_response(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::{
        MockDatabaseHealth, MockSqlExecutionCommand, MockUserAccountsCommand, MockUsersQuery,
    };
    use crate::inbound::http::state::HttpStatePorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn state_with(mock_health: MockDatabaseHealth) -> HttpState {
        HttpState::new(HttpStatePorts {
            health: Arc::new(mock_health),
            accounts: Arc::new(MockUserAccountsCommand::new()),
            users: Arc::new(MockUsersQuery::new()),
            sql: Arc::new(MockSqlExecutionCommand::new()),
        })
    }

    async fn get_health(mock_health: MockDatabaseHealth) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(mock_health)))
                .service(super::health),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn healthy_database_reports_connected() {
        let mut mock_health = MockDatabaseHealth::new();
        mock_health.expect_check().times(1).return_once(|| Ok(()));

        let (status, body) = get_health(mock_health).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy", "database": "connected" }));
    }

    #[actix_web::test]
    async fn unreachable_database_reports_detail() {
        let mut mock_health = MockDatabaseHealth::new();
        mock_health.expect_check().times(1).return_once(|| {
            Err(Error::service_unavailable(
                "Database connection failed: Connection refused (os error 111)",
            ))
        });

        let (status, body) = get_health(mock_health).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "detail": "Database connection failed: Connection refused (os error 111)" })
        );
    }

    async fn probe(state: HealthState, uri: &str) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
    }

    #[rstest]
    #[case::not_ready("/health/ready", false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case::ready("/health/ready", true, StatusCode::OK)]
    #[case::live("/health/live", false, StatusCode::OK)]
    #[actix_web::test]
    async fn probes_follow_state(
        #[case] uri: &str,
        #[case] mark_ready: bool,
        #[case] expected: StatusCode,
    ) {
        let state = HealthState::new();
        if mark_ready {
            state.mark_ready();
        }

        let res = probe(state, uri).await;

        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(b"no-store".as_slice())
        );
    }
}
