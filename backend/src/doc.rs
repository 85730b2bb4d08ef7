//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the schema wrappers from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it at `/docs`; the
//! `openapi-dump` binary prints it for external tooling.

use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::schemas::{ErrorSchema, UserRecordSchema};
use crate::inbound::http::sql::{
    AffectedResponse, ExecuteSqlRequest, ExecuteSqlResponse, TabularResponse,
};
use crate::inbound::http::users::{CreateUserRequest, CreateUserResponse, UsersResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User gateway API",
        description = "REST gateway running SQL statements and stored procedures against MySQL."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::sql::execute_sql,
    ),
    components(schemas(
        ErrorSchema,
        UserRecordSchema,
        HealthResponse,
        CreateUserRequest,
        CreateUserResponse,
        UsersResponse,
        ExecuteSqlRequest,
        ExecuteSqlResponse,
        TabularResponse,
        AffectedResponse,
    )),
    tags(
        (name = "health", description = "Database and process health checks"),
        (name = "users", description = "User accounts and balances"),
        (name = "sql", description = "Raw SQL execution for trusted administrators")
    )
)]
pub struct ApiDoc;
