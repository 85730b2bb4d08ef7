//! Raw SQL execution handler.
//!
//! ```text
//! POST /api/execute-sql {"query":"SELECT 1","database_name":"user_management"}
//! ```
//!
//! Statements are forwarded verbatim; callers are trusted administrators.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ExecutionResult, SqlExecutionRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/execute-sql`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct ExecuteSqlRequest {
    #[schema(example = "SELECT * FROM users")]
    pub query: String,
    /// Defaults to `user_management`.
    #[serde(default)]
    #[schema(example = "user_management")]
    pub database_name: Option<String>,
}

impl From<ExecuteSqlRequest> for SqlExecutionRequest {
    fn from(value: ExecuteSqlRequest) -> Self {
        Self::new(value.query, value.database_name)
    }
}

/// Rows produced by `SELECT`, `SHOW` and `DESCRIBE` statements.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TabularResponse {
    pub success: bool,
    #[schema(example = json!(["1"]))]
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Vec<Object>>, example = json!([[1]]))]
    pub rows: Vec<Vec<Value>>,
    #[schema(example = 1)]
    pub row_count: usize,
}

/// Count reported for every other statement.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AffectedResponse {
    pub success: bool,
    #[schema(example = 2)]
    pub affected_rows: u64,
}

/// Body returned by `POST /api/execute-sql`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ExecuteSqlResponse {
    Tabular(TabularResponse),
    Affected(AffectedResponse),
}

impl From<ExecutionResult> for ExecuteSqlResponse {
    fn from(result: ExecutionResult) -> Self {
        match result {
            ExecutionResult::Tabular(table) => {
                let (columns, rows) = table.into_parts();
                Self::Tabular(TabularResponse {
                    success: true,
                    columns,
                    row_count: rows.len(),
                    rows,
                })
            }
            ExecutionResult::Affected { affected_rows } => Self::Affected(AffectedResponse {
                success: true,
                affected_rows,
            }),
        }
    }
}

/// Execute a raw statement against the requested database.
#[utoipa::path(
    post,
    path = "/api/execute-sql",
    request_body = ExecuteSqlRequest,
    responses(
        (status = 200, description = "Statement executed", body = ExecuteSqlResponse),
        (status = 422, description = "Malformed request body", body = ErrorSchema),
        (status = 500, description = "Statement failed", body = ErrorSchema)
    ),
    tags = ["sql"],
    operation_id = "executeSql"
)]
#[post("/execute-sql")]
pub async fn execute_sql(
    state: web::Data<HttpState>,
    payload: web::Json<ExecuteSqlRequest>,
) -> ApiResult<web::Json<ExecuteSqlResponse>> {
    let request = SqlExecutionRequest::from(payload.into_inner());
    let result = state.sql.execute(&request).await?;
    Ok(web::Json(result.into()))
}
