//! User account handlers.
//!
//! ```text
//! POST /api/create-user {"username":"alice","password":"secret","balance":50.0}
//! GET /api/users
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{BalanceUpsert, UserAccountValidationError, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserRecordSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::user_account_validation_error;

/// Request body for `POST /api/create-user`.
///
/// `balance` defaults to `0.0` when omitted.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
    #[serde(default)]
    #[schema(example = 50.0, default = 0.0)]
    pub balance: f64,
}

impl TryFrom<CreateUserRequest> for BalanceUpsert {
    type Error = UserAccountValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password, value.balance)
    }
}

/// Acknowledgement returned by `POST /api/create-user`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserResponse {
    pub success: bool,
    #[schema(example = "User 'alice' created/updated with balance $50.00")]
    pub message: String,
}

/// Body returned by `GET /api/users`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    #[schema(value_type = Vec<UserRecordSchema>)]
    pub users: Vec<UserRecord>,
}

/// Create a user or overwrite their balance through `UpdateBalance`.
#[utoipa::path(
    post,
    path = "/api/create-user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created or balance updated", body = CreateUserResponse),
        (status = 422, description = "Malformed request body", body = ErrorSchema),
        (status = 500, description = "Procedure call failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/create-user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<CreateUserResponse>> {
    let request = BalanceUpsert::try_from(payload.into_inner())
        .map_err(|err| user_account_validation_error(&err))?;
    let message = state.accounts.upsert_balance(&request).await?;
    Ok(web::Json(CreateUserResponse {
        success: true,
        message,
    }))
}

/// List every user with their balance, ordered by `user_id`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_gateway::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 500, description = "Query failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UsersResponse {
        success: true,
        users,
    }))
}
