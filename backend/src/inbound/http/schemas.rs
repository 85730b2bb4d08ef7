//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape so the generated document
//! describes what clients actually receive.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Every failure is reported as a single human-readable `detail` string.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Driver or validation message, passed through verbatim.
    #[schema(example = "Database connection failed: Can't connect to MySQL server")]
    detail: String,
}

/// OpenAPI schema for [`crate::domain::UserRecord`].
#[derive(ToSchema)]
#[schema(as = UserRecord)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserRecordSchema {
    /// Database identifier.
    #[schema(example = 1)]
    user_id: i64,
    /// Unique username.
    #[schema(example = "alice")]
    username: String,
    /// Current balance; `0.0` when the user has no balance row.
    #[schema(example = 50.0)]
    balance: f64,
    /// Creation timestamp without time zone.
    #[schema(format = DateTime, example = "2024-05-01T09:30:00")]
    created_at: Option<String>,
}
