//! Domain-level error type.
//!
//! Errors are transport agnostic. The HTTP adapter maps [`ErrorCode`] onto a
//! status code and serialises the payload as `{"detail": "..."}`.

use serde::Serialize;

use super::TraceId;

/// Failure category used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request body is structurally invalid.
    InvalidRequest,
    /// The database could not be reached by the health probe.
    ServiceUnavailable,
    /// A statement or procedure call failed, or its connection could not be
    /// opened.
    OperationFailed,
    /// An unexpected failure inside the service itself.
    InternalError,
}

/// Error payload returned to callers.
///
/// Only `detail` is serialised; the trace identifier travels in a response
/// header and the code selects the status.
///
/// # Examples
/// ```
/// use user_gateway::domain::{Error, ErrorCode};
///
/// let err = Error::operation_failed("Table 'user_management.nope' doesn't exist");
/// assert_eq!(err.code(), ErrorCode::OperationFailed);
/// assert_eq!(err.detail(), "Table 'user_management.nope' doesn't exist");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    #[serde(skip)]
    code: ErrorCode,
    detail: String,
    #[serde(skip)]
    trace_id: Option<String>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Override the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message, passed through verbatim from the driver for
    /// database failures.
    #[must_use]
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }

    /// Trace identifier captured at construction, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, detail)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, detail)
    }

    /// Convenience constructor for [`ErrorCode::OperationFailed`].
    pub fn operation_failed(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::OperationFailed, detail)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, detail)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for Error {}
