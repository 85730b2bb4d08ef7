//! Request body validation shared by inbound HTTP handlers.
//!
//! Malformed bodies never reach a handler: the JSON extractor rejects them
//! with an `invalid_request` error, which the adapter maps to 422.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::{Error, UserAccountValidationError};

/// JSON extractor configuration reporting payload errors as domain errors.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_gateway::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        debug!(path = req.path(), error = %err, "rejected request body");
        Error::invalid_request(err.to_string()).into()
    })
}

/// Map user account validation failures onto the shared error type.
pub(crate) fn user_account_validation_error(err: &UserAccountValidationError) -> Error {
    Error::invalid_request(err.to_string())
}
