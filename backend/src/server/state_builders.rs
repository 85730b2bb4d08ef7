//! Builders for HTTP state from the configured connector.

use actix_web::web;

use crate::domain::GatewayService;
use crate::inbound::http::state::HttpState;

use super::ServerConfig;

/// Wire every driving port to one gateway service over the configured
/// connector.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let service = GatewayService::new(config.connector.clone());
    web::Data::new(HttpState::from(service))
}
