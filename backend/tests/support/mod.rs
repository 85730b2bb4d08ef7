//! Shared helper utilities for gateway integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module gives them one way to assemble the full application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::Value;
use user_gateway::domain::GatewayService;
use user_gateway::domain::ports::SqlConnector;
use user_gateway::inbound::http::health::HealthState;
use user_gateway::inbound::http::state::HttpState;
use user_gateway::server::{AppDependencies, build_app};

/// Dependencies for the full application over `connector`.
pub fn dependencies(connector: Arc<dyn SqlConnector>) -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(HttpState::from(GatewayService::new(connector))),
    }
}

/// Send `req` and decode the JSON body.
pub async fn call_json<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}
