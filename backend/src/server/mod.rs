//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, health, live, ready};
use crate::inbound::http::sql::execute_sql;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, list_users};
use crate::inbound::http::validation::json_config;
use crate::middleware::{Trace, permissive_cors};

/// Path serving Swagger UI.
pub const DOCS_PATH: &str = "/docs";
/// Path serving the OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Shared state handed to every worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application with routes, middleware and docs.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::web;
/// use user_gateway::domain::GatewayService;
/// use user_gateway::inbound::http::health::HealthState;
/// use user_gateway::inbound::http::state::HttpState;
/// use user_gateway::server::{AppDependencies, build_app};
/// use user_gateway::test_support::InMemoryConnector;
///
/// let service = GatewayService::new(Arc::new(InMemoryConnector::new()));
/// let _app = build_app(AppDependencies {
///     health_state: web::Data::new(HealthState::new()),
///     http_state: web::Data::new(HttpState::from(service)),
/// });
/// ```
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<
            actix_web::body::EitherBody<actix_web::body::BoxBody>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(create_user)
        .service(execute_sql)
        .service(list_users);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .wrap(permissive_cors())
        .service(api)
        .service(health)
        .service(ready)
        .service(live)
        .service(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr())?
    .run();

    let base_url = config.base_url();
    info!(address = %base_url, "user gateway listening");
    info!(url = %format!("{base_url}{DOCS_PATH}"), "API documentation");
    info!(url = %format!("{base_url}/health"), "health check");

    health_state.mark_ready();
    Ok(server)
}
