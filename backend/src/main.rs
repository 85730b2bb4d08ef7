//! Gateway entry-point: loads settings, wires the MySQL connector and serves
//! the REST API.

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_gateway::inbound::http::health::HealthState;
use user_gateway::outbound::persistence::MySqlConnector;
use user_gateway::server::{ServerConfig, create_server};
use user_gateway::settings::{GatewaySettings, load_dotenv};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    load_dotenv();
    let settings = GatewaySettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let connection = settings.connection_settings();
    info!(
        db_host = %connection.host,
        db_port = connection.port,
        db_user = %connection.user,
        "starting user gateway"
    );

    let connector = Arc::new(MySqlConnector::new(connection));
    let config = ServerConfig::new(settings.api_host(), settings.api_port(), connector);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &config)?;
    server.await
}
