//! Gateway configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags and the `DB_*` / `API_*` environment
//! variables, which may be seeded from a `.env` file; anything unset falls
//! back to a local development default.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::outbound::persistence::ConnectionSettings;

const DEFAULT_DB_HOST: &str = "127.0.0.1";
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_USER: &str = "root";
const DEFAULT_API_HOST: &str = "localhost";
const DEFAULT_API_PORT: u16 = 9002;

/// Database credentials and HTTP bind address.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
pub struct GatewaySettings {
    /// Database server host.
    pub db_host: Option<String>,
    /// Database server port.
    pub db_port: Option<u16>,
    /// Database user.
    pub db_user: Option<String>,
    /// Database password.
    pub db_password: Option<String>,
    /// Host the HTTP server binds to.
    pub api_host: Option<String>,
    /// Port the HTTP server binds to.
    pub api_port: Option<u16>,
}

impl GatewaySettings {
    /// Database host, defaulting to `127.0.0.1`.
    #[must_use]
    pub fn db_host(&self) -> &str {
        self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST)
    }

    /// Database port, defaulting to `3306`.
    #[must_use]
    pub fn db_port(&self) -> u16 {
        self.db_port.unwrap_or(DEFAULT_DB_PORT)
    }

    /// Database user, defaulting to `root`.
    #[must_use]
    pub fn db_user(&self) -> &str {
        self.db_user.as_deref().unwrap_or(DEFAULT_DB_USER)
    }

    /// Database password, empty unless configured.
    #[must_use]
    pub fn db_password(&self) -> &str {
        self.db_password.as_deref().unwrap_or_default()
    }

    /// HTTP bind host, defaulting to `localhost`.
    #[must_use]
    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }

    /// HTTP bind port, defaulting to `9002`.
    #[must_use]
    pub fn api_port(&self) -> u16 {
        self.api_port.unwrap_or(DEFAULT_API_PORT)
    }

    /// Credentials handed to the persistence adapter.
    #[must_use]
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.db_host().to_owned(),
            port: self.db_port(),
            user: self.db_user().to_owned(),
            password: self.db_password().to_owned(),
        }
    }
}

/// Seed the process environment from the nearest `.env` file.
///
/// Variables already present in the environment keep their values. A missing
/// file is not an error; an unreadable one is logged and skipped.
pub fn load_dotenv() {
    report_dotenv(dotenvy::dotenv());
}

fn report_dotenv(result: Result<PathBuf, dotenvy::Error>) -> Option<PathBuf> {
    match result {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment file");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable environment file");
            None
        }
    }
}
