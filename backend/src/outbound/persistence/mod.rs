//! MySQL persistence adapter.
//!
//! Implements the [`crate::domain::ports::SqlConnector`] port with `sqlx`.
//! Sessions are never pooled: every gateway operation opens its own
//! connection and closes it before returning.
//!
//! # Example
//!
//! ```no_run
//! use user_gateway::outbound::persistence::{ConnectionSettings, MySqlConnector};
//!
//! # async fn run() -> Result<(), user_gateway::domain::ports::SqlSessionError> {
//! let connector = MySqlConnector::new(ConnectionSettings::default());
//! let session = connector.open(None).await?;
//! # drop(session);
//! # Ok(())
//! # }
//! ```

mod mysql_connector;
mod mysql_values;

pub use mysql_connector::{ConnectionSettings, MySqlConnector, MySqlSession};
