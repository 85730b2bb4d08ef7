//! Check database connectivity and, optionally, the stored procedures the
//! gateway relies on.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;

use user_gateway::domain::ports::{SqlSession, UserAccountsCommand, UsersQuery};
use user_gateway::domain::{BalanceUpsert, GatewayService};
use user_gateway::outbound::persistence::MySqlConnector;
use user_gateway::settings::{GatewaySettings, load_dotenv};

/// Upserts run by `--procedures`, in order.
const SMOKE_UPSERTS: [(&str, &str, f64); 3] = [
    ("testuser", "testpass", 123.45),
    ("testuser", "testpass", 999.99),
    ("alice", "alicepass", 50.00),
];

/// `db-check` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "db-check",
    about = "Report MySQL server version and databases using the gateway's DB_* settings",
    version
)]
struct CliArgs {
    /// Also exercise `UpdateBalance` and the user listing.
    #[arg(long)]
    procedures: bool,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    load_dotenv();
    let settings = GatewaySettings::load_from_iter([OsString::from("db-check")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let connector = MySqlConnector::new(settings.connection_settings());

    report_server(&connector).await?;
    if args.procedures {
        run_procedure_smoke(connector).await?;
    }
    Ok(())
}

async fn report_server(connector: &MySqlConnector) -> io::Result<()> {
    let settings = connector.settings();
    println!(
        "connecting to {}:{} as {}",
        settings.host, settings.port, settings.user
    );
    let mut session = connector
        .open(None)
        .await
        .map_err(|error| io::Error::other(format!("connection failed: {error}")))?;

    let outcome = async {
        let version = session.fetch_table("SELECT VERSION()").await?;
        let databases = session.fetch_table("SHOW DATABASES").await?;
        Ok::<_, user_gateway::domain::ports::SqlSessionError>((version, databases))
    }
    .await;
    let closed = Box::new(session).close().await;

    let (version, databases) =
        outcome.map_err(|error| io::Error::other(format!("query failed: {error}")))?;
    closed.map_err(|error| io::Error::other(format!("close failed: {error}")))?;

    if let Some(value) = version.rows().first().and_then(|row| row.first()) {
        println!("server_version={}", plain(value));
    }
    println!("databases:");
    for row in databases.rows() {
        if let Some(name) = row.first() {
            println!("  - {}", plain(name));
        }
    }
    Ok(())
}

async fn run_procedure_smoke(connector: MySqlConnector) -> io::Result<()> {
    let service = GatewayService::new(Arc::new(connector));

    for (username, password, balance) in SMOKE_UPSERTS {
        let request = BalanceUpsert::try_from_parts(username, password, balance)
            .map_err(|error| io::Error::other(error.to_string()))?;
        let message = service
            .upsert_balance(&request)
            .await
            .map_err(|error| io::Error::other(format!("UpdateBalance failed: {error}")))?;
        println!("{message}");
    }

    let users = service
        .list_users()
        .await
        .map_err(|error| io::Error::other(format!("user listing failed: {error}")))?;
    println!("users:");
    for user in users {
        println!(
            "  {} {} {:.2}",
            user.user_id(),
            user.username(),
            user.balance()
        );
    }
    Ok(())
}

fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
