//! Plant monitor server
//!
//! Serves the HTTP/JSON data service over the SQLite store.
//!
//! Usage:
//!   cargo run --bin plant_monitor -- migrate   # create/upgrade the schema
//!   cargo run --bin load_data                  # optional: reference data + samples
//!   cargo run --bin plant_monitor              # serve on $PORT (default 8080)
//!
//! Configuration comes from the environment (or a `.env` file): PORT, DEBUG,
//! DATABASE_URL, DISPLAY_TZ, AUTO_MIGRATE, LOG_FORMAT.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use plant_monitor::rest::{create_router, AppState};
use plant_monitor::{logging, Config, Store};

#[derive(Parser)]
#[command(name = "plant_monitor")]
#[command(about = "Plant monitoring data service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Overrides $PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,
    /// Apply pending schema migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    let _log_guard = logging::init(config.log_format);

    let store = Store::open(&config.database_url).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => {
            let applied = store.migrate().await?;
            tracing::info!(applied, database = %config.database_url, "migrations complete");
        }
        Commands::Serve => serve(store, config).await?,
    }

    Ok(())
}

async fn serve(store: Store, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    if config.auto_migrate {
        store.migrate().await?;
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        %addr,
        database = %config.database_url,
        timezone = %config.timezone,
        dev_mode = config.debug,
        "plant monitor starting"
    );

    let app = create_router(AppState::from_config(store, &config));
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
