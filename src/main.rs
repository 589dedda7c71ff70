use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kindergarten_registry::app::{build_router, AppState};
use kindergarten_registry::config::AppConfig;
use kindergarten_registry::database::{connect_central, SqliteRegistry, SqliteTenantConnector};

#[derive(Parser)]
#[command(name = "kindergarten-registry")]
#[command(about = "Organization registry with per-tenant kindergarten stores")]
#[command(version)]
struct Args {
    #[arg(long, help = "Address to bind (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides SERVER_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Central registry database file (overrides CENTRAL_DATABASE)")]
    central_db: Option<PathBuf>,

    #[arg(long, help = "Base directory for tenant databases (overrides TENANT_DATA_DIR)")]
    tenant_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up CENTRAL_DATABASE, TENANT_DATA_DIR, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kindergarten_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(central) = args.central_db {
        config.database.central = central;
    }
    if let Some(dir) = args.tenant_dir {
        config.tenant.data_dir = dir;
    }

    tracing::info!(
        "Starting kindergarten registry v{} in {:?} mode",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let pool = connect_central(&config).await?;
    let registry = Arc::new(SqliteRegistry::new(pool).await?);
    let tenants = Arc::new(SqliteTenantConnector::from_config(&config));

    let bind_addr = config.bind_addr();
    let state = AppState::new(registry.clone(), tenants, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    registry.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
