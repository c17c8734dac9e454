//! Hackpal server entry point.
//!
//! Binary name: `hackpal`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! services, then either serves the REST API or runs migrations and exits.

use std::path::Path;

use clap::Parser;

use hackpal_api::cli::{Cli, Commands};
use hackpal_api::http::router::build_router;
use hackpal_api::state::AppState;
use hackpal_infra::config::{
    apply_env_overrides, database_url, load_server_config, resolve_data_dir,
};
use hackpal_infra::sqlite::pool::DatabasePool;
use hackpal_observe::tracing_setup::{default_filter, init_tracing, shutdown_tracing};
use hackpal_types::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.otel, default_filter(cli.verbose))
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let mut config = apply_env_overrides(load_server_config(&data_dir).await);

    let result = match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            serve(config, &data_dir).await
        }
        Commands::Migrate => {
            let db_url = database_url(&config, &data_dir).await?;
            let pool = DatabasePool::new(&db_url).await?;
            pool.close().await;
            tracing::info!(database_url = %db_url, "Database is up to date");
            Ok(())
        }
    };

    shutdown_tracing();
    result
}

async fn serve(config: ServerConfig, data_dir: &Path) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::init(config, data_dir).await?;
    let pool = state.db_pool.clone();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %format!("http://{addr}"), "Hackpal API listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
