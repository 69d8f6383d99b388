//! WNBA Data API
//!
//! Read-only REST API over the play-by-play and schedule SQLite stores.

mod cli;
mod config;
mod routes;
mod storage;
mod types;
mod validate;

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::routes::AppState;
use crate::storage::Store;

/// CLI overrides for `serve`
struct ServeArgs {
    host: Option<String>,
    port: Option<u16>,
    plays_db: Option<PathBuf>,
    schedule_db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            plays_db,
            schedule_db,
        } => {
            run_server(ServeArgs {
                host,
                port,
                plays_db,
                schedule_db,
            })
            .await
        }
        Commands::Routes => cli::run_routes(),
    }
}

/// Run the API server.
async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wnba_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = args.host {
        config.server.host = h;
    }
    if let Some(p) = args.port {
        config.server.port = p;
    }
    if let Some(path) = args.plays_db {
        config.storage.plays_path = path.to_string_lossy().to_string();
    }
    if let Some(path) = args.schedule_db {
        config.storage.schedule_path = path.to_string_lossy().to_string();
    }

    tracing::info!("Configuration loaded");

    // A store that fails to open stays registered and fails per request
    let state = Arc::new(AppState::new(
        Store::open_or_unavailable("plays", Path::new(&config.storage.plays_path)),
        Store::open_or_unavailable("schedule", Path::new(&config.storage.schedule_path)),
    ));

    let app = routes::router(Arc::clone(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Close both stores even if the server loop failed
    state.close();
    tracing::info!("Shutdown complete");

    served?;
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
