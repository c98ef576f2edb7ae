//! surfsup - a read-only JSON API over a SQLite climate-observation dataset
//!
//! This is the main entry point for the surfsup application.

use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

use surfsup::handlers::heartbeat::init_start_time;
use surfsup::{build_router, init_tracing, log_dataset_stats, log_error};
use surfsup::{AppState, Config, Result, SurfsupError};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);

    if let Err(e) = config.validate() {
        log_error(&e, "Invalid configuration");
        return Err(e);
    }

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));
    init_start_time();

    // Open and validate the database
    let app_state = AppState::load(config.clone()).map_err(|e| {
        log_error(&e, "Failed to open database");
        e
    })?;

    log_dataset_stats(
        &app_state.database_path().display().to_string(),
        &app_state.summary,
    );

    let app = build_router(app_state.into_shared());

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SurfsupError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsupError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server is ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SurfsupError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
