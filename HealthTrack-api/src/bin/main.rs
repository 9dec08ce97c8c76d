use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use health_track_api::api::create_application;
use health_track_data::database::{Database, DatabaseConfig};

/// The main entry point for the HealthTrack API server
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Ensures the data directory exists
/// 4. Opens the database and bootstraps the schema
/// 5. Creates and starts the Axum web application
/// 6. Handles graceful shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_ansi(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("Starting HealthTrack API server");

    // Resolve the database location; DB_SQLITE_PATH wins over DATA_DIR
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let mut config = DatabaseConfig::from_env();
    if std::env::var("DB_SQLITE_PATH").is_err() {
        let db_path = PathBuf::from(&data_dir).join("healthtrack.db");
        info!("Using SQLite database at {}", db_path.display());
        config.sqlite_path = Some(db_path.to_string_lossy().to_string());
    }

    // Open the database once and hand the same handle to the whole service graph
    let db = Database::connect(&config).context("failed to initialize database")?;

    // Create the Axum application with all routes and middleware
    let app = create_application(db);

    // Get the port from environment or use default 3000
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .context("PORT must be a number")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    // Create a TCP listener and bind to the address
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind server address")?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Sets up a signal handler for graceful shutdown
///
/// This function creates an async task that waits for either:
/// - CTRL+C signal
/// - SIGTERM (on Unix systems)
///
/// When either signal is received, the function returns and triggers
/// the graceful shutdown process.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
