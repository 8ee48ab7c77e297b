use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photopack_api::config::ServerConfig;
use photopack_api::router::build_app_router;
use photopack_api::state::AppState;
use photopack_core::archiver::Archiver;
use photopack_core::error::CoreError;
use photopack_unsplash::UnsplashClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "photopack_api=debug,photopack_core=info,photopack_unsplash=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Startup failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CoreError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        api_url = %config.unsplash.api_url,
        archive_concurrency = config.archive_concurrency,
        "Loaded server configuration",
    );

    // --- Unsplash client ---
    let unsplash = Arc::new(
        UnsplashClient::new(config.unsplash.clone())
            .map_err(|e| CoreError::Configuration(format!("HTTP client setup failed: {e}")))?,
    );

    // --- App state ---
    let archiver = Archiver::new(unsplash.clone()).with_concurrency(config.archive_concurrency);
    let state = AppState {
        catalog: unsplash,
        archiver: Arc::new(archiver),
    };

    // --- Router ---
    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let host = config
        .host
        .parse::<IpAddr>()
        .map_err(|e| CoreError::Configuration(format!("Invalid HOST '{}': {e}", config.host)))?;
    let addr = SocketAddr::new(host, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CoreError::Configuration(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Photopack listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoreError::Internal(format!("Server error: {e}")))?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
