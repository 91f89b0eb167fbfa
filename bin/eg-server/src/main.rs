//! EventGate Server
//!
//! Production server for the platform REST APIs:
//! - Auth: `/login`, `/eventinfo`, `/me`
//! - Events: `/events`, `/event/{id}` (bearer token required)
//! - Monitoring: `/health`, Swagger UI at `/swagger-ui`
//!
//! Configuration is read once at startup from the environment (and an
//! optional `.env` file); see `eg_platform::config` for the variables.
//! A missing signing secret aborts startup.

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use eg_platform::api::AppState;
use eg_platform::{create_router, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; variables may come from the environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("Failed to read .env file");
        }
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting EventGate Server");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    info!(
        duplicate_policy = %config.duplicate_policy,
        login_identity = %config.login_identity,
        login_role = %config.login_role,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config).context("Failed to initialize services")?;
    let app = create_router(state);

    let api_addr = config.listen_addr();
    let listener = TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("Failed to bind {}", api_addr))?;
    info!("API server listening on http://{}", api_addr);
    info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("EventGate Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received...");
}
