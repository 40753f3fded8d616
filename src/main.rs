use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use alexa_gemini_webhook::config::Config;
use alexa_gemini_webhook::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("alexa_gemini_webhook=info".parse()?),
        )
        .init();

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;

    let state = Arc::new(AppState::new(config)?);
    let app = server::app(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server is running on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
