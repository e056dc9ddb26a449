//! Chunklens Server
//!
//! Ingests PDFs into fixed-size word chunks and reports, per configured
//! target word, the first chunk containing it.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chunklens_server::config::{load_target_words, Config};
use chunklens_server::routes;
use chunklens_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "chunklens_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;

    tracing::info!("Starting Chunklens Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Chunking: {} words per block, line break every {:?}",
        config.chunking.block_size(),
        config.chunking.line_break_every()
    );

    let words = load_target_words(&config.words_file).with_context(|| {
        format!("Failed to load target words from {}", config.words_file.display())
    })?;
    tracing::info!(
        "Loaded {} target words from {}",
        words.len(),
        config.words_file.display()
    );

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid SERVER_HOST '{}'", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));

    let app_state = AppState::new(config, words);
    let app = routes::app(app_state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Chunklens Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
