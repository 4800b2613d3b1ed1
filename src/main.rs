use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use code_bbs::auth::run_cleanup_worker;
use code_bbs::config::Config;
use code_bbs::web::{self, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    init_tracing()?;

    info!("Starting code-bbs");

    // Load and validate configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        web_host = %config.web_host,
        web_port = config.web_port,
        session_ttl_secs = config.session_ttl.as_secs(),
        "Configuration loaded"
    );

    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set; using the built-in development key");
    }
    if config.uses_default_password() {
        warn!("BBS_PASSWORD is not set; using the built-in development password");
    }

    let cleanup_interval = config.session_cleanup_interval;
    let state = AppState::new(config).context("Failed to initialize application state")?;

    let shutdown = CancellationToken::new();

    // Start session cleanup in background
    let cleanup_handle = tokio::spawn(run_cleanup_worker(
        state.sessions.clone(),
        cleanup_interval,
        shutdown.clone(),
    ));

    // Start web server in background
    let web_shutdown = shutdown.clone();
    let web_handle = tokio::spawn(async move {
        if let Err(e) = web::serve(state, web_shutdown.clone()).await {
            error!("Web server error: {e:#}");
        }
        web_shutdown.cancel();
    });

    // Wait for shutdown signal, or for the server to stop on its own
    tokio::select! {
        () = shutdown_signal() => {
            info!("Shutting down...");
        }
        () = shutdown.cancelled() => {}
    }

    shutdown.cancel();
    let _ = web_handle.await;
    let _ = cleanup_handle.await;

    info!("Shutdown complete");

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,code_bbs=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        // Pretty-printed logging for development
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
