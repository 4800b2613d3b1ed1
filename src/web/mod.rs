mod auth;
pub mod pages;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::FromRef;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::{SessionStore, SharedPassword};
use crate::board::PostStore;
use crate::config::Config;
use crate::highlight::Highlighter;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub posts: PostStore,
    pub sessions: SessionStore,
    pub password: Arc<SharedPassword>,
    pub highlighter: &'static Highlighter,
}

impl AppState {
    /// Build fresh state: an empty board, no sessions, and the configured
    /// password hashed.
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be hashed.
    pub fn new(config: Config) -> Result<Self> {
        let password =
            SharedPassword::new(&config.bbs_password).context("Failed to hash board password")?;
        let sessions = SessionStore::new(
            &config.secret_key,
            config.session_ttl,
            config.cookie_secure,
        )
        .with_anonymous_limits(config.anon_session_ttl, config.max_anon_sessions);

        Ok(Self {
            config: Arc::new(config),
            posts: PostStore::new(),
            sessions,
            password: Arc::new(password),
            highlighter: Highlighter::shared(),
        })
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

/// Start the web server and run until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn serve(state: AppState, shutdown: CancellationToken) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.web_host, state.config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let app = create_app(state);

    info!(addr = %addr, "Starting HTTP web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("Web server error")?;

    Ok(())
}

/// Create the main application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
