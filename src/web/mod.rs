mod flash;
pub mod pages;
mod routes;

pub use flash::{FlashLevel, FlashMessage, IncomingFlash};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::SessionCache;
use crate::config::Config;
use crate::db::Database;
use crate::store::{LocalStore, PostStore, RemoteStore};

/// Shared application state.
///
/// `store` is the backend every post operation goes through. The typed
/// handles exist for the operations that sit outside the store trait:
/// session queries need the database, and login/remembered-user handling
/// needs the concrete local or remote store. `sessions` backs login in
/// the modes without a sessions table.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub db: Option<Database>,
    pub local: Option<Arc<LocalStore>>,
    pub remote: Option<Arc<RemoteStore>>,
    pub sessions: SessionCache,
    pub config: Arc<Config>,
}

/// Start the web server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn serve(state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.web_host, state.config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let app = create_app(state);

    info!(addr = %addr, "Starting HTTP web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app).await.context("Web server error")?;

    Ok(())
}

/// Create the main application router.
#[must_use]
pub fn create_app(state: AppState) -> Router {
    let static_dir = find_static_dir();
    info!(static_dir = ?static_dir, "Serving static files");

    Router::new()
        .merge(routes::router())
        .nest_service("/static", ServeDir::new(&static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Find the static files directory.
///
/// Checks in order:
/// 1. ./static (development)
/// 2. /usr/share/factshield/static (installed)
/// 3. Falls back to ./static
fn find_static_dir() -> PathBuf {
    let candidates = [
        PathBuf::from("./static"),
        PathBuf::from("/usr/share/factshield/static"),
    ];

    for path in &candidates {
        if path.exists() && path.is_dir() {
            return path.clone();
        }
    }

    // Default fallback
    PathBuf::from("./static")
}
