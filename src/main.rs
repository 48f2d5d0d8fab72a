use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use factshield::auth::{hash_password, SessionCache};
use factshield::config::{Config, StoreMode};
use factshield::db::{self, Database};
use factshield::store::{DbStore, FixedStore, LocalStore, PostStore, RemoteStore};
use factshield::web::{self, AppState};

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

    info!("Starting factshield");

    // Load and validate configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(mode = config.store_mode.as_str(), "Configuration loaded");

    // Build the post store for the configured mode
    let mut db = None;
    let mut local = None;
    let mut remote = None;

    let store: Arc<dyn PostStore> = match config.store_mode {
        StoreMode::Database => {
            if let Some(parent) = config.database_path.parent() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }

            let database = Database::new(&config.database_path)
                .await
                .context("Failed to initialize database")?;
            info!(path = %config.database_path.display(), "Database initialized");

            bootstrap_admin(&database, &config).await?;
            cleanup_sessions(&database).await;

            db = Some(database.clone());
            Arc::new(DbStore::new(database))
        }
        StoreMode::Local => {
            let store = Arc::new(
                LocalStore::open(&config.store_dir, &config.seed_path)
                    .await
                    .context("Failed to open local store")?,
            );
            info!(dir = %config.store_dir.display(), "Local store opened");
            local = Some(store.clone());
            store
        }
        StoreMode::Remote => {
            // validate() guarantees the base URL is present and parseable
            let base = config.api_base_url.as_deref().unwrap_or_default();
            let store = Arc::new(RemoteStore::new(base).context("Failed to build API client")?);
            info!(base_url = base, "Remote backend configured");
            remote = Some(store.clone());
            store
        }
        StoreMode::Fixed => {
            info!("Serving the fixed post collection, mutation disabled");
            Arc::new(FixedStore::new())
        }
    };

    let state = AppState {
        store,
        db,
        local,
        remote,
        sessions: SessionCache::default(),
        config: Arc::new(config),
    };

    // Start web server in background
    let web_handle = tokio::spawn(async move {
        if let Err(e) = web::serve(state).await {
            error!("Web server error: {e:#}");
        }
    });

    // Wait for shutdown signal
    shutdown_signal().await;

    info!("Shutting down...");

    web_handle.abort();

    info!("Shutdown complete");

    Ok(())
}

/// Create the admin account on first run, when credentials are configured.
async fn bootstrap_admin(db: &Database, config: &Config) -> Result<()> {
    let user_count = db::count_users(db.pool()).await?;
    if user_count > 0 {
        return Ok(());
    }

    match (
        config.admin_username.as_deref(),
        config.admin_password.as_deref(),
    ) {
        (Some(username), Some(password)) => {
            let password_hash = hash_password(password)?;
            db::create_user(db.pool(), username, &password_hash).await?;
            info!(username, "Bootstrapped admin user");
        }
        _ => {
            warn!("No users exist and ADMIN_USERNAME/ADMIN_PASSWORD are not set; the admin dashboard is unreachable");
        }
    }

    Ok(())
}

/// Best-effort purge of expired sessions on startup.
async fn cleanup_sessions(db: &Database) {
    let now = chrono::Utc::now().to_rfc3339();
    match db::delete_expired_sessions(db.pool(), &now).await {
        Ok(0) => {}
        Ok(n) => info!(count = n, "Purged expired sessions"),
        Err(e) => warn!("Failed to purge expired sessions: {e:#}"),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,factshield=debug"));

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
