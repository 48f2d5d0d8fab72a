//! Shared helpers for integration tests.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use factshield::auth::SessionCache;
use factshield::config::{Config, StoreMode};
use factshield::db::Database;
use factshield::store::DbStore;
use factshield::web::{create_app, AppState};

/// A config pointing all paths into the given temp directory.
#[must_use]
pub fn test_config(mode: StoreMode, dir: &Path) -> Config {
    Config {
        store_mode: mode,
        database_path: dir.join("test.sqlite"),
        store_dir: dir.join("store"),
        seed_path: dir.join("posts.json"),
        api_base_url: None,
        admin_username: Some("admin".to_string()),
        admin_password: Some("correct-horse-battery".to_string()),
        session_ttl_secs: 3600,
        web_host: "127.0.0.1".to_string(),
        web_port: 0,
    }
}

/// Build a database-mode app on a fresh SQLite file.
pub async fn database_app(dir: &Path) -> (Router, Database) {
    let config = test_config(StoreMode::Database, dir);
    let db = Database::new(&config.database_path)
        .await
        .expect("Failed to open test database");

    let state = AppState {
        store: Arc::new(DbStore::new(db.clone())),
        db: Some(db.clone()),
        local: None,
        remote: None,
        sessions: SessionCache::default(),
        config: Arc::new(config),
    };

    (create_app(state), db)
}
