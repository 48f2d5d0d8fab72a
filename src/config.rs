use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Which post store backend the site runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Posts and users in SQLite, full login and CRUD.
    Database,
    /// Posts in a JSON store directory, merged with bundled seed data.
    Local,
    /// Posts proxied to an external HTTP backend.
    Remote,
    /// Hard-coded read-only collection, no login.
    Fixed,
}

impl StoreMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Fixed => "fixed",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Store backend
    pub store_mode: StoreMode,

    // Database mode
    pub database_path: PathBuf,

    // Local mode
    pub store_dir: PathBuf,
    pub seed_path: PathBuf,

    // Remote mode
    pub api_base_url: Option<String>,

    // Admin credentials: bootstrap user in database mode, login gate in
    // local mode.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,

    // Sessions
    pub session_ttl_secs: i64,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store_mode: parse_store_mode(&env_or_default("STORE_MODE", "database"))?,

            database_path: PathBuf::from(env_or_default(
                "DATABASE_PATH",
                "./data/factshield.sqlite",
            )),

            store_dir: PathBuf::from(env_or_default("STORE_DIR", "./data/store")),
            seed_path: PathBuf::from(env_or_default("SEED_PATH", "./posts.json")),

            api_base_url: optional_env("API_BASE_URL"),

            admin_username: optional_env("ADMIN_USERNAME"),
            admin_password: optional_env("ADMIN_PASSWORD"),

            session_ttl_secs: parse_env_i64("SESSION_TTL_SECS", 86_400)?,

            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_TTL_SECS".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.store_mode == StoreMode::Remote {
            match self.api_base_url.as_deref() {
                None => return Err(ConfigError::MissingEnvVar("API_BASE_URL".to_string())),
                Some(base) => {
                    url::Url::parse(base).map_err(|e| ConfigError::InvalidValue {
                        name: "API_BASE_URL".to_string(),
                        message: e.to_string(),
                    })?;
                }
            }
        }
        if self.store_mode == StoreMode::Local
            && (self.admin_username.is_none() || self.admin_password.is_none())
        {
            // Local mode has no user table, so the admin gate is env-driven.
            return Err(ConfigError::InvalidValue {
                name: "ADMIN_USERNAME/ADMIN_PASSWORD".to_string(),
                message: "required in local store mode".to_string(),
            });
        }
        Ok(())
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_i64(name: &str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_store_mode(value: &str) -> Result<StoreMode, ConfigError> {
    match value.to_lowercase().as_str() {
        "database" | "db" => Ok(StoreMode::Database),
        "local" => Ok(StoreMode::Local),
        "remote" => Ok(StoreMode::Remote),
        "fixed" | "static" => Ok(StoreMode::Fixed),
        _ => Err(ConfigError::InvalidValue {
            name: "STORE_MODE".to_string(),
            message: format!("must be 'database', 'local', 'remote' or 'fixed', got '{value}'"),
        }),
    }
}
