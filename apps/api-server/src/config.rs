//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// MongoDB connection string; the server runs on the in-memory store
    /// when unset (or when built without the `mongo` feature).
    pub mongo_url: Option<String>,
    pub mongo_db: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            mongo_url: env::var("MONGO_URL").ok(),
            mongo_db: env::var("MONGO_DB").unwrap_or_else(|_| "ripple".to_string()),
        }
    }
}
