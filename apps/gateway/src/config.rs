//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_infra::JwtConfig;

/// Where the backend posts service lives.
#[derive(Debug, Clone)]
pub struct PostsServiceConfig {
    pub url: String,
    pub timeout: Duration,
}

/// Authentication database settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs against the in-memory posts backend.
    pub posts_service: Option<PostsServiceConfig>,
    /// `None` runs against the in-memory authentication store.
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtConfig,
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let posts_service = env::var("POSTS_SERVICE_URL")
            .ok()
            .map(|url| PostsServiceConfig {
                url,
                timeout: Duration::from_secs(parsed("POSTS_SERVICE_TIMEOUT_SECS", 5)),
            });

        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseSettings {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 100),
            min_connections: parsed("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            posts_service,
            database,
            jwt: JwtConfig::from_env(),
        }
    }
}
