//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{AuthStore, PasswordService, PostsService, TokenService};
use quill_infra::{
    Argon2PasswordService, InMemoryAuthStore, InMemoryPostsService, JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostsService>,
    pub auth_store: Arc<dyn AuthStore>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state, falling back to in-memory backends for
    /// anything that is not configured or cannot be reached.
    pub async fn new(config: &AppConfig) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        let posts = Self::posts_backend(config);
        let auth_store = Self::auth_store(config, passwords).await;

        tracing::info!("Application state initialized");

        Self {
            posts,
            auth_store,
            tokens,
        }
    }

    #[cfg(feature = "http-client")]
    fn posts_backend(config: &AppConfig) -> Arc<dyn PostsService> {
        use quill_infra::{HttpPostsClient, PostsClientConfig};

        let Some(posts) = &config.posts_service else {
            tracing::warn!("POSTS_SERVICE_URL not set. Using in-memory posts backend.");
            return Arc::new(InMemoryPostsService::new());
        };

        let client_config = PostsClientConfig::new(posts.url.clone()).with_timeout(posts.timeout);
        match HttpPostsClient::new(client_config) {
            Ok(client) => {
                tracing::info!(url = %posts.url, "Posts service client configured");
                Arc::new(client)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to build posts client: {}. Using in-memory posts backend.",
                    e
                );
                Arc::new(InMemoryPostsService::new())
            }
        }
    }

    #[cfg(not(feature = "http-client"))]
    fn posts_backend(_config: &AppConfig) -> Arc<dyn PostsService> {
        tracing::info!("Running without http-client feature - using in-memory posts backend");
        Arc::new(InMemoryPostsService::new())
    }

    #[cfg(feature = "postgres")]
    async fn auth_store(
        config: &AppConfig,
        passwords: Arc<dyn PasswordService>,
    ) -> Arc<dyn AuthStore> {
        use quill_infra::PostgresAuthStore;
        use quill_infra::database::{DatabaseConfig, connect};

        let Some(settings) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryAuthStore::new(passwords));
        };

        let db_config = DatabaseConfig {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
        };

        match connect(&db_config).await {
            Ok(conn) => Arc::new(PostgresAuthStore::new(conn, passwords)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryAuthStore::new(passwords))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn auth_store(
        _config: &AppConfig,
        passwords: Arc<dyn PasswordService>,
    ) -> Arc<dyn AuthStore> {
        tracing::info!("Running without postgres feature - using in-memory auth store");
        Arc::new(InMemoryAuthStore::new(passwords))
    }
}
