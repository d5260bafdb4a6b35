//! Application state - shared across all handlers.

use std::sync::Arc;

use whisper_core::PostService;
use whisper_core::ports::{PostRepository, SecretHasher, TokenService};
use whisper_infra::{Argon2SecretHasher, InMemoryPostRepository, JwtTokenService};

#[cfg(feature = "postgres")]
use whisper_infra::PostgresPostRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state with the storage the configuration asks for.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repo = Self::repository(config).await?;
        let hasher = Arc::new(Argon2SecretHasher::new(&config.secret_hash)?);
        let tokens = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!("Application state initialized");

        Ok(Self::from_parts(repo, hasher, tokens))
    }

    pub fn from_parts(
        repo: Arc<dyn PostRepository>,
        hasher: Arc<dyn SecretHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            posts: Arc::new(PostService::new(repo, hasher)),
            tokens,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repository(config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        match &config.database {
            Some(db_config) => {
                let conn = whisper_infra::database::connect(db_config).await?;
                Ok(Arc::new(PostgresPostRepository::new(conn)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Posts are kept in memory only.");
                Ok(Arc::new(InMemoryPostRepository::new()))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repository(config: &AppConfig) -> anyhow::Result<Arc<dyn PostRepository>> {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Using in-memory post repository");
        Ok(Arc::new(InMemoryPostRepository::new()))
    }
}
