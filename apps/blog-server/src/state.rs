//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::PostBoard;
use postboard_core::ports::{MediaUrls, ObjectStore, PostRepository};
use postboard_infra::{InMemoryObjectStore, InMemoryPostRepository};

use crate::config::{AppConfig, SiteConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<PostBoard>,
    pub site: Arc<SiteConfig>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build the application state with appropriate implementations and prime the post cache.
    pub async fn new(config: &AppConfig) -> Self {
        let posts = document_store(config).await;
        let media = object_store(config);

        let state = Self::with_stores(posts, media, config);
        // A failed first fetch is logged by the board; pages show the error placeholder
        let _ = state.board.load_posts().await;

        tracing::info!("Application state initialized");
        state
    }

    /// State over explicit stores, without touching the environment.
    pub fn with_stores(
        posts: Arc<dyn PostRepository>,
        media: Arc<dyn ObjectStore>,
        config: &AppConfig,
    ) -> Self {
        Self {
            board: Arc::new(PostBoard::new(posts, media, config.board.clone())),
            site: Arc::new(config.site.clone()),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

#[cfg(feature = "postgres")]
async fn document_store(config: &AppConfig) -> Arc<dyn PostRepository> {
    use postboard_infra::PostgresPostRepository;
    use postboard_infra::database::connect;

    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryPostRepository::new());
    };

    match connect(db_config).await {
        Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryPostRepository::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn document_store(config: &AppConfig) -> Arc<dyn PostRepository> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored - built without postgres feature");
    }
    tracing::info!("Using in-memory document store");
    Arc::new(InMemoryPostRepository::new())
}

#[cfg(feature = "s3")]
fn object_store(config: &AppConfig) -> Arc<dyn ObjectStore> {
    use postboard_infra::S3ObjectStore;

    let urls = MediaUrls::new(config.media_base());
    let Some(s3_config) = config.s3.as_ref() else {
        tracing::warn!("S3_BUCKET not set. Covers are kept in memory.");
        return Arc::new(InMemoryObjectStore::new(urls));
    };

    match S3ObjectStore::new(s3_config, urls.clone()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to configure S3: {}. Using in-memory fallback.", e);
            Arc::new(InMemoryObjectStore::new(urls))
        }
    }
}

#[cfg(not(feature = "s3"))]
fn object_store(config: &AppConfig) -> Arc<dyn ObjectStore> {
    if config.s3.is_some() {
        tracing::warn!("S3_BUCKET ignored - built without s3 feature");
    }
    Arc::new(InMemoryObjectStore::new(MediaUrls::new(config.media_base())))
}
