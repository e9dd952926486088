//! The post board - owner of the in-memory post cache.
//!
//! Every read the views make goes through the cache; every mutation goes to
//! the document store first and then refetches the cache wholesale. The cache
//! is never patched in place.

mod filter;
mod submit;

#[cfg(test)]
mod fakes;

use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local, Utc};
use tokio::sync::Mutex;

use crate::domain::{Post, PostId};
use crate::error::{BoardError, RepoError};
use crate::ports::{BaseRepository, Clock, ObjectStore, PostRepository, SystemClock};

pub use filter::filter_posts;
pub use submit::{SelectedFile, SubmitOutcome, SubmitPost, UploadedCover, cover_key};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tunables of the board.
#[derive(Debug, Clone)]
pub struct BoardSettings {
    /// Key namespace for uploaded covers, e.g. `covers`.
    pub cover_prefix: String,
    /// `strftime` pattern for the display date snapshot.
    pub date_format: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            cover_prefix: "covers".to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

#[derive(Default)]
struct PostCache {
    posts: Arc<[Post]>,
    fetch_error: Option<String>,
}

/// Application state for posts: the store handles plus the cached sequence.
pub struct PostBoard {
    posts: Arc<dyn PostRepository>,
    media: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
    settings: BoardSettings,
    cache: RwLock<PostCache>,
    writes: Mutex<()>,
}

impl PostBoard {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        media: Arc<dyn ObjectStore>,
        settings: BoardSettings,
    ) -> Self {
        Self::with_clock(posts, media, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        posts: Arc<dyn PostRepository>,
        media: Arc<dyn ObjectStore>,
        settings: BoardSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            media,
            clock,
            settings,
            cache: RwLock::new(PostCache::default()),
            writes: Mutex::new(()),
        }
    }

    /// The object store covers are written to.
    pub fn media(&self) -> &Arc<dyn ObjectStore> {
        &self.media
    }

    /// Fetch every post, newest first, and replace the cache with the result.
    ///
    /// On failure the previous cache is kept and the error is remembered for
    /// [`PostBoard::last_fetch_error`]. There is no retry.
    pub async fn load_posts(&self) -> Result<Arc<[Post]>, BoardError> {
        match self.posts.list_recent().await {
            Ok(posts) => {
                let posts: Arc<[Post]> = posts.into();
                tracing::debug!(count = posts.len(), "Post cache refreshed");

                let mut cache = self.write_cache();
                cache.posts = Arc::clone(&posts);
                cache.fetch_error = None;
                Ok(posts)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch posts");
                self.write_cache().fetch_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Snapshot of the cached posts in store order.
    pub fn posts(&self) -> Arc<[Post]> {
        Arc::clone(&self.read_cache().posts)
    }

    /// Message of the last failed fetch, cleared by the next successful one.
    pub fn last_fetch_error(&self) -> Option<String> {
        self.read_cache().fetch_error.clone()
    }

    /// Look a post up in the cache (never the store) for the reader view.
    pub fn open_post(&self, id: &str) -> Option<Post> {
        self.read_cache()
            .posts
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
    }

    /// Cached post to prefill the edit form with.
    pub fn edit_target(&self, id: &str) -> Option<Post> {
        self.open_post(id)
    }

    /// Case-insensitive search over the cached titles and contents.
    pub fn search(&self, term: &str) -> Vec<Post> {
        filter_posts(&self.posts(), term)
    }

    /// Delete one post, then refetch.
    ///
    /// Callers must have obtained the user's confirmation. If the post's cover
    /// lives in this board's object store it is removed as well.
    pub async fn delete_post(&self, id: &PostId) -> Result<(), BoardError> {
        let _write = self.writes.lock().await;

        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound(id.clone()))?;

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => BoardError::NotFound(id.clone()),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");

        if let Some(key) = existing
            .image
            .as_deref()
            .and_then(|url| self.media.key_for_url(url))
        {
            self.remove_cover(&key).await;
        }

        self.refresh_after_write().await;
        Ok(())
    }

    async fn refresh_after_write(&self) {
        if let Err(e) = self.load_posts().await {
            tracing::warn!(error = %e, "Post cache is stale after a successful write");
        }
    }

    async fn remove_cover(&self, key: &str) {
        match self.media.delete(key).await {
            Ok(()) => tracing::debug!(key = %key, "Cover removed"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Failed to remove cover"),
        }
    }

    fn display_date(&self, now: DateTime<Utc>) -> String {
        let local = now.with_timezone(&Local);
        let mut out = String::new();
        if write!(out, "{}", local.format(&self.settings.date_format)).is_ok() {
            return out;
        }

        tracing::warn!(format = %self.settings.date_format, "Invalid date format, using fallback");
        local.format(FALLBACK_DATE_FORMAT).to_string()
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, PostCache> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, PostCache> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::{FakeMedia, FakeRepo, board_with};
    use super::*;

    #[tokio::test]
    async fn test_load_replaces_cache_in_store_order() {
        let repo = FakeRepo::seeded(&[("a", "Alpha", 1), ("b", "Beta", 3), ("c", "Gamma", 2)]);
        let board = board_with(repo, FakeMedia::new());

        let posts = board.load_posts().await.unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
        assert_eq!(board.posts().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_cache() {
        let repo = FakeRepo::seeded(&[("a", "Alpha", 1)]);
        let board = board_with(repo.clone(), FakeMedia::new());
        board.load_posts().await.unwrap();

        repo.fail_reads(true);
        assert!(board.load_posts().await.is_err());
        assert_eq!(board.posts().len(), 1);
        assert!(board.last_fetch_error().is_some());

        repo.fail_reads(false);
        board.load_posts().await.unwrap();
        assert_eq!(board.last_fetch_error(), None);
    }

    #[tokio::test]
    async fn test_open_post_reads_cache_not_store() {
        let repo = FakeRepo::seeded(&[("a", "Alpha", 1)]);
        let board = board_with(repo.clone(), FakeMedia::new());
        board.load_posts().await.unwrap();

        repo.fail_reads(true);
        let post = board.open_post("a").unwrap();
        assert_eq!(post.title, "Alpha");
        assert!(board.open_post("missing").is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_post() {
        let repo = FakeRepo::seeded(&[("a", "Alpha", 1), ("b", "Beta", 2), ("c", "Gamma", 3)]);
        let board = board_with(repo.clone(), FakeMedia::new());
        board.load_posts().await.unwrap();

        board.delete_post(&PostId::new("b")).await.unwrap();

        let ids: Vec<_> = board.posts().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["c", "a"]);
        assert_eq!(repo.ids(), ["a", "c"]);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let repo = FakeRepo::seeded(&[("a", "Alpha", 1)]);
        let board = board_with(repo.clone(), FakeMedia::new());

        let err = board.delete_post(&PostId::new("zzz")).await.unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
        assert_eq!(repo.ids(), ["a"]);
    }

    #[tokio::test]
    async fn test_delete_removes_own_cover_only() {
        let media = FakeMedia::new();
        media.seed("covers/1_a.png");
        let repo = FakeRepo::seeded(&[("a", "Alpha", 1), ("b", "Beta", 2)]);
        repo.set_image("a", &media.public_url("covers/1_a.png"));
        repo.set_image("b", "https://elsewhere.test/b.png");
        let board = board_with(repo, media.clone());

        board.delete_post(&PostId::new("b")).await.unwrap();
        assert!(media.contains("covers/1_a.png"));

        board.delete_post(&PostId::new("a")).await.unwrap();
        assert!(!media.contains("covers/1_a.png"));
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let settings = BoardSettings {
            date_format: "%Q".to_string(),
            ..BoardSettings::default()
        };
        let board = PostBoard::new(FakeRepo::seeded(&[]), FakeMedia::new(), settings);
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        assert_eq!(board.display_date(now).len(), "2023-11-14".len());
    }
}
