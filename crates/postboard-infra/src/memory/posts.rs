//! In-memory document store - the fallback when PostgreSQL is not configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use postboard_core::domain::{Post, PostDraft, PostId, PostPatch};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository};

/// `posts` collection held in a HashMap behind an async RwLock.
///
/// Ids are random UUIDs, like a hosted document store would assign.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(id).cloned())
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        // Ties broken by id so listing is deterministic
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(posts)
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let id = PostId::new(Uuid::new_v4().simple().to_string());
        let post = Post::from_draft(id.clone(), draft);

        let mut store = self.store.write().await;
        store.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.get_mut(id).ok_or(RepoError::NotFound)?;
        post.apply_patch(patch);
        Ok(post.clone())
    }
}
