use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId, PostPatch};
use crate::error::RepoError;

/// Generic repository trait for keyed lookups and removal.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: &ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Missing entities yield `RepoError::NotFound`.
    async fn delete(&self, id: &ID) -> Result<(), RepoError>;
}

/// The `posts` collection of the document store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, newest `created_at` first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Write a new document. The store assigns the id.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Merge a patch into an existing document.
    async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, RepoError>;
}
