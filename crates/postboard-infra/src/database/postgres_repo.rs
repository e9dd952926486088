//! PostgreSQL document store for the `posts` collection.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use postboard_core::domain::{Post, PostDraft, PostId, PostPatch};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        tracing::debug!(count = rows.len(), "Listed posts");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let id = PostId::new(Uuid::new_v4().simple().to_string());
        let model = post::ActiveModel::for_insert(id, draft)
            .insert(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(model.into())
    }

    async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, RepoError> {
        let model = post::ActiveModel::for_patch(id, patch)
            .update(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(model.into())
    }
}
