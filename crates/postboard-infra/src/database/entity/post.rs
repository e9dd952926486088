//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

use postboard_core::domain::{Post, PostDraft, PostId, PostPatch};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub read_time: Option<String>,
    pub date: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: PostId::new(model.id),
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            image: model.image,
            category: model.category,
            read_time: model.read_time,
            date: model.date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl ActiveModel {
    /// Every column set, for a fresh row.
    pub fn for_insert(id: PostId, draft: PostDraft) -> Self {
        let fields = draft.fields;
        Self {
            id: Set(id.into()),
            title: Set(fields.title),
            excerpt: Set(fields.excerpt),
            content: Set(fields.content),
            image: Set(draft.image),
            category: Set(fields.category),
            read_time: Set(fields.read_time),
            date: Set(draft.date),
            created_at: Set(draft.created_at),
            updated_at: Set(draft.updated_at),
        }
    }

    /// Only the patched columns set. `image`, `date` and `created_at` stay
    /// `NotSet` unless the patch carries a new cover.
    pub fn for_patch(id: &PostId, patch: PostPatch) -> Self {
        let fields = patch.fields;
        Self {
            id: Unchanged(id.to_string()),
            title: Set(fields.title),
            excerpt: Set(fields.excerpt),
            content: Set(fields.content),
            image: match patch.image {
                Some(url) => Set(Some(url)),
                None => NotSet,
            },
            category: Set(fields.category),
            read_time: Set(fields.read_time),
            date: NotSet,
            created_at: NotSet,
            updated_at: Set(patch.updated_at),
        }
    }
}
