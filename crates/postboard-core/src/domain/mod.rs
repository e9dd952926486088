//! Domain entities - the core business objects.

mod post;

pub use post::{EMPTY_EDITOR_MARKUP, Post, PostDraft, PostFields, PostId, PostPatch};
