//! Server-rendered HTML views.
//!
//! Every function here is a pure projection of cached posts into markup, so
//! each request re-renders the whole page.

pub mod admin;
pub mod grid;
pub mod layout;
pub mod reader;

use maud::PreEscaped;

pub use admin::{PostForm, render_admin_page, render_delete_confirm};
pub use grid::render_public_page;
pub use layout::Layout;
pub use reader::render_reader;

/// Reader URL of a post; the same link is used for sharing.
pub fn reader_url(id: &str) -> String {
    format!("/?post={id}")
}

/// Post bodies are stored as HTML; only whitelisted markup reaches the page.
pub fn sanitized(content: &str) -> PreEscaped<String> {
    PreEscaped(ammonia::clean(content))
}
