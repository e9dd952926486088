//! Public reader page.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::{html_page, wants_refresh};
use crate::state::AppState;
use crate::views::render_public_page;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Search term over titles and contents.
    #[serde(default)]
    pub q: Option<String>,
    /// Post to open in the reader.
    #[serde(default)]
    pub post: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Public grid, optionally filtered and with the reader open.
///
/// GET /
pub async fn index(state: web::Data<AppState>, query: web::Query<IndexQuery>) -> HttpResponse {
    let board = &state.board;
    if wants_refresh(query.refresh.as_deref()) {
        // A failure is surfaced through `last_fetch_error`
        let _ = board.load_posts().await;
    }

    let term = query.q.as_deref().unwrap_or_default();
    let posts = board.search(term);
    // Unknown ids render the page without the reader
    let open = query.post.as_deref().and_then(|id| board.open_post(id));
    let fetch_error = board.last_fetch_error();

    html_page(
        StatusCode::OK,
        render_public_page(&state.site, &posts, term, open.as_ref(), fetch_error.as_deref()),
    )
}
