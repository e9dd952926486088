//! Admin dashboard handlers: list, create/edit and delete posts.

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use postboard_core::domain::PostId;
use postboard_core::{BoardError, SubmitOutcome};
use postboard_shared::dto::DeleteConfirmation;

use super::{RefreshQuery, form, html_page, see_other};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{PostForm, render_admin_page, render_delete_confirm};

/// Render the dashboard from the cache, with the given form and alert.
fn dashboard_page(
    state: &AppState,
    status: StatusCode,
    form: &PostForm,
    alert: Option<&str>,
) -> HttpResponse {
    let posts = state.board.posts();
    let fetch_error = state.board.last_fetch_error();
    html_page(
        status,
        render_admin_page(&state.site, &posts, fetch_error.as_deref(), form, alert),
    )
}

/// Failed mutations re-render the dashboard with the message in an alert.
fn failed(state: &AppState, form: &PostForm, err: BoardError) -> HttpResponse {
    let message = err.to_string();
    let status = AppError::from(err).status_code();
    tracing::warn!(status = status.as_u16(), error = %message, "Post mutation failed");
    dashboard_page(state, status, form, Some(&message))
}

/// Post table and a blank create form.
///
/// GET /admin
pub async fn dashboard(
    state: web::Data<AppState>,
    query: web::Query<RefreshQuery>,
) -> HttpResponse {
    if query.wants_refresh() {
        // A failure is surfaced through `last_fetch_error`
        let _ = state.board.load_posts().await;
    }
    dashboard_page(&state, StatusCode::OK, &PostForm::default(), None)
}

/// Dashboard with the form prefilled from the cached post.
///
/// GET /admin/posts/{id}/edit
pub async fn edit_form(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.board.edit_target(&path) {
        Some(post) => dashboard_page(&state, StatusCode::OK, &PostForm::for_post(&post), None),
        None => see_other("/admin"),
    }
}

/// Create or update a post from the multipart form.
///
/// POST /admin/posts
pub async fn submit(state: web::Data<AppState>, payload: Multipart) -> AppResult<HttpResponse> {
    let cmd = form::read_submit(payload, state.max_upload_bytes).await?;

    // Kept to re-render the form if the submit fails
    let form = PostForm {
        edit_id: cmd.edit_id.as_ref().map(PostId::to_string),
        fields: cmd.fields.clone(),
        image: cmd
            .edit_id
            .as_ref()
            .and_then(|id| state.board.edit_target(id.as_str()))
            .and_then(|post| post.image),
    };

    match state.board.submit(cmd).await {
        Ok(SubmitOutcome::Created(id)) => {
            tracing::debug!(post_id = %id, "Redirecting after publish");
            Ok(see_other("/admin"))
        }
        Ok(SubmitOutcome::Updated(id)) => {
            tracing::debug!(post_id = %id, "Redirecting after update");
            Ok(see_other("/admin"))
        }
        Err(err) => Ok(failed(&state, &form, err)),
    }
}

/// Ask before deleting.
///
/// GET /admin/posts/{id}/delete
pub async fn confirm_delete(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.board.edit_target(&path) {
        Some(post) => html_page(StatusCode::OK, render_delete_confirm(&state.site, &post)),
        None => see_other("/admin"),
    }
}

/// Delete once the confirmation form says yes; anything else cancels.
///
/// POST /admin/posts/{id}/delete
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
    confirmation: web::Form<DeleteConfirmation>,
) -> HttpResponse {
    if !confirmation.is_confirmed() {
        return see_other("/admin");
    }

    let id = PostId::new(path.into_inner());
    match state.board.delete_post(&id).await {
        Ok(()) => see_other("/admin"),
        Err(err) => failed(&state, &PostForm::default(), err),
    }
}
