//! Uploaded covers, streamed back from the object store.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use postboard_core::ports::validate_key;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /media/{key:.*}
pub async fn serve(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let key = path.into_inner();
    validate_key(&key)?;

    let object = state
        .board
        .media()
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No object at {key}")))?;

    // Keys carry their upload time, so an object never changes
    Ok(HttpResponse::Ok()
        .content_type(object.content_type)
        .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
        .body(object.bytes))
}
