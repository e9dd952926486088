//! Multipart decoding of the admin post form.

use actix_multipart::{Field, Multipart};
use futures::StreamExt;
use postboard_core::domain::PostId;
use postboard_core::{SelectedFile, SubmitPost};

use crate::error::{AppError, AppResult};

/// Read the whole form into a submit command.
///
/// Every part is capped at `max_bytes`. An `image` part without a filename
/// or without content means no file was selected.
pub async fn read_submit(mut payload: Multipart, max_bytes: usize) -> AppResult<SubmitPost> {
    let mut cmd = SubmitPost::default();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::BadRequest(e.to_string()))?;
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let declared = field.content_type().map(|m| m.essence_str().to_string());
        let bytes = read_field(&mut field, &name, max_bytes).await?;

        match name.as_str() {
            "image" => {
                cmd.file = filename
                    .filter(|f| !f.trim().is_empty() && !bytes.is_empty())
                    .map(|filename| SelectedFile {
                        content_type: content_type_for(&filename, declared.as_deref()),
                        filename,
                        bytes,
                    });
            }
            "edit-doc-id" => cmd.edit_id = PostId::parse_optional(&text(&name, bytes)?),
            "title" => cmd.fields.title = text(&name, bytes)?,
            "excerpt" => cmd.fields.excerpt = text(&name, bytes)?,
            "content" => cmd.fields.content = text(&name, bytes)?,
            "category" => cmd.fields.category = Some(text(&name, bytes)?),
            "read_time" => cmd.fields.read_time = Some(text(&name, bytes)?),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(cmd)
}

async fn read_field(field: &mut Field, name: &str, max_bytes: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.len() + chunk.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Field '{name}' exceeds {max_bytes} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn text(name: &str, bytes: Vec<u8>) -> AppResult<String> {
    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest(format!("Field '{name}' is not valid UTF-8")))
}

/// The declared type unless the browser fell back to a generic one.
fn content_type_for(filename: &str, declared: Option<&str>) -> String {
    match declared {
        Some(mime) if mime != "application/octet-stream" => mime.to_string(),
        _ => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}
