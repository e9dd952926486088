//! Create/update of posts, including the optional cover upload.

use crate::domain::{PostDraft, PostFields, PostId, PostPatch};
use crate::error::{BoardError, RepoError};
use crate::ports::{BaseRepository, ObjectStore};

use super::PostBoard;

/// A file chosen in the admin form, carried with the submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Browsers send an empty part when no file was picked.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The admin form as submitted.
#[derive(Debug, Clone, Default)]
pub struct SubmitPost {
    /// Edit target from the hidden id field; `None` creates a new post.
    pub edit_id: Option<PostId>,
    pub fields: PostFields,
    pub file: Option<SelectedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(PostId),
    Updated(PostId),
}

impl SubmitOutcome {
    pub fn id(&self) -> &PostId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// A cover written to the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedCover {
    pub key: String,
    pub url: String,
}

/// Object key for an upload: `<prefix>/<millis>_<filename>`.
///
/// Only the last path component of the client's filename is kept, and
/// characters outside `[A-Za-z0-9._-]` become `_`. Two uploads of the same
/// name within one millisecond share a key.
pub fn cover_key(prefix: &str, millis: i64, filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut name: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.trim_matches('.').is_empty() {
        name = "upload".to_string();
    }

    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{millis}_{name}")
    } else {
        format!("{prefix}/{millis}_{name}")
    }
}

fn validate(fields: &PostFields) -> Result<(), BoardError> {
    if fields.title.trim().is_empty() || fields.has_empty_content() {
        return Err(BoardError::validation("Title and Content are required."));
    }
    Ok(())
}

impl PostBoard {
    /// Create or update a post from the admin form.
    ///
    /// Validation happens before any store call. Mutations are serialized, so
    /// a double submit waits for the first one instead of interleaving.
    pub async fn submit(&self, cmd: SubmitPost) -> Result<SubmitOutcome, BoardError> {
        let SubmitPost {
            edit_id,
            fields,
            file,
        } = cmd;
        let fields = fields.normalized();
        validate(&fields)?;

        let _write = self.writes.lock().await;
        let outcome = match edit_id {
            None => self.create(fields, file.as_ref()).await?,
            Some(id) => self.update(id, fields, file.as_ref()).await?,
        };

        self.refresh_after_write().await;
        Ok(outcome)
    }

    /// Upload the selected file, if any, and resolve its public URL.
    ///
    /// `Ok(None)` when nothing was selected; no store call is made then.
    pub async fn upload_if_present(
        &self,
        file: Option<&SelectedFile>,
    ) -> Result<Option<UploadedCover>, BoardError> {
        let Some(file) = file.filter(|f| !f.is_empty()) else {
            return Ok(None);
        };

        let millis = self.clock.now().timestamp_millis();
        let key = cover_key(&self.settings.cover_prefix, millis, &file.filename);
        self.media.put(&key, &file.bytes, &file.content_type).await?;

        let url = self.media.public_url(&key);
        tracing::debug!(key = %key, size = file.bytes.len(), "Cover uploaded");
        Ok(Some(UploadedCover { key, url }))
    }

    async fn create(
        &self,
        fields: PostFields,
        file: Option<&SelectedFile>,
    ) -> Result<SubmitOutcome, BoardError> {
        let cover = self.upload_if_present(file).await?;

        let now = self.clock.now();
        let millis = now.timestamp_millis();
        let draft = PostDraft {
            fields,
            image: cover.as_ref().map(|c| c.url.clone()),
            date: self.display_date(now),
            created_at: millis,
            updated_at: millis,
        };

        match self.posts.insert(draft).await {
            Ok(post) => {
                tracing::info!(post_id = %post.id, "Post published");
                Ok(SubmitOutcome::Created(post.id))
            }
            Err(e) => {
                self.discard(cover).await;
                Err(e.into())
            }
        }
    }

    async fn update(
        &self,
        id: PostId,
        fields: PostFields,
        file: Option<&SelectedFile>,
    ) -> Result<SubmitOutcome, BoardError> {
        if self.posts.find_by_id(&id).await?.is_none() {
            return Err(BoardError::NotFound(id));
        }

        let cover = self.upload_if_present(file).await?;
        let patch = PostPatch {
            fields,
            image: cover.as_ref().map(|c| c.url.clone()),
            updated_at: self.clock.now().timestamp_millis(),
        };

        match self.posts.update(&id, patch).await {
            Ok(_) => {
                tracing::info!(post_id = %id, new_cover = cover.is_some(), "Post updated");
                Ok(SubmitOutcome::Updated(id))
            }
            Err(e) => {
                self.discard(cover).await;
                Err(match e {
                    RepoError::NotFound => BoardError::NotFound(id),
                    other => other.into(),
                })
            }
        }
    }

    /// Remove a cover whose document write failed.
    async fn discard(&self, cover: Option<UploadedCover>) {
        if let Some(cover) = cover {
            self.remove_cover(&cover.key).await;
        }
    }
}
