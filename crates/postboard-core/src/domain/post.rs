use std::fmt;

use serde::{Deserialize, Serialize};

/// Markup an empty rich-text editor produces; treated as "no content".
pub const EMPTY_EDITOR_MARKUP: &str = "<p><br></p>";

/// Opaque post identifier, assigned by the document store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an id coming from a form field. Blank input means "no id".
    pub fn parse_optional(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<PostId> for String {
    fn from(value: PostId) -> Self {
        value.0
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Post entity - a blog entry as stored in the `posts` collection.
///
/// Field names serialize the way the document store knows them
/// (`readTime`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    /// Display date captured at creation, never recomputed.
    #[serde(default)]
    pub date: String,
    /// Unix milliseconds.
    pub created_at: i64,
    /// Unix milliseconds.
    pub updated_at: i64,
}

impl Post {
    /// Materialize a stored post from a draft and the id the store assigned.
    pub fn from_draft(id: PostId, draft: PostDraft) -> Self {
        let PostDraft {
            fields,
            image,
            date,
            created_at,
            updated_at,
        } = draft;

        Self {
            id,
            title: fields.title,
            excerpt: fields.excerpt,
            content: fields.content,
            image,
            category: fields.category,
            read_time: fields.read_time,
            date,
            created_at,
            updated_at,
        }
    }

    /// Merge a patch into this post. `image` is only replaced when the patch carries one.
    pub fn apply_patch(&mut self, patch: PostPatch) {
        let PostPatch {
            fields,
            image,
            updated_at,
        } = patch;

        self.title = fields.title;
        self.excerpt = fields.excerpt;
        self.content = fields.content;
        self.category = fields.category;
        self.read_time = fields.read_time;
        self.updated_at = updated_at;
        if image.is_some() {
            self.image = image;
        }
    }

    /// Editable fields of this post, used to prefill the edit form.
    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            read_time: self.read_time.clone(),
        }
    }
}

/// The author-editable part of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Option<String>,
    pub read_time: Option<String>,
}

impl PostFields {
    /// Trim surrounding whitespace and turn blank optional values into `None`.
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content.trim().to_string(),
            category: non_blank(self.category),
            read_time: non_blank(self.read_time),
        }
    }

    /// True when the content is blank or the empty-editor sentinel.
    pub fn has_empty_content(&self) -> bool {
        let content = self.content.trim();
        content.is_empty() || content == EMPTY_EDITOR_MARKUP
    }
}

/// Payload for a new document; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub fields: PostFields,
    pub image: Option<String>,
    pub date: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Merge payload for an existing document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPatch {
    pub fields: PostFields,
    /// Only written when `Some`; `None` leaves the stored image untouched.
    pub image: Option<String>,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> PostFields {
        PostFields {
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            content: "<p>body</p>".to_string(),
            category: None,
            read_time: None,
        }
    }

    fn stored() -> Post {
        Post::from_draft(
            PostId::new("p1"),
            PostDraft {
                fields: fields("First"),
                image: Some("https://cdn.test/covers/1_a.png".to_string()),
                date: "1/2/2026".to_string(),
                created_at: 10,
                updated_at: 10,
            },
        )
    }

    #[test]
    fn test_patch_without_image_keeps_cover() {
        let mut post = stored();
        post.apply_patch(PostPatch {
            fields: fields("Renamed"),
            image: None,
            updated_at: 20,
        });

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.updated_at, 20);
        assert_eq!(post.created_at, 10);
        assert_eq!(post.image.as_deref(), Some("https://cdn.test/covers/1_a.png"));
    }

    #[test]
    fn test_patch_with_image_replaces_cover() {
        let mut post = stored();
        post.apply_patch(PostPatch {
            fields: fields("First"),
            image: Some("https://cdn.test/covers/2_b.png".to_string()),
            updated_at: 30,
        });

        assert_eq!(post.image.as_deref(), Some("https://cdn.test/covers/2_b.png"));
    }

    #[test]
    fn test_empty_editor_markup_counts_as_empty() {
        let mut f = fields("t");
        f.content = "  <p><br></p> ".to_string();
        assert!(f.has_empty_content());

        f.content = "<p>hi</p>".to_string();
        assert!(!f.has_empty_content());
    }

    #[test]
    fn test_normalized_drops_blank_metadata() {
        let f = PostFields {
            title: "  Hello ".to_string(),
            excerpt: String::new(),
            content: "x".to_string(),
            category: Some("   ".to_string()),
            read_time: Some(" 5 min ".to_string()),
        }
        .normalized();

        assert_eq!(f.title, "Hello");
        assert_eq!(f.category, None);
        assert_eq!(f.read_time.as_deref(), Some("5 min"));
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(PostId::parse_optional("   "), None);
        assert_eq!(PostId::parse_optional(" abc "), Some(PostId::new("abc")));
    }

    #[test]
    fn test_serializes_document_field_names() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["createdAt"], 10);
        assert_eq!(json["updatedAt"], 10);
        assert!(json.get("readTime").is_none());
    }
}
