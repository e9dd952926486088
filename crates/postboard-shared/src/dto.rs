//! Data Transfer Objects - request/response types for the API and forms.

use serde::{Deserialize, Serialize};

use postboard_core::domain::Post;

/// A post as the JSON API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    pub date: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            category: post.category.clone(),
            read_time: post.read_time.clone(),
            date: post.date.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// `?q=` search over the cached posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Body of the delete confirmation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub confirm: String,
}

impl DeleteConfirmation {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.eq_ignore_ascii_case("yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_core::domain::{PostDraft, PostFields, PostId};

    #[test]
    fn test_post_response_uses_document_field_names() {
        let post = Post::from_draft(
            PostId::new("abc"),
            PostDraft {
                fields: PostFields {
                    title: "A".to_string(),
                    excerpt: "B".to_string(),
                    content: "C".to_string(),
                    category: None,
                    read_time: Some("4 min read".to_string()),
                },
                image: None,
                date: "3/4/2026".to_string(),
                created_at: 1,
                updated_at: 2,
            },
        );

        let json = serde_json::to_value(PostResponse::from(&post)).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["readTime"], "4 min read");
        assert_eq!(json["createdAt"], 1);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_delete_requires_explicit_yes() {
        let yes = DeleteConfirmation {
            confirm: "YES".to_string(),
        };
        let empty = DeleteConfirmation {
            confirm: String::new(),
        };
        assert!(yes.is_confirmed());
        assert!(!empty.is_confirmed());
    }
}
