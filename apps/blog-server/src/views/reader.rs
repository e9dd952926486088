//! Full-post reader shown as a modal over the grid.

use maud::{Markup, html};
use postboard_core::domain::Post;

use super::sanitized;
use crate::config::SiteConfig;

/// `date • read time • author`; the read time is left out when unset.
pub fn meta_line(post: &Post, author: &str) -> String {
    let mut parts = vec![post.date.as_str()];
    if let Some(read_time) = post.read_time.as_deref() {
        parts.push(read_time);
    }
    parts.push(author);
    parts.join(" \u{2022} ")
}

pub fn render_reader(post: &Post, site: &SiteConfig) -> Markup {
    html! {
        div class="modal active" id="postModal" role="dialog" aria-modal="true"
            aria-labelledby="modalTitle" {
            div class="modal-panel" {
                div id="modalHeader" {
                    @match post.image.as_deref() {
                        Some(src) => {
                            img class="modal-image" src=(src) alt=(post.title);
                        }
                        None => {
                            div class="modal-gradient" {}
                        }
                    }
                }
                div class="modal-body" {
                    a class="btn-link" href="/" aria-label="Close" { "\u{2190} Back" }
                    @if let Some(category) = post.category.as_deref() {
                        p class="modal-category" { (category) }
                    }
                    h1 id="modalTitle" { (post.title) }
                    p class="modal-meta" id="modalMeta" { (meta_line(post, &site.author_label)) }
                    div id="modalContent" { (sanitized(&post.content)) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_core::domain::{PostDraft, PostFields, PostId};

    fn post(image: Option<&str>, read_time: Option<&str>) -> Post {
        Post::from_draft(
            PostId::new("p1"),
            PostDraft {
                fields: PostFields {
                    title: "Hello".to_string(),
                    content: "<p>Body</p><script>steal()</script>".to_string(),
                    read_time: read_time.map(str::to_string),
                    ..PostFields::default()
                },
                image: image.map(str::to_string),
                date: "3/4/2026".to_string(),
                created_at: 1,
                updated_at: 1,
            },
        )
    }

    #[test]
    fn test_meta_line() {
        assert_eq!(
            meta_line(&post(None, Some("5 min read")), "The Editors"),
            "3/4/2026 \u{2022} 5 min read \u{2022} The Editors"
        );
        assert_eq!(
            meta_line(&post(None, None), "The Editors"),
            "3/4/2026 \u{2022} The Editors"
        );
    }

    #[test]
    fn test_cover_or_gradient() {
        let site = SiteConfig::default();
        let with_cover =
            render_reader(&post(Some("/media/covers/1_a.png"), None), &site).into_string();
        assert!(with_cover.contains(r#"class="modal-image" src="/media/covers/1_a.png""#));
        assert!(!with_cover.contains("modal-gradient"));

        let without = render_reader(&post(None, None), &site).into_string();
        assert!(without.contains("modal-gradient"));
    }

    #[test]
    fn test_content_is_sanitized() {
        let html = render_reader(&post(None, None), &SiteConfig::default()).into_string();
        assert!(html.contains("<p>Body</p>"));
        assert!(!html.contains("steal()"));
    }
}
