//! Public grid of post cards.

use maud::{Markup, html};
use postboard_core::domain::Post;

use super::{Layout, reader_url, render_reader};
use crate::config::SiteConfig;

/// One card per post, in the order given.
pub fn render_grid(posts: &[Post], site: &SiteConfig, fetch_error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = fetch_error {
            p class="placeholder error" { "Could not load posts: " (error) }
        }
        @if posts.is_empty() {
            @if fetch_error.is_none() {
                p class="placeholder" { "No posts yet." }
            }
        } @else {
            div class="blog-grid" id="blog-grid" {
                @for post in posts {
                    (render_card(post, site))
                }
            }
        }
    }
}

fn render_card(post: &Post, site: &SiteConfig) -> Markup {
    let href = reader_url(post.id.as_str());
    let image = post.image.as_deref().unwrap_or(&site.placeholder_image_url);

    html! {
        article class="blog-card" data-post-id=(post.id.as_str()) {
            a href=(href) {
                img class="card-image" src=(image) alt=(post.title) loading="lazy";
            }
            div class="card-body" {
                h2 class="card-title" {
                    a href=(href) { (post.title) }
                }
                p class="card-excerpt" { (post.excerpt) }
                div class="card-actions" {
                    a class="btn-link btn-share" href=(href) title="Share this post" { "Share" }
                    a class="btn" href=(href) { "Read" }
                }
            }
        }
    }
}

/// The public page: search box, grid, and the reader when a post is open.
pub fn render_public_page(
    site: &SiteConfig,
    posts: &[Post],
    query: &str,
    open: Option<&Post>,
    fetch_error: Option<&str>,
) -> Markup {
    let content = html! {
        form class="search" method="get" action="/" role="search" {
            input type="search" name="q" value=(query) placeholder="Search posts";
            button class="btn" type="submit" { "Search" }
        }
        @if posts.is_empty() && !query.trim().is_empty() && fetch_error.is_none() {
            p class="placeholder" { "No posts match \"" (query) "\"." }
        } @else {
            (render_grid(posts, site, fetch_error))
        }
        @if let Some(post) = open {
            (render_reader(post, site))
        }
    };

    let layout = match open {
        Some(post) => Layout::new(&site.title)
            .titled(&post.title)
            .body_class("modal-open"),
        None => Layout::new(&site.title),
    };
    layout.render(content)
}
