//! Admin dashboard: post table, create/edit form and delete confirmation.

use maud::{Markup, PreEscaped, html};
use postboard_core::domain::{Post, PostFields};

use super::Layout;
use crate::config::SiteConfig;

/// Local preview of the chosen cover. Nothing is uploaded until submit.
const PREVIEW_SCRIPT: &str = r#"function handleSelect(input) {
    var container = document.getElementById('imagePreviewContainer');
    container.innerHTML = '';
    var file = input.files && input.files[0];
    if (!file) return;
    var reader = new FileReader();
    reader.onload = function (e) {
        var img = document.createElement('img');
        img.src = e.target.result;
        container.appendChild(img);
    };
    reader.readAsDataURL(file);
}"#;

const DISABLE_ON_SUBMIT: &str = "this.querySelector('button[type=submit]').disabled = true";

/// Values the post form is rendered with.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    /// Set when editing; goes into the hidden `edit-doc-id` field.
    pub edit_id: Option<String>,
    pub fields: PostFields,
    /// Cover currently stored for the edited post.
    pub image: Option<String>,
}

impl PostForm {
    pub fn for_post(post: &Post) -> Self {
        Self {
            edit_id: Some(post.id.to_string()),
            fields: post.fields(),
            image: post.image.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.edit_id.is_some()
    }
}

pub fn render_admin_table(posts: &[Post], fetch_error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = fetch_error {
            p class="placeholder error" role="status" { "Could not load posts: " (error) }
        }
        table class="admin-table" id="dashboard-list" {
            thead {
                tr {
                    th { "Title" }
                    th { "Date" }
                    th { "Actions" }
                }
            }
            tbody {
                @if posts.is_empty() {
                    tr {
                        td class="placeholder" colspan="3" { "No posts yet." }
                    }
                }
                @for post in posts {
                    tr data-post-id=(post.id.as_str()) {
                        td { strong { (post.title) } }
                        td { (post.date) }
                        td {
                            a class="btn-link" href=(format!("/admin/posts/{}/edit", post.id)) {
                                "Edit"
                            }
                            " "
                            a class="btn-link" href=(format!("/admin/posts/{}/delete", post.id)) {
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The create/edit form. `alert` is the message of a failed submit.
pub fn render_post_form(form: &PostForm, alert: Option<&str>) -> Markup {
    let fields = &form.fields;

    html! {
        form class="post-form" id="post-form-section" method="post" action="/admin/posts"
            enctype="multipart/form-data" onsubmit=(DISABLE_ON_SUBMIT) {
            h2 {
                @if form.is_edit() { "Edit post" } @else { "New post" }
            }
            @if let Some(message) = alert {
                div class="alert" role="alert" { (message) }
            }
            input type="hidden" name="edit-doc-id" id="edit-doc-id" value=[form.edit_id.as_deref()];
            label for="postTitle" { "Title" }
            input type="text" name="title" id="postTitle" value=(fields.title);
            label for="postExcerpt" { "Excerpt" }
            input type="text" name="excerpt" id="postExcerpt" value=(fields.excerpt);
            label for="postCategory" { "Category" }
            input type="text" name="category" id="postCategory" value=[fields.category.as_deref()];
            label for="postReadTime" { "Read time" }
            input type="text" name="read_time" id="postReadTime" placeholder="5 min read"
                value=[fields.read_time.as_deref()];
            label for="postContent" { "Content (HTML)" }
            textarea name="content" id="postContent" { (fields.content) }
            label for="postImage" { "Cover image" }
            input type="file" name="image" id="postImage" accept="image/*"
                onchange="handleSelect(this)";
            div id="imagePreviewContainer" {
                @if let Some(src) = form.image.as_deref() {
                    img src=(src) alt="Current cover";
                }
            }
            div class="card-actions" {
                @if form.is_edit() {
                    a class="btn-link" href="/admin" { "Cancel" }
                }
                button class="btn" type="submit" {
                    @if form.is_edit() { "Update" } @else { "Publish" }
                }
            }
        }
        script { (PreEscaped(PREVIEW_SCRIPT)) }
    }
}

pub fn render_admin_page(
    site: &SiteConfig,
    posts: &[Post],
    fetch_error: Option<&str>,
    form: &PostForm,
    alert: Option<&str>,
) -> Markup {
    Layout::new(&site.title).titled("Admin").render(html! {
        h1 { "Dashboard" }
        (render_admin_table(posts, fetch_error))
        (render_post_form(form, alert))
    })
}

pub fn render_delete_confirm(site: &SiteConfig, post: &Post) -> Markup {
    Layout::new(&site.title).titled("Delete post").render(html! {
        div class="post-form" {
            h2 { "Permanently delete this post?" }
            p { strong { (post.title) } " (" (post.date) ")" }
            form method="post" action=(format!("/admin/posts/{}/delete", post.id)) {
                input type="hidden" name="confirm" value="yes";
                div class="card-actions" {
                    a class="btn-link" href="/admin" { "Cancel" }
                    button class="btn btn-danger" type="submit" { "Delete" }
                }
            }
        }
    })
}
