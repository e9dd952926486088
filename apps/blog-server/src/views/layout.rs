//! Page skeleton shared by the public and admin pages.

use maud::{DOCTYPE, Markup, PreEscaped, html};

const BASE_STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,sans-serif;background:#f5f6fa;color:#222}
body.modal-open{overflow:hidden}
header.site{padding:16px 24px;background:#fff;display:flex;justify-content:space-between;align-items:center;box-shadow:0 1px 3px rgba(0,0,0,.08)}
header.site a{color:#667eea;text-decoration:none;font-weight:600}
main{max-width:1100px;margin:0 auto;padding:24px}
.search{display:flex;gap:8px;margin-bottom:20px}
.search input{flex:1;padding:10px;border:1px solid #ccc;border-radius:8px}
.blog-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:20px}
.blog-card{background:#fff;border-radius:12px;overflow:hidden;display:flex;flex-direction:column;box-shadow:0 2px 8px rgba(0,0,0,.06)}
.card-image{width:100%;height:180px;object-fit:cover}
.card-body{padding:16px;display:flex;flex-direction:column;flex:1}
.card-actions{margin-top:auto;display:flex;justify-content:space-between;align-items:center}
.btn{background:#667eea;color:#fff;border:none;padding:8px 16px;border-radius:8px;cursor:pointer;font-weight:600;text-decoration:none}
.btn:disabled{opacity:.6;cursor:wait}
.btn-link{color:#667eea;font-weight:600;text-decoration:none}
.btn-danger{background:#e53e3e}
.placeholder{padding:40px;text-align:center;color:#777}
.placeholder.error{color:#c53030}
.modal{position:fixed;inset:0;background:rgba(0,0,0,.6);display:flex;align-items:flex-start;justify-content:center;overflow-y:auto;padding:40px 16px}
.modal-panel{background:#fff;border-radius:12px;max-width:760px;width:100%;overflow:hidden}
.modal-image{width:100%;height:350px;object-fit:cover;display:block}
.modal-gradient{height:200px;background:linear-gradient(135deg,#667eea,#764ba2)}
.modal-body{padding:24px}
.modal-meta{color:#777;font-size:.9em}
.admin-table{width:100%;border-collapse:collapse;background:#fff}
.admin-table td,.admin-table th{padding:10px;border-bottom:1px solid #eee;text-align:left}
.post-form{background:#fff;padding:20px;border-radius:12px;display:grid;gap:12px;margin-top:24px}
.post-form input,.post-form textarea{width:100%;padding:10px;border:1px solid #ccc;border-radius:8px}
.post-form textarea{min-height:220px;font-family:inherit}
.alert{padding:12px;border-radius:8px;background:#fed7d7;color:#742a2a}
#imagePreviewContainer img{max-width:150px;border-radius:8px;margin-top:10px}
"#;

/// Base page layout builder.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    site_title: &'a str,
    page_title: Option<&'a str>,
    body_class: Option<&'static str>,
}

impl<'a> Layout<'a> {
    #[must_use]
    pub fn new(site_title: &'a str) -> Self {
        Self {
            site_title,
            page_title: None,
            body_class: None,
        }
    }

    #[must_use]
    pub fn titled(mut self, page_title: &'a str) -> Self {
        self.page_title = Some(page_title);
        self
    }

    /// Class on `body`, e.g. `modal-open` to lock scrolling.
    #[must_use]
    pub fn body_class(mut self, class: &'static str) -> Self {
        self.body_class = Some(class);
        self
    }

    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title {
                        @if let Some(page) = self.page_title {
                            (page) " - "
                        }
                        (self.site_title)
                    }
                    style { (PreEscaped(BASE_STYLE)) }
                }
                body class=[self.body_class] {
                    header class="site" {
                        a href="/" { (self.site_title) }
                        a href="/admin" { "Admin" }
                    }
                    main {
                        (content)
                    }
                }
            }
        }
    }
}
