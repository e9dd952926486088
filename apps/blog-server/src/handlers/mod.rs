//! HTTP handlers and route configuration.

mod admin;
mod api;
mod form;
mod health;
mod media;
mod pages;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use maud::Markup;
use serde::Deserialize;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/posts", web::get().to(api::list_posts))
            .route("/posts/{id}", web::get().to(api::get_post)),
    )
    .service(
        web::scope("/admin")
            .route("", web::get().to(admin::dashboard))
            .route("/posts", web::post().to(admin::submit))
            .route("/posts/{id}/edit", web::get().to(admin::edit_form))
            .route("/posts/{id}/delete", web::get().to(admin::confirm_delete))
            .route("/posts/{id}/delete", web::post().to(admin::delete)),
    )
    .route("/media/{key:.*}", web::get().to(media::serve))
    .route("/", web::get().to(pages::index));
}

/// `?refresh=1` forces a store fetch before rendering.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: Option<String>,
}

impl RefreshQuery {
    pub fn wants_refresh(&self) -> bool {
        wants_refresh(self.refresh.as_deref())
    }
}

fn wants_refresh(flag: Option<&str>) -> bool {
    matches!(flag, Some("1" | "true" | "yes"))
}

fn html_page(status: StatusCode, markup: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}

/// POST/redirect/GET after a mutation.
fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use postboard_core::ports::MediaUrls;
    use postboard_infra::{InMemoryObjectStore, InMemoryPostRepository};

    use crate::config::AppConfig;
    use crate::state::AppState;

    pub struct Harness {
        pub state: AppState,
        pub repo: Arc<InMemoryPostRepository>,
        pub media: Arc<InMemoryObjectStore>,
    }

    pub fn harness() -> Harness {
        let config = AppConfig::default();
        let repo = Arc::new(InMemoryPostRepository::new());
        let media = Arc::new(InMemoryObjectStore::new(MediaUrls::new(config.media_base())));
        let state = AppState::with_stores(repo.clone(), media.clone(), &config);

        Harness { state, repo, media }
    }

    /// Test service over the full route table.
    macro_rules! test_app {
        ($state:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data(actix_web::web::Data::new($state.clone()))
                    .configure($crate::handlers::configure_routes),
            )
            .await
        };
    }
    pub(crate) use test_app;

    const BOUNDARY: &str = "postboard-test-boundary";

    /// A `multipart/form-data` body and its content type.
    pub fn multipart(
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, content_type, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        (format!("multipart/form-data; boundary={BOUNDARY}"), body)
    }
}
