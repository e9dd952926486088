//! Read-only JSON view of the post cache.

use actix_web::{HttpResponse, web};
use postboard_shared::ApiResponse;
use postboard_shared::dto::{PostResponse, PostSearchQuery};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?q=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostSearchQuery>,
) -> HttpResponse {
    let posts = state.board.search(query.q.as_deref().unwrap_or_default());
    let data: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();

    HttpResponse::Ok().json(ApiResponse::ok(data))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .board
        .open_post(&path)
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", path.as_str())))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(&post))))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use postboard_core::SubmitPost;
    use postboard_core::domain::PostFields;
    use serde_json::Value;

    use crate::handlers::test_support::{harness, test_app};

    #[actix_rt::test]
    async fn test_list_and_get() {
        let h = harness();
        let outcome = h
            .state
            .board
            .submit(SubmitPost {
                fields: PostFields {
                    title: "A".to_string(),
                    excerpt: "B".to_string(),
                    content: "C".to_string(),
                    read_time: Some("3 min".to_string()),
                    ..PostFields::default()
                },
                ..SubmitPost::default()
            })
            .await
            .unwrap();
        let app = test_app!(h.state);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["readTime"], "3 min");

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", outcome.id()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "A");
        assert!(body["data"]["createdAt"].as_i64().unwrap() > 0);
    }

    #[actix_rt::test]
    async fn test_unknown_post_is_problem_json() {
        let h = harness();
        let app = test_app!(h.state);

        let req = test::TestRequest::get().uri("/api/posts/ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
    }

    #[actix_rt::test]
    async fn test_search_query() {
        let h = harness();
        for title in ["Rust", "Go"] {
            h.state
                .board
                .submit(SubmitPost {
                    fields: PostFields {
                        title: title.to_string(),
                        content: "<p>x</p>".to_string(),
                        ..PostFields::default()
                    },
                    ..SubmitPost::default()
                })
                .await
                .unwrap();
        }
        let app = test_app!(h.state);

        let req = test::TestRequest::get().uri("/api/posts?q=rust").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["title"], "Rust");
    }
}
