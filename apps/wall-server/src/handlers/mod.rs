//! HTTP handlers and route configuration.

mod form;
mod health;
mod wall;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(wall::index))
        .service(
            web::scope("/posts")
                .route("", web::post().to(wall::share))
                .route("/reload", web::post().to(wall::reload))
                .route("/{id}/edit", web::post().to(wall::begin_edit))
                .route("/{id}/save", web::post().to(wall::save_edit))
                .route("/{id}/delete", web::post().to(wall::request_delete)),
        )
        .route("/edit/cancel", web::post().to(wall::cancel_edit))
        .route("/delete/confirm", web::post().to(wall::confirm_delete))
        .route("/delete/cancel", web::post().to(wall::cancel_delete))
        .route("/sidebar/open", web::post().to(wall::open_sidebar))
        .route("/sidebar/close", web::post().to(wall::close_sidebar))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/posts", web::get().to(wall::list_posts)),
        );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use wall_core::domain::{NewPost, Post, PostChanges, PostId};
    use wall_core::error::RepoError;
    use wall_core::ports::PostStore;
    use wall_infra::InMemoryPostStore;

    use super::configure_routes;
    use crate::config::Profile;
    use crate::state::AppState;

    const BOUNDARY: &str = "wall-test-boundary";

    fn state() -> AppState {
        AppState::with_store(Arc::new(InMemoryPostStore::new()), Profile::default(), 1024)
    }

    /// In-memory store that can be taken offline.
    struct OfflineStore {
        inner: InMemoryPostStore,
        offline: AtomicBool,
    }

    impl OfflineStore {
        fn check(&self) -> Result<(), RepoError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(RepoError::Connection("store offline".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PostStore for OfflineStore {
        async fn list(&self) -> Result<Vec<Post>, RepoError> {
            self.check()?;
            self.inner.list().await
        }

        async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
            self.check()?;
            self.inner.insert(post).await
        }

        async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError> {
            self.check()?;
            self.inner.update(id, changes).await
        }

        async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
            self.check()?;
            self.inner.delete(id).await
        }
    }

    fn multipart(message: &str, image: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"message\"\r\n\r\n{message}\r\n"
        )
        .into_bytes();
        let empty: &[u8] = &[];
        let (content_type, bytes) = image.unwrap_or(("application/octet-stream", empty));
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"pic\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn form_post(uri: &str, body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    macro_rules! page {
        ($app:expr) => {
            String::from_utf8(
                test::call_and_read_body($app, test::TestRequest::get().uri("/").to_request())
                    .await
                    .to_vec(),
            )
            .unwrap()
        };
    }

    #[actix_web::test]
    async fn test_share_then_render() {
        let state = state();
        state.wall.load().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, form_post("/posts", multipart("hello wall", None)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let html = page!(&app);
        assert!(html.contains(r#"<div class="message">hello wall</div>"#));
        assert!(html.contains("Posted successfully!"));

        // The toast is shown once.
        let html = page!(&app);
        assert!(!html.contains("Posted successfully!"));
    }

    #[actix_web::test]
    async fn test_share_with_image_inlines_it() {
        let state = state();
        state.wall.load().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = form_post("/posts", multipart("pic", Some(("image/png", &b"png-bytes"[..])))).to_request();
        test::call_service(&app, req).await;

        let posts = state.wall.posts().await;
        assert_eq!(posts.len(), 1);
        assert!(posts[0].image.as_deref().unwrap().starts_with("data:image/png;base64,"));
    }

    #[actix_web::test]
    async fn test_oversized_image_rejected() {
        let state = state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let big = vec![0u8; 2048];
        let req = form_post("/posts", multipart("too big", Some(("image/png", big.as_slice())))).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(state.wall.posts().await.is_empty());
    }

    #[actix_web::test]
    async fn test_delete_flow_requires_confirmation() {
        let state = state();
        state.wall.load().await;
        state.wall.compose("doomed", None).await;
        let post = state.wall.share().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let uri = format!("/posts/{}/delete", post.id);
        test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        assert_eq!(state.wall.posts().await.len(), 1);
        assert!(page!(&app).contains("Delete post?"));

        test::call_service(&app, test::TestRequest::post().uri("/delete/confirm").to_request()).await;
        assert!(state.wall.posts().await.is_empty());
        assert!(page!(&app).contains("No posts yet. Be the first to share!"));
    }

    #[actix_web::test]
    async fn test_edit_flow() {
        let state = state();
        state.wall.load().await;
        state.wall.compose("original", None).await;
        let post = state.wall.share().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let uri = format!("/posts/{}/edit", post.id);
        test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        assert!(page!(&app).contains(&format!(r#"action="/posts/{}/save""#, post.id)));

        let uri = format!("/posts/{}/save", post.id);
        test::call_service(&app, form_post(&uri, multipart("revised", None)).to_request()).await;

        let posts = state.wall.posts().await;
        assert_eq!(posts[0].id, post.id);
        assert_eq!(posts[0].message, "revised");
        assert_eq!(posts[0].created_at, post.created_at);
    }

    #[actix_web::test]
    async fn test_reload_after_failed_load() {
        let store = Arc::new(OfflineStore {
            inner: InMemoryPostStore::new(),
            offline: AtomicBool::new(false),
        });
        store
            .inner
            .insert(NewPost::new("kept in the store", None).unwrap())
            .await
            .unwrap();
        store.offline.store(true, Ordering::SeqCst);

        let state = AppState::with_store(store.clone(), Profile::default(), 1024);
        state.wall.load().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let html = page!(&app);
        assert!(html.contains("Failed to load posts."));
        assert!(html.contains(r#"action="/posts/reload""#));
        assert!(!html.contains("kept in the store"));

        store.offline.store(false, Ordering::SeqCst);
        let resp = test::call_service(&app, test::TestRequest::post().uri("/posts/reload").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let html = page!(&app);
        assert!(html.contains(r#"<div class="message">kept in the store</div>"#));
        assert!(!html.contains(r#"action="/posts/reload""#));
    }

    #[actix_web::test]
    async fn test_unknown_post_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/posts/missing/edit").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_health_and_api_posts() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["status"], "ok");

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let posts: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(posts["success"], true);
        assert_eq!(posts["data"], serde_json::json!([]));
    }
}
