//! Wall page and form actions. Every action redirects back to the page.

use actix_multipart::Multipart;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use wall_core::domain::PostId;
use wall_shared::ApiResponse;

use crate::handlers::form::PostForm;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

fn back_to_wall() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// GET /
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let notices = state.wall.take_notices().await;
    let snapshot = state.wall.snapshot().await;
    let html = views::render_page(&snapshot, &notices, &state.profile, Utc::now());

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

/// POST /posts
pub async fn share(state: web::Data<AppState>, payload: Multipart) -> AppResult<HttpResponse> {
    let form = PostForm::read(payload, state.max_image_bytes).await?;
    state.wall.compose(&form.message, form.image).await;
    state.wall.share().await;
    Ok(back_to_wall())
}

/// POST /posts/reload
pub async fn reload(state: web::Data<AppState>) -> HttpResponse {
    state.wall.load().await;
    back_to_wall()
}

/// POST /posts/{id}/edit
pub async fn begin_edit(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    state.wall.begin_edit(&id).await?;
    Ok(back_to_wall())
}

/// POST /posts/{id}/save
pub async fn save_edit(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    let form = PostForm::read(payload, state.max_image_bytes).await?;
    state.wall.revise(&id, &form.message, form.image).await;
    state.wall.save_edit(&id).await;
    Ok(back_to_wall())
}

/// POST /edit/cancel
pub async fn cancel_edit(state: web::Data<AppState>) -> HttpResponse {
    state.wall.cancel_edit().await;
    back_to_wall()
}

/// POST /posts/{id}/delete - opens the confirmation, deletes nothing.
pub async fn request_delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .wall
        .request_delete(PostId::from(path.into_inner()))
        .await?;
    Ok(back_to_wall())
}

/// POST /delete/confirm
pub async fn confirm_delete(state: web::Data<AppState>) -> HttpResponse {
    state.wall.confirm_delete().await;
    back_to_wall()
}

/// POST /delete/cancel
pub async fn cancel_delete(state: web::Data<AppState>) -> HttpResponse {
    state.wall.cancel_delete().await;
    back_to_wall()
}

/// POST /sidebar/open
pub async fn open_sidebar(state: web::Data<AppState>) -> HttpResponse {
    state.wall.set_sidebar_open(true).await;
    back_to_wall()
}

/// POST /sidebar/close
pub async fn close_sidebar(state: web::Data<AppState>) -> HttpResponse {
    state.wall.set_sidebar_open(false).await;
    back_to_wall()
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.wall.posts().await))
}
