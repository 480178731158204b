//! Post and comment handlers.

use actix_web::{HttpResponse, web};

use quill_core::service::ImageUpload;
use quill_shared::dto::{CommentRequest, CommentResponse, CreatePostRequest, EditPostRequest, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let image = req.image.map(|img| ImageUpload {
        file_name: img.file_name,
        content: img.content,
    });

    let post = state
        .posts
        .create_post(identity.user_id, &req.text, req.group_id, image)
        .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// GET /api/posts/{id}
pub async fn post_detail(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PUT /api/posts/{id}
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<i64>,
    body: web::Json<EditPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // `clear_group` wins over a supplied group id
    let group_id = if req.clear_group {
        Some(None)
    } else {
        req.group_id.map(Some)
    };

    let post = state
        .posts
        .edit_post(
            id.into_inner(),
            identity.user_id,
            req.text.as_deref(),
            group_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete_post(id.into_inner(), identity.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<i64>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .posts
        .add_comment(id.into_inner(), identity.user_id, &body.text)
        .await?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comments = state.posts.comments_for(id.into_inner()).await?;
    let comments: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(comments))
}
