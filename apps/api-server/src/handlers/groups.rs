//! Group handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::NewGroup;
use quill_shared::dto::{CreateGroupRequest, GroupResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// POST /api/groups
pub async fn create_group(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CreateGroupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }
    if !is_url_safe(&req.slug) {
        return Err(AppError::BadRequest(
            "Slug must be a non-empty URL-safe identifier".to_string(),
        ));
    }

    let group = state
        .groups
        .create(NewGroup {
            title: req.title,
            slug: req.slug,
            description: req.description,
        })
        .await?;

    Ok(HttpResponse::Created().json(GroupResponse::from(group)))
}

/// GET /api/groups/{slug}
pub async fn group_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group {} not found", slug)))?;

    Ok(HttpResponse::Ok().json(GroupResponse::from(group)))
}
