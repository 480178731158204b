//! Social-graph handlers.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn resolve_author(state: &AppState, username: &str) -> AppResult<i64> {
    state
        .users
        .find_by_username(username)
        .await?
        .map(|u| u.id)
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", username)))
}

/// POST /api/profiles/{username}/follow
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    username: web::Path<String>,
) -> AppResult<HttpResponse> {
    let author_id = resolve_author(&state, &username).await?;
    state.social.follow(identity.user_id, author_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/profiles/{username}/follow
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    username: web::Path<String>,
) -> AppResult<HttpResponse> {
    let author_id = resolve_author(&state, &username).await?;
    state.social.unfollow(identity.user_id, author_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
