//! Feed handlers - the four feed kinds plus cache invalidation.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::service::{FeedKind, FeedPage};
use quill_shared::dto::FeedResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

fn to_response(page: FeedPage) -> FeedResponse {
    FeedResponse {
        items: page.items.into_iter().map(Into::into).collect(),
        page: page.page,
        total_pages: page.total_pages,
    }
}

/// GET /api/feed
///
/// The default (first) page is served from the whole-feed cache and may be
/// up to one TTL stale; explicit page requests always hit the store.
pub async fn global_feed(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    match query.page {
        None => {
            let blob = state.feeds.global_feed_rendered().await?;
            Ok(HttpResponse::Ok()
                .content_type("application/json")
                .body(blob))
        }
        Some(page) => {
            let feed = state.feeds.get_feed(&FeedKind::Global, Some(page)).await?;
            Ok(HttpResponse::Ok().json(to_response(feed)))
        }
    }
}

/// GET /api/groups/{slug}/feed
pub async fn group_feed(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .feeds
        .get_feed(&FeedKind::Group(slug.into_inner()), query.page)
        .await?;
    Ok(HttpResponse::Ok().json(to_response(feed)))
}

/// GET /api/profiles/{username}/feed
pub async fn profile_feed(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .feeds
        .get_feed(&FeedKind::Profile(username.into_inner()), query.page)
        .await?;
    Ok(HttpResponse::Ok().json(to_response(feed)))
}

/// GET /api/feed/following - posts by authors the caller follows.
pub async fn following_feed(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .feeds
        .get_feed(&FeedKind::Following(identity.username), query.page)
        .await?;
    Ok(HttpResponse::Ok().json(to_response(feed)))
}

/// POST /api/feed/cache/clear
pub async fn clear_feed_cache(
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    state.feeds.invalidate_cache().await;
    Ok(HttpResponse::NoContent().finish())
}
