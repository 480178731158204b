//! Feed composition: ordered, paginated views over posts, plus the
//! whole-feed cache for the global feed.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{
    Cache, FeedFilter, FollowRepository, GroupRepository, PostRepository, UserRepository,
};

/// Default number of posts per feed page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Default time-to-live of the whole-feed cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(20);

/// The single, parameterless key the rendered global feed is cached under.
pub const FEED_CACHE_KEY: &str = "feed:global";

/// Which feed is being read. One dispatch point for all four kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    /// Every post.
    Global,
    /// Posts filed under the group with this slug.
    Group(String),
    /// Posts authored by this user.
    Profile(String),
    /// Posts by authors this user follows.
    Following(String),
}

/// One page of a feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPage {
    pub items: Vec<Post>,
    /// 1-based page number actually served.
    pub page: u64,
    /// Real page count; at least 1 even for an empty feed.
    pub total_pages: u64,
}

/// Feed tuning knobs.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub page_size: u64,
    pub cache_ttl: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Feed service - reads the post set through a [`FeedFilter`] and returns
/// stable, deterministic pages.
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    cache: Arc<dyn Cache>,
    config: FeedConfig,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        cache: Arc<dyn Cache>,
        config: FeedConfig,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            follows,
            cache,
            config,
        }
    }

    /// One page of the requested feed.
    ///
    /// Pages are 1-based; `None` and 0 both mean page 1. A page past the end
    /// returns an empty item list, never an error; `total_pages` always
    /// reports the real count.
    pub async fn get_feed(
        &self,
        kind: &FeedKind,
        page: Option<u64>,
    ) -> Result<FeedPage, DomainError> {
        let page = page.unwrap_or(1).max(1);
        let filter = self.resolve(kind).await?;

        // Nobody followed: the feed is empty by definition, skip the store.
        if matches!(&filter, FeedFilter::Authors(ids) if ids.is_empty()) {
            return Ok(FeedPage {
                items: Vec::new(),
                page,
                total_pages: 1,
            });
        }

        let total = self.posts.count(&filter).await?;
        let total_pages = total.div_ceil(self.config.page_size).max(1);
        let offset = (page - 1) * self.config.page_size;
        let items = self
            .posts
            .list(&filter, offset, self.config.page_size)
            .await?;

        Ok(FeedPage {
            items,
            page,
            total_pages,
        })
    }

    /// The rendered first page of the global feed, served from the
    /// whole-feed cache within the TTL window.
    ///
    /// Within the TTL the previously stored blob is returned byte-for-byte
    /// even if the post set changed; writes become visible after expiry or
    /// [`Self::invalidate_cache`]. Concurrent misses may each recompute and
    /// race to store; last write wins. That staleness and that stampede are
    /// both accepted.
    pub async fn global_feed_rendered(&self) -> Result<String, DomainError> {
        if let Some(blob) = self.cache.get(FEED_CACHE_KEY).await {
            return Ok(blob);
        }

        let page = self.get_feed(&FeedKind::Global, None).await?;
        let blob =
            serde_json::to_string(&page).map_err(|e| DomainError::Internal(e.to_string()))?;

        // Cache trouble never fails the read; the blob was already computed.
        if let Err(err) = self
            .cache
            .set(FEED_CACHE_KEY, &blob, Some(self.config.cache_ttl))
            .await
        {
            tracing::warn!(error = %err, "failed to store global feed blob");
        }

        Ok(blob)
    }

    /// Drop the cached global feed blob so the next read recomputes.
    pub async fn invalidate_cache(&self) {
        if let Err(err) = self.cache.delete(FEED_CACHE_KEY).await {
            tracing::warn!(error = %err, "failed to invalidate feed cache");
        }
    }

    async fn resolve(&self, kind: &FeedKind) -> Result<FeedFilter, DomainError> {
        match kind {
            FeedKind::Global => Ok(FeedFilter::All),
            FeedKind::Group(slug) => {
                let group = self
                    .groups
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| DomainError::not_found("group", slug))?;
                Ok(FeedFilter::Group(group.id))
            }
            FeedKind::Profile(username) => {
                let user = self.require_user(username).await?;
                Ok(FeedFilter::Author(user.id))
            }
            FeedKind::Following(username) => {
                let user = self.require_user(username).await?;
                let ids = self.follows.following_ids(user.id).await?;
                Ok(FeedFilter::Authors(ids))
            }
        }
    }

    async fn require_user(&self, username: &str) -> Result<crate::domain::User, DomainError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(12u64.div_ceil(DEFAULT_PAGE_SIZE), 2);
        assert_eq!(10u64.div_ceil(DEFAULT_PAGE_SIZE), 1);
        assert_eq!(11u64.div_ceil(DEFAULT_PAGE_SIZE), 2);
    }
}
