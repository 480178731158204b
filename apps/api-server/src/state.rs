//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    Cache, CommentRepository, FollowRepository, GroupRepository, MediaStore, PasswordService,
    PostRepository, TokenService, UserRepository,
};
use quill_core::service::{FeedService, PostService, SocialService};
use quill_infra::auth::{Argon2PasswordService, JwtTokenService};
use quill_infra::cache::InMemoryCache;
use quill_infra::media::FsMediaStore;
use quill_infra::store::InMemoryStore;

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresFollowRepository,
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// The five repository ports, whichever backend serves them.
struct Repositories {
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            groups: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            follows: store,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(conn: DatabaseConnections) -> Self {
        let db = Arc::new(conn.main);
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            groups: Arc::new(PostgresGroupRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            follows: Arc::new(PostgresFollowRepository::new(db)),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<PostService>,
    pub feeds: Arc<FeedService>,
    pub social: Arc<SocialService>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::with_system_clock());
        let media: Arc<dyn MediaStore> = Arc::new(FsMediaStore::new(config.media_root.clone()));

        #[cfg(feature = "postgres")]
        let repos = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => Repositories::postgres(connections),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Repositories::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Repositories::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory store");
            Repositories::in_memory()
        };

        let posts = Arc::new(PostService::new(
            repos.posts.clone(),
            repos.groups.clone(),
            repos.comments.clone(),
            media,
        ));
        let feeds = Arc::new(FeedService::new(
            repos.posts.clone(),
            repos.groups.clone(),
            repos.users.clone(),
            repos.follows.clone(),
            cache,
            config.feed.clone(),
        ));
        let social = Arc::new(SocialService::new(
            repos.users.clone(),
            repos.follows.clone(),
        ));

        tracing::info!("Application state initialized");

        Self {
            users: repos.users,
            groups: repos.groups,
            posts,
            feeds,
            social,
            token_service: Arc::new(JwtTokenService::new(config.jwt.clone())),
            password_service: Arc::new(Argon2PasswordService::new()),
        }
    }
}
