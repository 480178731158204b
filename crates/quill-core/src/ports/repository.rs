use async_trait::async_trait;

use crate::domain::{Comment, Group, NewComment, NewGroup, NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Which slice of the post set a feed reads.
///
/// All feed kinds share one ordering contract: `pub_date` descending,
/// ties broken by id descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFilter {
    /// Every post.
    All,
    /// Posts filed under one group.
    Group(i64),
    /// Posts by one author.
    Author(i64),
    /// Posts by any of the given authors (the following feed).
    Authors(Vec<i64>),
}

/// Partial update for a post. `group_id` is doubly optional: `None` leaves
/// the group untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub text: Option<String>,
    pub group_id: Option<Option<i64>>,
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `Constraint` on a duplicate username.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Persist a new group. Fails with `Constraint` on a duplicate slug.
    async fn create(&self, group: NewGroup) -> Result<Group, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// Delete a group. Posts referencing it keep existing with the
    /// reference nulled out (store-level guarantee).
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post; the store assigns id and `pub_date`.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Apply a patch. `author_id` and `pub_date` are immutable.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, RepoError>;

    /// Delete a post. Its comments go with it (store-level cascade).
    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    /// One page of the filtered feed in the canonical order.
    async fn list(
        &self,
        filter: &FeedFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Total number of posts matching the filter.
    async fn count(&self, filter: &FeedFilter) -> Result<u64, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment; the store assigns id and `created`.
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// All comments on a post, newest first (ties broken by id descending).
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;

    async fn count_for_post(&self, post_id: i64) -> Result<u64, RepoError>;
}

/// Follow-edge repository.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Create the edge if absent. Returns true iff a row was inserted.
    async fn follow(&self, user_id: i64, author_id: i64) -> Result<bool, RepoError>;

    /// Remove the edge if present. Returns true iff a row was deleted.
    async fn unfollow(&self, user_id: i64, author_id: i64) -> Result<bool, RepoError>;

    async fn exists(&self, user_id: i64, author_id: i64) -> Result<bool, RepoError>;

    /// Ids of every author the user follows.
    async fn following_ids(&self, user_id: i64) -> Result<Vec<i64>, RepoError>;

    /// Total edge count. Tests assert exact ±1 deltas on it.
    async fn count(&self) -> Result<u64, RepoError>;
}
