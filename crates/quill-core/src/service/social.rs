//! Social graph: follow and unfollow edges.

use std::sync::Arc;

use crate::error::DomainError;
use crate::ports::{FollowRepository, UserRepository};

/// Social service - maintains follow edges.
///
/// Both operations are idempotent in effect: repeating a follow or an
/// unfollow changes nothing and raises nothing. The edge count moves by
/// exactly one per existence transition.
pub struct SocialService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl SocialService {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    /// Follow an author. Self-follow is rejected; following someone already
    /// followed is a no-op.
    pub async fn follow(&self, user_id: i64, author_id: i64) -> Result<(), DomainError> {
        if user_id == author_id {
            return Err(DomainError::Validation(
                "cannot follow yourself".to_string(),
            ));
        }
        self.require_user(user_id).await?;
        self.require_user(author_id).await?;

        let created = self.follows.follow(user_id, author_id).await?;
        if created {
            tracing::info!(user_id, author_id, "follow edge created");
        }
        Ok(())
    }

    /// Unfollow an author. Removing an absent edge is a no-op, not an error.
    pub async fn unfollow(&self, user_id: i64, author_id: i64) -> Result<(), DomainError> {
        self.require_user(user_id).await?;
        self.require_user(author_id).await?;

        let removed = self.follows.unfollow(user_id, author_id).await?;
        if removed {
            tracing::info!(user_id, author_id, "follow edge removed");
        }
        Ok(())
    }

    pub async fn is_following(&self, user_id: i64, author_id: i64) -> Result<bool, DomainError> {
        Ok(self.follows.exists(user_id, author_id).await?)
    }

    async fn require_user(&self, id: i64) -> Result<(), DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("user", id))
    }
}
