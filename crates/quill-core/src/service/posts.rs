//! Post authoring: create, edit, delete, detail, comments.

use std::sync::Arc;

use crate::domain::{Comment, NewComment, NewPost, Post};
use crate::error::DomainError;
use crate::ports::{CommentRepository, GroupRepository, MediaStore, PostPatch, PostRepository};

/// An image payload handed over by the request layer. The service pushes it
/// through the asset store and keeps only the returned path.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Post service - authoring operations with the authorship rules.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    comments: Arc<dyn CommentRepository>,
    media: Arc<dyn MediaStore>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        comments: Arc<dyn CommentRepository>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            posts,
            groups,
            comments,
            media,
        }
    }

    /// Create a post. Text must be non-blank; a group id, if given, must
    /// name an existing group.
    pub async fn create_post(
        &self,
        author_id: i64,
        text: &str,
        group_id: Option<i64>,
        image: Option<ImageUpload>,
    ) -> Result<Post, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation(
                "post text must not be empty".to_string(),
            ));
        }
        if let Some(gid) = group_id {
            self.require_group(gid).await?;
        }

        let image = match image {
            Some(upload) => Some(self.media.store(&upload.file_name, &upload.content).await?),
            None => None,
        };

        let post = self
            .posts
            .create(NewPost {
                author_id,
                group_id,
                text: text.to_string(),
                image,
            })
            .await?;

        tracing::info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    /// Single post detail lookup.
    pub async fn get_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))
    }

    /// Edit text and/or group. Only the author may edit; `pub_date` and
    /// authorship never change.
    pub async fn edit_post(
        &self,
        post_id: i64,
        editor_id: i64,
        text: Option<&str>,
        group_id: Option<Option<i64>>,
    ) -> Result<Post, DomainError> {
        let post = self.get_post(post_id).await?;
        if post.author_id != editor_id {
            return Err(DomainError::PermissionDenied);
        }

        let mut patch = PostPatch::default();
        if let Some(text) = text {
            if text.trim().is_empty() {
                return Err(DomainError::Validation(
                    "post text must not be empty".to_string(),
                ));
            }
            patch.text = Some(text.to_string());
        }
        if let Some(group) = group_id {
            if let Some(gid) = group {
                self.require_group(gid).await?;
            }
            patch.group_id = Some(group);
        }

        // nothing to change, nothing to write
        if patch.text.is_none() && patch.group_id.is_none() {
            return Ok(post);
        }

        Ok(self.posts.update(post_id, patch).await?)
    }

    /// Delete a post, comments cascading at the store. Author-only, same
    /// rule as editing.
    pub async fn delete_post(&self, post_id: i64, actor_id: i64) -> Result<(), DomainError> {
        let post = self.get_post(post_id).await?;
        if post.author_id != actor_id {
            return Err(DomainError::PermissionDenied);
        }
        self.posts.delete(post_id).await?;
        tracing::info!(post_id, "post deleted");
        Ok(())
    }

    /// Add a comment to an existing post.
    pub async fn add_comment(
        &self,
        post_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation(
                "comment text must not be empty".to_string(),
            ));
        }
        // the post must exist; comments never dangle
        self.get_post(post_id).await?;

        Ok(self
            .comments
            .create(NewComment {
                post_id,
                author_id,
                text: text.to_string(),
            })
            .await?)
    }

    /// Comments on a post, newest first.
    pub async fn comments_for(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        self.get_post(post_id).await?;
        Ok(self.comments.list_for_post(post_id).await?)
    }

    async fn require_group(&self, group_id: i64) -> Result<(), DomainError> {
        self.groups
            .find_by_id(group_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("group", group_id))
    }
}
