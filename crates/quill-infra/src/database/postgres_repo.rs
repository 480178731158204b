//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use quill_core::domain::{Comment, Group, NewComment, NewGroup, NewPost, NewUser, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    CommentRepository, FeedFilter, FollowRepository, GroupRepository, PostPatch, PostRepository,
    UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL group repository.
pub type PostgresGroupRepository = PostgresBaseRepository<GroupEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL follow repository.
pub type PostgresFollowRepository = PostgresBaseRepository<FollowEntity>;

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let active: user::ActiveModel = new_user.into();
        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        self.fetch_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn create(&self, new_group: NewGroup) -> Result<Group, RepoError> {
        let active: group::ActiveModel = new_group.into();
        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError> {
        self.fetch_by_id(id).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        // posts lose their reference via the FK's ON DELETE SET NULL
        self.delete_by_id(id).await
    }
}

/// Narrow a post select to one feed filter.
fn apply_filter(query: Select<PostEntity>, filter: &FeedFilter) -> Select<PostEntity> {
    match filter {
        FeedFilter::All => query,
        FeedFilter::Group(id) => query.filter(post::Column::GroupId.eq(*id)),
        FeedFilter::Author(id) => query.filter(post::Column::AuthorId.eq(*id)),
        FeedFilter::Authors(ids) => query.filter(post::Column::AuthorId.is_in(ids.iter().copied())),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new_post.into();
        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        self.fetch_by_id(id).await
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(text) = patch.text {
            active.text = Set(text);
        }
        if let Some(group_id) = patch.group_id {
            active.group_id = Set(group_id);
        }

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        // comments go with the post via the FK's ON DELETE CASCADE
        self.delete_by_id(id).await
    }

    async fn list(
        &self,
        filter: &FeedFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let rows = apply_filter(PostEntity::find(), filter)
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &FeedFilter) -> Result<u64, RepoError> {
        apply_filter(PostEntity::find(), filter)
            .count(&*self.db)
            .await
            .map_err(query_err)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = new_comment.into();
        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::Created)
            .order_by_desc(comment::Column::Id)
            .all(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_for_post(&self, post_id: i64) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&*self.db)
            .await
            .map_err(query_err)
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn follow(&self, user_id: i64, author_id: i64) -> Result<bool, RepoError> {
        let active = follow::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            user_id: Set(user_id),
            author_id: Set(author_id),
        };

        // the unique (user_id, author_id) index makes the insert idempotent
        let result = FollowEntity::insert(active)
            .on_conflict(
                OnConflict::columns([follow::Column::UserId, follow::Column::AuthorId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&*self.db)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn unfollow(&self, user_id: i64, author_id: i64) -> Result<bool, RepoError> {
        let result = FollowEntity::delete_many()
            .filter(follow::Column::UserId.eq(user_id))
            .filter(follow::Column::AuthorId.eq(author_id))
            .exec(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, user_id: i64, author_id: i64) -> Result<bool, RepoError> {
        let count = FollowEntity::find()
            .filter(follow::Column::UserId.eq(user_id))
            .filter(follow::Column::AuthorId.eq(author_id))
            .count(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(count > 0)
    }

    async fn following_ids(&self, user_id: i64) -> Result<Vec<i64>, RepoError> {
        let rows = FollowEntity::find()
            .filter(follow::Column::UserId.eq(user_id))
            .all(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(|f| f.author_id).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        FollowEntity::find().count(&*self.db).await.map_err(query_err)
    }
}
