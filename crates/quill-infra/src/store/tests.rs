//! Service-level tests: the core services wired to the in-memory store,
//! in-memory cache, and manual clock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use quill_core::domain::{Group, NewGroup, NewUser, Post, User};
use quill_core::error::{DomainError, RepoError};
use quill_core::ports::{
    FollowRepository, GroupRepository, MediaError, MediaStore, PostRepository,
};
use quill_core::service::{
    FeedConfig, FeedKind, FeedService, ImageUpload, PostService, SocialService,
};

use crate::cache::InMemoryCache;
use crate::clock::ManualClock;
use crate::store::InMemoryStore;

/// Media stub: pretends every upload lands under posts/.
struct StubMedia;

#[async_trait]
impl MediaStore for StubMedia {
    async fn store(&self, file_name: &str, _content: &[u8]) -> Result<String, MediaError> {
        Ok(format!("posts/{file_name}"))
    }
}

struct Harness {
    store: Arc<InMemoryStore>,
    clock: Arc<ManualClock>,
    posts: PostService,
    feeds: FeedService,
    social: SocialService,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(InMemoryCache::new(clock.clone()));

    let posts = PostService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(StubMedia),
    );
    let feeds = FeedService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        cache,
        FeedConfig::default(),
    );
    let social = SocialService::new(store.clone(), store.clone());

    Harness {
        store,
        clock,
        posts,
        feeds,
        social,
    }
}

async fn user(h: &Harness, username: &str) -> User {
    quill_core::ports::UserRepository::create(
        h.store.as_ref(),
        NewUser {
            username: username.to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn group(h: &Harness, slug: &str) -> Group {
    GroupRepository::create(
        h.store.as_ref(),
        NewGroup {
            title: "Тестовая группа".to_string(),
            slug: slug.to_string(),
            description: "Тестовое описание".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn post(h: &Harness, author: &User, text: &str, group_id: Option<i64>) -> Post {
    h.posts
        .create_post(author.id, text, group_id, None)
        .await
        .unwrap()
}

#[tokio::test]
async fn global_feed_orders_and_paginates() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let g = group(&h, "test-slug").await;

    let mut created = Vec::new();
    for i in 0..12 {
        created.push(post(&h, &lev, &format!("Тестовый пост {i}"), Some(g.id)).await);
    }

    let page1 = h.feeds.get_feed(&FeedKind::Global, None).await.unwrap();
    assert_eq!(page1.items.len(), 10);
    assert_eq!(page1.total_pages, 2);
    assert_eq!(page1.page, 1);
    // newest first, id as the tie-break
    assert_eq!(page1.items[0].id, created[11].id);
    assert_eq!(page1.items[0].text, created[11].text);
    let ids: Vec<i64> = page1.items.iter().map(|p| p.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);

    let page2 = h.feeds.get_feed(&FeedKind::Global, Some(2)).await.unwrap();
    assert_eq!(page2.items.len(), 2);
    assert_eq!(page2.items[1].id, created[0].id);
}

#[tokio::test]
async fn group_and_profile_feeds_paginate_like_the_global_one() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let g = group(&h, "test-slug").await;
    for i in 0..12 {
        post(&h, &lev, &format!("Тестовый пост {i}"), Some(g.id)).await;
    }

    for kind in [
        FeedKind::Group("test-slug".to_string()),
        FeedKind::Profile("lev".to_string()),
    ] {
        let page1 = h.feeds.get_feed(&kind, Some(1)).await.unwrap();
        assert_eq!(page1.items.len(), 10, "first page of {kind:?}");
        let page2 = h.feeds.get_feed(&kind, Some(2)).await.unwrap();
        assert_eq!(page2.items.len(), 2, "second page of {kind:?}");
    }
}

#[tokio::test]
async fn post_does_not_leak_into_another_group() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let g = group(&h, "test-slug").await;
    group(&h, "test1-slug").await;
    post(&h, &lev, "Тестовый пост", Some(g.id)).await;

    let other = h
        .feeds
        .get_feed(&FeedKind::Group("test1-slug".to_string()), None)
        .await
        .unwrap();
    assert!(other.items.is_empty());
    assert_eq!(other.total_pages, 1);
}

#[tokio::test]
async fn out_of_range_page_is_empty_not_an_error() {
    let h = harness();
    let lev = user(&h, "lev").await;
    post(&h, &lev, "Тестовый пост", None).await;

    let far = h.feeds.get_feed(&FeedKind::Global, Some(99)).await.unwrap();
    assert!(far.items.is_empty());
    assert_eq!(far.total_pages, 1);
    assert_eq!(far.page, 99);
}

#[tokio::test]
async fn page_zero_is_served_as_page_one() {
    let h = harness();
    let lev = user(&h, "lev").await;
    post(&h, &lev, "Тестовый пост", None).await;

    let page = h.feeds.get_feed(&FeedKind::Global, Some(0)).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn empty_feed_still_has_one_page() {
    let h = harness();
    let page = h.feeds.get_feed(&FeedKind::Global, None).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn unknown_slug_or_username_is_not_found() {
    let h = harness();

    let err = h
        .feeds
        .get_feed(&FeedKind::Group("nope".to_string()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = h
        .feeds
        .get_feed(&FeedKind::Profile("ghost".to_string()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn deleting_a_group_orphans_but_keeps_posts() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let g = group(&h, "test-slug").await;
    let p = post(&h, &lev, "Тестовый пост", Some(g.id)).await;
    assert_eq!(p.group_id, Some(g.id));

    GroupRepository::delete(h.store.as_ref(), g.id).await.unwrap();

    let survivor = h.posts.get_post(p.id).await.unwrap();
    assert_eq!(survivor.group_id, None);
    assert_eq!(survivor.text, "Тестовый пост");
}

#[tokio::test]
async fn deleting_a_post_cascades_to_its_comments() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let p = post(&h, &lev, "Тестовый пост", None).await;

    h.posts.add_comment(p.id, lev.id, "Коммент").await.unwrap();
    h.posts.add_comment(p.id, lev.id, "Ещё коммент").await.unwrap();
    assert_eq!(h.posts.comments_for(p.id).await.unwrap().len(), 2);

    h.posts.delete_post(p.id, lev.id).await.unwrap();

    use quill_core::ports::CommentRepository;
    assert_eq!(
        CommentRepository::count_for_post(h.store.as_ref(), p.id)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn comments_come_back_newest_first() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let p = post(&h, &lev, "Тестовый пост", None).await;

    let first = h.posts.add_comment(p.id, lev.id, "первый").await.unwrap();
    let second = h.posts.add_comment(p.id, lev.id, "второй").await.unwrap();

    let comments = h.posts.comments_for(p.id).await.unwrap();
    assert_eq!(comments[0].id, second.id);
    assert_eq!(comments[1].id, first.id);
}

#[tokio::test]
async fn duplicate_slug_is_a_constraint_violation() {
    let h = harness();
    group(&h, "test-slug").await;

    let err = GroupRepository::create(
        h.store.as_ref(),
        NewGroup {
            title: "Другая группа".to_string(),
            slug: "test-slug".to_string(),
            description: "Другое описание".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn follow_twice_adds_one_edge() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let anna = user(&h, "anna").await;

    h.social.follow(lev.id, anna.id).await.unwrap();
    assert_eq!(FollowRepository::count(h.store.as_ref()).await.unwrap(), 1);

    h.social.follow(lev.id, anna.id).await.unwrap();
    assert_eq!(FollowRepository::count(h.store.as_ref()).await.unwrap(), 1);
}

#[tokio::test]
async fn unfollow_without_an_edge_is_a_noop() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let anna = user(&h, "anna").await;

    h.social.unfollow(lev.id, anna.id).await.unwrap();
    assert_eq!(FollowRepository::count(h.store.as_ref()).await.unwrap(), 0);

    h.social.follow(lev.id, anna.id).await.unwrap();
    h.social.unfollow(lev.id, anna.id).await.unwrap();
    assert_eq!(FollowRepository::count(h.store.as_ref()).await.unwrap(), 0);
    h.social.unfollow(lev.id, anna.id).await.unwrap();
    assert_eq!(FollowRepository::count(h.store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let h = harness();
    let lev = user(&h, "lev").await;

    let err = h.social.follow(lev.id, lev.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(FollowRepository::count(h.store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn following_feed_tracks_the_edge() {
    let h = harness();
    let reader = user(&h, "reader").await;
    let anna = user(&h, "anna").await;
    let stranger = user(&h, "stranger").await;

    post(&h, &anna, "пост Анны", None).await;
    post(&h, &stranger, "чужой пост", None).await;

    let kind = FeedKind::Following("reader".to_string());

    // nobody followed yet
    let empty = h.feeds.get_feed(&kind, None).await.unwrap();
    assert!(empty.items.is_empty());

    h.social.follow(reader.id, anna.id).await.unwrap();
    assert!(h.social.is_following(reader.id, anna.id).await.unwrap());
    let feed = h.feeds.get_feed(&kind, None).await.unwrap();
    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].author_id, anna.id);

    h.social.unfollow(reader.id, anna.id).await.unwrap();
    assert!(!h.social.is_following(reader.id, anna.id).await.unwrap());
    let feed = h.feeds.get_feed(&kind, None).await.unwrap();
    assert!(feed.items.is_empty());
}

#[tokio::test]
async fn cached_feed_is_stale_within_the_ttl_window() {
    let h = harness();
    let lev = user(&h, "lev").await;
    post(&h, &lev, "Тестовый пост", None).await;

    let before = h.feeds.global_feed_rendered().await.unwrap();

    // create and delete inside the TTL window
    let extra = post(&h, &lev, "Тестовый пост1", None).await;
    let within = h.feeds.global_feed_rendered().await.unwrap();
    assert_eq!(before, within);

    h.posts.delete_post(extra.id, lev.id).await.unwrap();
    let after_delete = h.feeds.global_feed_rendered().await.unwrap();
    assert_eq!(before, after_delete);

    // the set is back to the pre-creation state, so even a fresh render
    // matches the old blob
    h.feeds.invalidate_cache().await;
    let recomputed = h.feeds.global_feed_rendered().await.unwrap();
    assert_eq!(before, recomputed);
}

#[tokio::test]
async fn invalidation_reveals_new_posts() {
    let h = harness();
    let lev = user(&h, "lev").await;
    post(&h, &lev, "Тестовый пост", None).await;

    let before = h.feeds.global_feed_rendered().await.unwrap();
    post(&h, &lev, "Свежий пост", None).await;

    h.feeds.invalidate_cache().await;
    let after = h.feeds.global_feed_rendered().await.unwrap();
    assert_ne!(before, after);
    assert!(after.contains("Свежий пост"));
}

#[tokio::test]
async fn cache_expires_when_the_clock_passes_the_ttl() {
    let h = harness();
    let lev = user(&h, "lev").await;
    post(&h, &lev, "Тестовый пост", None).await;

    let before = h.feeds.global_feed_rendered().await.unwrap();
    post(&h, &lev, "Свежий пост", None).await;

    // still inside the default 20 s window
    h.clock.advance(Duration::from_secs(19));
    assert_eq!(h.feeds.global_feed_rendered().await.unwrap(), before);

    h.clock.advance(Duration::from_secs(2));
    let after = h.feeds.global_feed_rendered().await.unwrap();
    assert_ne!(before, after);
    assert!(after.contains("Свежий пост"));
}

#[tokio::test]
async fn author_can_edit_their_post() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let g = group(&h, "test-slug").await;
    let p = post(&h, &lev, "Тестовый пост", Some(g.id)).await;

    let edited = h
        .posts
        .edit_post(p.id, lev.id, Some("Измененный пост"), None)
        .await
        .unwrap();
    assert_eq!(edited.text, "Измененный пост");
    assert_eq!(edited.group_id, Some(g.id));
    assert_eq!(edited.pub_date, p.pub_date);

    // clearing the group is an explicit Some(None)
    let cleared = h
        .posts
        .edit_post(p.id, lev.id, None, Some(None))
        .await
        .unwrap();
    assert_eq!(cleared.group_id, None);
    assert_eq!(cleared.text, "Измененный пост");
}

#[tokio::test]
async fn non_author_edit_is_denied_and_changes_nothing() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let mallory = user(&h, "mallory").await;
    let p = post(&h, &lev, "Тестовый пост", None).await;

    let err = h
        .posts
        .edit_post(p.id, mallory.id, Some("взломано"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PermissionDenied));

    let unchanged = h.posts.get_post(p.id).await.unwrap();
    assert_eq!(unchanged.text, "Тестовый пост");

    let err = h.posts.delete_post(p.id, mallory.id).await.unwrap_err();
    assert!(matches!(err, DomainError::PermissionDenied));
    assert!(h.posts.get_post(p.id).await.is_ok());
}

#[tokio::test]
async fn editing_a_missing_post_is_not_found() {
    let h = harness();
    let lev = user(&h, "lev").await;

    let err = h
        .posts
        .edit_post(4242, lev.id, Some("текст"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn blank_post_text_fails_validation() {
    let h = harness();
    let lev = user(&h, "lev").await;

    for text in ["", "   ", "\n\t"] {
        let err = h
            .posts
            .create_post(lev.id, text, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)), "text {text:?}");
    }

    assert_eq!(
        PostRepository::count(h.store.as_ref(), &quill_core::ports::FeedFilter::All)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn post_into_unknown_group_is_not_found() {
    let h = harness();
    let lev = user(&h, "lev").await;

    let err = h
        .posts
        .create_post(lev.id, "Тестовый пост", Some(999), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn comment_validation_and_missing_post() {
    let h = harness();
    let lev = user(&h, "lev").await;
    let p = post(&h, &lev, "Тестовый пост", None).await;

    let err = h.posts.add_comment(p.id, lev.id, "  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = h
        .posts
        .add_comment(4242, lev.id, "Коммент")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn uploaded_image_is_stored_as_a_path() {
    let h = harness();
    let lev = user(&h, "lev").await;

    let p = h
        .posts
        .create_post(
            lev.id,
            "Тестовый пост",
            None,
            Some(ImageUpload {
                file_name: "forest.jpg".to_string(),
                content: b"\x47\x49\x46\x38\x39\x61".to_vec(),
            }),
        )
        .await
        .unwrap();
    assert_eq!(p.image.as_deref(), Some("posts/forest.jpg"));
}
