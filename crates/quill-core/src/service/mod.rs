//! Services - the operations the request-handling layer calls into.
//!
//! Each service owns the ports it reads and writes; handlers hold them
//! behind `Arc` and translate [`crate::DomainError`] into responses.

mod feed;
mod posts;
mod social;

pub use feed::{
    DEFAULT_CACHE_TTL, DEFAULT_PAGE_SIZE, FEED_CACHE_KEY, FeedConfig, FeedKind, FeedPage,
    FeedService,
};
pub use posts::{ImageUpload, PostService};
pub use social::SocialService;
