//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod clock;
mod media;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use cache::{Cache, CacheError};
pub use clock::Clock;
pub use media::{MediaError, MediaStore};
pub use repository::{
    CommentRepository, FeedFilter, FollowRepository, GroupRepository, PostPatch, PostRepository,
    UserRepository,
};
