//! HTTP handlers and route configuration.

mod auth;
mod feeds;
mod follows;
mod groups;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Feeds
            .route("/feed", web::get().to(feeds::global_feed))
            .route("/feed/following", web::get().to(feeds::following_feed))
            .route("/feed/cache/clear", web::post().to(feeds::clear_feed_cache))
            // Groups
            .route("/groups", web::post().to(groups::create_group))
            .route("/groups/{slug}", web::get().to(groups::group_detail))
            .route("/groups/{slug}/feed", web::get().to(feeds::group_feed))
            .route(
                "/profiles/{username}/feed",
                web::get().to(feeds::profile_feed),
            )
            // Posts and comments
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{id}", web::get().to(posts::post_detail))
            .route("/posts/{id}", web::put().to(posts::edit_post))
            .route("/posts/{id}", web::delete().to(posts::delete_post))
            .route("/posts/{id}/comments", web::get().to(posts::list_comments))
            .route("/posts/{id}/comments", web::post().to(posts::add_comment))
            // Social graph
            .route(
                "/profiles/{username}/follow",
                web::post().to(follows::follow),
            )
            .route(
                "/profiles/{username}/follow",
                web::delete().to(follows::unfollow),
            ),
    );
}
