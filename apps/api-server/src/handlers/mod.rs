//! HTTP handlers and route configuration.

mod auth;
mod events;
mod health;
mod posts;
mod profiles;

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
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/search", web::get().to(posts::search))
                    .route("/batch-delete", web::post().to(posts::delete_many))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/likes", web::post().to(posts::add_like))
                    .route("/{id}/likes", web::delete().to(posts::remove_like))
                    .route("/{id}/likes/toggle", web::post().to(posts::toggle_like))
                    .route("/{id}/comments", web::post().to(posts::add_comment))
                    .route(
                        "/{id}/comments/stream",
                        web::get().to(posts::comment_stream),
                    )
                    .route(
                        "/{id}/comments/{comment_id}",
                        web::put().to(posts::update_comment),
                    )
                    .route(
                        "/{id}/comments/{comment_id}",
                        web::delete().to(posts::delete_comment),
                    ),
            )
            // Profile routes
            .service(
                web::scope("/profiles")
                    .route("", web::get().to(profiles::list))
                    .route("", web::post().to(profiles::upsert))
                    .route("/{id}", web::get().to(profiles::get))
                    .route("/{id}", web::delete().to(profiles::delete)),
            )
            // Notification routes
            .service(
                web::scope("/events")
                    .route("", web::get().to(events::list))
                    .route("/read", web::post().to(events::mark_read)),
            ),
    );
}
