//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(web::scope("/auth").route("/me", web::get().to(auth::me)))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    // Fixed segments before `{id}`
                    .route("/mine", web::get().to(posts::mine))
                    .route("/stats", web::get().to(posts::stats))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/react", web::post().to(posts::react))
                    .route("/{id}/comment", web::post().to(posts::comment)),
            ),
    );
}
