//! HTTP route modules
//!
//! All HTTP route handlers organized by functionality.

pub mod auth;
pub mod generate;
pub mod history;
pub mod media;

use actix_web::web;

/// Configure API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/health",
        web::get().to(crate::server::handlers::health_check),
    )
    .service(
        web::scope("/api")
            // Accounts
            .route("/signup", web::post().to(auth::signup))
            .route("/login", web::post().to(auth::login))
            // Generation
            .route("/generate", web::post().to(generate::generate))
            .route(
                "/generate-from-image",
                web::post().to(generate::generate_from_image),
            )
            // History
            .route("/history", web::get().to(history::list_history))
            .route("/history", web::delete().to(history::clear_history))
            .route(
                "/history/{id}",
                web::delete().to(history::delete_history_item),
            ),
    )
    .route("/media/{filename}", web::get().to(media::serve_media));
}
