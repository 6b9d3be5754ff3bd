//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod users;

use actix_web::web;

use crate::middleware::auth::Authenticate;
use crate::middleware::error::rejected_input;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, req| rejected_input(err, req, "invalid input body")),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, req| rejected_input(err, req, "invalid query string")),
    );

    cfg
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/sign-up", web::post().to(auth::sign_up))
                .route("/sign-in", web::post().to(auth::sign_in)),
        )
        // Authenticated routes
        .service(
            web::scope("/users")
                .wrap(Authenticate)
                .route("/me", web::get().to(users::get_me))
                .route("/me", web::put().to(users::update_me)),
        )
        .service(
            web::scope("/posts")
                .wrap(Authenticate)
                .route("", web::post().to(posts::create_post))
                .route("", web::put().to(posts::update_post))
                .route("", web::delete().to(posts::delete_post))
                .route("", web::get().to(posts::get_post))
                .route("/page", web::get().to(posts::get_page_of_posts)),
        );
}
