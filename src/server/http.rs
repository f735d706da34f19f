use actix_web::{web, HttpRequest};
use tracing::debug;

use crate::error::CatalogError;
use crate::handlers::{auth_handler, health, listing_handler};

/// Maximum accepted JSON body size
const JSON_PAYLOAD_LIMIT: usize = 64 * 1024;

/// Register every HTTP route of the catalog server
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        // Health endpoints
        .route("/health", web::get().to(health::health_check))
        .route("/health/ready", web::get().to(health::readiness_check))
        .route("/health/live", web::get().to(health::liveness_check))
        // Auth endpoints
        .service(
            web::scope("/auth")
                .route("/sign-in", web::post().to(auth_handler::sign_in))
                .route("/sign-out", web::post().to(auth_handler::sign_out))
                .route("/me", web::get().to(auth_handler::me)),
        )
        // Catalog endpoints
        .service(
            web::scope("/api/accounts")
                .route("", web::get().to(listing_handler::list_listings))
                .route("", web::post().to(listing_handler::add_listing))
                .route("/search", web::get().to(listing_handler::search_listings))
                .route("/{id}", web::get().to(listing_handler::get_listing))
                .route("/{id}", web::delete().to(listing_handler::delete_listing))
                .route("/{id}/status", web::put().to(listing_handler::set_listing_status))
                .route("/{id}/toggle", web::post().to(listing_handler::toggle_listing_status)),
        );
}

/// Malformed bodies become validation errors with the catalog's JSON shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, _req: &HttpRequest| {
            debug!("Rejected JSON body: {}", err);
            rejection(CatalogError::validation(err.to_string()))
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!("Rejected query string: {}", err);
        rejection(CatalogError::validation(err.to_string()))
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        rejection(CatalogError::validation(err.to_string()))
    })
}

fn rejection(err: CatalogError) -> actix_web::Error {
    err.into()
}
