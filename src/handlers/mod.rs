// Admin sign-in and the bearer-token extractor
pub mod auth_handler;
pub use auth_handler::AdminPrincipal;

// Catalog endpoints
pub mod listing_handler;

// Health check handler
pub mod health;
