// Module declarations
pub mod auth_service;
pub mod catalog_service;

// Public re-exports
pub use auth_service::{AuthService, IdentityProvider};
pub use catalog_service::CatalogService;
