// Re-export core functionality for external use
pub use async_trait::async_trait;
pub use sqlx;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

// Unified error handling
pub use error::{CatalogError, Result};
pub type AppResult<T> = Result<T>;

// Essential re-exports for convenience
pub use server::{
    app_state::AppState,
    http::configure_routes,
    startup::start_server,
};

pub use config::settings::{AuthConfig, Config, DatabaseConfig, ServerConfig, StorageType};

pub use storage::{
    init_storage, memory::MemoryStorage, mysql::MySqlStorage, Result as StorageResult, Storage,
    StorageError,
};

pub use models::{
    AdminAccount, AuthToken, Category, Listing, ListingFilter, ListingStatus, NewListing, Platform,
    Principal, Session,
};

pub use services::{AuthService, CatalogService, IdentityProvider};

// Version and build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AppResult, CatalogError, CatalogService, Config, IdentityProvider, Listing, ListingFilter,
        ListingStatus, NewListing, Platform, Result, Storage, NAME, VERSION,
    };

    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, instrument, warn};
    pub use tokio;
}
