pub mod memory;
pub mod mysql;

// MySQL specific modules
mod mysql_auth;
mod mysql_listing;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    config::settings::{DatabaseConfig, StorageType},
    error::{CatalogError, Result as AppResult},
    models::{AdminAccount, AuthToken, Listing, ListingFilter, ListingStatus, NewListing},
};

use self::memory::MemoryStorage;
use self::mysql::MySqlStorage;

/// Storage Result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Error types for storage operations
#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Connection pool exhausted: {0}")]
    PoolExhausted(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => Self::Database(db_err.to_string()),
            sqlx::Error::Io(io_err) => Self::NetworkError(io_err.to_string()),
            sqlx::Error::PoolTimedOut => Self::PoolExhausted("Connection pool timeout".to_string()),
            sqlx::Error::PoolClosed => Self::Connection("Connection pool closed".to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::InvalidData(error.to_string())
            }
            _ => Self::Database(error.to_string()),
        }
    }
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => CatalogError::NotFound(msg),
            _ => CatalogError::StoreUnavailable(err.to_string()),
        }
    }
}

/// Catalog store plus the records backing the identity provider
#[async_trait]
pub trait Storage: Sync + Send {
    /// Get the storage instance as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Health check with connection validation
    async fn health_check(&self) -> Result<bool>;

    /// Storage type identifier
    fn storage_type(&self) -> &'static str;

    // Listing methods over the `accounts` collection
    /// Insert a listing and return its generated id
    async fn insert_listing(&self, listing: &NewListing, created_at: DateTime<Utc>) -> Result<String>;
    async fn get_listing(&self, id: &str) -> Result<Option<Listing>>;
    /// All listings in the store's natural order
    async fn list_listings(&self) -> Result<Vec<Listing>>;
    /// Listings matching the filter, newest first
    async fn query_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>>;
    /// Update the status field only; an unknown id changes nothing
    async fn update_listing_status(&self, id: &str, status: ListingStatus) -> Result<()>;
    /// Remove a listing; an unknown id changes nothing
    async fn delete_listing(&self, id: &str) -> Result<()>;

    // Admin account methods
    async fn create_admin(&self, admin: &AdminAccount) -> Result<()>;
    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>>;

    // AuthToken methods
    async fn create_auth_token(&self, auth_token: &AuthToken) -> Result<()>;
    async fn get_auth_token(&self, token: &str) -> Result<Option<AuthToken>>;
    async fn delete_auth_token(&self, token: &str) -> Result<()>;
}

/// Storage factory
pub struct StorageFactory;

impl StorageFactory {
    /// Create MySQL storage and make sure its schema exists
    #[instrument(skip(config))]
    pub async fn create_mysql_storage(config: &DatabaseConfig) -> AppResult<MySqlStorage> {
        info!("Creating MySQL storage at {}:{}/{}", config.host, config.port, config.name);

        let storage = MySqlStorage::connect(config)
            .await
            .map_err(|e| CatalogError::store(format!("Failed to create MySQL storage: {}", e)))?;

        storage
            .init_schema()
            .await
            .map_err(|e| CatalogError::store(format!("Failed to initialize database schema: {}", e)))?;

        info!("✅ MySQL storage created successfully");
        Ok(storage)
    }

    /// Create memory storage
    pub fn create_memory_storage() -> MemoryStorage {
        info!("Creating memory storage");
        MemoryStorage::new()
    }
}

/// Storage initialization driven by configuration
#[instrument(skip(config))]
pub async fn init_storage(config: &DatabaseConfig) -> AppResult<Arc<dyn Storage>> {
    info!("Initializing storage layer ({:?})", config.storage_type);

    let storage: Arc<dyn Storage> = match config.storage_type {
        StorageType::Memory => Arc::new(StorageFactory::create_memory_storage()),
        StorageType::MySql => Arc::new(StorageFactory::create_mysql_storage(config).await?),
    };

    let healthy = storage
        .health_check()
        .await
        .map_err(|e| CatalogError::store(format!("Storage health check failed: {}", e)))?;
    if !healthy {
        return Err(CatalogError::store("Storage health check failed"));
    }

    info!("✅ Storage layer initialized: {}", storage.storage_type());
    Ok(storage)
}
