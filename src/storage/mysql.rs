use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlPoolOptions as SqlxMySqlPoolOptions;
use sqlx::MySqlPool as SqlxMySqlPool;
use std::time::Duration;
use tracing::info;

use crate::config::settings::DatabaseConfig;
use crate::models::{AdminAccount, AuthToken, Listing, ListingFilter, ListingStatus, NewListing};
use crate::storage::{Result, Storage, StorageError};

use crate::storage::mysql_auth::MySqlAuthExt;
use crate::storage::mysql_listing::MySqlListingExt;

/// MySQL storage implementation
pub struct MySqlStorage {
    sqlx_pool: SqlxMySqlPool,
}

impl MySqlStorage {
    /// Create new storage using the pool settings of the database config
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let sqlx_pool = SqlxMySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url())
            .await
            .map_err(|e| StorageError::Connection(format!("Failed to connect via sqlx: {}", e)))?;
        Ok(Self { sqlx_pool })
    }

    /// Create tables if they do not exist yet
    pub async fn init_schema(&self) -> Result<()> {
        info!("🔄 Initializing database schema...");

        // username uses a binary collation so that equality and prefix
        // comparisons are case-sensitive code point comparisons
        let create_accounts_table = r"
        CREATE TABLE IF NOT EXISTS accounts (
            seq BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            id VARCHAR(36) NOT NULL,
            username VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
            platform VARCHAR(32) NOT NULL,
            `type` VARCHAR(32) NOT NULL,
            status VARCHAR(16) NOT NULL,
            created_at BIGINT NOT NULL,
            UNIQUE KEY uk_accounts_id (id),
            INDEX idx_accounts_username (username),
            INDEX idx_accounts_created_at (created_at)
        )";

        sqlx::query(create_accounts_table)
            .execute(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to create accounts table: {}", e)))?;

        let create_admins_table = r"
        CREATE TABLE IF NOT EXISTS admins (
            id VARCHAR(36) NOT NULL PRIMARY KEY,
            email VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            salt VARCHAR(255) NOT NULL,
            created_at BIGINT NOT NULL,
            UNIQUE KEY uk_admins_email (email)
        )";

        sqlx::query(create_admins_table)
            .execute(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to create admins table: {}", e)))?;

        let create_auth_tokens_table = r"
        CREATE TABLE IF NOT EXISTS auth_tokens (
            access_token VARCHAR(255) NOT NULL PRIMARY KEY,
            account_id VARCHAR(36) NOT NULL,
            email VARCHAR(255) NOT NULL,
            created_at BIGINT NOT NULL,
            expires_at BIGINT NOT NULL,
            INDEX (account_id),
            FOREIGN KEY (account_id) REFERENCES admins(id) ON DELETE CASCADE
        )";

        sqlx::query(create_auth_tokens_table)
            .execute(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to create auth_tokens table: {}", e)))?;

        info!("✅ Database schema ready");
        Ok(())
    }

    /// sqlx pool getter
    pub fn get_sqlx_pool(&self) -> &SqlxMySqlPool {
        &self.sqlx_pool
    }

    /// Convert stored microseconds back to a timestamp
    pub fn micros_to_datetime(micros: i64) -> Result<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_micros(micros)
            .ok_or_else(|| StorageError::InvalidData(format!("Invalid timestamp: {}", micros)))
    }
}

#[async_trait]
impl Storage for MySqlStorage {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    async fn health_check(&self) -> Result<bool> {
        sqlx::query("SELECT 1")
            .execute(self.get_sqlx_pool())
            .await
            .map_err(StorageError::from)?;
        Ok(true)
    }

    fn storage_type(&self) -> &'static str {
        "mysql"
    }

    async fn insert_listing(&self, listing: &NewListing, created_at: DateTime<Utc>) -> Result<String> {
        MySqlListingExt::insert_listing(self, listing, created_at).await
    }

    async fn get_listing(&self, id: &str) -> Result<Option<Listing>> {
        MySqlListingExt::get_listing(self, id).await
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        MySqlListingExt::list_listings(self).await
    }

    async fn query_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        MySqlListingExt::query_listings(self, filter).await
    }

    async fn update_listing_status(&self, id: &str, status: ListingStatus) -> Result<()> {
        MySqlListingExt::update_listing_status(self, id, status).await
    }

    async fn delete_listing(&self, id: &str) -> Result<()> {
        MySqlListingExt::delete_listing(self, id).await
    }

    async fn create_admin(&self, admin: &AdminAccount) -> Result<()> {
        MySqlAuthExt::create_admin(self, admin).await
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        MySqlAuthExt::get_admin_by_email(self, email).await
    }

    async fn create_auth_token(&self, auth_token: &AuthToken) -> Result<()> {
        MySqlAuthExt::create_auth_token(self, auth_token).await
    }

    async fn get_auth_token(&self, token: &str) -> Result<Option<AuthToken>> {
        MySqlAuthExt::get_auth_token(self, token).await
    }

    async fn delete_auth_token(&self, token: &str) -> Result<()> {
        MySqlAuthExt::delete_auth_token(self, token).await
    }
}
