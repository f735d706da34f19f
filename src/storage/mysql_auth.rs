use tracing::debug;

use crate::models::{AdminAccount, AuthToken};
use crate::storage::mysql::MySqlStorage;
use crate::storage::{Result, StorageError};

/// Admin account and session token queries
pub trait MySqlAuthExt {
    async fn create_admin(&self, admin: &AdminAccount) -> Result<()>;

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>>;

    async fn create_auth_token(&self, auth_token: &AuthToken) -> Result<()>;

    async fn get_auth_token(&self, token: &str) -> Result<Option<AuthToken>>;

    async fn delete_auth_token(&self, token: &str) -> Result<()>;
}

impl MySqlAuthExt for MySqlStorage {
    async fn create_admin(&self, admin: &AdminAccount) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO admins (id, email, password_hash, salt, created_at)
              VALUES (?, ?, ?, ?, ?)
              ON DUPLICATE KEY UPDATE password_hash = VALUES(password_hash), salt = VALUES(salt)"#,
        )
        .bind(&admin.id)
        .bind(admin.email.to_lowercase())
        .bind(&admin.password_hash)
        .bind(&admin.salt)
        .bind(admin.created_at.timestamp_micros())
        .execute(self.get_sqlx_pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to insert admin: {}", e)))?;

        Ok(())
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        let row: Option<(String, String, String, String, i64)> = sqlx::query_as(
            r#"SELECT id, email, password_hash, salt, created_at
              FROM admins WHERE email = ?"#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(self.get_sqlx_pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to query admin: {}", e)))?;

        match row {
            Some((id, email, password_hash, salt, created_at)) => Ok(Some(AdminAccount {
                id,
                email,
                password_hash,
                salt,
                created_at: MySqlStorage::micros_to_datetime(created_at)?,
            })),
            None => Ok(None),
        }
    }

    async fn create_auth_token(&self, auth_token: &AuthToken) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO auth_tokens (
                access_token, account_id, email, created_at, expires_at
              ) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&auth_token.access_token)
        .bind(&auth_token.account_id)
        .bind(&auth_token.email)
        .bind(auth_token.created_at.timestamp_micros())
        .bind(auth_token.expires_at.timestamp_micros())
        .execute(self.get_sqlx_pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to insert auth token: {}", e)))?;

        Ok(())
    }

    async fn get_auth_token(&self, token: &str) -> Result<Option<AuthToken>> {
        debug!("Looking up auth token");
        let row: Option<(String, String, String, i64, i64)> = sqlx::query_as(
            r#"SELECT access_token, account_id, email, created_at, expires_at
              FROM auth_tokens WHERE access_token = ?"#,
        )
        .bind(token)
        .fetch_optional(self.get_sqlx_pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to query auth token: {}", e)))?;

        match row {
            Some((access_token, account_id, email, created_at, expires_at)) => Ok(Some(AuthToken {
                access_token,
                account_id,
                email,
                created_at: MySqlStorage::micros_to_datetime(created_at)?,
                expires_at: MySqlStorage::micros_to_datetime(expires_at)?,
            })),
            None => Ok(None),
        }
    }

    async fn delete_auth_token(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM auth_tokens WHERE access_token = ?")
            .bind(token)
            .execute(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to delete auth token: {}", e)))?;

        Ok(())
    }
}
