use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::constants::MAX_AUTH_TOKEN_EXPIRY_HOURS;
use crate::error::{CatalogError, Result};
use crate::models::{AdminAccount, AuthToken, Principal, Session};
use crate::storage::Storage;

/// The one message returned for every rejected sign-in
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Authenticates the administrator and resolves session tokens
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for a session
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// End a session. Unknown tokens are ignored.
    async fn sign_out(&self, token: &str) -> Result<()>;

    /// The principal a token belongs to, if the session is live
    async fn current_principal(&self, token: &str) -> Result<Option<Principal>>;
}

/// Authentication service backed by the admin and token records in storage
#[derive(Clone)]
pub struct AuthService {
    /// Storage backend
    storage: Arc<dyn Storage>,
    /// Session lifetime
    token_expiry: Duration,
}

impl AuthService {
    /// Create a new authentication service with the given storage backend.
    /// The session lifetime is clamped to 1..=MAX_AUTH_TOKEN_EXPIRY_HOURS.
    pub fn new(storage: Arc<dyn Storage>, token_expiry_hours: i64) -> Self {
        let hours = token_expiry_hours.clamp(1, MAX_AUTH_TOKEN_EXPIRY_HOURS);
        if hours != token_expiry_hours {
            warn!("Token expiry of {}h clamped to {}h", token_expiry_hours, hours);
        }

        Self {
            storage,
            token_expiry: Duration::hours(hours),
        }
    }

    /// Generate a random salt for password hashing
    pub fn generate_salt(&self) -> String {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill(&mut salt);
        general_purpose::STANDARD.encode(salt)
    }

    /// Hash a password with the given salt
    pub fn hash_password(&self, password: &str, salt: &str) -> String {
        let salted = format!("{}{}", password, salt);
        let mut hasher = Sha256::new();
        hasher.update(salted.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Verify a password against a stored hash and salt
    pub fn verify_password(&self, password: &str, hash: &str, salt: &str) -> bool {
        self.hash_password(password, salt) == hash
    }

    /// Create a new session token for the given admin
    pub fn create_auth_token(&self, admin: &AdminAccount) -> Result<AuthToken> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.token_expiry)
            .ok_or_else(|| CatalogError::config("Token expiry is out of range"))?;

        Ok(AuthToken {
            access_token: Uuid::new_v4().to_string(),
            account_id: admin.id.clone(),
            email: admin.email.clone(),
            created_at: now,
            expires_at,
        })
    }

    /// Create or replace the administrator with the given credentials
    pub async fn register_admin(&self, email: &str, password: &str) -> Result<AdminAccount> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CatalogError::validation("Admin email and password are required"));
        }

        let salt = self.generate_salt();
        let admin = match self.storage.get_admin_by_email(email).await? {
            Some(existing) => AdminAccount {
                password_hash: self.hash_password(password, &salt),
                salt,
                ..existing
            },
            None => AdminAccount {
                id: Uuid::new_v4().to_string(),
                email: email.to_string(),
                password_hash: self.hash_password(password, &salt),
                salt,
                created_at: Utc::now(),
            },
        };

        self.storage.create_admin(&admin).await?;
        info!("Registered administrator {}", admin.email);
        Ok(admin)
    }
}

#[async_trait]
impl IdentityProvider for AuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        debug!("AuthService: Authenticating {}", email);

        let admin = match self.storage.get_admin_by_email(email.trim()).await? {
            Some(admin) => admin,
            None => {
                warn!("Sign-in rejected");
                return Err(CatalogError::auth(INVALID_CREDENTIALS));
            }
        };

        if !self.verify_password(password, &admin.password_hash, &admin.salt) {
            warn!("Sign-in rejected");
            return Err(CatalogError::auth(INVALID_CREDENTIALS));
        }

        let token = self.create_auth_token(&admin)?;
        self.storage.create_auth_token(&token).await.map_err(|e| {
            error!("Error saving token: {}", e);
            e
        })?;

        info!("Administrator {} signed in", admin.email);
        Ok(Session::from(&token))
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        debug!("AuthService: Deleting token");
        self.storage.delete_auth_token(token).await?;
        Ok(())
    }

    async fn current_principal(&self, token: &str) -> Result<Option<Principal>> {
        let auth_token = match self.storage.get_auth_token(token).await? {
            Some(auth_token) => auth_token,
            None => return Ok(None),
        };

        if auth_token.is_expired(Utc::now()) {
            debug!("Token for {} has expired", auth_token.email);
            self.storage.delete_auth_token(token).await?;
            return Ok(None);
        }

        Ok(Some(Principal::from(&auth_token)))
    }
}
