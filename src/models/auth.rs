use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session token issued on sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// Access token value
    pub access_token: String,

    /// Admin account the token was issued to
    pub account_id: String,

    /// Email of that account, carried for the principal
    pub email: String,

    /// When the token was created
    pub created_at: DateTime<Utc>,

    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// The signed-in administrator, handed explicitly to operations that mutate the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub account_id: String,
    pub email: String,
}

impl From<&AuthToken> for Principal {
    fn from(token: &AuthToken) -> Self {
        Self {
            account_id: token.account_id.clone(),
            email: token.email.clone(),
        }
    }
}

/// Result of a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&AuthToken> for Session {
    fn from(token: &AuthToken) -> Self {
        Self {
            token: token.access_token.clone(),
            email: token.email.clone(),
            expires_at: token.expires_at,
        }
    }
}
