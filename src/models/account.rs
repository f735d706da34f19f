use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// administrator account known to the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccount {
    /// unique ID
    pub id: String,
    /// sign-in email (unique, compared case-insensitively)
    pub email: String,
    /// password hash
    pub password_hash: String,
    /// password salt
    pub salt: String,
    /// account creation time
    pub created_at: DateTime<Utc>,
}
