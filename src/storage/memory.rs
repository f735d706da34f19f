use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex as TokioMutex;
use tracing::debug;
use uuid::Uuid;

use crate::models::listing::sort_newest_first;
use crate::models::{AdminAccount, AuthToken, Listing, ListingFilter, ListingStatus, NewListing};
use crate::storage::{Result, Storage};

/// Stored listing tagged with its insertion sequence
struct StoredListing {
    seq: u64,
    listing: Listing,
}

// In-memory storage data structure (using Mutex for thread safety)
struct StorageData {
    listings: HashMap<String, StoredListing>, // id -> listing
    admins: HashMap<String, AdminAccount>,    // lowercase email -> admin
    auth_tokens: HashMap<String, AuthToken>,  // token -> auth_token
    next_seq: u64,
}

impl StorageData {
    fn new() -> Self {
        Self {
            listings: HashMap::new(),
            admins: HashMap::new(),
            auth_tokens: HashMap::new(),
            next_seq: 1,
        }
    }

    /// Listings in insertion order
    fn listings_in_order(&self) -> Vec<&StoredListing> {
        let mut stored: Vec<&StoredListing> = self.listings.values().collect();
        stored.sort_by_key(|s| s.seq);
        stored
    }
}

/// In-memory storage implementation (useful for testing and local runs)
pub struct MemoryStorage {
    data: TokioMutex<StorageData>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            data: TokioMutex::new(StorageData::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn storage_type(&self) -> &'static str {
        "memory"
    }

    async fn insert_listing(&self, listing: &NewListing, created_at: DateTime<Utc>) -> Result<String> {
        let mut data = self.data.lock().await;

        let id = Uuid::new_v4().to_string();
        let seq = data.next_seq;
        data.next_seq += 1;

        let stored = StoredListing {
            seq,
            listing: listing.clone().into_listing(id.clone(), created_at),
        };
        data.listings.insert(id.clone(), stored);

        debug!("Inserted listing {} (seq {})", id, seq);
        Ok(id)
    }

    async fn get_listing(&self, id: &str) -> Result<Option<Listing>> {
        let data = self.data.lock().await;
        Ok(data.listings.get(id).map(|s| s.listing.clone()))
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        let data = self.data.lock().await;
        Ok(data
            .listings_in_order()
            .into_iter()
            .map(|s| s.listing.clone())
            .collect())
    }

    async fn query_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let data = self.data.lock().await;

        // later insertions first so that equal timestamps keep that order after the stable sort
        let mut matched: Vec<Listing> = data
            .listings_in_order()
            .into_iter()
            .rev()
            .filter(|s| filter.matches(&s.listing))
            .map(|s| s.listing.clone())
            .collect();
        sort_newest_first(&mut matched);

        Ok(matched)
    }

    async fn update_listing_status(&self, id: &str, status: ListingStatus) -> Result<()> {
        let mut data = self.data.lock().await;
        if let Some(stored) = data.listings.get_mut(id) {
            stored.listing.status = status;
        } else {
            debug!("Status update for unknown listing {}", id);
        }
        Ok(())
    }

    async fn delete_listing(&self, id: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        data.listings.remove(id);
        Ok(())
    }

    async fn create_admin(&self, admin: &AdminAccount) -> Result<()> {
        let mut data = self.data.lock().await;
        data.admins.insert(admin.email.to_lowercase(), admin.clone());
        Ok(())
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        let data = self.data.lock().await;
        Ok(data.admins.get(&email.to_lowercase()).cloned())
    }

    async fn create_auth_token(&self, auth_token: &AuthToken) -> Result<()> {
        let mut data = self.data.lock().await;

        let now = Utc::now();
        let before = data.auth_tokens.len();
        data.auth_tokens.retain(|_, t| !t.is_expired(now));
        if data.auth_tokens.len() < before {
            debug!("Dropped {} expired token(s)", before - data.auth_tokens.len());
        }

        data.auth_tokens
            .insert(auth_token.access_token.clone(), auth_token.clone());
        Ok(())
    }

    async fn get_auth_token(&self, token: &str) -> Result<Option<AuthToken>> {
        let data = self.data.lock().await;
        Ok(data.auth_tokens.get(token).cloned())
    }

    async fn delete_auth_token(&self, token: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        data.auth_tokens.remove(token);
        Ok(())
    }
}
