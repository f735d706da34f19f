use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::error::{ErrorContext, Result};
use crate::models::{Listing, ListingFilter, ListingStatus, NewListing};
use crate::storage::Storage;

/// Catalog operations over the `accounts` collection
///
/// Holds nothing but the store handle: every read goes back to the store and
/// every failure is returned to the caller once, without retry.
#[derive(Clone)]
pub struct CatalogService {
    storage: Arc<dyn Storage>,
}

impl CatalogService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All listings in the store's natural order
    pub async fn list(&self) -> Result<Vec<Listing>> {
        debug!("Listing all accounts");
        self.storage.list_listings().await.map_err(|e| {
            error!("Failed to list accounts: {}", e);
            e.into()
        })
    }

    /// Single listing by id
    pub async fn get(&self, id: &str) -> Result<Option<Listing>> {
        Ok(self.storage.get_listing(id).await?)
    }

    /// Stamp the creation time, persist, and return the stored listing.
    ///
    /// The username is trusted to be non-empty; callers check it first.
    pub async fn add(&self, listing: NewListing) -> Result<Listing> {
        let created_at = Utc::now();
        let id = self
            .storage
            .insert_listing(&listing, created_at)
            .await
            .map_err(|e| {
                error!("Failed to add account {}: {}", listing.username, e);
                e
            })?;

        info!("Added account {} ({}) as {}", listing.username, listing.platform, id);
        Ok(listing.into_listing(id, created_at))
    }

    /// Hard delete. Deleting an unknown id is not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.storage.delete_listing(id).await.map_err(|e| {
            error!("Failed to delete account {}: {}", id, e);
            e
        })?;

        info!("Deleted account {}", id);
        Ok(())
    }

    /// Overwrite the status field of one listing
    pub async fn set_status(&self, id: &str, status: ListingStatus) -> Result<()> {
        self.storage
            .update_listing_status(id, status)
            .await
            .map_err(|e| {
                error!("Failed to set status of account {}: {}", id, e);
                e
            })?;

        info!("Account {} is now {}", id, status);
        Ok(())
    }

    /// Flip available/sold and return the listing as it now stands
    pub async fn toggle_status(&self, id: &str) -> Result<Listing> {
        let mut listing = self
            .get(id)
            .await?
            .with_context(|| format!("Listing not found: {}", id))?;

        let status = listing.status.toggled();
        self.set_status(id, status).await?;
        listing.status = status;
        Ok(listing)
    }

    /// Listings matching platform, type and username prefix, newest first
    pub async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        debug!("Searching accounts with {:?}", filter);
        self.storage.query_listings(filter).await.map_err(|e| {
            error!("Failed to search accounts: {}", e);
            e.into()
        })
    }
}
