//! Caller-side checks run before a request reaches the catalog service

use crate::error::{CatalogError, Result};
use crate::models::NewListing;

/// Message carried by the validation error for an empty username
pub const MISSING_USERNAME: &str = "missingUsername";

/// Maximum username length accepted by the stores
pub const MAX_USERNAME_LEN: usize = 255;

/// Checks the add payload: the username must be non-empty.
/// Whitespace is a legitimate username character and is kept as given.
pub fn validate_new_listing(listing: &NewListing) -> Result<()> {
    if listing.username.is_empty() {
        return Err(CatalogError::validation(MISSING_USERNAME));
    }
    if listing.username.chars().count() > MAX_USERNAME_LEN {
        return Err(CatalogError::validation(format!(
            "Username too long (max {} characters)",
            MAX_USERNAME_LEN
        )));
    }
    Ok(())
}

/// Validates that a path identifier is usable
pub fn validate_listing_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CatalogError::validation("Listing id cannot be empty"));
    }
    Ok(())
}
