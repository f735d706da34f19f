use chrono::{DateTime, Utc};
use sqlx::{MySql, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Listing, ListingFilter, ListingStatus, NewListing};
use crate::storage::mysql::MySqlStorage;
use crate::storage::{Result, StorageError};

/// id, username, platform, type, status, created_at
type ListingRow = (String, String, String, String, String, i64);

const SELECT_LISTING: &str =
    "SELECT id, username, platform, `type`, status, created_at FROM accounts";

fn row_to_listing(row: ListingRow) -> Result<Listing> {
    let (id, username, platform, category, status, created_at) = row;
    let invalid = |e: crate::error::CatalogError| StorageError::InvalidData(e.to_string());

    Ok(Listing {
        id,
        username,
        platform: platform.parse().map_err(invalid)?,
        category: category.parse().map_err(invalid)?,
        status: status.parse().map_err(invalid)?,
        created_at: MySqlStorage::micros_to_datetime(created_at)?,
    })
}

/// Filtered select over `accounts`, newest first.
///
/// The username condition is an exact prefix comparison. The binary cast keeps
/// trailing spaces significant, which the PAD SPACE `utf8mb4_bin` collation
/// would otherwise ignore.
fn search_query(filter: &ListingFilter) -> QueryBuilder<'_, MySql> {
    let mut query: QueryBuilder<MySql> = QueryBuilder::new(SELECT_LISTING);
    query.push(" WHERE 1 = 1");

    if let Some(platform) = filter.platform {
        query.push(" AND platform = ").push_bind(platform.as_str());
    }
    if let Some(category) = filter.category {
        query.push(" AND `type` = ").push_bind(category.as_str());
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(prefix) = filter.username_prefix() {
        query
            .push(" AND LEFT(username, CHAR_LENGTH(")
            .push_bind(prefix)
            .push(")) = CAST(")
            .push_bind(prefix)
            .push(" AS BINARY)");
    }
    query.push(" ORDER BY created_at DESC, seq DESC");
    query
}

/// Listing queries against the `accounts` table
pub trait MySqlListingExt {
    async fn insert_listing(&self, listing: &NewListing, created_at: DateTime<Utc>) -> Result<String>;

    async fn get_listing(&self, id: &str) -> Result<Option<Listing>>;

    async fn list_listings(&self) -> Result<Vec<Listing>>;

    async fn query_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>>;

    async fn update_listing_status(&self, id: &str, status: ListingStatus) -> Result<()>;

    async fn delete_listing(&self, id: &str) -> Result<()>;
}

impl MySqlListingExt for MySqlStorage {
    async fn insert_listing(&self, listing: &NewListing, created_at: DateTime<Utc>) -> Result<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"INSERT INTO accounts (
                id, username, platform, `type`, status, created_at
              ) VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&listing.username)
        .bind(listing.platform.as_str())
        .bind(listing.category.as_str())
        .bind(listing.status.as_str())
        .bind(created_at.timestamp_micros())
        .execute(self.get_sqlx_pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to insert listing: {}", e)))?;

        debug!("Inserted listing {}", id);
        Ok(id)
    }

    async fn get_listing(&self, id: &str) -> Result<Option<Listing>> {
        let row: Option<ListingRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_LISTING))
            .bind(id)
            .fetch_optional(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to query listing: {}", e)))?;

        row.map(row_to_listing).transpose()
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        let rows: Vec<ListingRow> = sqlx::query_as(&format!("{} ORDER BY seq", SELECT_LISTING))
            .fetch_all(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to list listings: {}", e)))?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn query_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let mut query = search_query(filter);

        let rows: Vec<ListingRow> = query
            .build_query_as::<ListingRow>()
            .fetch_all(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to search listings: {}", e)))?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn update_listing_status(&self, id: &str, status: ListingStatus) -> Result<()> {
        let result = sqlx::query("UPDATE accounts SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to update listing status: {}", e)))?;

        debug!("Status update for {} touched {} row(s)", id, result.rows_affected());
        Ok(())
    }

    async fn delete_listing(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(self.get_sqlx_pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to delete listing: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_search_sql() {
        let filter = ListingFilter::all();
        let query = search_query(&filter);
        assert_eq!(
            query.sql(),
            "SELECT id, username, platform, `type`, status, created_at FROM accounts \
             WHERE 1 = 1 ORDER BY created_at DESC, seq DESC"
        );
    }

    #[test]
    fn test_full_filter_sql() {
        let filter = ListingFilter::from_params("Instagram", "three-letter", "nike")
            .unwrap()
            .with_status(Some(ListingStatus::Available));
        let query = search_query(&filter);
        assert_eq!(
            query.sql(),
            "SELECT id, username, platform, `type`, status, created_at FROM accounts \
             WHERE 1 = 1 AND platform = ? AND `type` = ? AND status = ? \
             AND LEFT(username, CHAR_LENGTH(?)) = CAST(? AS BINARY) \
             ORDER BY created_at DESC, seq DESC"
        );
    }

    #[test]
    fn test_prefix_is_not_a_range() {
        let filter = ListingFilter::from_params("X", "all", "nike").unwrap();
        let query = search_query(&filter);
        let sql = query.sql();
        assert!(sql.contains("LEFT(username, CHAR_LENGTH(?)) = CAST(? AS BINARY)"));
        assert!(!sql.contains("username <="));
        assert!(!sql.contains("`type` ="));
    }
}
