use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Social platform a listed account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Platform {
    Instagram,
    X,
    Snapchat,
    TikTok,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::X,
        Platform::Snapchat,
        Platform::TikTok,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::X => "X",
            Platform::Snapchat => "Snapchat",
            Platform::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Platform::ALL
            .iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| CatalogError::validation(format!("Unknown platform: {}", s)))
    }
}

impl TryFrom<String> for Platform {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Username category of a listed account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Category {
    ThreeLetter,
    FourLetter,
    Special,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ThreeLetter => "three-letter",
            Category::FourLetter => "four-letter",
            Category::Special => "special",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        match label.to_ascii_lowercase().as_str() {
            "three-letter" | "three_letter" | "ثلاثي" => Ok(Category::ThreeLetter),
            "four-letter" | "four_letter" | "رباعي" => Ok(Category::FourLetter),
            "special" | "مميز" => Ok(Category::Special),
            _ => Err(CatalogError::validation(format!("Unknown account type: {}", s))),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Sale status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ListingStatus {
    #[default]
    Available,
    Sold,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Sold => "sold",
        }
    }

    /// The status the admin toggle moves a listing to
    pub fn toggled(self) -> Self {
        match self {
            ListingStatus::Available => ListingStatus::Sold,
            ListingStatus::Sold => ListingStatus::Available,
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        match label.to_ascii_lowercase().as_str() {
            "available" | "متاح" => Ok(ListingStatus::Available),
            "sold" | "مباع" | "تم البيع" => Ok(ListingStatus::Sold),
            _ => Err(CatalogError::validation(format!("Unknown status: {}", s))),
        }
    }
}

impl TryFrom<String> for ListingStatus {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// One account listing as persisted in the `accounts` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// store-assigned identifier
    pub id: String,
    pub username: String,
    pub platform: Platform,
    #[serde(rename = "type")]
    pub category: Category,
    pub status: ListingStatus,
    /// stamped by the catalog service when the listing is added
    pub created_at: DateTime<Utc>,
}

/// Payload for adding a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewListing {
    pub username: String,
    pub platform: Platform,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(default)]
    pub status: ListingStatus,
}

impl NewListing {
    pub fn new(username: impl Into<String>, platform: Platform, category: Category) -> Self {
        Self {
            username: username.into(),
            platform,
            category,
            status: ListingStatus::Available,
        }
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the identity and creation stamp assigned on insert
    pub fn into_listing(self, id: String, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            username: self.username,
            platform: self.platform,
            category: self.category,
            status: self.status,
            created_at,
        }
    }
}

/// Returns true for the filter values meaning "no constraint".
pub fn is_all_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("all") || value == "الكل"
}

/// Orders listings by creation time, newest first. The sort is stable.
pub fn sort_newest_first(listings: &mut [Listing]) {
    listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Search constraints over the catalog
///
/// `None` on an enum field and an empty `term` each mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub platform: Option<Platform>,
    pub category: Option<Category>,
    pub term: String,
    pub status: Option<ListingStatus>,
}

impl ListingFilter {
    /// Filter matching every listing
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from raw request parameters, honoring the "all" sentinel
    pub fn from_params(platform: &str, category: &str, term: &str) -> Result<Self> {
        let platform = if is_all_sentinel(platform) {
            None
        } else {
            Some(platform.parse()?)
        };
        let category = if is_all_sentinel(category) {
            None
        } else {
            Some(category.parse()?)
        };

        Ok(Self {
            platform,
            category,
            term: term.to_string(),
            status: None,
        })
    }

    pub fn with_status(mut self, status: Option<ListingStatus>) -> Self {
        self.status = status;
        self
    }

    /// Case-sensitive predicate applied by stores that scan linearly
    pub fn matches(&self, listing: &Listing) -> bool {
        self.platform.map_or(true, |p| listing.platform == p)
            && self.category.map_or(true, |c| listing.category == c)
            && self.status.map_or(true, |s| listing.status == s)
            && (self.term.is_empty() || listing.username.starts_with(&self.term))
    }

    /// Username prefix to match, if the term constrains it
    pub fn username_prefix(&self) -> Option<&str> {
        if self.term.is_empty() {
            None
        } else {
            Some(&self.term)
        }
    }
}
