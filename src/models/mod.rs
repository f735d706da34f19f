pub mod account;
pub mod auth;
pub mod listing;

pub use account::AdminAccount;
pub use auth::{AuthToken, Principal, Session};
pub use listing::{Category, Listing, ListingFilter, ListingStatus, NewListing, Platform};
