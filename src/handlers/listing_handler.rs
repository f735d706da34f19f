use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::handlers::auth_handler::AdminPrincipal;
use crate::models::{ListingFilter, ListingStatus, NewListing};
use crate::server::app_state::AppState;
use crate::validation::{validate_listing_id, validate_new_listing};

/// Query string of the search endpoint. Absent fields mean "all".
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub platform: String,
    #[serde(default, rename = "type")]
    pub category: String,
    #[serde(default, alias = "q")]
    pub term: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl SearchQuery {
    pub fn to_filter(&self) -> Result<ListingFilter> {
        let status = match self.status.as_deref() {
            Some(s) if !crate::models::listing::is_all_sentinel(s) => Some(s.parse::<ListingStatus>()?),
            _ => None,
        };
        Ok(ListingFilter::from_params(&self.platform, &self.category, &self.term)?.with_status(status))
    }
}

/// Body of the status update endpoint
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ListingStatus,
}

/// GET /api/accounts
pub async fn list_listings(state: web::Data<Arc<AppState>>) -> Result<HttpResponse> {
    let listings = state.catalog.list().await?;
    Ok(HttpResponse::Ok().json(listings))
}

/// GET /api/accounts/search
pub async fn search_listings(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let filter = query.to_filter()?;
    let listings = state.catalog.search(&filter).await?;
    Ok(HttpResponse::Ok().json(listings))
}

/// GET /api/accounts/{id}
pub async fn get_listing(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match state.catalog.get(&id).await? {
        Some(listing) => Ok(HttpResponse::Ok().json(listing)),
        None => Err(CatalogError::not_found(format!("Listing not found: {}", id))),
    }
}

/// POST /api/accounts
pub async fn add_listing(
    AdminPrincipal(principal): AdminPrincipal,
    state: web::Data<Arc<AppState>>,
    body: web::Json<NewListing>,
) -> Result<HttpResponse> {
    let new_listing = body.into_inner();
    validate_new_listing(&new_listing)?;

    let listing = state.catalog.add(new_listing).await?;
    info!("{} listed {}", principal.email, listing.username);
    Ok(HttpResponse::Created().json(listing))
}

/// DELETE /api/accounts/{id}
pub async fn delete_listing(
    AdminPrincipal(principal): AdminPrincipal,
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    validate_listing_id(&id)?;

    state.catalog.delete(&id).await?;
    info!("{} deleted listing {}", principal.email, id);
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/accounts/{id}/status
pub async fn set_listing_status(
    AdminPrincipal(principal): AdminPrincipal,
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    validate_listing_id(&id)?;

    state.catalog.set_status(&id, body.status).await?;
    info!("{} set listing {} to {}", principal.email, id, body.status);
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/accounts/{id}/toggle
pub async fn toggle_listing_status(
    AdminPrincipal(principal): AdminPrincipal,
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    validate_listing_id(&id)?;

    let listing = state.catalog.toggle_status(&id).await?;
    info!("{} toggled listing {} to {}", principal.email, id, listing.status);
    Ok(HttpResponse::Ok().json(listing))
}
