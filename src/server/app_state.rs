use std::sync::Arc;

use tracing::info;

use crate::config::settings::Config;
use crate::error::Result;
use crate::services::{AuthService, CatalogService};
use crate::storage::{init_storage, Storage};

/// Application state that is shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Storage backend shared by the services
    pub storage: Arc<dyn Storage>,
    /// Catalog operations over the account listings
    pub catalog: CatalogService,
    /// Identity provider for the administrator
    pub auth: AuthService,
}

impl AppState {
    /// Build state over the storage selected by the configuration
    pub async fn new(config: Config) -> Result<Self> {
        let storage = init_storage(&config.database).await?;
        Self::new_with_storage(storage, config).await
    }

    /// Build state over an existing storage and seed the configured administrator
    pub async fn new_with_storage(storage: Arc<dyn Storage>, config: Config) -> Result<Self> {
        let catalog = CatalogService::new(storage.clone());
        let auth = AuthService::new(storage.clone(), config.auth.token_expiry_hours);

        if let Some((email, password)) = config.auth.admin_seed() {
            auth.register_admin(email, password).await?;
        } else {
            info!("No administrator configured; admin endpoints will reject every request");
        }

        Ok(Self {
            config,
            storage,
            catalog,
            auth,
        })
    }
}
