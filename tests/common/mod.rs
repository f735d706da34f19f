// Common test helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use account_catalog_server::config::settings::Config;
use account_catalog_server::server::app_state::AppState;
use account_catalog_server::storage::memory::MemoryStorage;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub fn config_with_admin() -> Config {
    let mut config = Config::default();
    config.auth.admin_email = Some(ADMIN_EMAIL.to_string());
    config.auth.admin_password = Some(ADMIN_PASSWORD.to_string());
    config
}

pub async fn app_state_with_memory() -> Arc<AppState> {
    let storage = Arc::new(MemoryStorage::new());
    AppState::new_with_storage(storage, config_with_admin())
        .await
        .expect("Failed to build AppState")
        .into()
}
