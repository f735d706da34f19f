use dotenv::dotenv;
use tracing::{error, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_catalog_server::{
    config::settings::{Config, LoggingConfig},
    error::Result,
    server::startup::start_server,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::load();
    init_tracing(&config.logging);

    config.validate().map_err(|e| {
        error!("❌ Invalid configuration: {}", e);
        e
    })?;
    info!(
        "📋 Configuration loaded: storage={:?}, workers={}",
        config.database.storage_type, config.server.worker_threads
    );

    match start_server(config).await {
        Ok(_) => {
            info!("✅ Server shutdown completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("❌ Server failed: {}", e);
            Err(e)
        }
    }
}

/// Initialize structured logging
#[instrument]
fn init_tracing(logging: &LoggingConfig) {
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| format!("account_catalog_server={},info", logging.level));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));
    let registry = tracing_subscriber::registry().with(filter);

    // JSON logging for production
    if logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }

    info!("✅ Structured logging initialized with level: {}", log_level);
}
