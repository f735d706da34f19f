use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tokio::signal;
use tracing::{error, info, instrument};

use crate::{
    config::{constants::DEFAULT_CORS_MAX_AGE_SECS, settings::Config},
    error::{CatalogError, Result},
    server::{app_state::AppState, http::configure_routes},
};

/// Start the server over the storage selected by the configuration and
/// serve until the HTTP server fails or a shutdown signal arrives
#[instrument(skip(config))]
pub async fn start_server(config: Config) -> Result<()> {
    info!("🚀 Starting Account Catalog Server");

    let app_state = Arc::new(AppState::new(config).await?);

    let http_server = start_http_server(app_state.clone());
    let shutdown_signal = setup_shutdown_signal();

    print_startup_banner(&app_state.config);

    tokio::select! {
        result = http_server => {
            if let Err(e) = result {
                error!("❌ HTTP server error: {}", e);
                return Err(e);
            }
        },
        _ = shutdown_signal => {
            info!("🛑 Shutdown signal received");
        }
    }

    Ok(())
}

/// Start the HTTP server with the catalog routes
#[instrument(skip(app_state))]
async fn start_http_server(app_state: Arc<AppState>) -> Result<()> {
    let addr = app_state.config.server.address()?;
    let workers = app_state.config.server.worker_threads;

    info!("🌐 Starting HTTP server on {}", addr);

    let state = app_state.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Version", env!("CARGO_PKG_VERSION")))
                    .add(("X-Server", "Account-Catalog")),
            )
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(DEFAULT_CORS_MAX_AGE_SECS as usize),
            )
            .configure(configure_routes)
    })
    .workers(workers)
    .keep_alive(Duration::from_secs(75))
    .client_request_timeout(Duration::from_secs(30))
    .shutdown_timeout(30)
    .bind(addr)
    .map_err(|e| CatalogError::internal(format!("Failed to bind HTTP server: {}", e)))?
    .run()
    .await
    .map_err(|e| CatalogError::internal(format!("HTTP server error: {}", e)))?;

    info!("🌐 HTTP server stopped");
    Ok(())
}

/// Setup graceful shutdown signal handling
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("🛑 Received TERM signal, initiating graceful shutdown...");
        },
    }
}

fn print_startup_banner(config: &Config) {
    println!(
        "
╭─────────────────────────────────────────────────────╮
│               Account Catalog Server                │
│                   v{}
├─────────────────────────────────────────────────────┤
│ 🌐 HTTP: {}:{}
│ 🧵 Workers: {} threads
│ 🗄  Storage: {:?}
│ 🔐 Admin: {}
╰─────────────────────────────────────────────────────╯
",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port,
        config.server.worker_threads,
        config.database.storage_type,
        if config.auth.admin_seed().is_some() { "configured" } else { "none" },
    );

    info!("✅ Account Catalog Server startup completed");
}
