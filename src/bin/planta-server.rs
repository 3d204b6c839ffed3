//! # Planta Server
//!
//! Standalone server binary for the plant management backend.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin planta-server
//!
//! # Run with explicit store URLs
//! PLANTA_DATABASE_URL=postgres://... PLANTA_STAGING_DATABASE_URL=postgres://... \
//!     cargo run --bin planta-server
//! ```

use std::sync::Arc;

use tokio::signal;
use tracing::info;

use planta_core::database::pools::connect_pool;
use planta_core::database::PgSupervisionStore;
use planta_core::logging;
use planta_core::web::create_app;
use planta_core::web::state::AppState;
use planta_core::PlantaConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    info!("Starting Planta server");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    let config = PlantaConfig::from_env()?;

    let main_pool = connect_pool("principal", &config.database_url, &config).await?;
    let staging_pool = connect_pool("temporal", &config.staging_database_url, &config).await?;

    let main_store = Arc::new(PgSupervisionStore::new(main_pool, "principal"));
    let staging_store = Arc::new(PgSupervisionStore::new(staging_pool, "temporal"));

    let bind_address = config.bind_address.clone();
    let state = AppState::new(config, main_store, staging_store);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, "Planta server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Planta server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
