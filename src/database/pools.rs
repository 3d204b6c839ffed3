use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::PlantaConfig;
use crate::error::{PlantaError, Result};

/// Connect one named pool (main or staging) with the shared pool settings.
pub async fn connect_pool(name: &str, url: &str, config: &PlantaConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .test_before_acquire(true)
        .connect(url)
        .await
        .map_err(|e| {
            PlantaError::DatabaseError(format!("Failed to connect {name} database pool: {e}"))
        })?;

    info!(
        pool = %name,
        max_connections = config.max_connections,
        "Database pool connected"
    );

    Ok(pool)
}
