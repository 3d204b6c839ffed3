use crate::error::{PlantaError, Result};

/// Runtime configuration, loaded from the environment with sane defaults.
///
/// The main and staging stores are two independent databases, so each gets
/// its own connection URL.
#[derive(Debug, Clone)]
pub struct PlantaConfig {
    pub database_url: String,
    pub staging_database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PlantaConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/planta_principal_development".to_string(),
            staging_database_url: "postgresql://localhost/planta_temporal_development".to_string(),
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 10,
            connect_timeout_seconds: 10,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl PlantaConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PLANTA_DATABASE_URL") {
            config.database_url = url;
        }

        if let Ok(url) = std::env::var("PLANTA_STAGING_DATABASE_URL") {
            config.staging_database_url = url;
        }

        if let Ok(addr) = std::env::var("PLANTA_BIND_ADDRESS") {
            config.bind_address = addr;
        }

        if let Ok(max) = std::env::var("PLANTA_MAX_CONNECTIONS") {
            config.max_connections = max.parse().map_err(|e| {
                PlantaError::ConfigurationError(format!("Invalid max_connections: {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("PLANTA_CONNECT_TIMEOUT_SECONDS") {
            config.connect_timeout_seconds = timeout.parse().map_err(|e| {
                PlantaError::ConfigurationError(format!("Invalid connect_timeout_seconds: {e}"))
            })?;
        }

        if let Ok(size) = std::env::var("PLANTA_DEFAULT_PAGE_SIZE") {
            config.default_page_size = size.parse().map_err(|e| {
                PlantaError::ConfigurationError(format!("Invalid default_page_size: {e}"))
            })?;
        }

        if let Ok(size) = std::env::var("PLANTA_MAX_PAGE_SIZE") {
            config.max_page_size = size.parse().map_err(|e| {
                PlantaError::ConfigurationError(format!("Invalid max_page_size: {e}"))
            })?;
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(PlantaError::ConfigurationError(
                "Page sizes must be greater than zero".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(PlantaError::ConfigurationError(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}
