use thiserror::Error;

/// Crate-level errors for configuration and bootstrap paths.
///
/// Store-level failures inside the reconciliation sequence never surface
/// through this type: they are demoted to warnings on the outcome so the
/// remaining steps still run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlantaError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type Result<T> = std::result::Result<T, PlantaError>;
