//! Error types for planet generation

use thiserror::Error;

/// Errors that can occur during planet generation or queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanetError {
    /// Configuration validation failed; no pipeline stage was run
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Generation failed because the triangulator rejected its input
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    /// Requested tile ID does not exist
    #[error("tile not found: {0}")]
    TileNotFound(usize),
    /// The background generation thread could not start or has exited
    #[error("generation worker unavailable: {0}")]
    WorkerUnavailable(String),
}

/// Result type alias for planet operations
pub type Result<T> = std::result::Result<T, PlanetError>;
