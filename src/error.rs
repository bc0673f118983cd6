//! Error types for the particle subsystem.
//!
//! Simulation itself cannot fail; errors come from GPU resource handling
//! and from loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate
pub type ParticleResult<T> = Result<T, ParticleError>;

#[derive(Debug, Error)]
pub enum ParticleError {
    #[error("Failed to allocate GPU buffer '{label}' ({size} bytes): {reason}")]
    BufferAllocation {
        label: String,
        size: u64,
        reason: String,
    },

    #[error("GPU buffer '{label}' needs {size} bytes but the device allows at most {max}")]
    BufferTooLarge { label: String, size: u64, max: u64 },

    #[error("No render pipeline attached to the instance backend")]
    MissingPipeline,

    #[error("GPU operation '{operation}' failed: {error}")]
    GpuOperationFailed { operation: String, error: String },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl ParticleError {
    /// Shorthand for configuration validation failures
    pub fn invalid_config(field: &str, reason: impl std::fmt::Display) -> Self {
        ParticleError::InvalidConfig {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
