//! Renderer subsystem error helpers
//!
//! Small constructors so GPU call sites stay readable.

use crate::error::ParticleError;

/// Create a GPU operation error
pub fn gpu_operation_error(operation: &str, error: impl std::fmt::Display) -> ParticleError {
    ParticleError::GpuOperationFailed {
        operation: operation.to_string(),
        error: error.to_string(),
    }
}

/// Create a buffer allocation error
pub fn buffer_allocation_error(
    label: &str,
    size: u64,
    reason: impl std::fmt::Display,
) -> ParticleError {
    ParticleError::BufferAllocation {
        label: label.to_string(),
        size,
        reason: reason.to_string(),
    }
}

/// Reject buffers the device cannot hold before asking for them
pub fn check_buffer_size(label: &str, size: u64, max: u64) -> Result<(), ParticleError> {
    if size > max {
        return Err(ParticleError::BufferTooLarge {
            label: label.to_string(),
            size,
            max,
        });
    }
    Ok(())
}
