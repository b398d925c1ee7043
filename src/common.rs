// src/common.rs

use thiserror::Error;

/// Result type alias for verification operations
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Errors raised while preparing or driving a verification run.
///
/// Tolerance and run-level failures are not errors: they are reported in
/// [`crate::validate::ValidationReport`] and [`crate::driver::RunReport`].
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The entropy source could not seed the random generator
    #[error("Failed to seed random source: {source}")]
    Initialization {
        #[from]
        source: rand::Error,
    },

    #[error("Size must be a power of 2 (got {len})")]
    NotPowerOfTwo { len: usize },

    #[error("Data buffer size does not match FFT size (expected {expected}, got {actual})")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A word or beat index past the end of the memory image
    #[error("Word index {index} out of range (memory holds {capacity} words)")]
    WordOutOfRange { index: usize, capacity: usize },

    #[error("Driver in invalid state: {state}")]
    InvalidState { state: String },
}

impl VerifyError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(state: impl Into<String>) -> Self {
        Self::InvalidState {
            state: state.into(),
        }
    }

    pub(crate) fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }
}
