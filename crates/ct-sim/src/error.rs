//! Error types for numeric simulation.

use ct_core::CoreError;
use thiserror::Error;

/// Errors encountered during numeric integration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
