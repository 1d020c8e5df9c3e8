//! Error types for the exponential integrator.

use ct_core::CoreError;
use ct_network::NetworkError;
use thiserror::Error;

/// Failures reported by a [`LinearAlgebra`](crate::LinearAlgebra) backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("Symmetric eigendecomposition of a {size}x{size} matrix did not converge")]
    NotConverged { size: usize },
}

/// Errors that can occur while setting up an integrator.
///
/// Computation itself never fails: once an integrator exists, shape
/// mismatches in the caller's buffers are contract violations and panic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticError {
    #[error("Invalid time step: {value} s (must be positive and finite)")]
    InvalidTimeStep { value: f64 },

    #[error("Invalid capacitance at node {node}: {value} (must be positive and finite)")]
    InvalidCapacitance { node: usize, value: f64 },

    #[error("Invalid ambient temperature: {value} K")]
    InvalidAmbience { value: f64 },

    #[error("Eigendecomposition failed: {0}")]
    Eigen(#[from] KernelError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

pub type AnalyticResult<T> = Result<T, AnalyticError>;

impl From<AnalyticError> for CoreError {
    fn from(e: AnalyticError) -> Self {
        match e {
            AnalyticError::InvalidTimeStep { value } => CoreError::NonPositive {
                what: "time step",
                value,
            },
            AnalyticError::InvalidCapacitance { value, .. } => CoreError::NonPositive {
                what: "capacitance",
                value,
            },
            AnalyticError::InvalidAmbience { value } => CoreError::NonFinite {
                what: "ambient temperature",
                value,
            },
            AnalyticError::Eigen(_) => CoreError::Invariant {
                what: "eigendecomposition",
            },
            AnalyticError::Network(e) => e.into(),
        }
    }
}
