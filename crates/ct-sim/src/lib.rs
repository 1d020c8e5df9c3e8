//! Numeric time integration of thermal RC networks.
//!
//! Provides:
//! - The `TransientModel` interface for dynamic systems with vector state
//! - Fixed-step RK4 and forward-Euler integrators behind `Integrator::step`
//! - A fixed-step driver with decimated recording
//! - `NumericThermal`, the thermal network written as `dS/dt = A·S + B·P(t)`
//!
//! The numeric path is an independent cross-check of the exponential
//! integrators in `ct-analytic`, and the fallback for inputs that vary
//! continuously within a sample.

pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;
pub mod thermal;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
pub use thermal::{NumericThermal, integrate_profile};
