//! Exponential integrator for the thermal RC network of a multiprocessor chip.
//!
//! The physical system is
//!
//! ```text
//!     C·dQ'/dt + G·(Q' − Qamb) = M·P
//!     Q = Mᵗ·Q'
//! ```
//!
//! where `C` is the diagonal capacitance matrix, `G` the symmetric conductance
//! matrix, `Q'` the node temperatures, `Q` the core temperatures, `P` the core
//! power and `M` the `nn × nc` matrix mapping cores onto the first `nc` nodes.
//!
//! With `D = C^(-1/2)` and `S = D⁻¹·(Q' − Qamb)` it becomes
//!
//! ```text
//!     dS/dt = A·S + B·P,    A = −D·G·D,    B = D·M
//!     Q     = Bᵗ·S + Qamb
//! ```
//!
//! `A` is symmetric, so `A = U·diag(Λ)·Uᵗ` with orthonormal `U`. Holding `P`
//! constant over an interval `Δt` gives the exact update
//!
//! ```text
//!     S(t + Δt) = E·S(t) + F·P
//!     E = U·diag(exp(λᵢΔt))·Uᵗ
//!     F = U·diag((exp(λᵢΔt) − 1)/λᵢ)·Uᵗ·B
//! ```
//!
//! [`ThermalSystem`] computes `D`, `U` and `Λ` once. [`FixedStepIntegrator`]
//! derives one [`StepMatrices`] pair for a uniform sampling interval;
//! [`VariableStepIntegrator`] rebuilds the pair for every interval of an
//! irregular grid. Both accept a [`LeakageHook`].

pub mod error;
pub mod fixed;
pub mod kernel;
pub mod leakage;
pub mod step;
pub mod system;
pub mod variable;

mod recurrence;

pub use error::{AnalyticError, AnalyticResult, KernelError};
pub use fixed::FixedStepIntegrator;
pub use kernel::{LinearAlgebra, Nalgebra};
pub use leakage::{LeakageHook, LinearLeakage, NoLeakage};
pub use step::{EIGENVALUE_EPSILON, StepMatrices, input_coefficient};
pub use system::ThermalSystem;
pub use variable::VariableStepIntegrator;
