//! Integrator with a fixed time step.

use std::sync::Arc;

use tracing::debug;

use crate::error::AnalyticResult;
use crate::kernel::{LinearAlgebra, Nalgebra};
use crate::leakage::LeakageHook;
use crate::recurrence;
use crate::step::{StepMatrices, validate_time_step};
use crate::system::ThermalSystem;

/// Exponential integrator for power profiles sampled on a uniform grid.
///
/// `E` and `F` are derived once in the constructor and reused for every
/// sample of every profile. The integrator is immutable afterwards, so one
/// instance can serve concurrent `compute` calls.
#[derive(Clone, Debug)]
pub struct FixedStepIntegrator<K = Nalgebra> {
    system: Arc<ThermalSystem>,
    matrices: StepMatrices,
    kernel: K,
}

impl FixedStepIntegrator<Nalgebra> {
    /// Set up an integrator for the sampling interval `time_step` (seconds).
    pub fn new(system: impl Into<Arc<ThermalSystem>>, time_step: f64) -> AnalyticResult<Self> {
        Self::with_kernel(system, time_step, Nalgebra::default())
    }
}

impl<K: LinearAlgebra> FixedStepIntegrator<K> {
    pub fn with_kernel(
        system: impl Into<Arc<ThermalSystem>>,
        time_step: f64,
        kernel: K,
    ) -> AnalyticResult<Self> {
        validate_time_step(time_step)?;
        let system = system.into();
        let matrices = StepMatrices::new(&system, time_step, &kernel)?;
        debug!(
            cores = system.cores(),
            nodes = system.nodes(),
            time_step,
            "fixed-step matrices ready"
        );
        Ok(Self {
            system,
            matrices,
            kernel,
        })
    }

    /// Temperature profile for the first `samples` rows of `power`.
    ///
    /// `power` is row-major `ns × nc` with `ns ≥ samples`; extra rows are
    /// ignored. The result is row-major `samples × nc`, in Kelvin.
    ///
    /// # Panics
    ///
    /// Panics if `power` holds fewer than `samples` rows.
    pub fn compute(&self, power: &[f64], samples: usize) -> Vec<f64> {
        recurrence::propagate(
            &self.kernel,
            &self.system,
            &mut &self.matrices,
            power,
            samples,
        )
    }

    /// Temperature profile for every complete row of `power`.
    pub fn compute_all(&self, power: &[f64]) -> Vec<f64> {
        self.compute(power, power.len() / self.system.cores())
    }

    /// Temperature profile with temperature-dependent leakage.
    ///
    /// Before sample `k` is integrated, `hook` sees the core temperatures of
    /// sample `k − 1` (ambient for `k = 0`) and may add leakage to row `k` of
    /// `power` in place. On return `power` holds the total power profile.
    /// This is a lagged approximation, not a self-consistent solve.
    pub fn compute_with_leakage<H>(&self, power: &mut [f64], hook: &mut H) -> Vec<f64>
    where
        H: LeakageHook + ?Sized,
    {
        let samples = power.len() / self.system.cores();
        recurrence::propagate_with_leakage(
            &self.kernel,
            &self.system,
            &mut &self.matrices,
            power,
            samples,
            hook,
        )
    }

    pub fn system(&self) -> &ThermalSystem {
        &self.system
    }

    /// The precomputed `E` and `F`.
    pub fn matrices(&self) -> &StepMatrices {
        &self.matrices
    }

    pub fn time_step(&self) -> f64 {
        self.matrices.time_step()
    }

    pub fn cores(&self) -> usize {
        self.system.cores()
    }

    pub fn nodes(&self) -> usize {
        self.system.nodes()
    }
}
