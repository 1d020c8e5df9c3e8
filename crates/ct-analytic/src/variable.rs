//! Integrator with a time step that changes from sample to sample.

use std::sync::Arc;

use tracing::debug;

use crate::error::AnalyticResult;
use crate::kernel::{LinearAlgebra, Nalgebra};
use crate::leakage::LeakageHook;
use crate::recurrence::{self, StepSource};
use crate::step::{StepMatrices, StepScratch, validate_time_step};
use crate::system::ThermalSystem;

/// Exponential integrator for power profiles on an irregular grid, such as
/// one following the start and finish events of a task schedule.
///
/// `E` and `F` are rebuilt for every sample, which costs two `nn`-sized
/// matrix products per sample. Prefer [`FixedStepIntegrator`] whenever the
/// intervals are uniform.
///
/// [`FixedStepIntegrator`]: crate::FixedStepIntegrator
#[derive(Clone, Debug)]
pub struct VariableStepIntegrator<K = Nalgebra> {
    system: Arc<ThermalSystem>,
    kernel: K,
}

/// Rebuilds the step matrices for each sample's own interval.
struct PerSample<'a, K> {
    system: &'a ThermalSystem,
    kernel: &'a K,
    intervals: &'a [f64],
    matrices: StepMatrices,
    scratch: StepScratch,
}

impl<K: LinearAlgebra> StepSource for PerSample<'_, K> {
    fn matrices(&mut self, sample: usize) -> &StepMatrices {
        self.matrices.update(
            self.system,
            self.intervals[sample],
            self.kernel,
            &mut self.scratch,
        );
        &self.matrices
    }
}

impl VariableStepIntegrator<Nalgebra> {
    pub fn new(system: impl Into<Arc<ThermalSystem>>) -> Self {
        Self::with_kernel(system, Nalgebra::default())
    }
}

impl<K: LinearAlgebra> VariableStepIntegrator<K> {
    pub fn with_kernel(system: impl Into<Arc<ThermalSystem>>, kernel: K) -> Self {
        Self {
            system: system.into(),
            kernel,
        }
    }

    /// Temperature profile for `power` held constant over `intervals[k]`
    /// during sample `k`.
    ///
    /// `power` is row-major with at least `intervals.len()` rows; the result
    /// has exactly `intervals.len()` rows. Every interval must be positive and
    /// finite; this is checked before any work is done.
    ///
    /// # Panics
    ///
    /// Panics if `power` holds fewer rows than there are intervals.
    pub fn compute(&self, power: &[f64], intervals: &[f64]) -> AnalyticResult<Vec<f64>> {
        let mut source = self.per_sample(intervals)?;
        Ok(recurrence::propagate(
            &self.kernel,
            &self.system,
            &mut source,
            power,
            intervals.len(),
        ))
    }

    /// Like [`compute`](Self::compute), with the same lagged leakage
    /// semantics as
    /// [`FixedStepIntegrator::compute_with_leakage`](crate::FixedStepIntegrator::compute_with_leakage).
    pub fn compute_with_leakage<H>(
        &self,
        power: &mut [f64],
        intervals: &[f64],
        hook: &mut H,
    ) -> AnalyticResult<Vec<f64>>
    where
        H: LeakageHook + ?Sized,
    {
        let mut source = self.per_sample(intervals)?;
        Ok(recurrence::propagate_with_leakage(
            &self.kernel,
            &self.system,
            &mut source,
            power,
            intervals.len(),
            hook,
        ))
    }

    pub fn system(&self) -> &ThermalSystem {
        &self.system
    }

    fn per_sample<'a>(&'a self, intervals: &'a [f64]) -> AnalyticResult<PerSample<'a, K>> {
        for &dt in intervals {
            validate_time_step(dt)?;
        }
        debug!(
            samples = intervals.len(),
            nodes = self.system.nodes(),
            "variable-step integration"
        );
        Ok(PerSample {
            system: &self.system,
            kernel: &self.kernel,
            intervals,
            matrices: StepMatrices::zeros(&self.system),
            scratch: StepScratch::new(self.system.nodes()),
        })
    }
}
