//! State-transition and input matrices for one time step.

use crate::error::{AnalyticError, AnalyticResult};
use crate::kernel::LinearAlgebra;
use crate::system::ThermalSystem;

/// Eigenvalues with a magnitude below this (in 1/s) are treated as zero when
/// forming the input matrix.
pub const EIGENVALUE_EPSILON: f64 = 1e-12;

/// `(exp(λ·Δt) − 1) / λ`, or its limit `Δt` as `λ → 0`.
pub fn input_coefficient(eigenvalue: f64, time_step: f64) -> f64 {
    if eigenvalue.abs() < EIGENVALUE_EPSILON {
        time_step
    } else {
        (eigenvalue * time_step).exp_m1() / eigenvalue
    }
}

/// `E` and `F` for a single interval length `Δt`.
///
/// - `E = U·diag(exp(λᵢΔt))·Uᵗ` is `nn × nn`
/// - `F = U·diag((exp(λᵢΔt) − 1)/λᵢ)·Uᵗ·D`, restricted to the core columns,
///   is `nn × nc`
#[derive(Clone, Debug)]
pub struct StepMatrices {
    cores: usize,
    nodes: usize,
    time_step: f64,
    transition: Vec<f64>,
    input: Vec<f64>,
}

/// Scratch shared by the two products of [`StepMatrices::update`].
#[derive(Debug)]
pub(crate) struct StepScratch {
    coefficients: Vec<f64>,
    product: Vec<f64>,
}

impl StepScratch {
    pub(crate) fn new(nodes: usize) -> Self {
        Self {
            coefficients: vec![0.0; nodes],
            product: vec![0.0; nodes * nodes],
        }
    }
}

impl StepMatrices {
    /// Derive `E` and `F` for `time_step`, which must be positive and finite.
    pub fn new<K: LinearAlgebra>(
        system: &ThermalSystem,
        time_step: f64,
        kernel: &K,
    ) -> AnalyticResult<Self> {
        validate_time_step(time_step)?;
        let mut matrices = Self::zeros(system);
        let mut scratch = StepScratch::new(system.nodes());
        matrices.update(system, time_step, kernel, &mut scratch);
        Ok(matrices)
    }

    pub(crate) fn zeros(system: &ThermalSystem) -> Self {
        let (cores, nodes) = (system.cores(), system.nodes());
        Self {
            cores,
            nodes,
            time_step: 0.0,
            transition: vec![0.0; nodes * nodes],
            input: vec![0.0; nodes * cores],
        }
    }

    /// Recompute both matrices in place for another interval length.
    pub(crate) fn update<K: LinearAlgebra>(
        &mut self,
        system: &ThermalSystem,
        time_step: f64,
        kernel: &K,
        scratch: &mut StepScratch,
    ) {
        let (nc, nn) = (self.cores, self.nodes);
        let (d, u, lambda) = (system.d(), system.eigenvectors(), system.eigenvalues());
        let StepScratch {
            coefficients,
            product,
        } = scratch;

        // product = diag(exp(ΛΔt))·Uᵗ
        for i in 0..nn {
            coefficients[i] = (lambda[i] * time_step).exp();
            for j in 0..nn {
                product[i * nn + j] = coefficients[i] * u[j * nn + i];
            }
        }
        kernel.multiply(u, &product[..], &mut self.transition, nn, nn, nn);

        // product[..nn·nc] = diag((exp(ΛΔt) − 1)/Λ)·Uᵗ·D, core columns only
        for i in 0..nn {
            coefficients[i] = input_coefficient(lambda[i], time_step);
            for j in 0..nc {
                product[i * nc + j] = coefficients[i] * u[j * nn + i] * d[j];
            }
        }
        kernel.multiply(u, &product[..nn * nc], &mut self.input, nn, nn, nc);

        self.time_step = time_step;
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// `E`, row-major `nn × nn`.
    pub fn transition(&self) -> &[f64] {
        &self.transition
    }

    /// `F`, row-major `nn × nc`.
    pub fn input(&self) -> &[f64] {
        &self.input
    }
}

pub(crate) fn validate_time_step(time_step: f64) -> AnalyticResult<f64> {
    if time_step.is_finite() && time_step > 0.0 {
        Ok(time_step)
    } else {
        Err(AnalyticError::InvalidTimeStep { value: time_step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Nalgebra;
    use ct_network::ThermalNetwork;

    fn two_node_system() -> ThermalSystem {
        let network =
            ThermalNetwork::new(vec![3.0, -1.0, -1.0, 2.0], vec![0.5, 2.0], 1).unwrap();
        ThermalSystem::new(network, 0.0).unwrap()
    }

    #[test]
    fn coefficient_uses_limit_near_zero() {
        assert_eq!(input_coefficient(0.0, 1e-3), 1e-3);
        assert_eq!(input_coefficient(-1e-14, 1e-3), 1e-3);
        assert_eq!(input_coefficient(1e-13, 0.5), 0.5);
        assert!(input_coefficient(0.0, 1e-3).is_finite());
    }

    #[test]
    fn coefficient_matches_closed_form() {
        let (lambda, dt) = (-3.0_f64, 0.25_f64);
        let expected = ((lambda * dt).exp() - 1.0) / lambda;
        assert!((input_coefficient(lambda, dt) - expected).abs() < 1e-15);
        // Continuous across the threshold.
        let tiny = -2.0 * EIGENVALUE_EPSILON;
        assert!((input_coefficient(tiny, dt) - dt).abs() < 1e-12 * dt);
    }

    #[test]
    fn rejects_invalid_time_step() {
        let system = two_node_system();
        for dt in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let err = StepMatrices::new(&system, dt, &Nalgebra::default()).unwrap_err();
            assert!(matches!(err, AnalyticError::InvalidTimeStep { .. }));
        }
    }

    #[test]
    fn shapes_follow_system() {
        let system = two_node_system();
        let m = StepMatrices::new(&system, 1e-2, &Nalgebra::default()).unwrap();
        assert_eq!(m.transition().len(), 4);
        assert_eq!(m.input().len(), 2);
        assert_eq!(m.time_step(), 1e-2);
        assert_eq!((m.cores(), m.nodes()), (1, 2));
    }

    #[test]
    fn transition_is_symmetric_and_input_matches_integral() {
        // F = ∫₀^Δt exp(Aτ) dτ · B; for a single column it equals
        // A⁻¹(E − I)B, checked here as A·F = (E − I)·B.
        let system = two_node_system();
        let m = StepMatrices::new(&system, 0.1, &Nalgebra::default()).unwrap();
        let (e, f) = (m.transition(), m.input());
        assert!((e[1] - e[2]).abs() < 1e-14);

        let a = [-6.0, 1.0, 1.0, -1.0];
        let b = [system.d()[0], 0.0];
        for i in 0..2 {
            let af = a[i * 2] * f[0] + a[i * 2 + 1] * f[1];
            let eb = e[i * 2] * b[0] + e[i * 2 + 1] * b[1] - b[i];
            assert!((af - eb).abs() < 1e-12);
        }
    }

    #[test]
    fn update_reuses_buffers_for_new_interval() {
        let system = two_node_system();
        let kernel = Nalgebra::default();
        let mut reused = StepMatrices::new(&system, 0.5, &kernel).unwrap();
        let mut scratch = StepScratch::new(system.nodes());
        reused.update(&system, 0.05, &kernel, &mut scratch);

        let fresh = StepMatrices::new(&system, 0.05, &kernel).unwrap();
        assert_eq!(reused.transition(), fresh.transition());
        assert_eq!(reused.input(), fresh.input());
        assert_eq!(reused.time_step(), 0.05);
    }
}
