//! Normalized symmetric eigenproblem of a thermal network.

use ct_network::ThermalNetwork;
use tracing::{debug, warn};

use crate::error::{AnalyticError, AnalyticResult};
use crate::kernel::{LinearAlgebra, Nalgebra};
use crate::step::EIGENVALUE_EPSILON;

/// Eigendecomposition of `A = −D·G·D`, with `D = C^(-1/2)`.
///
/// Built once from a [`ThermalNetwork`] and never mutated afterwards; share it
/// between integrators through an `Arc`.
#[derive(Clone, Debug)]
pub struct ThermalSystem {
    cores: usize,
    nodes: usize,

    // D = C^(-1/2)
    d: Vec<f64>,

    // A = U·diag(Λ)·Uᵗ
    u: Vec<f64>,
    lambda: Vec<f64>,

    qamb: f64,
}

impl ThermalSystem {
    /// Build the system with the default `nalgebra` backend.
    pub fn new(network: ThermalNetwork, ambience: f64) -> AnalyticResult<Self> {
        Self::build(network, ambience, &Nalgebra::default())
    }

    /// Build the system with the given linear-algebra backend.
    ///
    /// The network is consumed; its conductance buffer is reused for `A`.
    /// Capacitances are checked before any matrix work, and a failing
    /// eigensolver is reported as is.
    pub fn build<K: LinearAlgebra>(
        network: ThermalNetwork,
        ambience: f64,
        kernel: &K,
    ) -> AnalyticResult<Self> {
        if !ambience.is_finite() {
            return Err(AnalyticError::InvalidAmbience { value: ambience });
        }

        let (cores, nodes) = (network.cores(), network.nodes());
        for (node, &value) in network.capacitance().iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnalyticError::InvalidCapacitance { node, value });
            }
        }

        let (mut a, capacitance) = network.into_parts();
        let d: Vec<f64> = capacitance.iter().map(|c| (1.0 / c).sqrt()).collect();
        for i in 0..nodes {
            for j in 0..nodes {
                a[j * nodes + i] *= -d[i] * d[j];
            }
        }

        let (u, lambda) = kernel.symmetric_eigen(&a, nodes)?;

        let (min, max) = lambda
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &l| {
                (lo.min(l), hi.max(l))
            });
        debug!(
            cores,
            nodes,
            min_eigenvalue = min,
            max_eigenvalue = max,
            "thermal system decomposed"
        );
        if positive_beyond_roundoff(min, max) {
            warn!(
                max_eigenvalue = max,
                "positive eigenvalue; the network is not dissipative"
            );
        }
        let singular = lambda.iter().filter(|l| l.abs() < EIGENVALUE_EPSILON).count();
        if singular > 0 {
            debug!(singular, "zero eigenvalues; input coefficients use the Δt limit");
        }

        Ok(Self {
            cores,
            nodes,
            d,
            u,
            lambda,
            qamb: ambience,
        })
    }

    /// Number of processing elements (`nc`).
    pub fn cores(&self) -> usize {
        self.cores
    }

    /// Number of thermal nodes (`nn`).
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// `D[i] = sqrt(1 / C[i])`.
    pub fn d(&self) -> &[f64] {
        &self.d
    }

    /// Row-major eigenvectors; column `k` belongs to `eigenvalues()[k]`.
    pub fn eigenvectors(&self) -> &[f64] {
        &self.u
    }

    pub fn eigenvalues(&self) -> &[f64] {
        &self.lambda
    }

    /// Ambient temperature in Kelvin.
    pub fn ambience(&self) -> f64 {
        self.qamb
    }
}

/// Whether the largest eigenvalue is positive by more than the eigensolver's
/// roundoff, which scales with the spectral radius.
fn positive_beyond_roundoff(min: f64, max: f64) -> bool {
    let scale = min.abs().max(max.abs()).max(1.0);
    max > EIGENVALUE_EPSILON * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KernelError;
    use ct_network::NetworkBuilder;

    fn two_node() -> ThermalNetwork {
        ThermalNetwork::new(vec![3.0, -1.0, -1.0, 2.0], vec![0.5, 2.0], 1).unwrap()
    }

    #[test]
    fn build_two_node_system() {
        let system = ThermalSystem::new(two_node(), 300.0).unwrap();
        assert_eq!(system.cores(), 1);
        assert_eq!(system.nodes(), 2);
        assert_eq!(system.ambience(), 300.0);
        assert!((system.d()[0] - 2.0_f64.sqrt()).abs() < 1e-15);
        assert!((system.d()[1] - 0.5_f64.sqrt()).abs() < 1e-15);

        // A = [-6 1; 1 -1]: trace -7, determinant 5.
        let lambda = system.eigenvalues();
        assert!((lambda[0] + lambda[1] + 7.0).abs() < 1e-12);
        assert!((lambda[0] * lambda[1] - 5.0).abs() < 1e-12);
        assert!(lambda.iter().all(|&l| l < 0.0));
    }

    #[test]
    fn eigenvectors_diagonalize_normalized_matrix() {
        let system = ThermalSystem::new(two_node(), 300.0).unwrap();
        let a = [-6.0, 1.0, 1.0, -1.0];
        let (u, lambda, n) = (system.eigenvectors(), system.eigenvalues(), 2);
        for i in 0..n {
            for j in 0..n {
                let rebuilt: f64 = (0..n).map(|k| u[i * n + k] * lambda[k] * u[j * n + k]).sum();
                assert!((rebuilt - a[i * n + j]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn rejects_non_positive_capacitance_before_decomposition() {
        struct Unreachable;
        impl LinearAlgebra for Unreachable {
            fn multiply(&self, _: &[f64], _: &[f64], _: &mut [f64], _: usize, _: usize, _: usize) {
                unreachable!()
            }
            fn multiply_add(&self, _: &[f64], _: &[f64], _: &mut [f64], _: usize, _: usize, _: usize) {
                unreachable!()
            }
            fn symmetric_eigen(&self, _: &[f64], _: usize) -> Result<(Vec<f64>, Vec<f64>), KernelError> {
                unreachable!("capacitance must be checked first")
            }
        }

        let network = ThermalNetwork::new(vec![3.0, -1.0, -1.0, 2.0], vec![0.5, -2.0], 1).unwrap();
        let err = ThermalSystem::build(network, 300.0, &Unreachable).unwrap_err();
        assert_eq!(err, AnalyticError::InvalidCapacitance { node: 1, value: -2.0 });
    }

    #[test]
    fn propagates_eigensolver_failure() {
        struct Failing;
        impl LinearAlgebra for Failing {
            fn multiply(&self, _: &[f64], _: &[f64], _: &mut [f64], _: usize, _: usize, _: usize) {}
            fn multiply_add(&self, _: &[f64], _: &[f64], _: &mut [f64], _: usize, _: usize, _: usize) {}
            fn symmetric_eigen(&self, _: &[f64], n: usize) -> Result<(Vec<f64>, Vec<f64>), KernelError> {
                Err(KernelError::NotConverged { size: n })
            }
        }

        let err = ThermalSystem::build(two_node(), 300.0, &Failing).unwrap_err();
        assert_eq!(err, AnalyticError::Eigen(KernelError::NotConverged { size: 2 }));
    }

    #[test]
    fn rejects_non_finite_ambience() {
        let err = ThermalSystem::new(two_node(), f64::NAN).unwrap_err();
        assert!(matches!(err, AnalyticError::InvalidAmbience { .. }));
    }

    #[test]
    fn positive_eigenvalue_threshold_scales_with_spectrum() {
        assert!(!positive_beyond_roundoff(-1e6, 1e-9));
        assert!(!positive_beyond_roundoff(-7.0, 0.0));
        assert!(positive_beyond_roundoff(-1e6, 1e-3));
        assert!(positive_beyond_roundoff(-1.0, 0.5));
        assert!(positive_beyond_roundoff(-1e-3, 1e-11));
    }

    #[test]
    fn dissipative_network_has_non_positive_spectrum() {
        let mut builder = NetworkBuilder::new();
        let c0 = builder.add_core("core0", 0.01);
        let c1 = builder.add_core("core1", 0.01);
        let spreader = builder.add_node("spreader", 0.5);
        let sink = builder.add_node("sink", 5.0);
        builder
            .connect(c0, spreader, 2.0)
            .connect(c1, spreader, 2.0)
            .connect(c0, c1, 0.3)
            .connect(spreader, sink, 4.0)
            .connect_ambient(sink, 1.0);

        let system = ThermalSystem::new(builder.build().unwrap(), 318.15).unwrap();
        assert!(system.eigenvalues().iter().all(|&l| l <= 0.0));
    }
}
