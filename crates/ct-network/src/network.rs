//! The thermal RC network consumed by the integrators.

use crate::error::NetworkResult;
use crate::validate;

/// Thermal RC network of a multiprocessor chip.
///
/// `conductance` is the `nodes × nodes` row-major matrix `G` and `capacitance`
/// the vector `C`. The first `cores` nodes are the processing elements, in the
/// same order as the columns of a power profile.
///
/// The network is immutable once built. Capacitance positivity is checked by
/// [`NetworkBuilder`](crate::NetworkBuilder) and again by whoever derives a
/// thermal system from the raw arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermalNetwork {
    conductance: Vec<f64>,
    capacitance: Vec<f64>,
    names: Vec<String>,
    cores: usize,
}

impl ThermalNetwork {
    /// Wrap raw arrays, checking shape, finiteness and symmetry of `G`.
    pub fn new(
        conductance: Vec<f64>,
        capacitance: Vec<f64>,
        cores: usize,
    ) -> NetworkResult<Self> {
        let nodes = validate::validate_shape(&conductance, &capacitance, cores)?;
        validate::validate_symmetric(&conductance, nodes)?;
        let names = (0..nodes)
            .map(|i| {
                if i < cores {
                    format!("core{i}")
                } else {
                    format!("node{i}")
                }
            })
            .collect();
        Ok(Self {
            conductance,
            capacitance,
            names,
            cores,
        })
    }

    pub(crate) fn from_builder(
        conductance: Vec<f64>,
        capacitance: Vec<f64>,
        names: Vec<String>,
        cores: usize,
    ) -> Self {
        Self {
            conductance,
            capacitance,
            names,
            cores,
        }
    }

    /// Number of processing elements (`nc`).
    pub fn cores(&self) -> usize {
        self.cores
    }

    /// Number of thermal nodes (`nn`).
    pub fn nodes(&self) -> usize {
        self.capacitance.len()
    }

    pub fn conductance(&self) -> &[f64] {
        &self.conductance
    }

    pub fn capacitance(&self) -> &[f64] {
        &self.capacitance
    }

    /// `G[row][col]`.
    pub fn conductance_at(&self, row: usize, col: usize) -> f64 {
        self.conductance[row * self.nodes() + col]
    }

    pub fn node_name(&self, node: usize) -> Option<&str> {
        self.names.get(node).map(String::as_str)
    }

    /// Give up ownership of `(G, C)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.conductance, self.capacitance)
    }
}
