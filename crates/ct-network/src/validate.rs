//! Network validation logic.

use ct_core::{Tolerances, nearly_equal};

use crate::error::{NetworkError, NetworkResult};

/// Validate buffer lengths and the core count against the node count.
pub(crate) fn validate_shape(
    conductance: &[f64],
    capacitance: &[f64],
    cores: usize,
) -> NetworkResult<usize> {
    let nodes = capacitance.len();
    if cores == 0 || cores > nodes {
        return Err(NetworkError::NoCores { cores, nodes });
    }
    if conductance.len() != nodes * nodes {
        return Err(NetworkError::Shape {
            what: "conductance",
            expected: nodes * nodes,
            actual: conductance.len(),
        });
    }
    Ok(nodes)
}

/// Check that every entry is finite and that `G[i][j] == G[j][i]` within a
/// tolerance relative to the largest entry of the matrix.
pub(crate) fn validate_symmetric(conductance: &[f64], nodes: usize) -> NetworkResult<()> {
    let mut scale: f64 = 0.0;
    for (index, &value) in conductance.iter().enumerate() {
        if !value.is_finite() {
            return Err(NetworkError::InvalidConductance {
                node: index / nodes,
                value,
            });
        }
        scale = scale.max(value.abs());
    }

    let tol = Tolerances {
        abs: 1e-12 * scale.max(1.0),
        rel: 1e-9,
    };
    for i in 0..nodes {
        for j in (i + 1)..nodes {
            if !nearly_equal(conductance[i * nodes + j], conductance[j * nodes + i], tol) {
                return Err(NetworkError::NotSymmetric { row: i, col: j });
            }
        }
    }
    Ok(())
}

/// Capacitances must be finite and strictly positive.
pub(crate) fn validate_capacitance(node: usize, value: f64) -> NetworkResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NetworkError::InvalidCapacitance { node, value })
    }
}

/// Conductances must be finite and non-negative.
pub(crate) fn validate_conductance(node: usize, value: f64) -> NetworkResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(NetworkError::InvalidConductance { node, value })
    }
}
