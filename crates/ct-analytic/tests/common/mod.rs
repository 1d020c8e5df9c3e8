//! Shared fixtures for the ct-analytic integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ct_analytic::ThermalSystem;
use ct_network::{NetworkBuilder, ThermalNetwork};

pub const AMBIENCE: f64 = 318.15;

/// Chain of 20 nodes with skip links every five nodes and the last five
/// nodes tied to ambient. Nodes 0 and 1 are cores.
pub fn twenty_node_network() -> ThermalNetwork {
    let mut builder = NetworkBuilder::new();
    let ids: Vec<_> = (0..20)
        .map(|i| {
            let capacitance = 0.02 + 0.005 * i as f64;
            if i < 2 {
                builder.add_core(format!("core{i}"), capacitance)
            } else {
                builder.add_node(format!("node{i}"), capacitance)
            }
        })
        .collect();
    for i in 0..19 {
        builder.connect(ids[i], ids[i + 1], 1.0 + 0.1 * i as f64);
    }
    for i in 0..15 {
        builder.connect(ids[i], ids[i + 5], 0.5);
    }
    for &id in &ids[15..] {
        builder.connect_ambient(id, 2.0);
    }
    builder.build().unwrap()
}

pub fn twenty_node_system() -> Arc<ThermalSystem> {
    Arc::new(ThermalSystem::new(twenty_node_network(), AMBIENCE).unwrap())
}

/// `G = [[3, −1], [−1, 2]]`, `C = [0.5, 2]`, one core.
pub fn two_node_network() -> ThermalNetwork {
    ThermalNetwork::new(vec![3.0, -1.0, -1.0, 2.0], vec![0.5, 2.0], 1).unwrap()
}

pub fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "index {i}: {a} vs {e} (tolerance {tolerance})"
        );
    }
}
