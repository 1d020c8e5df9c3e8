//! Integration tests for ct-network.

use ct_network::{NetworkBuilder, NetworkError, ThermalNetwork};
use proptest::prelude::*;

#[test]
fn builder_and_raw_arrays_agree() {
    let mut builder = NetworkBuilder::new();
    let core = builder.add_core("core0", 0.5);
    let sink = builder.add_node("sink", 2.0);
    builder.connect(core, sink, 1.0).connect_ambient(core, 2.0);
    let built = builder.build().unwrap();

    let raw = ThermalNetwork::new(vec![3.0, -1.0, -1.0, 1.0], vec![0.5, 2.0], 1).unwrap();
    assert_eq!(built.conductance(), raw.conductance());
    assert_eq!(built.capacitance(), raw.capacitance());
    assert_eq!(built.cores(), raw.cores());
}

#[test]
fn raw_arrays_are_checked() {
    let err = ThermalNetwork::new(vec![1.0, 0.0, 0.0], vec![1.0, 1.0], 1).unwrap_err();
    assert!(matches!(err, NetworkError::Shape { .. }));

    let err = ThermalNetwork::new(vec![1.0, -1.0, -2.0, 1.0], vec![1.0, 1.0], 1).unwrap_err();
    assert_eq!(err, NetworkError::NotSymmetric { row: 0, col: 1 });

    let err = ThermalNetwork::new(vec![1.0], vec![1.0], 2).unwrap_err();
    assert_eq!(err, NetworkError::NoCores { cores: 2, nodes: 1 });
}

#[test]
fn errors_convert_to_core_errors() {
    let err = ThermalNetwork::new(vec![1.0], vec![1.0], 0).unwrap_err();
    let core: ct_core::CoreError = err.into();
    assert!(core.to_string().contains("core"), "{core}");
}

proptest! {
    #[test]
    fn assembled_conductance_is_symmetric_with_ambient_row_sums(
        capacitance in prop::collection::vec(0.01f64..10.0, 2..8),
        links in prop::collection::vec((0usize..8, 0usize..8, 0.0f64..5.0), 0..20),
        ambient in prop::collection::vec((0usize..8, 0.0f64..5.0), 1..4),
    ) {
        let n = capacitance.len();
        let mut builder = NetworkBuilder::new();
        let ids: Vec<_> = capacitance
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i == 0 {
                    builder.add_core("core0", c)
                } else {
                    builder.add_node(format!("node{i}"), c)
                }
            })
            .collect();

        let mut to_ambient = vec![0.0; n];
        for &(a, b, g) in &links {
            let (a, b) = (a % n, b % n);
            if a != b {
                builder.connect(ids[a], ids[b], g);
            }
        }
        for &(node, g) in &ambient {
            builder.connect_ambient(ids[node % n], g);
            to_ambient[node % n] += g;
        }

        let network = builder.build().unwrap();
        let g = network.conductance();
        for i in 0..n {
            let row_sum: f64 = g[i * n..(i + 1) * n].iter().sum();
            prop_assert!((row_sum - to_ambient[i]).abs() < 1e-9);
            for j in 0..n {
                prop_assert_eq!(g[i * n + j], g[j * n + i]);
                if i != j {
                    prop_assert!(g[i * n + j] <= 0.0);
                }
            }
        }
    }
}
