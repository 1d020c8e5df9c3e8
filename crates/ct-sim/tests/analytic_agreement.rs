//! The numeric path must agree with the exponential integrators.

use std::sync::Arc;

use ct_analytic::{FixedStepIntegrator, ThermalSystem, VariableStepIntegrator};
use ct_network::{NetworkBuilder, ThermalNetwork};
use ct_sim::{IntegratorType, NumericThermal, SimOptions, integrate_profile};

fn package() -> ThermalNetwork {
    let mut builder = NetworkBuilder::new();
    let c0 = builder.add_core("core0", 0.02);
    let c1 = builder.add_core("core1", 0.03);
    let spreader = builder.add_node("spreader", 0.4);
    let sink = builder.add_node("sink", 2.0);
    builder
        .connect(c0, spreader, 1.5)
        .connect(c1, spreader, 1.2)
        .connect(c0, c1, 0.2)
        .connect(spreader, sink, 3.0)
        .connect_ambient(sink, 0.8);
    builder.build().unwrap()
}

#[test]
fn rk4_matches_fixed_step_profile() {
    let power: Vec<f64> = (0..40)
        .map(|i| if i % 2 == 0 { 2.0 } else { 0.5 + (i / 10) as f64 })
        .collect();
    let dt = 0.01;

    let system = ThermalSystem::new(package(), 318.15).unwrap();
    let analytic = FixedStepIntegrator::new(system, dt).unwrap().compute_all(&power);
    let numeric =
        integrate_profile(&package(), 318.15, &power, dt, 50, IntegratorType::RK4).unwrap();

    assert_eq!(numeric.len(), analytic.len());
    for (n, a) in numeric.iter().zip(&analytic) {
        assert!((n - a).abs() < 1e-7, "{n} vs {a}");
    }
}

#[test]
fn rk4_matches_variable_step_profile() {
    let intervals = [0.005, 0.02, 0.001, 0.05, 0.013];
    let power = [1.0, 0.0, 3.0, 1.0, 0.2, 0.2, 0.0, 4.0, 2.0, 2.0];
    let system = Arc::new(ThermalSystem::new(package(), 300.0).unwrap());
    let analytic = VariableStepIntegrator::new(system)
        .compute(&power, &intervals)
        .unwrap();

    // Drive the numeric model one interval at a time.
    let mut numeric = Vec::new();
    let mut elapsed = 0.0;
    let mut state: Option<Vec<f64>> = None;
    for (k, &dt) in intervals.iter().enumerate() {
        let row = [power[2 * k], power[2 * k + 1]];
        let mut model = NumericThermal::new(&package(), 300.0, move |_: f64, out: &mut [f64]| {
            out.copy_from_slice(&row);
        })
        .unwrap();
        let h = dt / 200.0;
        let mut x = state.take().unwrap_or_else(|| vec![0.0; model.nodes()]);
        for j in 0..200 {
            x = IntegratorType::RK4
                .step(&mut model, elapsed + j as f64 * h, &x, h)
                .unwrap();
        }
        elapsed += dt;
        numeric.extend(model.temperature(&x));
        state = Some(x);
    }

    for (n, a) in numeric.iter().zip(&analytic) {
        assert!((n - a).abs() < 1e-7, "{n} vs {a}");
    }
}

#[test]
fn long_run_approaches_steady_state() {
    // At steady state G·S = M·P, so a single core with a single link to
    // ambient settles at Qamb + P/g.
    let network = ThermalNetwork::new(vec![0.5], vec![0.1], 1).unwrap();
    let mut model = NumericThermal::new(&network, 300.0, |_: f64, out: &mut [f64]| out[0] = 2.0)
        .unwrap();
    let opts = SimOptions {
        dt: 1e-2,
        t_end: 10.0,
        record_every: 1000,
        ..SimOptions::default()
    };
    let (q, times) = model.compute(&opts).unwrap();
    assert!((times[times.len() - 1] - 10.0).abs() < 1e-9);
    assert!((q[q.len() - 1] - 304.0).abs() < 1e-6);
}
