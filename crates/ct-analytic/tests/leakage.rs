//! Lagged leakage feedback.

mod common;

use std::sync::Arc;

use ct_analytic::{
    FixedStepIntegrator, LeakageHook, LinearLeakage, NoLeakage, VariableStepIntegrator,
};

use common::{AMBIENCE, assert_close, twenty_node_system};

fn profile(samples: usize) -> Vec<f64> {
    std::iter::repeat([1.0, 0.5]).take(samples).flatten().collect()
}

#[test]
fn zero_leakage_equals_plain_compute() {
    let integrator = FixedStepIntegrator::new(twenty_node_system(), 1e-3).unwrap();
    let plain = integrator.compute_all(&profile(25));

    let mut power = profile(25);
    let leaky = integrator.compute_with_leakage(&mut power, &mut NoLeakage);
    assert_eq!(leaky, plain);
    assert_eq!(power, profile(25));

    let mut power = profile(25);
    let mut zero = |_: &[f64], _: &mut [f64]| {};
    assert_eq!(integrator.compute_with_leakage(&mut power, &mut zero), plain);
}

#[test]
fn hook_sees_ambience_then_previous_sample() {
    let integrator = FixedStepIntegrator::new(twenty_node_system(), 1e-3).unwrap();
    let plain = integrator.compute_all(&profile(5));

    let mut seen: Vec<Vec<f64>> = Vec::new();
    let mut record = |q: &[f64], _: &mut [f64]| seen.push(q.to_vec());
    let mut power = profile(5);
    let q = integrator.compute_with_leakage(&mut power, &mut record);

    assert_eq!(seen.len(), 5);
    assert_eq!(seen[0], vec![AMBIENCE; 2]);
    for k in 1..5 {
        assert_eq!(seen[k], q[(k - 1) * 2..k * 2].to_vec());
    }
    assert_eq!(q, plain);
}

#[test]
fn power_buffer_holds_total_power() {
    let integrator = FixedStepIntegrator::new(twenty_node_system(), 1e-3).unwrap();
    let mut hook = LinearLeakage::new(vec![0.2, 0.1], 0.01, AMBIENCE);

    let mut power = profile(20);
    let q = integrator.compute_with_leakage(&mut power, &mut hook);

    // Row 0 sees ambience, so it gets exactly the nominal leakage.
    assert!((power[0] - 1.2).abs() < 1e-15);
    assert!((power[1] - 0.6).abs() < 1e-15);
    for k in 1..20 {
        for core in 0..2 {
            let expected = [1.0, 0.5][core] + hook.at(core, q[(k - 1) * 2 + core]);
            assert_eq!(power[k * 2 + core], expected);
        }
    }

    // Replaying the recorded total power without a hook reproduces the result.
    assert_eq!(integrator.compute_all(&power), q);
}

#[test]
fn leakage_raises_temperature() {
    let integrator = FixedStepIntegrator::new(twenty_node_system(), 1e-3).unwrap();
    let plain = integrator.compute_all(&profile(50));

    let mut power = profile(50);
    let mut hook = LinearLeakage::new(vec![0.3, 0.3], 0.02, AMBIENCE);
    let leaky = integrator.compute_with_leakage(&mut power, &mut hook);
    assert!(leaky.iter().zip(&plain).all(|(l, p)| l > p));
}

#[test]
fn variable_step_leakage_matches_fixed_step() {
    let system = twenty_node_system();
    let fixed = FixedStepIntegrator::new(Arc::clone(&system), 1e-3).unwrap();
    let variable = VariableStepIntegrator::new(system);

    let mut p_fixed = profile(15);
    let mut p_variable = profile(15);
    let hook = || LinearLeakage::new(vec![0.1, 0.2], 0.015, 330.0);

    let mut boxed: Box<dyn LeakageHook> = Box::new(hook());
    let q_fixed = fixed.compute_with_leakage(&mut p_fixed, boxed.as_mut());
    let q_variable = variable
        .compute_with_leakage(&mut p_variable, &[1e-3; 15], &mut hook())
        .unwrap();

    assert_close(&q_variable, &q_fixed, 1e-10);
    assert_close(&p_variable, &p_fixed, 1e-10);
}
