//! The linear recurrence shared by both integrators.
//!
//! `S_k = E_k·S_{k−1} + F_k·P_k` from the rest state `S_{−1} = 0`, projected
//! onto the cores as `Q_k = D·S_k + Qamb`.

use crate::kernel::LinearAlgebra;
use crate::leakage::LeakageHook;
use crate::step::StepMatrices;
use crate::system::ThermalSystem;

/// Supplies the step matrices for each sample.
pub(crate) trait StepSource {
    fn matrices(&mut self, sample: usize) -> &StepMatrices;
}

impl StepSource for &StepMatrices {
    fn matrices(&mut self, _sample: usize) -> &StepMatrices {
        *self
    }
}

/// Double-buffered state vector.
struct State {
    current: Vec<f64>,
    previous: Vec<f64>,
    at_rest: bool,
}

impl State {
    fn new(nodes: usize) -> Self {
        Self {
            current: vec![0.0; nodes],
            previous: vec![0.0; nodes],
            at_rest: true,
        }
    }

    /// Advance one step and return the new state.
    fn advance<K: LinearAlgebra>(
        &mut self,
        kernel: &K,
        matrices: &StepMatrices,
        power: &[f64],
    ) -> &[f64] {
        let (nn, nc) = (matrices.nodes(), matrices.cores());
        kernel.multiply(matrices.input(), power, &mut self.current, nn, nc, 1);
        if !self.at_rest {
            kernel.multiply_add(
                matrices.transition(),
                &self.previous,
                &mut self.current,
                nn,
                nn,
                1,
            );
        }
        self.at_rest = false;
        std::mem::swap(&mut self.current, &mut self.previous);
        &self.previous
    }
}

fn project(system: &ThermalSystem, state: &[f64], temperature: &mut [f64]) {
    let qamb = system.ambience();
    for ((q, &d), &s) in temperature.iter_mut().zip(system.d()).zip(state) {
        *q = d * s + qamb;
    }
}

/// Temperature profile (`samples × nc`, row-major) for the first `samples`
/// rows of `power`.
pub(crate) fn propagate<K, S>(
    kernel: &K,
    system: &ThermalSystem,
    source: &mut S,
    power: &[f64],
    samples: usize,
) -> Vec<f64>
where
    K: LinearAlgebra,
    S: StepSource,
{
    let nc = system.cores();
    assert!(
        power.len() >= samples * nc,
        "power profile has {} values, {} samples of {} cores need {}",
        power.len(),
        samples,
        nc,
        samples * nc
    );

    let mut state = State::new(system.nodes());
    let mut temperature = vec![0.0; samples * nc];
    for (k, (p, q)) in power
        .chunks_exact(nc)
        .zip(temperature.chunks_exact_mut(nc))
        .enumerate()
    {
        let s = state.advance(kernel, source.matrices(k), p);
        project(system, s, q);
    }
    temperature
}

/// Like [`propagate`], but lets `hook` add leakage to each power row first.
/// `power` is left holding the total power.
pub(crate) fn propagate_with_leakage<K, S, H>(
    kernel: &K,
    system: &ThermalSystem,
    source: &mut S,
    power: &mut [f64],
    samples: usize,
    hook: &mut H,
) -> Vec<f64>
where
    K: LinearAlgebra,
    S: StepSource,
    H: LeakageHook + ?Sized,
{
    let nc = system.cores();
    assert!(
        power.len() >= samples * nc,
        "power profile has {} values, {} samples of {} cores need {}",
        power.len(),
        samples,
        nc,
        samples * nc
    );

    let ambient = vec![system.ambience(); nc];
    let mut state = State::new(system.nodes());
    let mut temperature = vec![0.0; samples * nc];
    for k in 0..samples {
        let row = &mut power[k * nc..(k + 1) * nc];
        let last = if k == 0 {
            &ambient[..]
        } else {
            &temperature[(k - 1) * nc..k * nc]
        };
        hook.leak(last, row);

        let s = state.advance(kernel, source.matrices(k), row);
        project(system, s, &mut temperature[k * nc..(k + 1) * nc]);
    }
    temperature
}
