//! Thermal RC network as an explicit ODE.
//!
//! With `S = Q' − Qamb` the network obeys
//!
//! ```text
//!     dS/dt = −C⁻¹·G·S + C⁻¹·M·P(t)
//! ```
//!
//! which any [`Integrator`](crate::Integrator) can advance. The state starts
//! at rest (`S = 0`, every node at ambient).

use std::cell::Cell;

use ct_core::{ensure_finite, ensure_positive};
use ct_network::ThermalNetwork;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::sim::{IntegratorType, SimOptions, run_sim};

/// Numeric thermal model driven by a power function `power(t, out)`, which
/// writes the power of every core (W) at time `t` into `out`.
pub struct NumericThermal<P> {
    conductance: Vec<f64>,
    capacitance: Vec<f64>,
    cores: usize,
    nodes: usize,
    qamb: f64,
    power: P,
    input: Vec<f64>,
}

impl<P> NumericThermal<P>
where
    P: FnMut(f64, &mut [f64]),
{
    pub fn new(network: &ThermalNetwork, ambience: f64, power: P) -> SimResult<Self> {
        let qamb = ensure_finite(ambience, "ambient temperature")?;
        for &c in network.capacitance() {
            ensure_positive(c, "capacitance")?;
        }
        Ok(Self {
            conductance: network.conductance().to_vec(),
            capacitance: network.capacitance().to_vec(),
            cores: network.cores(),
            nodes: network.nodes(),
            qamb,
            power,
            input: vec![0.0; network.cores()],
        })
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Core temperatures (K) for a state vector.
    pub fn temperature(&self, state: &[f64]) -> Vec<f64> {
        state[..self.cores].iter().map(|s| s + self.qamb).collect()
    }

    /// Run [`run_sim`] and project every recorded state after `t = 0` onto
    /// the cores. Returns the row-major temperature profile and the time of
    /// each row.
    pub fn compute(&mut self, opts: &SimOptions) -> SimResult<(Vec<f64>, Vec<f64>)> {
        let record = run_sim(self, opts)?;
        let mut temperature = Vec::with_capacity(record.x.len().saturating_sub(1) * self.cores);
        for state in record.x.iter().skip(1) {
            temperature.extend(self.temperature(state));
        }
        let times = record.t.into_iter().skip(1).collect();
        Ok((temperature, times))
    }
}

impl<P> TransientModel for NumericThermal<P>
where
    P: FnMut(f64, &mut [f64]),
{
    type State = Vec<f64>;

    fn initial_state(&self) -> Vec<f64> {
        vec![0.0; self.nodes]
    }

    fn rhs(&mut self, t: f64, x: &Vec<f64>) -> SimResult<Vec<f64>> {
        if x.iter().any(|v| !v.is_finite()) {
            return Err(SimError::NonPhysical {
                what: "temperature diverged",
            });
        }
        (self.power)(t, &mut self.input);

        let n = self.nodes;
        let dxdt = (0..n)
            .map(|i| {
                let row = &self.conductance[i * n..(i + 1) * n];
                let flow: f64 = row.iter().zip(x).map(|(g, s)| g * s).sum();
                let heat = if i < self.cores { self.input[i] } else { 0.0 };
                (heat - flow) / self.capacitance[i]
            })
            .collect();
        Ok(dxdt)
    }

    fn add(&self, a: &Vec<f64>, b: &Vec<f64>) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x + y).collect()
    }

    fn scale(&self, a: &Vec<f64>, scale: f64) -> Vec<f64> {
        a.iter().map(|x| x * scale).collect()
    }
}

/// Integrate a sampled power profile numerically.
///
/// `power` is row-major `ns × nc`; row `k` is held constant over
/// `[k·Δt, (k+1)·Δt)`, which is covered by `substeps` integrator steps.
/// Returns the `ns × nc` temperature profile at the end of each sample, the
/// same layout the exponential integrators produce.
pub fn integrate_profile(
    network: &ThermalNetwork,
    ambience: f64,
    power: &[f64],
    time_step: f64,
    substeps: usize,
    integrator: IntegratorType,
) -> SimResult<Vec<f64>> {
    if !(time_step.is_finite() && time_step > 0.0) {
        return Err(SimError::InvalidArg {
            what: "time step must be positive",
        });
    }
    if substeps == 0 {
        return Err(SimError::InvalidArg {
            what: "substeps must be positive",
        });
    }

    let nc = network.cores();
    let samples = power.len() / nc;
    // Rows are selected by sample index, not by time, so the stage
    // evaluations at a sample boundary still see the current row.
    let row = Cell::new(0);
    let mut model = NumericThermal::new(network, ambience, |_: f64, out: &mut [f64]| {
        let k = row.get();
        out.copy_from_slice(&power[k * nc..(k + 1) * nc]);
    })?;

    let h = time_step / substeps as f64;
    debug!(samples, substeps, h, ?integrator, "numeric profile integration");

    let mut x = model.initial_state();
    let mut temperature = Vec::with_capacity(samples * nc);
    for k in 0..samples {
        row.set(k);
        for j in 0..substeps {
            let t = k as f64 * time_step + j as f64 * h;
            x = integrator.step(&mut model, t, &x, h)?;
        }
        temperature.extend(model.temperature(&x));
    }
    Ok(temperature)
}
