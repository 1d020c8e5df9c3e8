//! Simulation runner and result recording.

use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

impl IntegratorType {
    /// Advance `model` by one step with the selected integrator.
    pub fn step<M: TransientModel>(
        self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        match self {
            IntegratorType::RK4 => RK4.step(model, t, x, dt),
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, x, dt),
        }
    }
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
            integrator: IntegratorType::default(),
        }
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

fn validate(opts: &SimOptions) -> SimResult<()> {
    if !(opts.dt.is_finite() && opts.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if !(opts.t_end.is_finite() && opts.t_end >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }
    Ok(())
}

/// Run a fixed-step transient simulation from `t = 0` to `t_end`.
///
/// The initial state is always recorded, then every `record_every`-th step,
/// then the final state if it was not recorded already. Step times are
/// computed as `step · dt` so they do not drift.
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    validate(opts)?;

    // The tolerance keeps t_end = n·dt from rounding up to n + 1 steps.
    let wanted = (opts.t_end / opts.dt - 1e-9).ceil().max(0.0) as usize;
    let steps = wanted.min(opts.max_steps);
    if steps < wanted {
        warn!(
            wanted,
            max_steps = opts.max_steps,
            "step limit reached before t_end"
        );
    }
    debug!(steps, dt = opts.dt, integrator = ?opts.integrator, "running simulation");

    let mut x = model.initial_state();
    let mut t_record = vec![0.0];
    let mut x_record = vec![x.clone()];

    for step in 1..=steps {
        let t = (step - 1) as f64 * opts.dt;
        x = opts.integrator.step(model, t, &x, opts.dt)?;

        if step % opts.record_every == 0 {
            t_record.push(step as f64 * opts.dt);
            x_record.push(x.clone());
        }
    }

    // Always record final state
    if steps % opts.record_every != 0 {
        t_record.push(steps as f64 * opts.dt);
        x_record.push(x);
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
