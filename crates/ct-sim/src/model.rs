//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// A dynamic system `dx/dt = f(t, x)`.
///
/// Integrators only need the right-hand side and vector-space arithmetic on
/// the state, so a model decides its own state layout.
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute the state derivative `dx/dt = f(t, x)`.
    ///
    /// Takes `&mut self` so models can reuse scratch buffers or sample an
    /// input function between calls.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}
