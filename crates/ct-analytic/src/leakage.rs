//! Temperature-dependent leakage power.
//!
//! Leakage is a lagged approximation: the power added before step `k` is
//! computed from the temperature produced by step `k − 1`. No fixed point is
//! sought within a step.

/// Adds state-dependent power to a power row before it is consumed.
pub trait LeakageHook {
    /// `temperature` holds the core temperatures (K) of the previous sample,
    /// or the ambient temperature at every core before the first sample.
    /// `power` is the row about to be integrated; leakage is added in place.
    fn leak(&mut self, temperature: &[f64], power: &mut [f64]);
}

impl<F> LeakageHook for F
where
    F: FnMut(&[f64], &mut [f64]),
{
    fn leak(&mut self, temperature: &[f64], power: &mut [f64]) {
        self(temperature, power)
    }
}

/// Leaves the power untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLeakage;

impl LeakageHook for NoLeakage {
    fn leak(&mut self, _temperature: &[f64], _power: &mut [f64]) {}
}

/// Leakage linear in temperature around a reference point:
/// `P_leak = P0 · max(0, 1 + k·(Q − Q_ref))`.
#[derive(Clone, Debug)]
pub struct LinearLeakage {
    /// Leakage of each core at the reference temperature (W)
    pub nominal: Vec<f64>,
    /// Relative change of leakage per Kelvin (1/K)
    pub sensitivity: f64,
    /// Reference temperature (K)
    pub reference: f64,
}

impl LinearLeakage {
    pub fn new(nominal: Vec<f64>, sensitivity: f64, reference: f64) -> Self {
        Self {
            nominal,
            sensitivity,
            reference,
        }
    }

    /// Leakage of one core at the given temperature.
    pub fn at(&self, core: usize, temperature: f64) -> f64 {
        let scale = 1.0 + self.sensitivity * (temperature - self.reference);
        self.nominal[core] * scale.max(0.0)
    }
}

impl LeakageHook for LinearLeakage {
    fn leak(&mut self, temperature: &[f64], power: &mut [f64]) {
        assert_eq!(
            self.nominal.len(),
            power.len(),
            "one nominal leakage per core"
        );
        for (core, (p, &q)) in power.iter_mut().zip(temperature).enumerate() {
            *p += self.at(core, q);
        }
    }
}
