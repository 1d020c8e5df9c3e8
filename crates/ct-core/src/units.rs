// ct-core/src/units.rs

use uom::si::f64::{ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Temperature in Kelvin, the unit every matrix in the workspace works in.
#[inline]
pub fn kelvin_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Duration in seconds.
#[inline]
pub fn seconds_of(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

pub mod constants {
    use super::*;

    /// 45 °C, a common ambient for chip-level thermal studies.
    pub const DEFAULT_AMBIENCE_K: f64 = 318.15;

    #[inline]
    pub fn default_ambience() -> Temperature {
        k(DEFAULT_AMBIENCE_K)
    }
}
