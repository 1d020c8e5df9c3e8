//! ct-core: stable foundation for chiptherm.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float guards)
//! - ids (stable compact IDs for thermal nodes)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::CoreError;
pub use ids::*;
pub use numeric::*;
pub use units::*;
