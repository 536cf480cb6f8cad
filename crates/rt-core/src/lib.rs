//! rt-core: stable foundation for rockthermo.
//!
//! Contains:
//! - units (uom SI types + constructors, physical constants)
//! - numeric (tolerances, finiteness guard, x ln x)
//! - reference (reference pressure/temperature of a parameter record)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod reference;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use reference::ReferenceState;
pub use units::*;
