//! Reference state of a parameter record.

use crate::units::constants::{P_REF_PA, T_REF_K};
use crate::{CoreError, CoreResult};

/// Pressure and temperature at which tabulated H0, S0, V0 apply.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceState {
    /// Reference temperature [K]
    pub temperature_k: f64,
    /// Reference pressure [Pa]
    pub pressure_pa: f64,
}

impl Default for ReferenceState {
    fn default() -> Self {
        Self {
            temperature_k: T_REF_K,
            pressure_pa: P_REF_PA,
        }
    }
}

impl ReferenceState {
    pub fn new(temperature_k: f64, pressure_pa: f64) -> CoreResult<Self> {
        if !temperature_k.is_finite() || temperature_k <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "reference temperature must be positive and finite",
            });
        }
        if !pressure_pa.is_finite() || pressure_pa < 0.0 {
            return Err(CoreError::InvalidArg {
                what: "reference pressure must be non-negative and finite",
            });
        }
        Ok(Self {
            temperature_k,
            pressure_pa,
        })
    }
}
