//! Isobaric heat capacity at the reference pressure.

use serde::{Deserialize, Serialize};

/// `Cp(T) = a + b T + c / T^2 + d / sqrt(T)` [J/(K·mol)].
///
/// This is the Holland-Powell form; every record in the database uses it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatCapacity {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl HeatCapacity {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn from_slice(coefficients: &[f64]) -> Option<Self> {
        match *coefficients {
            [a, b, c, d] => Some(Self::new(a, b, c, d)),
            _ => None,
        }
    }

    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Cp at `t` [K].
    pub fn at(&self, t: f64) -> f64 {
        self.a + self.b * t + self.c / (t * t) + self.d / t.sqrt()
    }

    /// dCp/dT at `t`.
    pub fn derivative(&self, t: f64) -> f64 {
        self.b - 2.0 * self.c / (t * t * t) - 0.5 * self.d / (t * t.sqrt())
    }

    /// ∫ Cp dT from `t0` to `t`. Exactly zero when `t == t0`.
    pub fn integral(&self, t0: f64, t: f64) -> f64 {
        self.a * (t - t0) + 0.5 * self.b * (t * t - t0 * t0) - self.c * (1.0 / t - 1.0 / t0)
            + 2.0 * self.d * (t.sqrt() - t0.sqrt())
    }

    /// ∫ Cp / T dT from `t0` to `t`. Exactly zero when `t == t0`.
    pub fn integral_over_t(&self, t0: f64, t: f64) -> f64 {
        self.a * (t / t0).ln() + self.b * (t - t0)
            - 0.5 * self.c * (1.0 / (t * t) - 1.0 / (t0 * t0))
            - 2.0 * self.d * (1.0 / t.sqrt() - 1.0 / t0.sqrt())
    }
}
