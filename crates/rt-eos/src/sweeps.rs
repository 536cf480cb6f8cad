//! Pressure and temperature sweep generation.
//!
//! Used to tabulate end-member properties along isotherms and isobars.

use crate::error::{EosError, EosResult};
use std::fmt;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Independent variable of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepVariable {
    /// Pressure [Pa], swept along an isotherm
    Pressure,
    /// Temperature [K], swept along an isobar
    Temperature,
}

/// Definition of a single parameter sweep in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub variable: SweepVariable,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Create a validated sweep.
    pub fn new(
        variable: SweepVariable,
        start: f64,
        end: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> EosResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(EosError::InvalidSweep {
                what: "bounds must be finite",
            });
        }
        if num_points < 2 {
            return Err(EosError::InvalidSweep {
                what: "sweep must have at least 2 points",
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(EosError::InvalidSweep {
                what: "start and end values must be different",
            });
        }
        let lower_ok = match variable {
            SweepVariable::Pressure => start >= 0.0 && end >= 0.0,
            SweepVariable::Temperature => start > 0.0 && end > 0.0,
        };
        if !lower_ok {
            return Err(EosError::InvalidSweep {
                what: "bounds outside the physical range of the variable",
            });
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(EosError::InvalidSweep {
                what: "logarithmic sweep requires positive bounds",
            });
        }
        Ok(Self {
            variable,
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    /// Isotherm from `start_pa` to `end_pa`.
    pub fn pressure(start_pa: f64, end_pa: f64, num_points: usize) -> EosResult<Self> {
        Self::new(
            SweepVariable::Pressure,
            start_pa,
            end_pa,
            num_points,
            SweepType::Linear,
        )
    }

    /// Isobar from `start_k` to `end_k`.
    pub fn temperature(start_k: f64, end_k: f64, num_points: usize) -> EosResult<Self> {
        Self::new(
            SweepVariable::Temperature,
            start_k,
            end_k,
            num_points,
            SweepType::Linear,
        )
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => self.generate_linear(),
            SweepType::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        let mut points = Vec::with_capacity(self.num_points);
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;

        for i in 0..self.num_points {
            points.push(self.start + i as f64 * delta);
        }

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        let mut points = Vec::with_capacity(self.num_points);
        let log_start = self.start.ln();
        let log_delta = (self.end.ln() - log_start) / (self.num_points - 1) as f64;

        for i in 0..self.num_points {
            points.push((log_start + i as f64 * log_delta).exp());
        }

        points[0] = self.start;
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => write!(f, "Pressure [Pa]"),
            Self::Temperature => write!(f, "Temperature [K]"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points, {})",
            self.variable, self.start, self.end, self.num_points, self.sweep_type
        )
    }
}
