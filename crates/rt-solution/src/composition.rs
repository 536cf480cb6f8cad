//! Solid-solution composition over an ordered list of end-members.

use crate::error::{SolutionError, SolutionResult};
use nalgebra::DVector;
use rt_core::numeric::{Tolerances, nearly_equal};

/// Absolute tolerance on the sum of mole fractions.
pub const DEFAULT_COMPOSITION_TOLERANCE: f64 = 1e-9;

/// End-member mole fractions.
///
/// Fractions are non-negative and sum to one within tolerance. A composition
/// is replaced whole, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    fractions: Vec<f64>,
}

impl Composition {
    /// Create a composition whose fractions already sum to one.
    pub fn new(fractions: Vec<f64>) -> SolutionResult<Self> {
        Self::with_tolerance(fractions, DEFAULT_COMPOSITION_TOLERANCE)
    }

    /// Like [`Composition::new`] with an explicit absolute tolerance on the sum.
    pub fn with_tolerance(fractions: Vec<f64>, tolerance: f64) -> SolutionResult<Self> {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(SolutionError::InvalidComposition {
                reason: "tolerance must be finite and non-negative",
                sum: f64::NAN,
            });
        }
        let sum = checked_sum(&fractions)?;
        if (sum - 1.0).abs() > tolerance {
            return Err(SolutionError::InvalidComposition {
                reason: "mole fractions must sum to 1",
                sum,
            });
        }
        Ok(Self { fractions })
    }

    /// Rescale non-negative amounts so they sum to one.
    ///
    /// This is the only constructor that changes the caller's numbers.
    pub fn normalized(amounts: Vec<f64>) -> SolutionResult<Self> {
        let sum = checked_sum(&amounts)?;
        if !(sum > 0.0 && sum.is_finite()) {
            return Err(SolutionError::InvalidComposition {
                reason: "amounts sum to zero or non-finite",
                sum,
            });
        }
        Ok(Self {
            fractions: amounts.into_iter().map(|a| a / sum).collect(),
        })
    }

    /// Pure end-member `index` of `len`.
    pub fn pure(len: usize, index: usize) -> SolutionResult<Self> {
        if index >= len {
            return Err(SolutionError::ShapeMismatch {
                what: "pure end-member index",
                expected: len,
                found: index,
            });
        }
        let mut fractions = vec![0.0; len];
        fractions[index] = 1.0;
        Ok(Self { fractions })
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Mole fraction of end-member `index` (0.0 when out of range).
    pub fn mole_fraction(&self, index: usize) -> f64 {
        self.fractions.get(index).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.fractions.iter().sum()
    }

    /// Index of the end-member when exactly one fraction is ≈1.
    pub fn is_pure(&self) -> Option<usize> {
        let tol = Tolerances::new(1e-10, 1e-10);
        let mut nonzero = self.fractions.iter().enumerate().filter(|(_, x)| **x > 0.0);
        match (nonzero.next(), nonzero.next()) {
            (Some((i, x)), None) if nearly_equal(*x, 1.0, tol) => Some(i),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.fractions.iter().copied()
    }

    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.fractions)
    }
}

fn checked_sum(fractions: &[f64]) -> SolutionResult<f64> {
    if fractions.is_empty() {
        return Err(SolutionError::InvalidComposition {
            reason: "empty composition",
            sum: 0.0,
        });
    }
    let mut sum = 0.0;
    for &x in fractions {
        if !x.is_finite() {
            return Err(SolutionError::InvalidComposition {
                reason: "non-finite mole fraction",
                sum: x,
            });
        }
        if x < 0.0 {
            return Err(SolutionError::InvalidComposition {
                reason: "negative mole fraction",
                sum: sum + x,
            });
        }
        sum += x;
    }
    Ok(sum)
}
