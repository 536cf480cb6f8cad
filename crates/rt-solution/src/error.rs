//! Solid-solution errors.

use rt_core::CoreError;
use rt_eos::EosError;
use thiserror::Error;

/// Result type for mixing operations.
pub type SolutionResult<T> = Result<T, SolutionError>;

/// Errors that can occur while building or evaluating a solid solution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolutionError {
    /// Mole fractions are negative, non-finite, or do not sum to one.
    #[error("Invalid composition: {reason} (sum = {sum})")]
    InvalidComposition { reason: &'static str, sum: f64 },

    /// Lengths of the inputs disagree.
    #[error("Shape mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Interaction parameters or asymmetry factors are unusable.
    #[error("Invalid interaction parameters: {what}")]
    InvalidInteraction { what: &'static str },

    /// Site multiplicities or occupancies are unusable.
    #[error("Invalid site model: {what}")]
    InvalidSiteModel { what: &'static str },

    /// End-member states were not evaluated at the same (P, T).
    #[error("End-member state {index} is not at the same (P, T) as state 0")]
    InconsistentStates { index: usize },

    /// End-member evaluation failed.
    #[error(transparent)]
    Eos(#[from] EosError),
}

impl From<SolutionError> for CoreError {
    fn from(err: SolutionError) -> Self {
        match err {
            SolutionError::InvalidComposition { reason, .. } => {
                CoreError::InvalidArg { what: reason }
            }
            SolutionError::ShapeMismatch { what, .. } => CoreError::InvalidArg { what },
            SolutionError::InvalidInteraction { what } => CoreError::InvalidArg { what },
            SolutionError::InvalidSiteModel { what } => CoreError::InvalidArg { what },
            SolutionError::InconsistentStates { .. } => CoreError::Invariant {
                what: "end-member states at different conditions",
            },
            SolutionError::Eos(e) => e.into(),
        }
    }
}
