//! Equation-of-state errors.

use rt_core::CoreError;
use thiserror::Error;

/// Result type for equation-of-state operations.
pub type EosResult<T> = Result<T, EosError>;

/// Errors raised while building parameter records or evaluating states.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// Input or parameter outside the physically/numerically valid range.
    #[error("Domain error for {quantity} = {value}: {reason}")]
    Domain {
        quantity: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Incomplete end-member record.
    #[error("Missing parameter(s) for '{record}': {}", .keys.join(", "))]
    MissingParameter { record: String, keys: Vec<String> },

    /// A parameter is present but has the wrong shape or type.
    #[error("Invalid parameter '{key}' for '{record}': {reason}")]
    InvalidParameter {
        record: String,
        key: String,
        reason: String,
    },

    /// Record declares an equation of state this crate does not evaluate.
    #[error("Unsupported equation of state '{name}'")]
    UnsupportedEquationOfState { name: String },

    /// Chemical formula could not be resolved by the lookup service.
    #[error("Formula lookup failed for '{formula}': {message}")]
    Chemistry { formula: String, message: String },

    /// Sweep definition is unusable.
    #[error("Invalid sweep: {what}")]
    InvalidSweep { what: &'static str },
}

impl EosError {
    pub(crate) fn domain(quantity: &'static str, value: f64, reason: &'static str) -> Self {
        tracing::debug!(quantity, value, reason, "equation of state domain check failed");
        EosError::Domain {
            quantity,
            value,
            reason,
        }
    }
}

impl From<CoreError> for EosError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => EosError::domain(what, value, "not finite"),
            CoreError::InvalidArg { what } | CoreError::Invariant { what } => {
                EosError::domain(what, f64::NAN, "invalid argument")
            }
        }
    }
}

impl From<EosError> for CoreError {
    fn from(err: EosError) -> Self {
        match err {
            EosError::Domain { quantity, .. } => CoreError::InvalidArg { what: quantity },
            EosError::MissingParameter { .. } => CoreError::InvalidArg {
                what: "missing end-member parameter",
            },
            EosError::InvalidParameter { .. } => CoreError::InvalidArg {
                what: "invalid end-member parameter",
            },
            EosError::UnsupportedEquationOfState { .. } => CoreError::Invariant {
                what: "unsupported equation of state",
            },
            EosError::Chemistry { .. } => CoreError::InvalidArg {
                what: "formula lookup",
            },
            EosError::InvalidSweep { what } => CoreError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EosError::Domain {
            quantity: "temperature",
            value: -5.0,
            reason: "must be positive",
        };
        let msg = err.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("-5"));

        let err = EosError::MissingParameter {
            record: "fo".into(),
            keys: vec!["K_0".into(), "Cp".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("K_0, Cp"));
        assert!(msg.contains("fo"));
    }

    #[test]
    fn non_finite_core_error_becomes_domain() {
        let err: EosError = CoreError::NonFinite {
            what: "volume",
            value: f64::INFINITY,
        }
        .into();
        assert!(matches!(err, EosError::Domain { quantity: "volume", .. }));
    }

    #[test]
    fn error_to_core_error() {
        let core: CoreError = EosError::InvalidSweep { what: "points" }.into();
        assert!(matches!(core, CoreError::InvalidArg { what: "points" }));
    }
}
