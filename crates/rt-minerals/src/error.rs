//! Mineral database errors.

use rt_core::CoreError;
use rt_eos::EosError;
use thiserror::Error;

/// Result type for database and chemistry operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed validation.
    #[error(transparent)]
    Eos(#[from] EosError),

    #[error("Unknown mineral '{name}'")]
    UnknownMineral { name: String },

    #[error("Unknown element '{symbol}' in formula '{formula}'")]
    UnknownElement { symbol: String, formula: String },

    #[error("Malformed formula '{formula}': {reason}")]
    MalformedFormula {
        formula: String,
        reason: &'static str,
    },

    #[error("Mineral '{name}' appears more than once")]
    DuplicateMineral { name: String },

    /// Record at this position has no text `name` field.
    #[error("Record {index} has no name")]
    UnnamedRecord { index: usize },
}

impl From<DatabaseError> for CoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Eos(e) => e.into(),
            DatabaseError::Yaml(_) | DatabaseError::Json(_) => CoreError::InvalidArg {
                what: "unparseable dataset",
            },
            DatabaseError::UnknownMineral { .. } => CoreError::InvalidArg {
                what: "unknown mineral",
            },
            DatabaseError::UnknownElement { .. } | DatabaseError::MalformedFormula { .. } => {
                CoreError::InvalidArg {
                    what: "unresolvable chemical formula",
                }
            }
            DatabaseError::DuplicateMineral { .. } | DatabaseError::UnnamedRecord { .. } => {
                CoreError::Invariant {
                    what: "inconsistent mineral dataset",
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DatabaseError::UnknownElement {
            symbol: "Xx".into(),
            formula: "Xx2O".into(),
        };
        assert!(err.to_string().contains("Xx2O"));
    }

    #[test]
    fn eos_errors_pass_through() {
        let err: DatabaseError = EosError::UnsupportedEquationOfState {
            name: "bm3".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Unsupported equation of state 'bm3'");
        let core: CoreError = DatabaseError::UnknownMineral { name: "foo".into() }.into();
        assert!(matches!(core, CoreError::InvalidArg { .. }));
    }
}
