//! Low-level error shared by every rockthermo crate.
//!
//! Higher layers own richer enums and convert into `CoreError` at their
//! boundary.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A computed or supplied quantity is NaN or infinite.
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Internal consistency check failed.
    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_quantity() {
        let err = CoreError::NonFinite {
            what: "bulk modulus",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "Non-finite numeric value for bulk modulus: inf");
    }
}
