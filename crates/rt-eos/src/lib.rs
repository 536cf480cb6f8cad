//! rt-eos: end-member equation-of-state evaluation for rockthermo.
//!
//! Provides:
//! - End-member parameter records and validated ingestion from flat maps
//! - The Holland-Powell heat-capacity polynomial
//! - The modified Tait equation of state with Einstein thermal pressure
//! - `EosState`, the self-consistent thermodynamic state at (P, T)
//! - Isotherm/isobar sweeps and parallel P-T grids
//!
//! # Example
//!
//! ```no_run
//! use rt_eos::{EndMemberParameters, HeatCapacity, evaluate};
//! use rt_core::units::{gpa, k};
//!
//! let per = EndMemberParameters::builder("per", "MgO")
//!     .h0(-601_530.0)
//!     .s0(26.5)
//!     .v0(1.125e-5)
//!     .cp(HeatCapacity::new(60.5, 0.000362, -535_800.0, -299.2))
//!     .alpha0(3.11e-5)
//!     .bulk_modulus(1.616e11, 3.95, -2.4e-11)
//!     .formula_units(2.0, 0.040304)
//!     .build()
//!     .unwrap();
//!
//! let state = evaluate(&per, gpa(10.0), k(1000.0)).unwrap();
//! println!("V = {} m^3/mol", state.volume_m3_per_mol);
//! ```

pub mod error;
pub mod heat_capacity;
pub mod model;
pub mod params;
pub mod state;
pub mod sweep_executor;
pub mod sweeps;
pub mod tait;
pub mod thermal;

// Re-exports for ergonomics
pub use error::{EosError, EosResult};
pub use heat_capacity::HeatCapacity;
pub use model::{EquationOfState, ModifiedTait, evaluate};
pub use params::{
    EndMemberParameters, EndMemberParametersBuilder, FormulaLookup, FormulaProperties,
    ParameterMap, ParameterValue,
};
pub use state::EosState;
pub use sweep_executor::{SweepResult, evaluate_grid, evaluate_isobar, evaluate_isotherm};
pub use sweeps::{SweepDefinition, SweepType, SweepVariable};
pub use tait::TaitConstants;
pub use thermal::EinsteinThermalPressure;
