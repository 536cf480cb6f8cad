//! rt-minerals: end-member parameter datasets for rockthermo.
//!
//! Provides:
//! - Chemical-formula parsing and an atomic-mass table (`AtomicMasses`)
//!   implementing `rt_eos::FormulaLookup`
//! - Dataset documents (YAML or JSON) in SI or Holland-Powell units
//! - `MineralDatabase`, validated records with lookup and search
//! - The embedded `hp_2011()` and `hphh_2013()` datasets
//!
//! # Example
//!
//! ```no_run
//! use rt_core::units::{gpa, k};
//! use rt_eos::evaluate;
//!
//! let db = rt_minerals::hphh_2013().unwrap();
//! let fo = db.get("fo").unwrap();
//! let state = evaluate(fo, gpa(10.0), k(1600.0)).unwrap();
//! println!("{}", state.summary());
//! ```

pub mod chemistry;
pub mod database;
pub mod dataset;
pub mod error;
pub mod units;

pub use chemistry::{AtomicMasses, ElementCounts, parse_formula};
pub use database::{MineralDatabase, hp_2011, hphh_2013};
pub use dataset::Dataset;
pub use error::{DatabaseError, DatabaseResult};
pub use units::UnitSystem;
