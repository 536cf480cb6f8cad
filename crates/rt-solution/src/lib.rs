//! rt-solution: solid-solution mixing models for rockthermo.
//!
//! Provides:
//! - `Composition`, validated end-member mole fractions
//! - `InteractionMatrix`, symmetric and asymmetric (van Laar) interactions
//!   with an explicit entropy sign convention
//! - `SiteModel`, site multiplicities and occupancies for the ideal term
//! - `mix`, the solution Gibbs energy, chemical potentials and Hessian
//! - `SolidSolution`, end-member records bundled with their mixing model
//!
//! # Example
//!
//! ```no_run
//! use rt_solution::{Composition, EntropyConvention, Interaction, InteractionMatrix, mix};
//! # fn states() -> Vec<rt_eos::EosState> { unimplemented!() }
//!
//! let w = InteractionMatrix::symmetric(
//!     2,
//!     vec![Interaction::new(0.0, 10.0, 0.0)],
//!     EntropyConvention::ExcessEntropy,
//! )
//! .unwrap();
//! let x = Composition::new(vec![0.5, 0.5]).unwrap();
//! let result = mix(&states(), &x, &w).unwrap();
//! println!("G_ex = {} J/mol", result.excess_gibbs_j_per_mol);
//! ```

pub mod composition;
pub mod error;
pub mod interaction;
pub mod mix;
pub mod sites;
pub mod solid_solution;

pub use composition::{Composition, DEFAULT_COMPOSITION_TOLERANCE};
pub use error::{SolutionError, SolutionResult};
pub use interaction::{EntropyConvention, Interaction, InteractionMatrix};
pub use mix::{MixResult, MixingOptions, mix, mix_with_options};
pub use sites::{Site, SiteModel};
pub use solid_solution::SolidSolution;
