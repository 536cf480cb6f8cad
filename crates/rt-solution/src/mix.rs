//! Solution Gibbs energy from end-member states.
//!
//! `G = Σ x_i G_i − T S_mix + G_ex`, with the van Laar excess
//!
//! ```text
//! φ_i  = α_i x_i / Σ α x
//! B_ij = 2 W_ij / (α_i + α_j)
//! G_ex = (Σ α x) Σ_{i<j} φ_i φ_j B_ij
//! ```
//!
//! applied identically to the enthalpy, entropy and volume parts of `W`.
//! Chemical potentials are partial molar Gibbs energies and the Hessian is
//! `∂μ_i/∂n_j` at the given amounts.

use crate::composition::{Composition, DEFAULT_COMPOSITION_TOLERANCE};
use crate::error::{SolutionError, SolutionResult};
use crate::interaction::InteractionMatrix;
use crate::sites::SiteModel;
use nalgebra::{Cholesky, DMatrix, DVector};
use rt_core::numeric::{Tolerances, nearly_equal};
use rt_core::units::constants::GAS_CONSTANT;
use rt_core::units::{Pressure, Temperature};
use rt_eos::{EosError, EosState};

/// Knobs for [`mix_with_options`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingOptions {
    /// Allowed |Σx − 1|
    pub composition_tolerance: f64,
    /// Tolerance used to decide that two states share (P, T)
    pub condition_tolerance: Tolerances,
}

impl Default for MixingOptions {
    fn default() -> Self {
        Self {
            composition_tolerance: DEFAULT_COMPOSITION_TOLERANCE,
            condition_tolerance: Tolerances::new(1e-9, 1e-12),
        }
    }
}

/// Molar properties of a solid solution at one (P, T, x).
#[derive(Debug, Clone, PartialEq)]
pub struct MixResult {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub gibbs_j_per_mol: f64,
    pub enthalpy_j_per_mol: f64,
    pub entropy_j_per_mol_k: f64,
    pub volume_m3_per_mol: f64,
    pub density_kg_m3: f64,
    /// `−T S_mix` [J/mol]
    pub ideal_gibbs_j_per_mol: f64,
    pub excess_gibbs_j_per_mol: f64,
    pub excess_enthalpy_j_per_mol: f64,
    pub excess_entropy_j_per_mol_k: f64,
    pub excess_volume_m3_per_mol: f64,
    /// Configurational entropy of mixing, net of the end-members' own
    pub configurational_entropy_j_per_mol_k: f64,
    /// Fraction of each site species
    pub site_fractions: DVector<f64>,
    /// Partial molar Gibbs energies [J/mol]
    pub chemical_potentials: DVector<f64>,
    pub excess_chemical_potentials: DVector<f64>,
    pub activities: DVector<f64>,
    pub activity_coefficients: DVector<f64>,
    /// `∂μ_i/∂n_j` [J/mol]
    pub gibbs_hessian: DMatrix<f64>,
}

impl MixResult {
    /// Hessian restricted to composition changes that keep Σx fixed,
    /// in the basis `e_i − e_last`.
    pub fn reduced_hessian(&self) -> DMatrix<f64> {
        let m = self.gibbs_hessian.nrows();
        if m < 2 {
            return DMatrix::zeros(0, 0);
        }
        let mut basis = DMatrix::zeros(m, m - 1);
        for i in 0..m - 1 {
            basis[(i, i)] = 1.0;
            basis[(m - 1, i)] = -1.0;
        }
        basis.transpose() * &self.gibbs_hessian * basis
    }

    /// Whether the solution is locally stable against unmixing, i.e. the
    /// reduced Hessian is positive definite. `None` at compositions where
    /// the Hessian is not finite (an end-member fraction of zero).
    pub fn is_locally_stable(&self) -> Option<bool> {
        if self.gibbs_hessian.iter().any(|h| !h.is_finite()) {
            return None;
        }
        let reduced = self.reduced_hessian();
        if reduced.is_empty() {
            return Some(true);
        }
        Some(Cholesky::new(reduced).is_some())
    }
}

/// Mix end-member states with the default single-site model and options.
pub fn mix(
    states: &[EosState],
    composition: &Composition,
    interactions: &InteractionMatrix,
) -> SolutionResult<MixResult> {
    mix_with_options(
        states,
        composition,
        interactions,
        &SiteModel::ideal(composition.len()),
        &MixingOptions::default(),
    )
}

/// Mix end-member states evaluated at a common (P, T).
///
/// Checks, in order: composition length against the states, the
/// interaction and site models against the composition, that every state
/// shares the first state's (P, T), then the composition sum.
pub fn mix_with_options(
    states: &[EosState],
    composition: &Composition,
    interactions: &InteractionMatrix,
    sites: &SiteModel,
    options: &MixingOptions,
) -> SolutionResult<MixResult> {
    let m = composition.len();
    if states.len() != m {
        return Err(SolutionError::ShapeMismatch {
            what: "composition",
            expected: states.len(),
            found: m,
        });
    }
    if interactions.size() != m {
        return Err(SolutionError::ShapeMismatch {
            what: "interaction matrix",
            expected: m,
            found: interactions.size(),
        });
    }
    if sites.endmember_count() != m {
        return Err(SolutionError::ShapeMismatch {
            what: "site occupancies",
            expected: m,
            found: sites.endmember_count(),
        });
    }

    let first = &states[0];
    let (p_pa, t_k) = (first.pressure_pa(), first.temperature_k());
    for (index, state) in states.iter().enumerate().skip(1) {
        let tol = options.condition_tolerance;
        if !(nearly_equal(state.pressure_pa(), p_pa, tol)
            && nearly_equal(state.temperature_k(), t_k, tol))
        {
            tracing::debug!(
                index,
                p_pa = state.pressure_pa(),
                t_k = state.temperature_k(),
                "end-member state at different conditions"
            );
            return Err(SolutionError::InconsistentStates { index });
        }
    }

    let sum = composition.sum();
    if !((sum - 1.0).abs() <= options.composition_tolerance) {
        return Err(SolutionError::InvalidComposition {
            reason: "mole fractions must sum to 1",
            sum,
        });
    }
    if !(t_k.is_finite() && t_k > 0.0) {
        return Err(EosError::Domain {
            quantity: "temperature",
            value: t_k,
            reason: "temperature must be positive and finite",
        }
        .into());
    }
    tracing::trace!(endmembers = m, p_pa, t_k, "mixing solid solution");

    let x = composition.to_vector();
    let n = sum;
    let rt = GAS_CONSTANT * t_k;
    let column = |f: fn(&EosState) -> f64| DVector::from_iterator(m, states.iter().map(f));
    let g_em = column(|s| s.gibbs_j_per_mol);
    let s_em = column(|s| s.entropy_j_per_mol_k);
    let v_em = column(|s| s.volume_m3_per_mol);
    let mass_em = column(|s| s.density_kg_m3() * s.volume_m3_per_mol);

    let ideal = sites.ideal_terms(&x, t_k);
    let excess = ExcessTerms::new(interactions, &x, p_pa, t_k);

    let ideal_gibbs = -t_k * ideal.mixing_entropy;
    let gibbs = x.dot(&g_em) / n + ideal_gibbs + excess.gibbs;
    let entropy = x.dot(&s_em) / n + ideal.mixing_entropy + excess.entropy;
    let volume = x.dot(&v_em) / n + excess.volume;

    let chemical_potentials = &g_em + &ideal.chemical_potentials + &excess.chemical_potentials;
    let activities = (&ideal.chemical_potentials + &excess.chemical_potentials)
        .map(|mu| (mu / rt).exp());
    let activity_coefficients = excess.chemical_potentials.map(|mu| (mu / rt).exp());

    Ok(MixResult {
        pressure: first.pressure,
        temperature: first.temperature,
        gibbs_j_per_mol: gibbs,
        enthalpy_j_per_mol: gibbs + t_k * entropy,
        entropy_j_per_mol_k: entropy,
        volume_m3_per_mol: volume,
        density_kg_m3: x.dot(&mass_em) / n / volume,
        ideal_gibbs_j_per_mol: ideal_gibbs,
        excess_gibbs_j_per_mol: excess.gibbs,
        excess_enthalpy_j_per_mol: excess.gibbs + t_k * excess.entropy,
        excess_entropy_j_per_mol_k: excess.entropy,
        excess_volume_m3_per_mol: excess.volume,
        configurational_entropy_j_per_mol_k: ideal.mixing_entropy,
        site_fractions: ideal.site_fractions,
        chemical_potentials,
        excess_chemical_potentials: excess.chemical_potentials.clone(),
        activities,
        activity_coefficients,
        gibbs_hessian: &ideal.hessian + &excess.hessian,
    })
}

/// Van Laar excess terms at amounts `x`.
struct ExcessTerms {
    gibbs: f64,
    entropy: f64,
    volume: f64,
    chemical_potentials: DVector<f64>,
    hessian: DMatrix<f64>,
}

impl ExcessTerms {
    fn new(interactions: &InteractionMatrix, x: &DVector<f64>, p_pa: f64, t_k: f64) -> Self {
        let m = x.len();
        let n = x.sum();
        let alphas = DVector::from_column_slice(interactions.alphas());
        let weighted = alphas.component_mul(x);
        let total = weighted.sum();
        let phi = &weighted / total;

        let scale = DMatrix::from_fn(m, m, |i, j| 2.0 / (alphas[i] + alphas[j]));
        // Molar value of (Σ α x) · ½ φᵀ B φ
        let molar = |b: &DMatrix<f64>| 0.5 * total * phi.dot(&(b * &phi)) / n;

        let b = interactions.w_matrix(p_pa, t_k).component_mul(&scale);
        let b_s = interactions.full_matrix(|w| w.s).component_mul(&scale);
        let b_v = interactions.full_matrix(|w| w.v).component_mul(&scale);

        let b_phi = &b * &phi;
        let q = phi.dot(&b_phi);
        let chemical_potentials = DVector::from_fn(m, |l, _| alphas[l] * (b_phi[l] - 0.5 * q));
        let hessian = DMatrix::from_fn(m, m, |l, k| {
            alphas[l] * alphas[k] / total * (b[(l, k)] - b_phi[l] - b_phi[k] + q)
        });

        Self {
            gibbs: molar(&b),
            entropy: molar(&b_s),
            volume: molar(&b_v),
            chemical_potentials,
            hessian,
        }
    }
}
