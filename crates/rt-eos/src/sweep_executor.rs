//! Sweep execution: end-member states across isotherms, isobars and P-T grids.
//!
//! Records are shared read-only between rayon workers. A single failing
//! point fails the whole sweep; partial tables are never returned.

use crate::error::{EosError, EosResult};
use crate::model::evaluate;
use crate::params::EndMemberParameters;
use crate::state::EosState;
use crate::sweeps::{SweepDefinition, SweepVariable};
use rayon::prelude::*;
use rt_core::units::{Pressure, Temperature, k, kelvins, pa, pascals};

/// Result of an end-member property sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Swept variable
    pub variable: SweepVariable,
    /// Independent variable values (the sweep parameter)
    pub independent_values: Vec<f64>,
    /// Computed states, one per independent value
    pub states: Vec<EosState>,
}

impl SweepResult {
    pub fn volume_m3_per_mol(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.volume_m3_per_mol).collect()
    }

    pub fn density_kg_m3(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.density_kg_m3()).collect()
    }

    pub fn gibbs_j_per_mol(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.gibbs_j_per_mol).collect()
    }

    pub fn entropy_j_per_mol_k(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.entropy_j_per_mol_k).collect()
    }

    pub fn bulk_modulus_pa(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.k_t_pa).collect()
    }
}

/// Evaluate along an isotherm at `t`.
pub fn evaluate_isotherm(
    params: &EndMemberParameters,
    sweep: &SweepDefinition,
    t: Temperature,
) -> EosResult<SweepResult> {
    if sweep.variable != SweepVariable::Pressure {
        return Err(EosError::InvalidSweep {
            what: "isotherm requires a pressure sweep",
        });
    }
    let pressures = sweep.generate_points();
    let states = pressures
        .par_iter()
        .map(|&p_pa| evaluate(params, pa(p_pa), t))
        .collect::<EosResult<Vec<_>>>()?;
    tracing::debug!(
        record = params.name(),
        t_k = kelvins(t),
        points = states.len(),
        "isotherm evaluated"
    );
    Ok(SweepResult {
        variable: SweepVariable::Pressure,
        independent_values: pressures,
        states,
    })
}

/// Evaluate along an isobar at `p`.
pub fn evaluate_isobar(
    params: &EndMemberParameters,
    sweep: &SweepDefinition,
    p: Pressure,
) -> EosResult<SweepResult> {
    if sweep.variable != SweepVariable::Temperature {
        return Err(EosError::InvalidSweep {
            what: "isobar requires a temperature sweep",
        });
    }
    let temperatures = sweep.generate_points();
    let states = temperatures
        .par_iter()
        .map(|&t_k| evaluate(params, p, k(t_k)))
        .collect::<EosResult<Vec<_>>>()?;
    tracing::debug!(
        record = params.name(),
        p_pa = pascals(p),
        points = states.len(),
        "isobar evaluated"
    );
    Ok(SweepResult {
        variable: SweepVariable::Temperature,
        independent_values: temperatures,
        states,
    })
}

/// Evaluate every (P, T) pair of a grid. Rows follow `pressures_pa`,
/// columns follow `temperatures_k`.
pub fn evaluate_grid(
    params: &EndMemberParameters,
    pressures_pa: &[f64],
    temperatures_k: &[f64],
) -> EosResult<Vec<Vec<EosState>>> {
    pressures_pa
        .par_iter()
        .map(|&p_pa| {
            temperatures_k
                .iter()
                .map(|&t_k| evaluate(params, pa(p_pa), k(t_k)))
                .collect::<EosResult<Vec<_>>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::fixtures::forsterite;

    #[test]
    fn isotherm_is_ordered_and_monotonic() {
        let fo = forsterite();
        let sweep = SweepDefinition::pressure(1.0e5, 2.0e10, 11).unwrap();
        let result = evaluate_isotherm(&fo, &sweep, k(1200.0)).unwrap();
        assert_eq!(result.states.len(), 11);
        for (p, st) in result.independent_values.iter().zip(&result.states) {
            assert_eq!(*p, st.pressure_pa());
        }
        let v = result.volume_m3_per_mol();
        assert!(v.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn isobar_entropy_increases() {
        let fo = forsterite();
        let sweep = SweepDefinition::temperature(400.0, 2000.0, 9).unwrap();
        let result = evaluate_isobar(&fo, &sweep, pa(1.0e9)).unwrap();
        let s = result.entropy_j_per_mol_k();
        assert!(s.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn wrong_variable_is_rejected() {
        let fo = forsterite();
        let sweep = SweepDefinition::temperature(400.0, 2000.0, 9).unwrap();
        assert!(matches!(
            evaluate_isotherm(&fo, &sweep, k(1000.0)),
            Err(EosError::InvalidSweep { .. })
        ));
    }

    #[test]
    fn grid_matches_pointwise_evaluation() {
        let fo = forsterite();
        let ps = [1.0e5, 5.0e9, 1.0e10];
        let ts = [300.0, 1000.0];
        let grid = evaluate_grid(&fo, &ps, &ts).unwrap();
        assert_eq!(grid.len(), 3);
        for (i, row) in grid.iter().enumerate() {
            assert_eq!(row.len(), 2);
            for (j, st) in row.iter().enumerate() {
                assert_eq!(*st, evaluate(&fo, pa(ps[i]), k(ts[j])).unwrap());
            }
        }
    }

    #[test]
    fn grid_fails_without_partial_results() {
        let fo = forsterite();
        let err = evaluate_grid(&fo, &[1.0e5, 1.0e9], &[300.0, -5.0]).unwrap_err();
        assert!(matches!(err, EosError::Domain { .. }));
    }
}
