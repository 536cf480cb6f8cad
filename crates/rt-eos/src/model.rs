//! Equation-of-state trait and the modified Tait implementation.

use crate::error::{EosError, EosResult};
use crate::params::EndMemberParameters;
use crate::state::EosState;
use crate::tait::TaitConstants;
use crate::thermal::EinsteinThermalPressure;
use rt_core::ensure_finite;
use rt_core::units::{Pressure, Temperature, kelvins, kg_per_m3, pa, pascals};

/// Trait for end-member equations of state.
///
/// Implementations must be pure: the result depends only on the parameter
/// record and (P, T), so records can be shared read-only across threads.
pub trait EquationOfState: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Compute the full state at (P, T).
    fn state(
        &self,
        params: &EndMemberParameters,
        p: Pressure,
        t: Temperature,
    ) -> EosResult<EosState>;

    /// Pressure at which the end-member has `volume` [m³/mol] at `t`.
    fn pressure(
        &self,
        params: &EndMemberParameters,
        volume_m3_per_mol: f64,
        t: Temperature,
    ) -> EosResult<Pressure>;

    /// Molar volume [m³/mol] at (P, T).
    fn volume(&self, params: &EndMemberParameters, p: Pressure, t: Temperature) -> EosResult<f64> {
        Ok(self.state(params, p, t)?.volume_m3_per_mol)
    }

    /// Molar Gibbs energy [J/mol] at (P, T).
    fn gibbs(&self, params: &EndMemberParameters, p: Pressure, t: Temperature) -> EosResult<f64> {
        Ok(self.state(params, p, t)?.gibbs_j_per_mol)
    }
}

/// Modified Tait equation of state with Einstein thermal pressure
/// (Holland & Powell 2011).
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifiedTait;

impl ModifiedTait {
    pub fn new() -> Self {
        Self
    }
}

/// Evaluate the modified Tait equation of state at (P, T).
pub fn evaluate(params: &EndMemberParameters, p: Pressure, t: Temperature) -> EosResult<EosState> {
    ModifiedTait.state(params, p, t)
}

impl EquationOfState for ModifiedTait {
    fn name(&self) -> &str {
        "modified Tait"
    }

    fn state(
        &self,
        params: &EndMemberParameters,
        p: Pressure,
        t: Temperature,
    ) -> EosResult<EosState> {
        let p_pa = pascals(p);
        let t_k = kelvins(t);
        validation::validate_pressure(p_pa)?;
        validation::validate_temperature(t_k)?;
        tracing::trace!(record = params.name(), p_pa, t_k, "evaluating modified Tait state");

        let reference = params.reference();
        let (t0, p0) = (reference.temperature_k, reference.pressure_pa);
        let (h0, s0, v0, k0) = (params.h0(), params.s0(), params.v0(), params.k0());

        let tait = TaitConstants::from_params(params)?;
        let TaitConstants { a, b, c } = tait;

        let thermal = EinsteinThermalPressure::new(params);
        let pth = thermal.pressure(t_k);
        let dpth = thermal.dpdt(t_k);
        let d2pth = thermal.d2pdt2(t_k);

        let y0 = 1.0 - b * pth;
        if !(y0 > 0.0) {
            return Err(EosError::domain(
                "temperature",
                t_k,
                "thermal pressure exceeds the range of the Tait equation",
            ));
        }
        let x = p_pa - p0;
        let y = tait.compression_argument(x, pth)?;

        // Reference-pressure thermal part
        let cp_poly = params.cp();
        let int_cp = cp_poly.integral(t0, t_k);
        let int_cp_over_t = cp_poly.integral_over_t(t0, t_k);

        // Pressure part: F(Pth) = ∫ V dP, with F' = dF/dPth and F'' = d²F/dPth²
        let volume = ensure_finite(v0 * tait.volume_ratio(y), "volume")?;
        let int_vdp = v0 * tait.pressure_integral(x, y, y0);
        let (y_c, y0_c) = (y.powf(-c), y0.powf(-c));
        let f1 = v0 * a * (y0_c - y_c);
        let f2 = v0 * a * b * c * (y0.powf(-c - 1.0) - y.powf(-c - 1.0));

        let gibbs = ensure_finite(
            h0 + int_cp - t_k * (s0 + int_cp_over_t) + int_vdp,
            "gibbs energy",
        )?;
        let entropy = ensure_finite(s0 + int_cp_over_t - f1 * dpth, "entropy")?;
        let cp = ensure_finite(
            cp_poly.at(t_k) - t_k * (f2 * dpth * dpth + f1 * d2pth),
            "heat capacity",
        )?;

        let k_t = k0 * tait.bulk_modulus_ratio(y);
        if !(k_t > 0.0) {
            return Err(EosError::domain(
                "pressure",
                p_pa,
                "bulk modulus is non-positive at this pressure",
            ));
        }
        let alpha = dpth / k_t;
        let cv = cp - volume * t_k * alpha * alpha * k_t;
        if !(cv > 0.0) {
            return Err(EosError::domain(
                "temperature",
                t_k,
                "heat capacity is non-positive at this temperature",
            ));
        }

        let enthalpy = gibbs + t_k * entropy;
        Ok(EosState {
            pressure: p,
            temperature: t,
            volume_m3_per_mol: volume,
            density: kg_per_m3(params.molar_mass() / volume),
            gibbs_j_per_mol: gibbs,
            helmholtz_j_per_mol: gibbs - p_pa * volume,
            enthalpy_j_per_mol: enthalpy,
            internal_energy_j_per_mol: enthalpy - p_pa * volume,
            entropy_j_per_mol_k: entropy,
            cp_j_per_mol_k: cp,
            cv_j_per_mol_k: cv,
            alpha_per_k: alpha,
            k_t_pa: k_t,
            k_s_pa: k_t * cp / cv,
            grueneisen: alpha * k_t * volume / cv,
        })
    }

    fn pressure(
        &self,
        params: &EndMemberParameters,
        volume_m3_per_mol: f64,
        t: Temperature,
    ) -> EosResult<Pressure> {
        let t_k = kelvins(t);
        validation::validate_temperature(t_k)?;
        if !(volume_m3_per_mol.is_finite() && volume_m3_per_mol > 0.0) {
            return Err(EosError::domain(
                "volume",
                volume_m3_per_mol,
                "volume must be positive and finite",
            ));
        }
        let tait = TaitConstants::from_params(params)?;
        let pth = EinsteinThermalPressure::new(params).pressure(t_k);
        let y = tait.argument_for_volume_ratio(volume_m3_per_mol / params.v0())?;
        let p_pa = params.reference().pressure_pa + pth + (y - 1.0) / tait.b;
        Ok(pa(ensure_finite(p_pa, "pressure")?))
    }
}

/// Input checks shared by the evaluators.
pub(crate) mod validation {
    use super::*;

    /// Absolute temperature must be positive and finite.
    pub fn validate_temperature(t_k: f64) -> EosResult<()> {
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(EosError::domain(
                "temperature",
                t_k,
                "temperature must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Pressure must be non-negative and finite.
    pub fn validate_pressure(p_pa: f64) -> EosResult<()> {
        if !p_pa.is_finite() || p_pa < 0.0 {
            return Err(EosError::domain(
                "pressure",
                p_pa,
                "pressure must be non-negative and finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::fixtures::{forsterite, periclase};
    use rt_core::units::{gpa, k};
    use rt_core::{Tolerances, nearly_equal};

    const REL: Tolerances = Tolerances::relative(1e-8);

    #[test]
    fn reduces_to_reference_state() {
        for params in [periclase(), forsterite()] {
            let st = evaluate(&params, pa(1.0e5), k(298.15)).unwrap();
            assert_eq!(st.volume_m3_per_mol, params.v0());
            assert_eq!(st.entropy_j_per_mol_k, params.s0());
            assert!(nearly_equal(
                st.gibbs_j_per_mol,
                params.h0() - 298.15 * params.s0(),
                REL
            ));
            assert!(nearly_equal(st.enthalpy_j_per_mol, params.h0(), REL));
            assert!(nearly_equal(st.cp_j_per_mol_k, params.cp().at(298.15), REL));
            assert!(nearly_equal(st.k_t_pa, params.k0(), REL));
            assert!(nearly_equal(st.alpha_per_k, params.alpha0(), REL));
        }
    }

    #[test]
    fn continuous_across_reference_point() {
        let per = periclase();
        let at_ref = evaluate(&per, pa(1.0e5), k(298.15)).unwrap();
        for (dp, dt) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1e-6), (0.0, -1e-6)] {
            let near = evaluate(&per, pa(1.0e5 + dp), k(298.15 + dt)).unwrap();
            assert!((near.volume_m3_per_mol - at_ref.volume_m3_per_mol).abs() < 1e-15);
            assert!((near.gibbs_j_per_mol - at_ref.gibbs_j_per_mol).abs() < 1e-3);
            assert!((near.entropy_j_per_mol_k - at_ref.entropy_j_per_mol_k).abs() < 1e-6);
        }
    }

    #[test]
    fn periclase_at_10_gpa_and_1000_k() {
        let per = periclase();
        let t = k(1000.0);
        let high = evaluate(&per, gpa(10.0), t).unwrap();
        let low = evaluate(&per, pa(1.0e5), t).unwrap();
        let zero = evaluate(&per, pa(0.0), t).unwrap();
        assert!(high.volume_m3_per_mol < per.v0());
        assert!(high.volume_m3_per_mol < low.volume_m3_per_mol);
        // dG/dP = V > 0: compression raises the Gibbs energy.
        assert!(high.gibbs_j_per_mol > zero.gibbs_j_per_mol);
        assert!(high.entropy_j_per_mol_k < zero.entropy_j_per_mol_k);
        assert!(high.k_t_pa > low.k_t_pa);
    }

    #[test]
    fn derivatives_are_self_consistent() {
        let fo = forsterite();
        let (p, t) = (8.0e9, 1400.0);
        let st = evaluate(&fo, pa(p), k(t)).unwrap();
        let g = |p: f64, t: f64| evaluate(&fo, pa(p), k(t)).unwrap().gibbs_j_per_mol;
        let v = |p: f64, t: f64| evaluate(&fo, pa(p), k(t)).unwrap().volume_m3_per_mol;

        let (hp, ht) = (1.0e5, 1e-2);
        let dg_dp = (g(p + hp, t) - g(p - hp, t)) / (2.0 * hp);
        let dg_dt = (g(p, t + ht) - g(p, t - ht)) / (2.0 * ht);
        let dv_dp = (v(p + hp, t) - v(p - hp, t)) / (2.0 * hp);
        let dv_dt = (v(p, t + ht) - v(p, t - ht)) / (2.0 * ht);
        let s = |t: f64| evaluate(&fo, pa(p), k(t)).unwrap().entropy_j_per_mol_k;
        let ds_dt = (s(t + ht) - s(t - ht)) / (2.0 * ht);

        assert!((dg_dp - st.volume_m3_per_mol).abs() / st.volume_m3_per_mol < 1e-6);
        assert!((-dg_dt - st.entropy_j_per_mol_k).abs() / st.entropy_j_per_mol_k < 1e-5);
        assert!((-st.volume_m3_per_mol / dv_dp - st.k_t_pa).abs() / st.k_t_pa < 1e-5);
        assert!((dv_dt / st.volume_m3_per_mol - st.alpha_per_k).abs() / st.alpha_per_k < 1e-5);
        assert!((t * ds_dt - st.cp_j_per_mol_k).abs() / st.cp_j_per_mol_k < 1e-5);
    }

    #[test]
    fn thermodynamic_identities_hold() {
        let st = evaluate(&forsterite(), gpa(5.0), k(1200.0)).unwrap();
        let pv = st.pressure_pa() * st.volume_m3_per_mol;
        let t = st.temperature_k();
        assert!(nearly_equal(st.enthalpy_j_per_mol, st.gibbs_j_per_mol + t * st.entropy_j_per_mol_k, REL));
        assert!(nearly_equal(st.helmholtz_j_per_mol, st.gibbs_j_per_mol - pv, REL));
        assert!(nearly_equal(st.internal_energy_j_per_mol, st.enthalpy_j_per_mol - pv, REL));
        assert!(st.k_s_pa > st.k_t_pa);
        assert!(st.cp_j_per_mol_k > st.cv_j_per_mol_k);
        let expected_rho = 0.140_693_1 / st.volume_m3_per_mol;
        assert!(nearly_equal(st.density_kg_m3(), expected_rho, REL));
    }

    #[test]
    fn pressure_inverts_volume() {
        let fo = forsterite();
        let t = k(1600.0);
        let st = evaluate(&fo, gpa(12.0), t).unwrap();
        let p = ModifiedTait.pressure(&fo, st.volume_m3_per_mol, t).unwrap();
        assert!((pascals(p) - 12.0e9).abs() < 1.0);
    }

    #[test]
    fn rejects_out_of_domain_inputs() {
        let per = periclase();
        for (p, t) in [(1.0e5, 0.0), (1.0e5, -10.0), (1.0e5, f64::NAN), (-1.0, 300.0), (f64::INFINITY, 300.0)] {
            let err = evaluate(&per, pa(p), k(t)).unwrap_err();
            assert!(matches!(err, EosError::Domain { .. }), "{p} {t}: {err:?}");
        }
        assert!(ModifiedTait.pressure(&per, -1.0, k(300.0)).is_err());
    }

    #[test]
    fn singular_tait_constants_fail_at_evaluation() {
        let bad = EndMemberParameters::builder("bad", "MgO")
            .h0(-601_530.0)
            .s0(26.5)
            .v0(1.125e-5)
            .cp(crate::HeatCapacity::new(60.5, 0.000362, -535_800.0, -299.2))
            .alpha0(3.11e-5)
            .bulk_modulus(1.616e11, 3.95, -1.0e-10)
            .formula_units(2.0, 0.040_304_4)
            .build()
            .unwrap();
        let err = evaluate(&bad, gpa(1.0), k(1000.0)).unwrap_err();
        assert!(matches!(err, EosError::Domain { quantity: "Kdprime_0", .. }));
    }

    #[test]
    fn zero_thermal_expansion_has_no_thermal_pressure() {
        let quartz_like = EndMemberParameters::builder("q", "SiO2")
            .h0(-910_700.0)
            .s0(41.43)
            .v0(2.269e-5)
            .cp(crate::HeatCapacity::new(92.9, -0.000642, -714_900.0, -716.1))
            .alpha0(0.0)
            .bulk_modulus(7.3e10, 6.0, -8.2e-11)
            .formula_units(3.0, 0.060_084_3)
            .build()
            .unwrap();
        let hot = evaluate(&quartz_like, pa(1.0e5), k(800.0)).unwrap();
        assert_eq!(hot.volume_m3_per_mol, quartz_like.v0());
        assert_eq!(hot.alpha_per_k, 0.0);
        assert_eq!(hot.cp_j_per_mol_k, hot.cv_j_per_mol_k);
    }

    #[test]
    fn evaluation_is_pure() {
        let fo = forsterite();
        let a = evaluate(&fo, gpa(3.0), k(900.0)).unwrap();
        let b = evaluate(&fo, gpa(3.0), k(900.0)).unwrap();
        assert_eq!(a, b);
    }
}
