//! Thermodynamic state of an end-member at (P, T).

use rt_core::units::{Density, Pressure, Temperature, kelvins, pascals};
use uom::si::mass_density::kilogram_per_cubic_meter;

/// Self-consistent state produced by an equation of state.
///
/// Molar quantities are per mole of formula units. Computed on demand and
/// never cached; two evaluations at the same (P, T) are identical.
#[derive(Debug, Clone, PartialEq)]
pub struct EosState {
    pub pressure: Pressure,
    pub temperature: Temperature,
    /// Molar volume [m³/mol]
    pub volume_m3_per_mol: f64,
    pub density: Density,
    /// Gibbs energy [J/mol]
    pub gibbs_j_per_mol: f64,
    /// Helmholtz energy [J/mol]
    pub helmholtz_j_per_mol: f64,
    /// Enthalpy [J/mol]
    pub enthalpy_j_per_mol: f64,
    /// Internal energy [J/mol]
    pub internal_energy_j_per_mol: f64,
    /// Entropy [J/(K·mol)]
    pub entropy_j_per_mol_k: f64,
    /// Isobaric heat capacity [J/(K·mol)]
    pub cp_j_per_mol_k: f64,
    /// Isochoric heat capacity [J/(K·mol)]
    pub cv_j_per_mol_k: f64,
    /// Volumetric thermal expansivity [1/K]
    pub alpha_per_k: f64,
    /// Isothermal bulk modulus [Pa]
    pub k_t_pa: f64,
    /// Adiabatic bulk modulus [Pa]
    pub k_s_pa: f64,
    /// Thermodynamic Grüneisen parameter
    pub grueneisen: f64,
}

impl EosState {
    pub fn pressure_pa(&self) -> f64 {
        pascals(self.pressure)
    }

    pub fn temperature_k(&self) -> f64 {
        kelvins(self.temperature)
    }

    pub fn density_kg_m3(&self) -> f64 {
        self.density.get::<kilogram_per_cubic_meter>()
    }

    /// True when both states sit at the same (P, T).
    pub fn same_conditions(&self, other: &EosState) -> bool {
        self.pressure_pa() == other.pressure_pa() && self.temperature_k() == other.temperature_k()
    }

    /// Return a summary string of the main properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "State(P={:.4e}Pa,T={:.1}K,V={:.5e}m³/mol,ρ={:.1}kg/m³,G={:.1}J/mol,S={:.3}J/K/mol,Cp={:.3}J/K/mol,KT={:.4e}Pa)",
            self.pressure_pa(),
            self.temperature_k(),
            self.volume_m3_per_mol,
            self.density_kg_m3(),
            self.gibbs_j_per_mol,
            self.entropy_j_per_mol_k,
            self.cp_j_per_mol_k,
            self.k_t_pa
        )
    }
}
