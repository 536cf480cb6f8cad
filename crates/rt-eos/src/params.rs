//! End-member parameter records and their ingestion from flat maps.

use crate::error::{EosError, EosResult};
use crate::heat_capacity::HeatCapacity;
use rt_core::ReferenceState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value in a flat parameter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    List(Vec<f64>),
    Text(String),
}

/// Flat mapping of named fields, already in SI units.
pub type ParameterMap = BTreeMap<String, ParameterValue>;

/// Atoms per formula unit and molar mass of a chemical formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaProperties {
    pub atoms_per_formula_unit: f64,
    /// [kg/mol]
    pub molar_mass: f64,
}

/// Read-only chemistry service that resolves formulas.
///
/// Implementations are passed explicitly to whatever needs them; the
/// equation of state never parses formulas itself.
pub trait FormulaLookup: Send + Sync {
    fn formula_properties(&self, formula: &str) -> EosResult<FormulaProperties>;
}

/// Keys for order-disorder and Landau terms, which are not evaluated.
const IGNORED_PREFIXES: [&str; 2] = ["landau_", "BW_"];

const EOS_NAMES: [&str; 3] = ["mtait", "modified_tait", "hp_tmt"];

/// Immutable thermoelastic parameters of one end-member, in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct EndMemberParameters {
    name: String,
    formula: String,
    h0: f64,
    s0: f64,
    v0: f64,
    cp: HeatCapacity,
    alpha0: f64,
    k0: f64,
    kprime0: f64,
    kdprime0: f64,
    n: f64,
    molar_mass: f64,
    reference: ReferenceState,
    h0_uncertainty: Option<f64>,
    einstein_temperature: f64,
}

impl EndMemberParameters {
    pub fn builder(name: impl Into<String>, formula: impl Into<String>) -> EndMemberParametersBuilder {
        EndMemberParametersBuilder {
            name: name.into(),
            formula: formula.into(),
            ..Default::default()
        }
    }

    /// Build a record from a flat map of SI values.
    ///
    /// Every absent required key is reported in a single `MissingParameter`.
    /// `n` and `molar_mass` may be omitted when `chemistry` can resolve the
    /// record's `formula`.
    pub fn from_map(
        name: &str,
        map: &ParameterMap,
        chemistry: Option<&dyn FormulaLookup>,
    ) -> EosResult<Self> {
        let record = map
            .get("name")
            .and_then(|v| match v {
                ParameterValue::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .unwrap_or(name);

        if let Some(eos) = text(record, map, "equation_of_state")? {
            if !EOS_NAMES.contains(&eos.as_str()) {
                return Err(EosError::UnsupportedEquationOfState { name: eos });
            }
        }

        let ignored: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|k| IGNORED_PREFIXES.iter().any(|p| k.starts_with(p)))
            .collect();
        if !ignored.is_empty() {
            tracing::warn!(
                record,
                keys = ?ignored,
                "order-disorder/Landau parameters are not evaluated and will be ignored"
            );
        }

        let formula = text(record, map, "formula")?;
        let mut builder = EndMemberParameters::builder(record, formula.clone().unwrap_or_default());
        builder.h0 = number(record, map, "H_0")?;
        builder.s0 = number(record, map, "S_0")?;
        builder.v0 = number(record, map, "V_0")?;
        builder.alpha0 = number(record, map, "a_0")?;
        builder.k0 = number(record, map, "K_0")?;
        builder.kprime0 = number(record, map, "Kprime_0")?;
        builder.kdprime0 = number(record, map, "Kdprime_0")?;
        builder.h0_uncertainty = number(record, map, "err_H_0")?;
        builder.n = number(record, map, "n")?;
        builder.molar_mass = number(record, map, "molar_mass")?;

        builder.cp = match map.get("Cp") {
            None => None,
            Some(ParameterValue::List(values)) => {
                Some(HeatCapacity::from_slice(values).ok_or_else(|| EosError::InvalidParameter {
                    record: record.to_string(),
                    key: "Cp".to_string(),
                    reason: format!("expected 4 coefficients, found {}", values.len()),
                })?)
            }
            Some(_) => {
                return Err(EosError::InvalidParameter {
                    record: record.to_string(),
                    key: "Cp".to_string(),
                    reason: "expected a list of 4 coefficients".to_string(),
                });
            }
        };

        let t_ref = number(record, map, "T_0")?;
        let p_ref = number(record, map, "P_0")?;
        if t_ref.is_some() || p_ref.is_some() {
            let default = ReferenceState::default();
            builder.reference = ReferenceState::new(
                t_ref.unwrap_or(default.temperature_k),
                p_ref.unwrap_or(default.pressure_pa),
            )?;
        }

        if builder.n.is_none() || builder.molar_mass.is_none() {
            if let (Some(formula), Some(chemistry)) = (formula.as_deref(), chemistry) {
                let props = chemistry.formula_properties(formula)?;
                builder.n.get_or_insert(props.atoms_per_formula_unit);
                builder.molar_mass.get_or_insert(props.molar_mass);
            } else if formula.is_none() {
                // Neither the derived values nor the formula they come from.
                builder.missing_formula = true;
            }
        }

        builder.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Reference enthalpy [J/mol]
    pub fn h0(&self) -> f64 {
        self.h0
    }

    /// Reference entropy [J/(K·mol)]
    pub fn s0(&self) -> f64 {
        self.s0
    }

    /// Reference volume [m^3/mol]
    pub fn v0(&self) -> f64 {
        self.v0
    }

    pub fn cp(&self) -> &HeatCapacity {
        &self.cp
    }

    /// Thermal expansivity at the reference state [1/K]
    pub fn alpha0(&self) -> f64 {
        self.alpha0
    }

    /// Isothermal bulk modulus at the reference state [Pa]
    pub fn k0(&self) -> f64 {
        self.k0
    }

    pub fn kprime0(&self) -> f64 {
        self.kprime0
    }

    /// [1/Pa]
    pub fn kdprime0(&self) -> f64 {
        self.kdprime0
    }

    /// Atoms per formula unit
    pub fn n(&self) -> f64 {
        self.n
    }

    /// [kg/mol]
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    pub fn reference(&self) -> ReferenceState {
        self.reference
    }

    /// One-sigma uncertainty on `h0` [J/mol], when the source tabulates it.
    pub fn h0_uncertainty(&self) -> Option<f64> {
        self.h0_uncertainty
    }

    /// Einstein temperature `10636 / (S0/n + 6.44)` [K].
    pub fn einstein_temperature(&self) -> f64 {
        self.einstein_temperature
    }
}

/// Incrementally assembled record; `build` validates it.
#[derive(Debug, Clone, Default)]
pub struct EndMemberParametersBuilder {
    name: String,
    formula: String,
    h0: Option<f64>,
    s0: Option<f64>,
    v0: Option<f64>,
    cp: Option<HeatCapacity>,
    alpha0: Option<f64>,
    k0: Option<f64>,
    kprime0: Option<f64>,
    kdprime0: Option<f64>,
    n: Option<f64>,
    molar_mass: Option<f64>,
    reference: ReferenceState,
    h0_uncertainty: Option<f64>,
    missing_formula: bool,
}

impl EndMemberParametersBuilder {
    pub fn h0(mut self, v: f64) -> Self {
        self.h0 = Some(v);
        self
    }

    pub fn s0(mut self, v: f64) -> Self {
        self.s0 = Some(v);
        self
    }

    pub fn v0(mut self, v: f64) -> Self {
        self.v0 = Some(v);
        self
    }

    pub fn cp(mut self, cp: HeatCapacity) -> Self {
        self.cp = Some(cp);
        self
    }

    pub fn alpha0(mut self, v: f64) -> Self {
        self.alpha0 = Some(v);
        self
    }

    /// K0 [Pa], K'0, K''0 [1/Pa].
    pub fn bulk_modulus(mut self, k0: f64, kprime0: f64, kdprime0: f64) -> Self {
        self.k0 = Some(k0);
        self.kprime0 = Some(kprime0);
        self.kdprime0 = Some(kdprime0);
        self
    }

    /// Atoms per formula unit and molar mass [kg/mol].
    pub fn formula_units(mut self, n: f64, molar_mass: f64) -> Self {
        self.n = Some(n);
        self.molar_mass = Some(molar_mass);
        self
    }

    pub fn reference(mut self, reference: ReferenceState) -> Self {
        self.reference = reference;
        self
    }

    pub fn h0_uncertainty(mut self, v: f64) -> Self {
        self.h0_uncertainty = Some(v);
        self
    }

    pub fn build(self) -> EosResult<EndMemberParameters> {
        let mut missing = Vec::new();
        if self.missing_formula {
            missing.push("formula");
        }
        for (key, present) in [
            ("H_0", self.h0.is_some()),
            ("S_0", self.s0.is_some()),
            ("V_0", self.v0.is_some()),
            ("Cp", self.cp.is_some()),
            ("a_0", self.alpha0.is_some()),
            ("K_0", self.k0.is_some()),
            ("Kprime_0", self.kprime0.is_some()),
            ("Kdprime_0", self.kdprime0.is_some()),
            ("n", self.n.is_some() || self.missing_formula),
            ("molar_mass", self.molar_mass.is_some() || self.missing_formula),
        ] {
            if !present {
                missing.push(key);
            }
        }

        let (
            Some(h0),
            Some(s0),
            Some(v0),
            Some(cp),
            Some(alpha0),
            Some(k0),
            Some(kprime0),
            Some(kdprime0),
            Some(n),
            Some(molar_mass),
        ) = (
            self.h0,
            self.s0,
            self.v0,
            self.cp,
            self.alpha0,
            self.k0,
            self.kprime0,
            self.kdprime0,
            self.n,
            self.molar_mass,
        )
        else {
            return Err(EosError::MissingParameter {
                record: self.name,
                keys: missing.into_iter().map(String::from).collect(),
            });
        };

        for (what, v) in [
            ("H_0", h0),
            ("S_0", s0),
            ("V_0", v0),
            ("a_0", alpha0),
            ("K_0", k0),
            ("Kprime_0", kprime0),
            ("Kdprime_0", kdprime0),
            ("n", n),
            ("molar_mass", molar_mass),
        ] {
            rt_core::ensure_finite(v, what)?;
        }
        for (i, c) in cp.coefficients().into_iter().enumerate() {
            rt_core::ensure_finite(c, ["Cp[0]", "Cp[1]", "Cp[2]", "Cp[3]"][i])?;
        }

        if v0 <= 0.0 {
            return Err(EosError::domain("V_0", v0, "reference volume must be positive"));
        }
        if k0 <= 0.0 {
            return Err(EosError::domain("K_0", k0, "bulk modulus must be positive"));
        }
        if n <= 0.0 {
            return Err(EosError::domain("n", n, "atoms per formula unit must be positive"));
        }
        if molar_mass <= 0.0 {
            return Err(EosError::domain("molar_mass", molar_mass, "molar mass must be positive"));
        }

        let einstein_temperature = 10636.0 / (s0 / n + 6.44);
        if !einstein_temperature.is_finite() || einstein_temperature <= 0.0 {
            return Err(EosError::domain(
                "S_0",
                s0,
                "entropy per atom gives a non-positive Einstein temperature",
            ));
        }

        Ok(EndMemberParameters {
            name: self.name,
            formula: self.formula,
            h0,
            s0,
            v0,
            cp,
            alpha0,
            k0,
            kprime0,
            kdprime0,
            n,
            molar_mass,
            reference: self.reference,
            h0_uncertainty: self.h0_uncertainty,
            einstein_temperature,
        })
    }
}

fn number(record: &str, map: &ParameterMap, key: &str) -> EosResult<Option<f64>> {
    match map.get(key) {
        None => Ok(None),
        Some(ParameterValue::Number(v)) => Ok(Some(*v)),
        Some(_) => Err(EosError::InvalidParameter {
            record: record.to_string(),
            key: key.to_string(),
            reason: "expected a number".to_string(),
        }),
    }
}

fn text(record: &str, map: &ParameterMap, key: &str) -> EosResult<Option<String>> {
    match map.get(key) {
        None => Ok(None),
        Some(ParameterValue::Text(s)) => Ok(Some(s.clone())),
        Some(_) => Err(EosError::InvalidParameter {
            record: record.to_string(),
            key: key.to_string(),
            reason: "expected text".to_string(),
        }),
    }
}
