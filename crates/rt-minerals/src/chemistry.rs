//! Chemical formulas and the atomic-mass table used to derive `n` and the
//! molar mass of an end-member.
//!
//! Formulas are element symbols followed by optional integer or decimal
//! counts, with parenthesised groups (`Ca3Al2(SiO4)3`, `Na0.5Al0.5SiO3`).

use crate::error::{DatabaseError, DatabaseResult};
use rt_eos::{EosError, EosResult, FormulaLookup, FormulaProperties};
use std::collections::BTreeMap;

/// Element counts of one formula unit.
pub type ElementCounts = BTreeMap<String, f64>;

/// Standard atomic weights [g/mol].
const STANDARD_ATOMIC_WEIGHTS: [(&str, f64); 58] = [
    ("H", 1.00794),
    ("He", 4.002602),
    ("Li", 6.941),
    ("Be", 9.012182),
    ("B", 10.811),
    ("C", 12.0107),
    ("N", 14.0067),
    ("O", 15.9994),
    ("F", 18.9984032),
    ("Ne", 20.1797),
    ("Na", 22.98976928),
    ("Mg", 24.3050),
    ("Al", 26.9815386),
    ("Si", 28.0855),
    ("P", 30.973762),
    ("S", 32.065),
    ("Cl", 35.453),
    ("Ar", 39.948),
    ("K", 39.0983),
    ("Ca", 40.078),
    ("Sc", 44.955912),
    ("Ti", 47.867),
    ("V", 50.9415),
    ("Cr", 51.9961),
    ("Mn", 54.938045),
    ("Fe", 55.845),
    ("Co", 58.933195),
    ("Ni", 58.6934),
    ("Cu", 63.546),
    ("Zn", 65.38),
    ("Ga", 69.723),
    ("Ge", 72.64),
    ("As", 74.92160),
    ("Se", 78.96),
    ("Br", 79.904),
    ("Kr", 83.798),
    ("Rb", 85.4678),
    ("Sr", 87.62),
    ("Y", 88.90585),
    ("Zr", 91.224),
    ("Nb", 92.90638),
    ("Mo", 95.96),
    ("Ag", 107.8682),
    ("Sn", 118.710),
    ("Sb", 121.760),
    ("I", 126.90447),
    ("Xe", 131.293),
    ("Cs", 132.9054519),
    ("Ba", 137.327),
    ("La", 138.90547),
    ("Ce", 140.116),
    ("Nd", 144.242),
    ("Hf", 178.49),
    ("W", 183.84),
    ("Pt", 195.084),
    ("Pb", 207.2),
    ("Th", 232.03806),
    ("U", 238.02891),
];

/// Element symbol to atomic mass [kg/mol].
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicMasses {
    masses: BTreeMap<String, f64>,
}

impl AtomicMasses {
    /// Table of standard atomic weights.
    pub fn standard() -> Self {
        Self::from_table(
            STANDARD_ATOMIC_WEIGHTS
                .iter()
                .map(|&(symbol, grams)| (symbol.to_string(), grams * 1.0e-3)),
        )
    }

    /// Custom table, masses in kg/mol.
    pub fn from_table(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            masses: entries.into_iter().collect(),
        }
    }

    /// Mass of one element [kg/mol].
    pub fn mass(&self, symbol: &str) -> Option<f64> {
        self.masses.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Atoms per formula unit and molar mass of `formula`.
    pub fn formula_mass(&self, formula: &str) -> DatabaseResult<FormulaProperties> {
        let counts = parse_formula(formula)?;
        let mut atoms = 0.0;
        let mut molar_mass = 0.0;
        for (symbol, count) in &counts {
            let mass = self
                .mass(symbol)
                .ok_or_else(|| DatabaseError::UnknownElement {
                    symbol: symbol.clone(),
                    formula: formula.to_string(),
                })?;
            atoms += count;
            molar_mass += count * mass;
        }
        Ok(FormulaProperties {
            atoms_per_formula_unit: atoms,
            molar_mass,
        })
    }
}

impl Default for AtomicMasses {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormulaLookup for AtomicMasses {
    fn formula_properties(&self, formula: &str) -> EosResult<FormulaProperties> {
        self.formula_mass(formula)
            .map_err(|err| EosError::Chemistry {
                formula: formula.to_string(),
                message: err.to_string(),
            })
    }
}

/// Element counts of `formula`; repeated elements are summed.
pub fn parse_formula(formula: &str) -> DatabaseResult<ElementCounts> {
    let malformed = |reason: &'static str| DatabaseError::MalformedFormula {
        formula: formula.to_string(),
        reason,
    };

    let chars: Vec<char> = formula.chars().filter(|c| !c.is_whitespace()).collect();
    let mut current = ElementCounts::new();
    let mut open_groups: Vec<ElementCounts> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '(' {
            open_groups.push(std::mem::take(&mut current));
            i += 1;
        } else if c == ')' {
            let Some(mut parent) = open_groups.pop() else {
                return Err(malformed("unbalanced ')'"));
            };
            i += 1;
            let count = read_count(&chars, &mut i).ok_or_else(|| malformed("bad count"))?;
            for (symbol, n) in std::mem::take(&mut current) {
                *parent.entry(symbol).or_insert(0.0) += n * count;
            }
            current = parent;
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            i += 1;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                symbol.push(chars[i]);
                i += 1;
            }
            let count = read_count(&chars, &mut i).ok_or_else(|| malformed("bad count"))?;
            *current.entry(symbol).or_insert(0.0) += count;
        } else {
            return Err(malformed("unexpected character"));
        }
    }

    if !open_groups.is_empty() {
        return Err(malformed("unbalanced '('"));
    }
    if current.is_empty() {
        return Err(malformed("no elements"));
    }
    Ok(current)
}

/// Optional count after an element or group; absent means 1.
fn read_count(chars: &[char], i: &mut usize) -> Option<f64> {
    let start = *i;
    while *i < chars.len() && (chars[*i].is_ascii_digit() || chars[*i] == '.') {
        *i += 1;
    }
    if *i == start {
        return Some(1.0);
    }
    let text: String = chars[start..*i].iter().collect();
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_formula() {
        let counts = parse_formula("Mg2SiO4").unwrap();
        assert_eq!(counts["Mg"], 2.0);
        assert_eq!(counts["Si"], 1.0);
        assert_eq!(counts["O"], 4.0);
    }

    #[test]
    fn groups_and_repeats() {
        let counts = parse_formula("Ca3Al2(SiO4)3").unwrap();
        assert_eq!(counts["Si"], 3.0);
        assert_eq!(counts["O"], 12.0);
        // Same element on several sites
        let counts = parse_formula("MgMg2Si3Mg3O12").unwrap();
        assert_eq!(counts["Mg"], 6.0);
        let counts = parse_formula("Mg(Fe(OH)2)2").unwrap();
        assert_eq!(counts["H"], 4.0);
        assert_eq!(counts["O"], 4.0);
        assert_eq!(counts["Fe"], 2.0);
    }

    #[test]
    fn decimal_counts() {
        let counts = parse_formula("Na0.5Al0.5SiO3").unwrap();
        assert_eq!(counts["Na"], 0.5);
        assert_eq!(counts["Al"], 0.5);
    }

    #[test]
    fn malformed_formulas() {
        for bad in ["", "mg2SiO4", "Mg2(SiO4", "Mg2SiO4)", "Mg1.2.3O", "Mg-O"] {
            assert!(
                matches!(parse_formula(bad), Err(DatabaseError::MalformedFormula { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn forsterite_mass() {
        let props = AtomicMasses::standard().formula_mass("Mg2SiO4").unwrap();
        assert_eq!(props.atoms_per_formula_unit, 7.0);
        assert!((props.molar_mass - 0.140_693_1).abs() < 1e-9);
    }

    #[test]
    fn unknown_element() {
        let err = AtomicMasses::standard().formula_mass("Qz2O").unwrap_err();
        assert!(matches!(err, DatabaseError::UnknownElement { ref symbol, .. } if symbol == "Qz"));
    }

    #[test]
    fn lookup_maps_to_chemistry_error() {
        let err = AtomicMasses::standard()
            .formula_properties("Qz2O")
            .unwrap_err();
        assert!(matches!(err, EosError::Chemistry { ref formula, .. } if formula == "Qz2O"));
    }

    #[test]
    fn custom_table() {
        let table = AtomicMasses::from_table([("X".to_string(), 0.01)]);
        let props = table.formula_mass("X3").unwrap();
        assert!((props.molar_mass - 0.03).abs() < 1e-15);
        assert_eq!(table.len(), 1);
    }
}
