//! Unit systems that datasets are tabulated in.

use rt_eos::{ParameterMap, ParameterValue};
use serde::{Deserialize, Serialize};

/// Scalar keys of the Holland-Powell tables and their factor to SI.
///
/// kJ -> J, kJ/kbar -> m^3, 1e-5/K -> 1/K, kbar -> Pa, 1/kbar -> 1/Pa.
const HOLLAND_POWELL_SCALARS: [(&str, f64); 6] = [
    ("H_0", 1.0e3),
    ("err_H_0", 1.0e3),
    ("V_0", 1.0e-5),
    ("a_0", 1.0e-5),
    ("K_0", 1.0e8),
    ("Kdprime_0", 1.0e-8),
];

/// Factors for `a + bT + cT^-2 + dT^-1/2` with kJ-based coefficients and
/// `b` tabulated in units of 1e-5.
const HOLLAND_POWELL_CP: [f64; 4] = [1.0e3, 1.0e-2, 1.0e3, 1.0e3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Values already in SI.
    #[default]
    Si,
    /// Units of the published Holland-Powell tables.
    HollandPowell,
}

impl UnitSystem {
    /// Copy of `record` with every known numeric field converted to SI.
    ///
    /// Values of the wrong type are passed through untouched so that record
    /// validation can report them.
    pub fn to_si(self, record: &ParameterMap) -> ParameterMap {
        let mut out = record.clone();
        if self == UnitSystem::Si {
            return out;
        }

        for (key, factor) in HOLLAND_POWELL_SCALARS {
            if let Some(ParameterValue::Number(v)) = out.get_mut(key) {
                *v *= factor;
            }
        }
        if let Some(ParameterValue::List(coefficients)) = out.get_mut("Cp") {
            if coefficients.len() == HOLLAND_POWELL_CP.len() {
                for (c, factor) in coefficients.iter_mut().zip(HOLLAND_POWELL_CP) {
                    *c *= factor;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stishovite_hp() -> ParameterMap {
        let mut map = ParameterMap::new();
        map.insert("name".into(), ParameterValue::Text("stv".into()));
        map.insert("H_0".into(), ParameterValue::Number(-876.39));
        map.insert("S_0".into(), ParameterValue::Number(24.0));
        map.insert("V_0".into(), ParameterValue::Number(1.401));
        map.insert(
            "Cp".into(),
            ParameterValue::List(vec![0.0681, 0.601, -1978.2, -0.0821]),
        );
        map.insert("a_0".into(), ParameterValue::Number(1.58));
        map.insert("K_0".into(), ParameterValue::Number(3090.0));
        map.insert("Kprime_0".into(), ParameterValue::Number(4.6));
        map.insert("Kdprime_0".into(), ParameterValue::Number(-0.0015));
        map
    }

    fn number(map: &ParameterMap, key: &str) -> f64 {
        match map[key] {
            ParameterValue::Number(v) => v,
            ref other => panic!("{key} is {other:?}"),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs()
    }

    #[test]
    fn holland_powell_to_si() {
        let si = UnitSystem::HollandPowell.to_si(&stishovite_hp());
        assert!(close(number(&si, "H_0"), -876_390.0));
        assert_eq!(number(&si, "S_0"), 24.0);
        assert!(close(number(&si, "V_0"), 1.401e-5));
        assert!(close(number(&si, "a_0"), 1.58e-5));
        assert!(close(number(&si, "K_0"), 3.09e11));
        assert_eq!(number(&si, "Kprime_0"), 4.6);
        assert!(close(number(&si, "Kdprime_0"), -1.5e-11));
        let ParameterValue::List(cp) = &si["Cp"] else {
            panic!("Cp is not a list");
        };
        let expected = [68.1, 6.01e-3, -1_978_200.0, -82.1];
        for (c, e) in cp.iter().zip(expected) {
            assert!(close(*c, e), "{c} != {e}");
        }
    }

    #[test]
    fn si_is_identity() {
        let map = stishovite_hp();
        assert_eq!(UnitSystem::Si.to_si(&map), map);
    }

    #[test]
    fn wrong_types_pass_through() {
        let mut map = stishovite_hp();
        map.insert("K_0".into(), ParameterValue::Text("stiff".into()));
        map.insert("Cp".into(), ParameterValue::List(vec![1.0, 2.0]));
        let si = UnitSystem::HollandPowell.to_si(&map);
        assert_eq!(si["K_0"], ParameterValue::Text("stiff".into()));
        assert_eq!(si["Cp"], ParameterValue::List(vec![1.0, 2.0]));
    }

    #[test]
    fn deserializes_snake_case() {
        let units: UnitSystem = serde_yaml::from_str("holland_powell").unwrap();
        assert_eq!(units, UnitSystem::HollandPowell);
        let units: UnitSystem = serde_json::from_str("\"si\"").unwrap();
        assert_eq!(units, UnitSystem::Si);
    }
}
