//! Serialized dataset documents.

use crate::error::DatabaseResult;
use crate::units::UnitSystem;
use rt_eos::ParameterMap;
use serde::{Deserialize, Serialize};

/// A named table of flat end-member records in one unit system.
///
/// ```yaml
/// name: HP_2011
/// source: Holland and Powell (2011)
/// units: holland_powell
/// minerals:
///   - name: stv
///     formula: SiO2
///     H_0: -876.39
///     ...
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default)]
    pub minerals: Vec<ParameterMap>,
}

impl Dataset {
    pub fn from_yaml_str(text: &str) -> DatabaseResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> DatabaseResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_yaml_string(&self) -> DatabaseResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Records converted to SI, in file order.
    pub fn si_records(&self) -> impl Iterator<Item = ParameterMap> + '_ {
        self.minerals.iter().map(|record| self.units.to_si(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseError;
    use rt_eos::ParameterValue;

    const YAML: &str = "
name: tiny
units: holland_powell
minerals:
  - name: per
    formula: MgO
    H_0: -601.53
    Cp: [0.0605, 0.0362, -535.8, -0.2992]
";

    #[test]
    fn parses_yaml() {
        let ds = Dataset::from_yaml_str(YAML).unwrap();
        assert_eq!(ds.name, "tiny");
        assert_eq!(ds.source, None);
        assert_eq!(ds.units, UnitSystem::HollandPowell);
        assert_eq!(ds.minerals.len(), 1);
        assert_eq!(
            ds.minerals[0]["formula"],
            ParameterValue::Text("MgO".into())
        );
        assert!(matches!(ds.minerals[0]["Cp"], ParameterValue::List(ref c) if c.len() == 4));
    }

    #[test]
    fn si_records_are_converted() {
        let ds = Dataset::from_yaml_str(YAML).unwrap();
        let record = ds.si_records().next().unwrap();
        let ParameterValue::Number(h) = record["H_0"] else {
            panic!("H_0 is not a number");
        };
        assert!((h - -601_530.0).abs() < 1e-6);
    }

    #[test]
    fn json_and_yaml_agree() {
        let json = r#"{
            "name": "tiny",
            "units": "holland_powell",
            "minerals": [
                {"name": "per", "formula": "MgO", "H_0": -601.53,
                 "Cp": [0.0605, 0.0362, -535.8, -0.2992]}
            ]
        }"#;
        assert_eq!(
            Dataset::from_json_str(json).unwrap(),
            Dataset::from_yaml_str(YAML).unwrap()
        );
    }

    #[test]
    fn yaml_round_trip() {
        let ds = Dataset::from_yaml_str(YAML).unwrap();
        let text = ds.to_yaml_string().unwrap();
        assert_eq!(Dataset::from_yaml_str(&text).unwrap(), ds);
    }

    #[test]
    fn default_units_are_si() {
        let ds = Dataset::from_yaml_str("name: empty\n").unwrap();
        assert_eq!(ds.units, UnitSystem::Si);
        assert!(ds.minerals.is_empty());
    }

    #[test]
    fn syntax_errors_surface() {
        assert!(matches!(
            Dataset::from_yaml_str("name: [unclosed"),
            Err(DatabaseError::Yaml(_))
        ));
        assert!(matches!(
            Dataset::from_json_str("{"),
            Err(DatabaseError::Json(_))
        ));
    }
}
