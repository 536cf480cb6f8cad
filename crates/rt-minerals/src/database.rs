//! Validated end-member records keyed by name.

use crate::chemistry::AtomicMasses;
use crate::dataset::Dataset;
use crate::error::{DatabaseError, DatabaseResult};
use rt_eos::{EndMemberParameters, FormulaLookup, ParameterValue};
use std::collections::BTreeMap;

const HP_2011_YAML: &str = include_str!("../data/hp_2011.yaml");
const HPHH_2013_YAML: &str = include_str!("../data/hphh_2013.yaml");

/// Immutable set of end-members loaded from one dataset.
///
/// Records keep the order of the dataset file.
#[derive(Debug, Clone, PartialEq)]
pub struct MineralDatabase {
    name: String,
    source: Option<String>,
    minerals: Vec<EndMemberParameters>,
    index: BTreeMap<String, usize>,
}

impl MineralDatabase {
    /// Validate every record of `dataset`, deriving `n` and molar masses
    /// through `chemistry` where a record omits them.
    pub fn load(dataset: &Dataset, chemistry: &dyn FormulaLookup) -> DatabaseResult<Self> {
        let mut minerals = Vec::with_capacity(dataset.minerals.len());
        let mut index = BTreeMap::new();

        for (position, record) in dataset.si_records().enumerate() {
            let name = match record.get("name") {
                Some(ParameterValue::Text(name)) => name.clone(),
                _ => return Err(DatabaseError::UnnamedRecord { index: position }),
            };
            let params = EndMemberParameters::from_map(&name, &record, Some(chemistry))?;
            if index.insert(name.clone(), minerals.len()).is_some() {
                return Err(DatabaseError::DuplicateMineral { name });
            }
            minerals.push(params);
        }

        tracing::debug!(
            dataset = %dataset.name,
            units = ?dataset.units,
            count = minerals.len(),
            "mineral dataset loaded"
        );
        Ok(Self {
            name: dataset.name.clone(),
            source: dataset.source.clone(),
            minerals,
            index,
        })
    }

    /// Parse and load a YAML dataset with the standard atomic masses.
    pub fn from_yaml_str(text: &str) -> DatabaseResult<Self> {
        Self::load(&Dataset::from_yaml_str(text)?, &AtomicMasses::standard())
    }

    /// Parse and load a JSON dataset with the standard atomic masses.
    pub fn from_json_str(text: &str) -> DatabaseResult<Self> {
        Self::load(&Dataset::from_json_str(text)?, &AtomicMasses::standard())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.minerals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minerals.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Record by exact name.
    pub fn get(&self, name: &str) -> DatabaseResult<&EndMemberParameters> {
        self.index
            .get(name)
            .map(|&i| &self.minerals[i])
            .ok_or_else(|| DatabaseError::UnknownMineral {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.minerals.iter().map(EndMemberParameters::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndMemberParameters> {
        self.minerals.iter()
    }

    /// Records whose name or formula contains `query`, ignoring ASCII case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&EndMemberParameters> {
        let query = query.trim().to_ascii_lowercase();
        self.minerals
            .iter()
            .filter(|m| {
                query.is_empty()
                    || m.name().to_ascii_lowercase().contains(&query)
                    || m.formula().to_ascii_lowercase().contains(&query)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a MineralDatabase {
    type Item = &'a EndMemberParameters;
    type IntoIter = std::slice::Iter<'a, EndMemberParameters>;

    fn into_iter(self) -> Self::IntoIter {
        self.minerals.iter()
    }
}

/// Holland and Powell (2011) stishovite, spinel and quartz.
///
/// Spinel's order-disorder and quartz's Landau parameters are carried in
/// the file but not evaluated.
pub fn hp_2011() -> DatabaseResult<MineralDatabase> {
    MineralDatabase::from_yaml_str(HP_2011_YAML)
}

/// The Holland et al. (2013) end-members for the deep mantle.
pub fn hphh_2013() -> DatabaseResult<MineralDatabase> {
    MineralDatabase::from_yaml_str(HPHH_2013_YAML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_eos::EosError;

    const PERICLASE: &str = "
name: test
units: si
minerals:
  - name: per
    formula: MgO
    H_0: -601530.0
    S_0: 26.5
    V_0: 1.125e-5
    Cp: [60.5, 0.000362, -535800.0, -299.2]
    a_0: 3.11e-5
    K_0: 1.616e11
    Kprime_0: 3.95
    Kdprime_0: -2.4e-11
";

    #[test]
    fn loads_and_derives_chemistry() {
        let db = MineralDatabase::from_yaml_str(PERICLASE).unwrap();
        assert_eq!(db.name(), "test");
        assert_eq!(db.len(), 1);
        let per = db.get("per").unwrap();
        assert_eq!(per.n(), 2.0);
        assert!((per.molar_mass() - 0.0403044).abs() < 1e-9);
    }

    #[test]
    fn unknown_mineral() {
        let db = MineralDatabase::from_yaml_str(PERICLASE).unwrap();
        assert!(matches!(
            db.get("fo"),
            Err(DatabaseError::UnknownMineral { ref name }) if name == "fo"
        ));
        assert!(!db.contains("fo"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let doubled = format!("{PERICLASE}{}", &PERICLASE[PERICLASE.find("  - name").unwrap()..]);
        assert!(matches!(
            MineralDatabase::from_yaml_str(&doubled),
            Err(DatabaseError::DuplicateMineral { ref name }) if name == "per"
        ));
    }

    #[test]
    fn unnamed_record_rejected() {
        let text = PERICLASE.replace("  - name: per\n    formula", "  - formula");
        assert!(matches!(
            MineralDatabase::from_yaml_str(&text),
            Err(DatabaseError::UnnamedRecord { index: 0 })
        ));
    }

    #[test]
    fn incomplete_record_names_missing_keys() {
        let text = PERICLASE.replace("    K_0: 1.616e11\n", "");
        match MineralDatabase::from_yaml_str(&text) {
            Err(DatabaseError::Eos(EosError::MissingParameter { record, keys })) => {
                assert_eq!(record, "per");
                assert_eq!(keys, vec!["K_0"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_element_surfaces_as_chemistry_error() {
        let text = PERICLASE.replace("formula: MgO", "formula: XyO");
        assert!(matches!(
            MineralDatabase::from_yaml_str(&text),
            Err(DatabaseError::Eos(EosError::Chemistry { .. }))
        ));
    }

    #[test]
    fn search_ignores_case() {
        let db = hphh_2013().unwrap();
        let hits: Vec<&str> = db.search("MGSIO3").iter().map(|m| m.name()).collect();
        assert!(hits.contains(&"mpv"));
        assert!(db.search("  ").len() == db.len());
        assert!(db.search("unobtainium").is_empty());
    }
}
