use super::AtomEnvironment;
use crate::core::models::atom_type::{AtomType, Hybridization};
use crate::core::models::bond::BondOrder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const EMBEDDED_ATOM_TYPES: &str = include_str!("../../../data/atom_types.toml");
const EMBEDDED_ORIGIN: &str = "<embedded atom_types.toml>";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct AtomTypeRecord {
    symbol: String,
    max_bond_order: String,
    #[serde(default)]
    formal_charge: i32,
    formal_neighbour_count: Option<u32>,
    hybridization: Option<String>,
    valency: Option<u32>,
    covalent_radius: Option<f64>,
    #[serde(default)]
    hydrogen_bond_donor: bool,
    #[serde(default)]
    hydrogen_bond_acceptor: bool,
    #[serde(default)]
    aromatic: bool,
}

impl AtomTypeRecord {
    fn into_atom_type(self, name: &str) -> Result<AtomType, InvalidFieldError> {
        let invalid = |field: &'static str, value: &str| InvalidFieldError {
            field,
            value: value.to_string(),
        };
        let max_bond_order: BondOrder = self
            .max_bond_order
            .parse()
            .map_err(|_| invalid("max_bond_order", &self.max_bond_order))?;
        let hybridization = match &self.hybridization {
            Some(h) => Some(
                h.parse::<Hybridization>()
                    .map_err(|_| invalid("hybridization", h))?,
            ),
            None => None,
        };
        let mut atom_type = AtomType::named(name, &self.symbol);
        atom_type.max_bond_order = max_bond_order;
        atom_type.formal_charge = Some(self.formal_charge);
        atom_type.formal_neighbour_count = self.formal_neighbour_count;
        atom_type.hybridization = hybridization;
        atom_type.valency = self.valency;
        atom_type.covalent_radius = self.covalent_radius;
        atom_type.hydrogen_bond_donor = self.hydrogen_bond_donor;
        atom_type.hydrogen_bond_acceptor = self.hydrogen_bond_acceptor;
        atom_type.aromatic = self.aromatic;
        Ok(atom_type)
    }
}

#[derive(Debug)]
struct InvalidFieldError {
    field: &'static str,
    value: String,
}

#[derive(Debug, Error)]
pub enum RegistryLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value '{value}' for field '{field}' of atom type '{name}' in '{path}'")]
    InvalidField {
        path: String,
        name: String,
        field: &'static str,
        value: String,
    },
}

/// Named atom types, kept in name order.
#[derive(Debug, Clone, Default)]
pub struct AtomTypeRegistry {
    types: BTreeMap<String, AtomType>,
}

impl AtomTypeRegistry {
    /// The registry shipped with the crate.
    pub fn embedded() -> Result<Self, RegistryLoadError> {
        Self::from_toml_str(EMBEDDED_ATOM_TYPES, EMBEDDED_ORIGIN)
    }

    pub fn load(path: &Path) -> Result<Self, RegistryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, RegistryLoadError> {
        let records: BTreeMap<String, AtomTypeRecord> =
            toml::from_str(content).map_err(|e| RegistryLoadError::Toml {
                path: origin.to_string(),
                source: e,
            })?;
        let mut types = BTreeMap::new();
        for (name, record) in records {
            let atom_type =
                record
                    .into_atom_type(&name)
                    .map_err(|e| RegistryLoadError::InvalidField {
                        path: origin.to_string(),
                        name: name.clone(),
                        field: e.field,
                        value: e.value,
                    })?;
            types.insert(name, atom_type);
        }
        debug!(origin, count = types.len(), "Loaded atom type registry.");
        Ok(Self { types })
    }

    pub fn get(&self, name: &str) -> Option<&AtomType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types_for(&self, symbol: &str) -> impl Iterator<Item = &AtomType> {
        self.types
            .values()
            .filter(move |t| t.symbol() == Some(symbol))
    }

    /// The atom type fitting `env`: same symbol and formal charge, a maximum bond order
    /// equal to the environment's (isolated atoms count as single-bonded), and room for
    /// every neighbour. Among several fits the one with the fewest formal neighbours wins.
    pub fn find_match(&self, env: &AtomEnvironment) -> Option<&AtomType> {
        let wanted_order = match env.max_bond_order {
            BondOrder::Unset => BondOrder::Single,
            order => order,
        };
        self.types_for(&env.symbol)
            .filter(|t| t.formal_charge.unwrap_or(0) == env.formal_charge)
            .filter(|t| t.max_bond_order == wanted_order)
            .filter(|t| {
                t.formal_neighbour_count
                    .is_none_or(|n| n >= env.neighbour_count)
            })
            .min_by_key(|t| t.formal_neighbour_count.unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn env(symbol: &str, order: BondOrder, neighbours: u32) -> AtomEnvironment {
        AtomEnvironment {
            symbol: symbol.to_string(),
            formal_charge: 0,
            max_bond_order: order,
            neighbour_count: neighbours,
        }
    }

    #[test]
    fn embedded_registry_loads() {
        let registry = AtomTypeRegistry::embedded().unwrap();
        let sp2 = registry.get("C.sp2").unwrap();
        assert_eq!(sp2.max_bond_order, BondOrder::Double);
        assert_eq!(sp2.hybridization, Some(Hybridization::Sp2));
        assert_eq!(sp2.symbol(), Some("C"));
        assert!(registry.types_for("C").count() >= 3);
    }

    #[test]
    fn find_match_uses_bond_order_and_charge() {
        let registry = AtomTypeRegistry::embedded().unwrap();
        let carbonyl = registry
            .find_match(&env("O", BondOrder::Double, 1))
            .unwrap();
        assert_eq!(carbonyl.name.as_deref(), Some("O.sp2"));
        let methyl = registry
            .find_match(&env("C", BondOrder::Single, 1))
            .unwrap();
        assert_eq!(methyl.name.as_deref(), Some("C.sp3"));
        let isolated = registry.find_match(&env("C", BondOrder::Unset, 0)).unwrap();
        assert_eq!(isolated.name.as_deref(), Some("C.sp3"));

        let mut oxide = env("O", BondOrder::Single, 1);
        oxide.formal_charge = -1;
        let matched = registry.find_match(&oxide).unwrap();
        assert_eq!(matched.name.as_deref(), Some("O.minus"));
    }

    #[test]
    fn find_match_fails_for_unknown_elements() {
        let registry = AtomTypeRegistry::embedded().unwrap();
        assert!(registry.find_match(&env("Xe", BondOrder::Single, 1)).is_none());
    }

    #[test]
    fn find_match_respects_neighbour_capacity() {
        let registry = AtomTypeRegistry::embedded().unwrap();
        assert!(registry.find_match(&env("O", BondOrder::Single, 3)).is_none());
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = AtomTypeRegistry::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(RegistryLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = AtomTypeRegistry::load(&path);
        assert!(matches!(result, Err(RegistryLoadError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_invalid_bond_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.toml");
        fs::write(
            &path,
            r#"
            ["X.odd"]
            symbol = "C"
            max_bond_order = "Sesquialteral"
            "#,
        )
        .unwrap();
        let result = AtomTypeRegistry::load(&path);
        assert!(matches!(
            result,
            Err(RegistryLoadError::InvalidField {
                field: "max_bond_order",
                ..
            })
        ));
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.toml");
        fs::write(
            &path,
            r#"
            ["Si.sp3"]
            symbol = "Si"
            max_bond_order = "Single"
            formal_neighbour_count = 4
            hybridization = "SP3"
            "#,
        )
        .unwrap();
        let registry = AtomTypeRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 1);
        let si = registry.get("Si.sp3").unwrap();
        assert_eq!(si.formal_charge, Some(0));
        assert_eq!(si.formal_neighbour_count, Some(4));
    }
}
