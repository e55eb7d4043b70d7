use crate::core::models::atom::Atom;
use crate::core::models::isotope::Isotope;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const EMBEDDED_ISOTOPES: &str = include_str!("../../../data/isotopes.csv");
const EMBEDDED_ORIGIN: &str = "<embedded isotopes.csv>";

#[derive(Debug, Deserialize, Clone, PartialEq)]
struct IsotopeRecord {
    symbol: String,
    atomic_number: u32,
    mass_number: u32,
    exact_mass: f64,
    natural_abundance: f64,
}

/// Known isotopes grouped by element symbol. Abundances are in percent.
#[derive(Debug, Clone, Default)]
pub struct IsotopeTable {
    by_symbol: HashMap<String, Vec<Isotope>>,
}

#[derive(Debug, Error)]
pub enum IsotopeTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

impl IsotopeTable {
    /// The table shipped with the crate.
    pub fn embedded() -> Result<Self, IsotopeTableError> {
        Self::from_csv_str(EMBEDDED_ISOTOPES, EMBEDDED_ORIGIN)
    }

    pub fn load(path: &Path) -> Result<Self, IsotopeTableError> {
        let content = std::fs::read_to_string(path).map_err(|e| IsotopeTableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_csv_str(&content, &path.to_string_lossy())
    }

    pub fn from_csv_str(content: &str, origin: &str) -> Result<Self, IsotopeTableError> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut by_symbol: HashMap<String, Vec<Isotope>> = HashMap::new();
        for result in reader.deserialize::<IsotopeRecord>() {
            let record = result.map_err(|e| IsotopeTableError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            let isotope = Isotope::with_exact_mass(
                &record.symbol,
                record.atomic_number,
                record.mass_number,
                record.exact_mass,
                record.natural_abundance,
            );
            by_symbol.entry(record.symbol).or_default().push(isotope);
        }
        debug!(origin, elements = by_symbol.len(), "Loaded isotope table.");
        Ok(Self { by_symbol })
    }

    pub fn isotopes(&self, symbol: &str) -> &[Isotope] {
        self.by_symbol
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn isotope(&self, symbol: &str, mass_number: u32) -> Option<&Isotope> {
        self.isotopes(symbol)
            .iter()
            .find(|i| i.mass_number == Some(mass_number))
    }

    /// The most abundant isotope of an element.
    pub fn major_isotope(&self, symbol: &str) -> Option<&Isotope> {
        self.isotopes(symbol).iter().max_by(|a, b| {
            a.natural_abundance
                .unwrap_or(0.0)
                .total_cmp(&b.natural_abundance.unwrap_or(0.0))
        })
    }

    pub fn element_count(&self) -> usize {
        self.by_symbol.len()
    }

    fn reference_for(&self, isotope: &Isotope) -> Option<&Isotope> {
        let symbol = isotope.symbol()?;
        match isotope.mass_number {
            Some(mass_number) => self.isotope(symbol, mass_number),
            None => self.major_isotope(symbol),
        }
    }

    /// Fills unset atomic number, mass number, exact mass and abundance from the table,
    /// using the isotope's mass number when set and the major isotope otherwise.
    pub fn configure(&self, isotope: &mut Isotope) -> bool {
        let Some(reference) = self.reference_for(isotope).cloned() else {
            return false;
        };
        isotope.element.atomic_number = isotope.element.atomic_number.or(reference.atomic_number());
        isotope.mass_number = isotope.mass_number.or(reference.mass_number);
        isotope.exact_mass = isotope.exact_mass.or(reference.exact_mass);
        isotope.natural_abundance = isotope.natural_abundance.or(reference.natural_abundance);
        true
    }

    /// Same as [`IsotopeTable::configure`] for an atom. Pseudo atoms are left alone.
    pub fn configure_atom(&self, atom: &mut Atom) -> bool {
        if atom.is_pseudo() {
            return false;
        }
        let mut isotope = atom.isotope().clone();
        if !self.configure(&mut isotope) {
            return false;
        }
        atom.set_atomic_number(isotope.atomic_number());
        atom.set_mass_number(isotope.mass_number);
        atom.set_natural_abundance(isotope.natural_abundance);
        atom.set_exact_mass(isotope.exact_mass).is_ok()
    }
}
