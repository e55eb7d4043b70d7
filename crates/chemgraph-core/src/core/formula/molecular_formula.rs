use super::sum_charges;
use crate::core::models::isotope::Isotope;
use crate::core::object::Properties;
use std::collections::BTreeMap;
use std::fmt;

/// A multiset of isotopes with an aggregate charge.
///
/// Isotopes are matched with [`Isotope::is_same`]; insertion order of distinct isotopes is
/// preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularFormula {
    isotopes: Vec<(Isotope, u32)>,
    charge: Option<i32>,
    properties: Properties,
}

impl MolecularFormula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_isotope(&mut self, isotope: Isotope) -> &mut Self {
        self.add_isotope_count(isotope, 1)
    }

    pub fn add_isotope_count(&mut self, isotope: Isotope, count: u32) -> &mut Self {
        match self.isotopes.iter_mut().find(|(i, _)| i.is_same(&isotope)) {
            Some((_, n)) => *n = n.saturating_add(count),
            None => self.isotopes.push((isotope, count)),
        }
        self
    }

    /// Merges the isotope tally and charge of `other` into this formula.
    pub fn add_formula(&mut self, other: &MolecularFormula) -> &mut Self {
        for (isotope, count) in &other.isotopes {
            self.add_isotope_count(isotope.clone(), *count);
        }
        self.charge = sum_charges(self.charge, other.charge);
        self
    }

    /// Number of distinct isotopes.
    pub fn isotope_count(&self) -> usize {
        self.isotopes.len()
    }

    pub fn count_of(&self, isotope: &Isotope) -> u32 {
        self.isotopes
            .iter()
            .find(|(i, _)| i.is_same(isotope))
            .map_or(0, |(_, n)| *n)
    }

    /// Total number of atoms across all isotopes, saturating at `u32::MAX`.
    pub fn atom_count(&self) -> u32 {
        self.isotopes
            .iter()
            .fold(0u32, |total, &(_, n)| total.saturating_add(n))
    }

    /// Atoms of an element, summed over all its isotopes.
    pub fn element_count(&self, symbol: &str) -> u32 {
        self.isotopes
            .iter()
            .filter(|(i, _)| i.symbol() == Some(symbol))
            .fold(0u32, |total, &(_, n)| total.saturating_add(n))
    }

    pub fn contains(&self, isotope: &Isotope) -> bool {
        self.isotopes.iter().any(|(i, _)| i.is_same(isotope))
    }

    pub fn isotopes(&self) -> impl Iterator<Item = (&Isotope, u32)> {
        self.isotopes.iter().map(|(i, n)| (i, *n))
    }

    pub fn remove_isotope(&mut self, isotope: &Isotope) -> bool {
        let before = self.isotopes.len();
        self.isotopes.retain(|(i, _)| !i.is_same(isotope));
        before != self.isotopes.len()
    }

    pub fn clear(&mut self) {
        self.isotopes.clear();
    }

    pub fn charge(&self) -> Option<i32> {
        self.charge
    }

    pub fn set_charge(&mut self, charge: Option<i32>) {
        self.charge = charge;
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    fn element_totals(&self) -> BTreeMap<&str, u32> {
        let mut totals = BTreeMap::new();
        for (isotope, count) in &self.isotopes {
            if let Some(symbol) = isotope.symbol() {
                *totals.entry(symbol).or_insert(0) += count;
            }
        }
        totals
    }
}

/// Hill order: carbon, then hydrogen, then the rest alphabetically. Without carbon every
/// element is alphabetical.
impl fmt::Display for MolecularFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut totals = self.element_totals();
        if let Some(carbon) = totals.remove("C") {
            write_element(f, "C", carbon)?;
            if let Some(hydrogen) = totals.remove("H") {
                write_element(f, "H", hydrogen)?;
            }
        }
        for (symbol, count) in totals {
            write_element(f, symbol, count)?;
        }
        Ok(())
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, symbol: &str, count: u32) -> fmt::Result {
    if count == 1 {
        write!(f, "{symbol}")
    } else {
        write!(f, "{symbol}{count}")
    }
}
