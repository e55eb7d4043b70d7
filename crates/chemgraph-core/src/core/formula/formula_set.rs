use super::molecular_formula::MolecularFormula;
use crate::core::models::set::{ABSENT_MULTIPLIER, DEFAULT_MULTIPLIER, SetEntry};
use std::cmp::Ordering;

/// An ordered list of molecular formulas, e.g. candidate formulas for a measured mass.
///
/// Each formula carries a multiplier (1 unless given) that moves with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularFormulaSet {
    entries: Vec<SetEntry<MolecularFormula>>,
}

impl MolecularFormulaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, formula: MolecularFormula) {
        self.add_with_multiplier(formula, DEFAULT_MULTIPLIER);
    }

    pub fn add_with_multiplier(&mut self, formula: MolecularFormula, multiplier: f64) {
        self.entries.push(SetEntry {
            item: formula,
            multiplier,
        });
    }

    /// Appends every formula of `other` that this set does not already contain, keeping
    /// its multiplier.
    pub fn add_set(&mut self, other: &MolecularFormulaSet) {
        for entry in &other.entries {
            if !self.contains(&entry.item) {
                self.entries.push(entry.clone());
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&MolecularFormula> {
        self.entries.get(index).map(|e| &e.item)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MolecularFormula> {
        self.entries.get_mut(index).map(|e| &mut e.item)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn contains(&self, formula: &MolecularFormula) -> bool {
        self.entries.iter().any(|e| &e.item == formula)
    }

    /// Multiplier at `index`, or [`ABSENT_MULTIPLIER`] past the end.
    pub fn multiplier_at(&self, index: usize) -> f64 {
        self.entries
            .get(index)
            .map_or(ABSENT_MULTIPLIER, |e| e.multiplier)
    }

    /// Multiplier of the first formula equal to `formula`, or [`ABSENT_MULTIPLIER`].
    pub fn multiplier_of(&self, formula: &MolecularFormula) -> f64 {
        self.entries
            .iter()
            .find(|e| &e.item == formula)
            .map_or(ABSENT_MULTIPLIER, |e| e.multiplier)
    }

    pub fn multipliers(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.multiplier).collect()
    }

    /// Returns `false` if `index` is out of range.
    pub fn set_multiplier_at(&mut self, index: usize, multiplier: f64) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.multiplier = multiplier;
                true
            }
            None => false,
        }
    }

    /// Sets the multiplier of the first formula equal to `formula`.
    pub fn set_multiplier(&mut self, formula: &MolecularFormula, multiplier: f64) -> bool {
        match self.entries.iter_mut().find(|e| &e.item == formula) {
            Some(entry) => {
                entry.multiplier = multiplier;
                true
            }
            None => false,
        }
    }

    /// Replaces all multipliers at once; `false` (and no change) on a length mismatch.
    pub fn set_multipliers(&mut self, multipliers: &[f64]) -> bool {
        if multipliers.len() != self.entries.len() {
            return false;
        }
        for (entry, &multiplier) in self.entries.iter_mut().zip(multipliers) {
            entry.multiplier = multiplier;
        }
        true
    }

    /// Removes every formula equal to `formula`.
    pub fn remove(&mut self, formula: &MolecularFormula) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| &e.item != formula);
        before - self.entries.len()
    }

    pub fn remove_at(&mut self, index: usize) -> Option<MolecularFormula> {
        (index < self.entries.len()).then(|| self.entries.remove(index).item)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stable sort; multipliers move with their formulas. The comparator is never called
    /// for sets with fewer than two formulas.
    pub fn sort_by(
        &mut self,
        mut compare: impl FnMut(&MolecularFormula, &MolecularFormula) -> Ordering,
    ) {
        if self.entries.len() < 2 {
            return;
        }
        self.entries.sort_by(|a, b| compare(&a.item, &b.item));
    }
}

/// Formulas of a [`MolecularFormulaSet`] in order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, SetEntry<MolecularFormula>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a MolecularFormula;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a MolecularFormulaSet {
    type Item = &'a MolecularFormula;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<MolecularFormula> for MolecularFormulaSet {
    fn from_iter<I: IntoIterator<Item = MolecularFormula>>(iter: I) -> Self {
        let mut set = Self::new();
        for formula in iter {
            set.add(formula);
        }
        set
    }
}
