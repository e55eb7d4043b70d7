use super::ids::{ContainerId, ReactionId};
use std::cmp::Ordering;

pub const DEFAULT_MULTIPLIER: f64 = 1.0;
/// Returned by [`ChemObjectSet::multiplier_of`] for items that are not members.
pub const ABSENT_MULTIPLIER: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEntry<T> {
    pub item: T,
    pub multiplier: f64,
}

/// An ordered collection of keys, each with its own multiplier.
///
/// The same key may appear more than once. Every reordering moves an item together with
/// its multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct ChemObjectSet<T> {
    entries: Vec<SetEntry<T>>,
}

impl<T> Default for ChemObjectSet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + PartialEq> ChemObjectSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SetEntry<T>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.entries.iter().map(|e| e.item)
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.entries.get(index).map(|e| e.item)
    }

    pub fn contains(&self, item: T) -> bool {
        self.entries.iter().any(|e| e.item == item)
    }

    pub fn index_of(&self, item: T) -> Option<usize> {
        self.entries.iter().position(|e| e.item == item)
    }

    pub fn add(&mut self, item: T) {
        self.add_with_multiplier(item, DEFAULT_MULTIPLIER);
    }

    pub fn add_with_multiplier(&mut self, item: T, multiplier: f64) {
        self.entries.push(SetEntry { item, multiplier });
    }

    pub fn multiplier_at(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.multiplier)
    }

    /// Multiplier of the first occurrence of `item`, or [`ABSENT_MULTIPLIER`].
    pub fn multiplier_of(&self, item: T) -> f64 {
        self.entries
            .iter()
            .find(|e| e.item == item)
            .map_or(ABSENT_MULTIPLIER, |e| e.multiplier)
    }

    pub fn multipliers(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.multiplier).collect()
    }

    pub fn set_multiplier_at(&mut self, index: usize, multiplier: f64) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.multiplier = multiplier;
                true
            }
            None => false,
        }
    }

    /// Sets the multiplier of the first occurrence of `item`.
    pub fn set_multiplier(&mut self, item: T, multiplier: f64) -> bool {
        match self.index_of(item) {
            Some(index) => self.set_multiplier_at(index, multiplier),
            None => false,
        }
    }

    /// Applies `multipliers` positionally. Fails without changes on a length mismatch.
    pub fn set_multipliers(&mut self, multipliers: &[f64]) -> bool {
        if multipliers.len() != self.entries.len() {
            return false;
        }
        for (entry, &m) in self.entries.iter_mut().zip(multipliers) {
            entry.multiplier = m;
        }
        true
    }

    /// Removes every occurrence of `item`, returning how many were removed.
    pub fn remove(&mut self, item: T) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.item != item);
        before - self.entries.len()
    }

    pub fn remove_at(&mut self, index: usize) -> Option<SetEntry<T>> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Replaces the first occurrence of `old` by `new`, keeping its multiplier.
    pub fn replace(&mut self, old: T, new: T) -> bool {
        match self.entries.iter_mut().find(|e| e.item == old) {
            Some(entry) => {
                entry.item = new;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stable sort of items (with their multipliers). The comparator is never called for
    /// sets with fewer than two members.
    pub fn sort_by(&mut self, mut compare: impl FnMut(T, T) -> Ordering) {
        if self.entries.len() < 2 {
            return;
        }
        self.entries.sort_by(|a, b| compare(a.item, b.item));
    }

    /// Same entries with each item passed through `f`; entries mapping to `None` are dropped.
    pub fn map_items<U>(&self, mut f: impl FnMut(T) -> Option<U>) -> ChemObjectSet<U> {
        ChemObjectSet {
            entries: self
                .entries
                .iter()
                .filter_map(|e| {
                    f(e.item).map(|item| SetEntry {
                        item,
                        multiplier: e.multiplier,
                    })
                })
                .collect(),
        }
    }
}

/// What a set of atom containers holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerSetKind {
    #[default]
    Molecules,
    Rings,
}

/// A set of atom containers; a ring set when its kind is [`ContainerSetKind::Rings`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSet {
    pub(crate) kind: ContainerSetKind,
    pub(crate) members: ChemObjectSet<ContainerId>,
}

impl ContainerSet {
    pub fn new(kind: ContainerSetKind) -> Self {
        Self {
            kind,
            members: ChemObjectSet::new(),
        }
    }

    pub fn kind(&self) -> ContainerSetKind {
        self.kind
    }

    pub fn members(&self) -> &ChemObjectSet<ContainerId> {
        &self.members
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionSet {
    pub(crate) members: ChemObjectSet<ReactionId>,
}

impl ReactionSet {
    pub fn members(&self) -> &ChemObjectSet<ReactionId> {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn add_uses_default_multiplier() {
        let mut set = ChemObjectSet::new();
        set.add(7u32);
        assert_eq!(set.multiplier_at(0), Some(1.0));
        assert_eq!(set.multiplier_of(7), 1.0);
    }

    #[test]
    fn multiplier_of_absent_item_is_sentinel() {
        let set: ChemObjectSet<u32> = ChemObjectSet::new();
        assert_eq!(set.multiplier_of(3), ABSENT_MULTIPLIER);
    }

    #[test]
    fn duplicates_are_kept_and_removed_together() {
        let mut set = ChemObjectSet::new();
        set.add(1u32);
        set.add(2);
        set.add(1);
        assert_eq!(set.len(), 3);
        assert_eq!(set.remove(1), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn set_multipliers_rejects_length_mismatch() {
        let mut set = ChemObjectSet::new();
        set.add(1u32);
        set.add(2);
        assert!(!set.set_multipliers(&[3.0]));
        assert_eq!(set.multipliers(), vec![1.0, 1.0]);
        assert!(set.set_multipliers(&[3.0, 4.0]));
        assert_eq!(set.multipliers(), vec![3.0, 4.0]);
    }

    #[test]
    fn set_multiplier_targets_first_occurrence() {
        let mut set = ChemObjectSet::new();
        set.add(1u32);
        set.add(1);
        assert!(set.set_multiplier(1, 5.0));
        assert_eq!(set.multipliers(), vec![5.0, 1.0]);
        assert!(!set.set_multiplier(9, 5.0));
    }

    #[test]
    fn sort_moves_multipliers_with_items() {
        let mut set = ChemObjectSet::new();
        set.add_with_multiplier(3u32, 30.0);
        set.add_with_multiplier(1, 10.0);
        set.add_with_multiplier(2, 20.0);
        set.sort_by(|a, b| a.cmp(&b));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(set.multipliers(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn sort_never_calls_comparator_for_fewer_than_two_members() {
        let calls = Cell::new(0);
        let mut set: ChemObjectSet<u32> = ChemObjectSet::new();
        set.sort_by(|a, b| {
            calls.set(calls.get() + 1);
            a.cmp(&b)
        });
        set.add(1);
        set.sort_by(|a, b| {
            calls.set(calls.get() + 1);
            a.cmp(&b)
        });
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn replace_swaps_only_the_first_occurrence() {
        let mut set = ChemObjectSet::new();
        set.add_with_multiplier(1u32, 2.0);
        set.add(1);
        assert!(set.replace(1, 4));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![4, 1]);
        assert_eq!(set.multiplier_of(4), 2.0);
        assert_eq!(set.multiplier_of(1), 1.0);
        assert!(!set.replace(7, 4));
    }

    #[test]
    fn map_items_drops_unmapped_entries() {
        let mut set = ChemObjectSet::new();
        set.add_with_multiplier(1u32, 2.0);
        set.add(2);
        let mapped = set.map_items(|i| (i == 1).then_some(i * 10));
        assert_eq!(mapped.iter().collect::<Vec<_>>(), vec![10]);
        assert_eq!(mapped.multiplier_at(0), Some(2.0));
    }

    #[test]
    fn remove_at_out_of_range_is_none() {
        let mut set: ChemObjectSet<u32> = ChemObjectSet::new();
        assert!(set.remove_at(0).is_none());
    }
}
