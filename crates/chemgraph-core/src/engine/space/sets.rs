use super::ChemSpace;
use crate::core::models::ids::{ContainerId, ContainerSetId, ReactionId, ReactionSetId};
use crate::core::models::set::{ChemObjectSet, ContainerSet, ContainerSetKind, ReactionSet};
use crate::engine::error::ChemError;
use std::cmp::Ordering;

impl ChemSpace {
    pub fn new_container_set(&mut self) -> ContainerSetId {
        self.insert_container_set(ContainerSet::new(ContainerSetKind::Molecules))
    }

    pub(crate) fn new_container_set_of_kind(&mut self, kind: ContainerSetKind) -> ContainerSetId {
        self.insert_container_set(ContainerSet::new(kind))
    }

    pub fn container_set(&self, id: ContainerSetId) -> Result<&ContainerSet, ChemError> {
        Ok(&self.container_set_entry(id)?.value)
    }

    pub fn set_members(
        &self,
        set: ContainerSetId,
    ) -> Result<&ChemObjectSet<ContainerId>, ChemError> {
        Ok(self.container_set(set)?.members())
    }

    pub fn set_member_at(
        &self,
        set: ContainerSetId,
        index: usize,
    ) -> Result<ContainerId, ChemError> {
        let members = self.set_members(set)?;
        members.get(index).ok_or(ChemError::IndexOutOfRange {
            index,
            len: members.len(),
        })
    }

    /// Ring sets hold rings only.
    fn ensure_set_accepts(
        &self,
        set: ContainerSetId,
        container: ContainerId,
    ) -> Result<(), ChemError> {
        match self.container_set(set)?.kind() {
            ContainerSetKind::Rings => self.ring_container(container).map(|_| ()),
            ContainerSetKind::Molecules => self.container(container).map(|_| ()),
        }
    }

    /// Appends `container` with multiplier 1.
    pub fn add_to_set(
        &mut self,
        set: ContainerSetId,
        container: ContainerId,
    ) -> Result<(), ChemError> {
        self.add_to_set_with_multiplier(set, container, 1.0)
    }

    pub fn add_to_set_with_multiplier(
        &mut self,
        set: ContainerSetId,
        container: ContainerId,
        multiplier: f64,
    ) -> Result<(), ChemError> {
        self.ensure_set_accepts(set, container)?;
        self.container_set_entry_mut(set)?
            .value
            .members
            .add_with_multiplier(container, multiplier);
        self.attach(container, set);
        self.notify_changed(set);
        Ok(())
    }

    /// Appends every member of `other`, keeping its multipliers.
    pub fn add_all_to_set(
        &mut self,
        set: ContainerSetId,
        other: ContainerSetId,
    ) -> Result<(), ChemError> {
        self.container_set(set)?;
        let entries = self.set_members(other)?.entries().to_vec();
        for entry in entries {
            self.add_to_set_with_multiplier(set, entry.item, entry.multiplier)?;
        }
        Ok(())
    }

    /// Multiplier of the first occurrence of `container`, or -1 when it is not a member.
    pub fn multiplier_of(
        &self,
        set: ContainerSetId,
        container: ContainerId,
    ) -> Result<f64, ChemError> {
        Ok(self.set_members(set)?.multiplier_of(container))
    }

    pub fn multiplier_at(&self, set: ContainerSetId, index: usize) -> Result<f64, ChemError> {
        let members = self.set_members(set)?;
        members.multiplier_at(index).ok_or(ChemError::IndexOutOfRange {
            index,
            len: members.len(),
        })
    }

    pub fn set_multiplier_at(
        &mut self,
        set: ContainerSetId,
        index: usize,
        multiplier: f64,
    ) -> Result<(), ChemError> {
        let members = &mut self.container_set_entry_mut(set)?.value.members;
        let len = members.len();
        if !members.set_multiplier_at(index, multiplier) {
            return Err(ChemError::IndexOutOfRange { index, len });
        }
        self.notify_changed(set);
        Ok(())
    }

    /// Sets the multiplier of the first occurrence of `container`; false when it is absent.
    pub fn set_multiplier(
        &mut self,
        set: ContainerSetId,
        container: ContainerId,
        multiplier: f64,
    ) -> Result<bool, ChemError> {
        let updated = self
            .container_set_entry_mut(set)?
            .value
            .members
            .set_multiplier(container, multiplier);
        if updated {
            self.notify_changed(set);
        }
        Ok(updated)
    }

    /// Replaces all multipliers at once. Returns false, changing nothing, when the slice
    /// length differs from the member count.
    pub fn set_multipliers(
        &mut self,
        set: ContainerSetId,
        multipliers: &[f64],
    ) -> Result<bool, ChemError> {
        let updated = self
            .container_set_entry_mut(set)?
            .value
            .members
            .set_multipliers(multipliers);
        if updated {
            self.notify_changed(set);
        }
        Ok(updated)
    }

    /// Removes every occurrence of `container` and returns how many there were.
    pub fn remove_from_set(
        &mut self,
        set: ContainerSetId,
        container: ContainerId,
    ) -> Result<usize, ChemError> {
        let removed = self
            .container_set_entry_mut(set)?
            .value
            .members
            .remove(container);
        if removed > 0 {
            self.detach(container, set);
            self.notify_changed(set);
        }
        Ok(removed)
    }

    pub fn remove_from_set_at(
        &mut self,
        set: ContainerSetId,
        index: usize,
    ) -> Result<ContainerId, ChemError> {
        let members = &mut self.container_set_entry_mut(set)?.value.members;
        let len = members.len();
        let entry = members
            .remove_at(index)
            .ok_or(ChemError::IndexOutOfRange { index, len })?;
        let still_member = members.contains(entry.item);
        if !still_member {
            self.detach(entry.item, set);
        }
        self.notify_changed(set);
        Ok(entry.item)
    }

    /// Swaps the first occurrence of `old` for `new`, keeping its multiplier.
    pub fn replace_in_set(
        &mut self,
        set: ContainerSetId,
        old: ContainerId,
        new: ContainerId,
    ) -> Result<bool, ChemError> {
        self.ensure_set_accepts(set, new)?;
        let members = &mut self.container_set_entry_mut(set)?.value.members;
        if !members.replace(old, new) {
            return Ok(false);
        }
        let still_member = members.contains(old);
        if !still_member {
            self.detach(old, set);
        }
        self.attach(new, set);
        self.notify_changed(set);
        Ok(true)
    }

    pub fn clear_set(&mut self, set: ContainerSetId) -> Result<(), ChemError> {
        let members = std::mem::take(&mut self.container_set_entry_mut(set)?.value.members);
        for container in members.iter() {
            self.detach(container, set);
        }
        self.notify_changed(set);
        Ok(())
    }

    /// Stable sort of the members; every multiplier moves with its member. The comparator
    /// sees the space so it can order by content.
    pub fn sort_set(
        &mut self,
        set: ContainerSetId,
        mut compare: impl FnMut(&ChemSpace, ContainerId, ContainerId) -> Ordering,
    ) -> Result<(), ChemError> {
        let mut members = self.set_members(set)?.clone();
        let space: &ChemSpace = self;
        members.sort_by(|a, b| compare(space, a, b));
        self.container_set_entry_mut(set)?.value.members = members;
        self.notify_changed(set);
        Ok(())
    }

    // --- Reaction sets ---

    pub fn new_reaction_set(&mut self) -> ReactionSetId {
        self.insert_reaction_set(ReactionSet::default())
    }

    pub fn reaction_set(&self, id: ReactionSetId) -> Result<&ReactionSet, ChemError> {
        Ok(&self.reaction_set_entry(id)?.value)
    }

    pub fn add_reaction_to_set(
        &mut self,
        set: ReactionSetId,
        reaction: ReactionId,
    ) -> Result<(), ChemError> {
        self.reaction(reaction)?;
        self.reaction_set_entry_mut(set)?
            .value
            .members
            .add(reaction);
        self.attach(reaction, set);
        self.notify_changed(set);
        Ok(())
    }

    /// Removes every occurrence of `reaction`.
    pub fn remove_reaction_from_set(
        &mut self,
        set: ReactionSetId,
        reaction: ReactionId,
    ) -> Result<usize, ChemError> {
        let removed = self
            .reaction_set_entry_mut(set)?
            .value
            .members
            .remove(reaction);
        if removed > 0 {
            self.detach(reaction, set);
            self.notify_changed(set);
        }
        Ok(removed)
    }

    pub fn clear_reaction_set(&mut self, set: ReactionSetId) -> Result<(), ChemError> {
        let members = std::mem::take(&mut self.reaction_set_entry_mut(set)?.value.members);
        for reaction in members.iter() {
            self.detach(reaction, set);
        }
        self.notify_changed(set);
        Ok(())
    }

    /// Reactions of the set in which `container` takes part in any role.
    pub fn reactions_involving(
        &self,
        set: ReactionSetId,
        container: ContainerId,
    ) -> Result<Vec<ReactionId>, ChemError> {
        let members = self.reaction_set(set)?.members();
        let mut result = Vec::new();
        for reaction in members.iter() {
            let mut participants = self.reaction(reaction)?.all_participants();
            if participants.any(|c| c == container) {
                result.push(reaction);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::CountingListener;
    use super::*;
    use std::cell::Cell;

    fn molecule_with_atoms(space: &mut ChemSpace, n: usize) -> ContainerId {
        let mol = space.new_atom_container();
        for _ in 0..n {
            let atom = space.new_atom("C");
            space.add_atom(mol, atom).unwrap();
        }
        mol
    }

    #[test]
    fn sort_keeps_multipliers_with_members() {
        let mut space = ChemSpace::new();
        let big = molecule_with_atoms(&mut space, 3);
        let small = molecule_with_atoms(&mut space, 1);
        let medium = molecule_with_atoms(&mut space, 2);
        let set = space.new_container_set();
        space.add_to_set_with_multiplier(set, big, 3.0).unwrap();
        space.add_to_set_with_multiplier(set, small, 1.0).unwrap();
        space.add_to_set_with_multiplier(set, medium, 2.0).unwrap();

        space
            .sort_set(set, |s, a, b| {
                let a = s.container(a).map(|c| c.atom_count()).unwrap_or_default();
                let b = s.container(b).map(|c| c.atom_count()).unwrap_or_default();
                a.cmp(&b)
            })
            .unwrap();

        let members: Vec<ContainerId> = space.set_members(set).unwrap().iter().collect();
        assert_eq!(members, vec![small, medium, big]);
        assert_eq!(
            space.set_members(set).unwrap().multipliers(),
            vec![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn comparator_is_not_called_for_trivial_sets() {
        let mut space = ChemSpace::new();
        let calls = Cell::new(0);
        let set = space.new_container_set();
        space
            .sort_set(set, |_, _, _| {
                calls.set(calls.get() + 1);
                Ordering::Equal
            })
            .unwrap();
        let mol = space.new_atom_container();
        space.add_to_set(set, mol).unwrap();
        space
            .sort_set(set, |_, _, _| {
                calls.set(calls.get() + 1);
                Ordering::Equal
            })
            .unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(space.set_member_at(set, 0).unwrap(), mol);
    }

    #[test]
    fn comparator_sees_the_live_set() {
        let mut space = ChemSpace::new();
        let a = molecule_with_atoms(&mut space, 2);
        let b = molecule_with_atoms(&mut space, 1);
        let set = space.new_container_set();
        space.add_to_set(set, a).unwrap();
        space.add_to_set(set, b).unwrap();
        let seen = Cell::new(0);

        space
            .sort_set(set, |s, x, y| {
                seen.set(s.set_members(set).map(|m| m.len()).unwrap_or_default());
                let x = s.container(x).map(|c| c.atom_count()).unwrap_or_default();
                let y = s.container(y).map(|c| c.atom_count()).unwrap_or_default();
                x.cmp(&y)
            })
            .unwrap();

        assert_eq!(seen.get(), 2);
        assert_eq!(space.set_member_at(set, 0).unwrap(), b);
    }

    #[test]
    fn remove_deletes_every_occurrence() {
        let mut space = ChemSpace::new();
        let a = space.new_atom_container();
        let b = space.new_atom_container();
        let set = space.new_container_set();
        space.add_to_set(set, a).unwrap();
        space.add_to_set(set, b).unwrap();
        space.add_to_set(set, a).unwrap();

        assert_eq!(space.remove_from_set(set, a).unwrap(), 2);
        assert_eq!(space.set_members(set).unwrap().len(), 1);
        assert_eq!(space.multiplier_of(set, a).unwrap(), -1.0);
        assert!(space.parents(a).unwrap().is_empty());
    }

    #[test]
    fn removing_one_occurrence_keeps_the_parent_link() {
        let mut space = ChemSpace::new();
        let a = space.new_atom_container();
        let set = space.new_container_set();
        space.add_to_set(set, a).unwrap();
        space.add_to_set(set, a).unwrap();
        space.remove_from_set_at(set, 0).unwrap();
        assert_eq!(space.set_members(set).unwrap().len(), 1);
        assert_eq!(space.parents(a).unwrap().len(), 1);
    }

    #[test]
    fn multiplier_updates_are_bounds_checked() {
        let mut space = ChemSpace::new();
        let a = space.new_atom_container();
        let set = space.new_container_set();
        space.add_to_set(set, a).unwrap();
        assert_eq!(space.multiplier_at(set, 0).unwrap(), 1.0);
        space.set_multiplier_at(set, 0, 4.0).unwrap();
        assert_eq!(space.multiplier_of(set, a).unwrap(), 4.0);
        assert_eq!(
            space.set_multiplier_at(set, 1, 2.0),
            Err(ChemError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(!space.set_multipliers(set, &[1.0, 2.0]).unwrap());
        assert!(space.set_multipliers(set, &[0.5]).unwrap());
        assert_eq!(space.multiplier_at(set, 0).unwrap(), 0.5);
    }

    #[test]
    fn member_changes_reach_set_listeners() {
        let mut space = ChemSpace::new();
        let mol = molecule_with_atoms(&mut space, 1);
        let atom = space.atom_at(mol, 0).unwrap();
        let set = space.new_container_set();
        space.add_to_set(set, mol).unwrap();
        let (listener, handle) = CountingListener::new();
        space.add_listener(set, &handle).unwrap();

        space.set_formal_charge(atom, Some(1)).unwrap();
        assert!(listener.changed());

        space.clear_set(set).unwrap();
        listener.reset();
        space.set_formal_charge(atom, Some(0)).unwrap();
        assert!(!listener.changed());
    }

    #[test]
    fn replace_keeps_position_and_multiplier() {
        let mut space = ChemSpace::new();
        let a = space.new_atom_container();
        let b = space.new_atom_container();
        let set = space.new_container_set();
        space.add_to_set_with_multiplier(set, a, 2.0).unwrap();
        assert!(space.replace_in_set(set, a, b).unwrap());
        assert_eq!(space.set_member_at(set, 0).unwrap(), b);
        assert_eq!(space.multiplier_of(set, b).unwrap(), 2.0);
        assert!(!space.replace_in_set(set, a, b).unwrap());
    }

    #[test]
    fn replace_leaves_later_duplicates_in_place() {
        let mut space = ChemSpace::new();
        let a = space.new_atom_container();
        let b = space.new_atom_container();
        let set = space.new_container_set();
        space.add_to_set(set, a).unwrap();
        space.add_to_set_with_multiplier(set, a, 3.0).unwrap();

        assert!(space.replace_in_set(set, a, b).unwrap());
        assert_eq!(space.set_member_at(set, 0).unwrap(), b);
        assert_eq!(space.set_member_at(set, 1).unwrap(), a);
        assert_eq!(space.multiplier_at(set, 1).unwrap(), 3.0);
        assert_eq!(space.parents(a).unwrap().len(), 1);
        assert_eq!(space.parents(b).unwrap().len(), 1);
    }

    #[test]
    fn ring_sets_reject_plain_containers() {
        let mut space = ChemSpace::new();
        let ring = space.new_ring_of_size(3, "C").unwrap();
        let mol = space.new_atom_container();
        let set = space.new_ring_set();
        space.add_to_set(set, ring).unwrap();

        let expected = ChemError::WrongKind {
            key: mol.into(),
            expected: "ring",
        };
        assert_eq!(space.add_to_set(set, mol), Err(expected.clone()));
        assert_eq!(space.replace_in_set(set, ring, mol), Err(expected));
        assert_eq!(space.set_member_at(set, 0).unwrap(), ring);
        assert!(space.parents(mol).unwrap().is_empty());

        let molecules = space.new_container_set();
        space.add_to_set(molecules, mol).unwrap();
        space.add_to_set(molecules, ring).unwrap();
        assert!(space.add_all_to_set(set, molecules).is_err());
    }

    #[test]
    fn add_all_copies_multipliers() {
        let mut space = ChemSpace::new();
        let a = space.new_atom_container();
        let source = space.new_container_set();
        space.add_to_set_with_multiplier(source, a, 5.0).unwrap();
        let target = space.new_container_set();
        space.add_all_to_set(target, source).unwrap();
        assert_eq!(space.multiplier_of(target, a).unwrap(), 5.0);
    }

    #[test]
    fn reaction_set_membership() {
        let mut space = ChemSpace::new();
        let mol = space.new_atom_container();
        let reaction = space.new_reaction();
        space.add_reactant(reaction, mol).unwrap();
        let other = space.new_reaction();
        let set = space.new_reaction_set();
        space.add_reaction_to_set(set, reaction).unwrap();
        space.add_reaction_to_set(set, other).unwrap();
        assert_eq!(space.reactions_involving(set, mol).unwrap(), vec![reaction]);
        assert_eq!(space.remove_reaction_from_set(set, other).unwrap(), 1);
        assert_eq!(space.reaction_set(set).unwrap().members().len(), 1);
    }
}
