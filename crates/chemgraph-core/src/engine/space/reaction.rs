use super::ChemSpace;
use crate::core::models::ids::{ContainerId, ReactionId};
use crate::core::models::reaction::{Mapped, Mapping, Reaction, ReactionDirection, ReactionRole};
use crate::engine::error::ChemError;

impl ChemSpace {
    pub fn new_reaction(&mut self) -> ReactionId {
        self.insert_reaction(Reaction::default())
    }

    pub fn reaction(&self, id: ReactionId) -> Result<&Reaction, ChemError> {
        Ok(&self.reaction_entry(id)?.value)
    }

    /// Adds `container` in the given role with a stoichiometric coefficient.
    pub fn add_participant(
        &mut self,
        reaction: ReactionId,
        role: ReactionRole,
        container: ContainerId,
        coefficient: f64,
    ) -> Result<(), ChemError> {
        self.container(container)?;
        self.reaction_entry_mut(reaction)?
            .value
            .participants_mut(role)
            .add_with_multiplier(container, coefficient);
        self.attach(container, reaction);
        self.notify_changed(reaction);
        Ok(())
    }

    pub fn add_reactant(
        &mut self,
        reaction: ReactionId,
        container: ContainerId,
    ) -> Result<(), ChemError> {
        self.add_participant(reaction, ReactionRole::Reactant, container, 1.0)
    }

    pub fn add_reactant_with_coefficient(
        &mut self,
        reaction: ReactionId,
        container: ContainerId,
        coefficient: f64,
    ) -> Result<(), ChemError> {
        self.add_participant(reaction, ReactionRole::Reactant, container, coefficient)
    }

    pub fn add_product(
        &mut self,
        reaction: ReactionId,
        container: ContainerId,
    ) -> Result<(), ChemError> {
        self.add_participant(reaction, ReactionRole::Product, container, 1.0)
    }

    pub fn add_product_with_coefficient(
        &mut self,
        reaction: ReactionId,
        container: ContainerId,
        coefficient: f64,
    ) -> Result<(), ChemError> {
        self.add_participant(reaction, ReactionRole::Product, container, coefficient)
    }

    pub fn add_agent(
        &mut self,
        reaction: ReactionId,
        container: ContainerId,
    ) -> Result<(), ChemError> {
        self.add_participant(reaction, ReactionRole::Agent, container, 1.0)
    }

    /// Coefficient of `container` in `role`, or -1 when it does not take part in that role.
    pub fn coefficient(
        &self,
        reaction: ReactionId,
        role: ReactionRole,
        container: ContainerId,
    ) -> Result<f64, ChemError> {
        let participants = self.reaction(reaction)?.participants(role);
        Ok(participants.multiplier_of(container))
    }

    pub fn coefficients(
        &self,
        reaction: ReactionId,
        role: ReactionRole,
    ) -> Result<Vec<f64>, ChemError> {
        Ok(self.reaction(reaction)?.participants(role).multipliers())
    }

    pub fn set_coefficient(
        &mut self,
        reaction: ReactionId,
        role: ReactionRole,
        container: ContainerId,
        coefficient: f64,
    ) -> Result<bool, ChemError> {
        let updated = self
            .reaction_entry_mut(reaction)?
            .value
            .participants_mut(role)
            .set_multiplier(container, coefficient);
        if updated {
            self.notify_changed(reaction);
        }
        Ok(updated)
    }

    /// Replaces all coefficients of a role; false and no change on a length mismatch.
    pub fn set_coefficients(
        &mut self,
        reaction: ReactionId,
        role: ReactionRole,
        coefficients: &[f64],
    ) -> Result<bool, ChemError> {
        let updated = self
            .reaction_entry_mut(reaction)?
            .value
            .participants_mut(role)
            .set_multipliers(coefficients);
        if updated {
            self.notify_changed(reaction);
        }
        Ok(updated)
    }

    /// Removes every occurrence of `container` from `role`.
    pub fn remove_participant(
        &mut self,
        reaction: ReactionId,
        role: ReactionRole,
        container: ContainerId,
    ) -> Result<usize, ChemError> {
        let value = &mut self.reaction_entry_mut(reaction)?.value;
        let removed = value.participants_mut(role).remove(container);
        if removed == 0 {
            return Ok(0);
        }
        let still_member = value.all_participants().any(|c| c == container);
        if !still_member {
            self.detach(container, reaction);
        }
        self.notify_changed(reaction);
        Ok(removed)
    }

    pub fn direction(&self, reaction: ReactionId) -> Result<ReactionDirection, ChemError> {
        Ok(self.reaction(reaction)?.direction)
    }

    pub fn set_direction(
        &mut self,
        reaction: ReactionId,
        direction: ReactionDirection,
    ) -> Result<(), ChemError> {
        self.reaction_entry_mut(reaction)?.value.direction = direction;
        self.notify_changed(reaction);
        Ok(())
    }

    /// Records a correspondence between two atoms or two bonds. Both must exist.
    pub fn add_mapping(&mut self, reaction: ReactionId, mapping: Mapping) -> Result<(), ChemError> {
        for related in mapping.related() {
            match related {
                Mapped::Atom(atom) => self.atom(atom).map(|_| ())?,
                Mapped::Bond(bond) => self.bond(bond).map(|_| ())?,
            }
        }
        self.reaction_entry_mut(reaction)?
            .value
            .mappings
            .push(mapping);
        self.notify_changed(reaction);
        Ok(())
    }

    pub fn remove_mapping(
        &mut self,
        reaction: ReactionId,
        index: usize,
    ) -> Result<Mapping, ChemError> {
        let mappings = &mut self.reaction_entry_mut(reaction)?.value.mappings;
        if index >= mappings.len() {
            return Err(ChemError::IndexOutOfRange {
                index,
                len: mappings.len(),
            });
        }
        let mapping = mappings.remove(index);
        self.notify_changed(reaction);
        Ok(mapping)
    }

    pub fn mapping_count(&self, reaction: ReactionId) -> Result<usize, ChemError> {
        Ok(self.reaction(reaction)?.mappings().len())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::CountingListener;
    use super::*;
    use crate::core::models::ids::ObjectKey;

    #[test]
    fn participants_keep_their_coefficients() {
        let mut space = ChemSpace::new();
        let water = space.new_atom_container();
        let hydrogen = space.new_atom_container();
        let oxygen = space.new_atom_container();
        let reaction = space.new_reaction();
        space
            .add_reactant_with_coefficient(reaction, hydrogen, 2.0)
            .unwrap();
        space.add_reactant(reaction, oxygen).unwrap();
        space
            .add_product_with_coefficient(reaction, water, 2.0)
            .unwrap();

        let value = space.reaction(reaction).unwrap();
        assert_eq!(value.reactant_count(), 2);
        assert_eq!(value.product_count(), 1);
        assert_eq!(
            space
                .coefficient(reaction, ReactionRole::Reactant, hydrogen)
                .unwrap(),
            2.0
        );
        assert_eq!(
            space
                .coefficient(reaction, ReactionRole::Product, hydrogen)
                .unwrap(),
            -1.0
        );
        assert_eq!(
            space
                .coefficients(reaction, ReactionRole::Reactant)
                .unwrap(),
            vec![2.0, 1.0]
        );
    }

    #[test]
    fn coefficient_updates() {
        let mut space = ChemSpace::new();
        let mol = space.new_atom_container();
        let reaction = space.new_reaction();
        space.add_agent(reaction, mol).unwrap();
        assert!(
            space
                .set_coefficient(reaction, ReactionRole::Agent, mol, 0.5)
                .unwrap()
        );
        assert!(
            !space
                .set_coefficient(reaction, ReactionRole::Product, mol, 0.5)
                .unwrap()
        );
        assert!(
            !space
                .set_coefficients(reaction, ReactionRole::Agent, &[])
                .unwrap()
        );
        assert_eq!(
            space.coefficients(reaction, ReactionRole::Agent).unwrap(),
            vec![0.5]
        );
    }

    #[test]
    fn removing_from_one_role_keeps_parent_link_for_other_roles() {
        let mut space = ChemSpace::new();
        let catalyst = space.new_atom_container();
        let reaction = space.new_reaction();
        space.add_reactant(reaction, catalyst).unwrap();
        space.add_product(reaction, catalyst).unwrap();
        assert_eq!(
            space
                .remove_participant(reaction, ReactionRole::Reactant, catalyst)
                .unwrap(),
            1
        );
        assert_eq!(space.parents(catalyst).unwrap().len(), 1);
        space
            .remove_participant(reaction, ReactionRole::Product, catalyst)
            .unwrap();
        assert!(space.parents(catalyst).unwrap().is_empty());
    }

    #[test]
    fn direction_change_notifies() {
        let mut space = ChemSpace::new();
        let reaction = space.new_reaction();
        let (listener, handle) = CountingListener::new();
        space.add_listener(reaction, &handle).unwrap();
        assert_eq!(
            space.direction(reaction).unwrap(),
            ReactionDirection::Forward
        );
        space
            .set_direction(reaction, ReactionDirection::Bidirectional)
            .unwrap();
        assert_eq!(
            space.direction(reaction).unwrap(),
            ReactionDirection::Bidirectional
        );
        assert_eq!(listener.calls.get(), 1);
    }

    #[test]
    fn mappings_reference_existing_objects() {
        let mut space = ChemSpace::new();
        let reaction = space.new_reaction();
        let a = space.new_atom("C");
        let b = space.new_atom("C");
        space.add_mapping(reaction, Mapping::new(a, b)).unwrap();
        assert_eq!(space.mapping_count(reaction).unwrap(), 1);

        let mut other = ChemSpace::new();
        let foreign = (0..4).map(|_| other.new_atom("N")).last().unwrap();
        assert_eq!(
            space.add_mapping(reaction, Mapping::new(a, foreign)),
            Err(ChemError::UnknownObject(foreign.into()))
        );
        assert_eq!(space.mapping_count(reaction).unwrap(), 1);

        let removed = space.remove_mapping(reaction, 0).unwrap();
        assert_eq!(removed, Mapping::new(a, b));
        assert_eq!(
            space.remove_mapping(reaction, 0),
            Err(ChemError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn participant_changes_reach_reaction_listeners() {
        let mut space = ChemSpace::new();
        let mol = space.new_atom_container();
        let atom = space.new_atom("O");
        space.add_atom(mol, atom).unwrap();
        let reaction = space.new_reaction();
        space.add_product(reaction, mol).unwrap();
        let (listener, handle) = CountingListener::new();
        space.add_listener(reaction, &handle).unwrap();
        space.set_id(atom, Some("o1")).unwrap();
        assert_eq!(*listener.sources.borrow(), vec![ObjectKey::Atom(atom)]);
    }
}
