use super::ChemSpace;
use crate::core::models::chem_model::{ChemFile, ChemModel, ChemSequence};
use crate::core::models::ids::{
    ChemFileId, ChemModelId, ChemSequenceId, ContainerId, ContainerSetId, ObjectKey, ReactionSetId,
};
use crate::engine::error::ChemError;

fn slots(model: &ChemModel) -> [Option<ObjectKey>; 4] {
    [
        model.molecules.map(Into::into),
        model.reactions.map(Into::into),
        model.rings.map(Into::into),
        model.crystal.map(Into::into),
    ]
}

impl ChemSpace {
    pub fn new_chem_model(&mut self) -> ChemModelId {
        self.insert_model(ChemModel::default())
    }

    pub fn chem_model(&self, id: ChemModelId) -> Result<&ChemModel, ChemError> {
        Ok(&self.model_entry(id)?.value)
    }

    /// Swaps one slot of a model. The previous occupant stops forwarding its changes to
    /// the model unless another slot still holds it.
    fn replace_model_slot(
        &mut self,
        model: ChemModelId,
        new: Option<ObjectKey>,
        update: impl FnOnce(&mut ChemModel) -> Option<ObjectKey>,
    ) -> Result<(), ChemError> {
        if let Some(key) = new {
            self.object(key)?;
        }
        let value = &mut self.model_entry_mut(model)?.value;
        let old = update(value);
        let remaining = slots(value);
        if let Some(old) = old.filter(|o| !remaining.contains(&Some(*o))) {
            self.detach(old, model);
        }
        if let Some(new) = new {
            self.attach(new, model);
        }
        self.notify_changed(model);
        Ok(())
    }

    pub fn set_model_molecules(
        &mut self,
        model: ChemModelId,
        set: Option<ContainerSetId>,
    ) -> Result<(), ChemError> {
        self.replace_model_slot(model, set.map(Into::into), |m| {
            std::mem::replace(&mut m.molecules, set).map(Into::into)
        })
    }

    pub fn set_model_reactions(
        &mut self,
        model: ChemModelId,
        set: Option<ReactionSetId>,
    ) -> Result<(), ChemError> {
        self.replace_model_slot(model, set.map(Into::into), |m| {
            std::mem::replace(&mut m.reactions, set).map(Into::into)
        })
    }

    pub fn set_model_rings(
        &mut self,
        model: ChemModelId,
        set: Option<ContainerSetId>,
    ) -> Result<(), ChemError> {
        self.replace_model_slot(model, set.map(Into::into), |m| {
            std::mem::replace(&mut m.rings, set).map(Into::into)
        })
    }

    /// Sets the model's crystal; the container must be a crystal.
    pub fn set_model_crystal(
        &mut self,
        model: ChemModelId,
        crystal: Option<ContainerId>,
    ) -> Result<(), ChemError> {
        if let Some(crystal) = crystal {
            self.crystal(crystal)?;
        }
        self.replace_model_slot(model, crystal.map(Into::into), |m| {
            std::mem::replace(&mut m.crystal, crystal).map(Into::into)
        })
    }

    // --- Sequences ---

    pub fn new_chem_sequence(&mut self) -> ChemSequenceId {
        self.insert_sequence(ChemSequence::default())
    }

    pub fn chem_sequence(&self, id: ChemSequenceId) -> Result<&ChemSequence, ChemError> {
        Ok(&self.sequence_entry(id)?.value)
    }

    pub fn add_chem_model(
        &mut self,
        sequence: ChemSequenceId,
        model: ChemModelId,
    ) -> Result<(), ChemError> {
        self.chem_model(model)?;
        self.sequence_entry_mut(sequence)?.value.models.push(model);
        self.attach(model, sequence);
        self.notify_changed(sequence);
        Ok(())
    }

    pub fn chem_model_at(
        &self,
        sequence: ChemSequenceId,
        index: usize,
    ) -> Result<ChemModelId, ChemError> {
        let models = self.chem_sequence(sequence)?.models();
        models.get(index).copied().ok_or(ChemError::IndexOutOfRange {
            index,
            len: models.len(),
        })
    }

    pub fn remove_chem_model(
        &mut self,
        sequence: ChemSequenceId,
        index: usize,
    ) -> Result<ChemModelId, ChemError> {
        let models = &mut self.sequence_entry_mut(sequence)?.value.models;
        if index >= models.len() {
            return Err(ChemError::IndexOutOfRange {
                index,
                len: models.len(),
            });
        }
        let model = models.remove(index);
        let still_member = models.contains(&model);
        if !still_member {
            self.detach(model, sequence);
        }
        self.notify_changed(sequence);
        Ok(model)
    }

    // --- Files ---

    pub fn new_chem_file(&mut self) -> ChemFileId {
        self.insert_file(ChemFile::default())
    }

    pub fn chem_file(&self, id: ChemFileId) -> Result<&ChemFile, ChemError> {
        Ok(&self.file_entry(id)?.value)
    }

    pub fn add_chem_sequence(
        &mut self,
        file: ChemFileId,
        sequence: ChemSequenceId,
    ) -> Result<(), ChemError> {
        self.chem_sequence(sequence)?;
        self.file_entry_mut(file)?.value.sequences.push(sequence);
        self.attach(sequence, file);
        self.notify_changed(file);
        Ok(())
    }

    pub fn chem_sequence_at(
        &self,
        file: ChemFileId,
        index: usize,
    ) -> Result<ChemSequenceId, ChemError> {
        let sequences = self.chem_file(file)?.sequences();
        sequences.get(index).copied().ok_or(ChemError::IndexOutOfRange {
            index,
            len: sequences.len(),
        })
    }

    pub fn remove_chem_sequence(
        &mut self,
        file: ChemFileId,
        index: usize,
    ) -> Result<ChemSequenceId, ChemError> {
        let sequences = &mut self.file_entry_mut(file)?.value.sequences;
        if index >= sequences.len() {
            return Err(ChemError::IndexOutOfRange {
                index,
                len: sequences.len(),
            });
        }
        let sequence = sequences.remove(index);
        let still_member = sequences.contains(&sequence);
        if !still_member {
            self.detach(sequence, file);
        }
        self.notify_changed(file);
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::CountingListener;
    use super::*;

    #[test]
    fn detached_molecule_set_stops_propagating() {
        let mut space = ChemSpace::new();
        let model = space.new_chem_model();
        let set = space.new_container_set();
        space.set_model_molecules(model, Some(set)).unwrap();
        let (listener, handle) = CountingListener::new();
        space.add_listener(model, &handle).unwrap();

        let mol = space.new_atom_container();
        space.add_to_set(set, mol).unwrap();
        assert!(listener.changed());

        space.set_model_molecules(model, None).unwrap();
        listener.reset();
        let other = space.new_atom_container();
        space.add_to_set(set, other).unwrap();
        assert!(!listener.changed());
        assert!(space.chem_model(model).unwrap().is_empty());
    }

    #[test]
    fn each_slot_propagates_while_attached() {
        let mut space = ChemSpace::new();
        let model = space.new_chem_model();
        let reactions = space.new_reaction_set();
        let rings = space.new_ring_set();
        let crystal = space.new_crystal();
        space.set_model_reactions(model, Some(reactions)).unwrap();
        space.set_model_rings(model, Some(rings)).unwrap();
        space.set_model_crystal(model, Some(crystal)).unwrap();
        let (listener, handle) = CountingListener::new();
        space.add_listener(model, &handle).unwrap();

        space.set_z(crystal, Some(2)).unwrap();
        assert_eq!(listener.calls.get(), 1);
        let reaction = space.new_reaction();
        space.add_reaction_to_set(reactions, reaction).unwrap();
        assert_eq!(listener.calls.get(), 2);

        space.set_model_crystal(model, None).unwrap();
        listener.reset();
        space.set_z(crystal, Some(4)).unwrap();
        assert!(!listener.changed());
    }

    #[test]
    fn shared_slot_keeps_forwarding_until_fully_detached() {
        let mut space = ChemSpace::new();
        let model = space.new_chem_model();
        let set = space.new_container_set();
        space.set_model_molecules(model, Some(set)).unwrap();
        space.set_model_rings(model, Some(set)).unwrap();
        space.set_model_molecules(model, None).unwrap();
        assert_eq!(space.parents(set).unwrap(), &[ObjectKey::ChemModel(model)]);
        space.set_model_rings(model, None).unwrap();
        assert!(space.parents(set).unwrap().is_empty());
    }

    #[test]
    fn crystal_slot_requires_a_crystal() {
        let mut space = ChemSpace::new();
        let model = space.new_chem_model();
        let mol = space.new_atom_container();
        assert!(matches!(
            space.set_model_crystal(model, Some(mol)),
            Err(ChemError::WrongKind { .. })
        ));
        assert_eq!(space.chem_model(model).unwrap().crystal(), None);
    }

    #[test]
    fn sequences_and_files_are_ordered() {
        let mut space = ChemSpace::new();
        let first = space.new_chem_model();
        let second = space.new_chem_model();
        let sequence = space.new_chem_sequence();
        space.add_chem_model(sequence, first).unwrap();
        space.add_chem_model(sequence, second).unwrap();
        assert_eq!(space.chem_model_at(sequence, 1).unwrap(), second);

        let file = space.new_chem_file();
        space.add_chem_sequence(file, sequence).unwrap();
        assert_eq!(space.chem_sequence_at(file, 0).unwrap(), sequence);

        let (listener, handle) = CountingListener::new();
        space.add_listener(file, &handle).unwrap();
        let set = space.new_container_set();
        space.set_model_molecules(second, Some(set)).unwrap();
        assert!(listener.changed());

        assert_eq!(space.remove_chem_model(sequence, 0).unwrap(), first);
        assert_eq!(space.chem_sequence(sequence).unwrap().models(), &[second]);
        assert!(space.parents(first).unwrap().is_empty());
        assert_eq!(
            space.remove_chem_sequence(file, 3),
            Err(ChemError::IndexOutOfRange { index: 3, len: 1 })
        );
    }
}
