//! The [`ChemSpace`] arena.
//!
//! Every chemical entity lives in one of the space's slot maps together with its
//! [`ChemObject`] base data and is addressed by a typed key. Identity is key equality, so
//! the same atom can be a member of a molecule and of each of its rings at once.
//!
//! Operations are grouped by concern:
//!
//! - [`objects`] - identifiers, properties, flags, listeners and change dispatch
//! - [`atoms`] - atoms, bonds, lone pairs and single electrons
//! - [`container`] - atom container graph operations
//! - [`sets`] - container sets and reaction sets with multipliers
//! - [`ring`] - rings and ring-set connectivity
//! - [`reaction`] - reactions, coefficients and mappings
//! - [`polymer`] - crystals, monomers, strands, polymers and bio-polymers
//! - [`model`] - chem models, sequences and files
//! - [`clone`] - identity-remapping deep copies

pub mod atoms;
pub mod clone;
pub mod container;
pub mod model;
pub mod objects;
pub mod polymer;
pub mod reaction;
pub mod ring;
pub mod sets;

use super::config::{BuilderFlavor, SpaceConfig};
use super::error::ChemError;
use crate::core::models::atom::Atom;
use crate::core::models::bond::Bond;
use crate::core::models::chem_model::{ChemFile, ChemModel, ChemSequence};
use crate::core::models::container::AtomContainer;
use crate::core::models::electron::{LonePair, SingleElectron};
use crate::core::models::ids::{
    AtomId, BondId, ChemFileId, ChemModelId, ChemSequenceId, ContainerId, ContainerSetId,
    LonePairId, ObjectKey, ReactionId, ReactionSetId, SingleElectronId,
};
use crate::core::models::reaction::Reaction;
use crate::core::models::set::{ContainerSet, ReactionSet};
use crate::core::object::ChemObject;
use slotmap::SlotMap;

/// A stored entity: its ChemObject base data plus its value.
#[derive(Debug, Clone)]
pub(crate) struct Entry<T> {
    pub(crate) object: ChemObject,
    pub(crate) value: T,
}

/// Owner and builder of a chemical object graph.
#[derive(Debug, Default)]
pub struct ChemSpace {
    config: SpaceConfig,
    atoms: SlotMap<AtomId, Entry<Atom>>,
    bonds: SlotMap<BondId, Entry<Bond>>,
    lone_pairs: SlotMap<LonePairId, Entry<LonePair>>,
    single_electrons: SlotMap<SingleElectronId, Entry<SingleElectron>>,
    containers: SlotMap<ContainerId, Entry<AtomContainer>>,
    container_sets: SlotMap<ContainerSetId, Entry<ContainerSet>>,
    reactions: SlotMap<ReactionId, Entry<Reaction>>,
    reaction_sets: SlotMap<ReactionSetId, Entry<ReactionSet>>,
    models: SlotMap<ChemModelId, Entry<ChemModel>>,
    sequences: SlotMap<ChemSequenceId, Entry<ChemSequence>>,
    files: SlotMap<ChemFileId, Entry<ChemFile>>,
}

macro_rules! entry_accessors {
    ($($store:ident: $id:ty => $value:ty, $get:ident, $get_mut:ident, $insert:ident;)*) => {
        $(
            pub(crate) fn $get(&self, id: $id) -> Result<&Entry<$value>, ChemError> {
                self.$store
                    .get(id)
                    .ok_or(ChemError::UnknownObject(id.into()))
            }

            pub(crate) fn $get_mut(&mut self, id: $id) -> Result<&mut Entry<$value>, ChemError> {
                self.$store
                    .get_mut(id)
                    .ok_or(ChemError::UnknownObject(id.into()))
            }

            pub(crate) fn $insert(&mut self, value: $value) -> $id {
                let object = self.new_object();
                self.$store.insert(Entry { object, value })
            }
        )*
    };
}

impl ChemSpace {
    /// Creates an empty space with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SpaceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an empty space whose objects never notify.
    pub fn silent() -> Self {
        Self::with_config(SpaceConfig {
            flavor: BuilderFlavor::Silent,
            ..SpaceConfig::default()
        })
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    /// The builder flavour every object of this space was created by.
    pub fn builder(&self) -> BuilderFlavor {
        self.config.flavor
    }

    fn new_object(&self) -> ChemObject {
        ChemObject::new(self.config.notification_default)
    }

    pub fn contains(&self, key: impl Into<ObjectKey>) -> bool {
        self.object(key).is_ok()
    }

    entry_accessors! {
        atoms: AtomId => Atom, atom_entry, atom_entry_mut, insert_atom;
        bonds: BondId => Bond, bond_entry, bond_entry_mut, insert_bond;
        lone_pairs: LonePairId => LonePair, lone_pair_entry, lone_pair_entry_mut, insert_lone_pair;
        single_electrons: SingleElectronId => SingleElectron,
            single_electron_entry, single_electron_entry_mut, insert_single_electron;
        containers: ContainerId => AtomContainer,
            container_entry, container_entry_mut, insert_container;
        container_sets: ContainerSetId => ContainerSet,
            container_set_entry, container_set_entry_mut, insert_container_set;
        reactions: ReactionId => Reaction, reaction_entry, reaction_entry_mut, insert_reaction;
        reaction_sets: ReactionSetId => ReactionSet,
            reaction_set_entry, reaction_set_entry_mut, insert_reaction_set;
        models: ChemModelId => ChemModel, model_entry, model_entry_mut, insert_model;
        sequences: ChemSequenceId => ChemSequence,
            sequence_entry, sequence_entry_mut, insert_sequence;
        files: ChemFileId => ChemFile, file_entry, file_entry_mut, insert_file;
    }

    pub(crate) fn object_entry(&self, key: ObjectKey) -> Option<&ChemObject> {
        match key {
            ObjectKey::Atom(id) => self.atoms.get(id).map(|e| &e.object),
            ObjectKey::Bond(id) => self.bonds.get(id).map(|e| &e.object),
            ObjectKey::LonePair(id) => self.lone_pairs.get(id).map(|e| &e.object),
            ObjectKey::SingleElectron(id) => self.single_electrons.get(id).map(|e| &e.object),
            ObjectKey::Container(id) => self.containers.get(id).map(|e| &e.object),
            ObjectKey::ContainerSet(id) => self.container_sets.get(id).map(|e| &e.object),
            ObjectKey::Reaction(id) => self.reactions.get(id).map(|e| &e.object),
            ObjectKey::ReactionSet(id) => self.reaction_sets.get(id).map(|e| &e.object),
            ObjectKey::ChemModel(id) => self.models.get(id).map(|e| &e.object),
            ObjectKey::ChemSequence(id) => self.sequences.get(id).map(|e| &e.object),
            ObjectKey::ChemFile(id) => self.files.get(id).map(|e| &e.object),
        }
    }

    pub(crate) fn object_entry_mut(&mut self, key: ObjectKey) -> Option<&mut ChemObject> {
        match key {
            ObjectKey::Atom(id) => self.atoms.get_mut(id).map(|e| &mut e.object),
            ObjectKey::Bond(id) => self.bonds.get_mut(id).map(|e| &mut e.object),
            ObjectKey::LonePair(id) => self.lone_pairs.get_mut(id).map(|e| &mut e.object),
            ObjectKey::SingleElectron(id) => {
                self.single_electrons.get_mut(id).map(|e| &mut e.object)
            }
            ObjectKey::Container(id) => self.containers.get_mut(id).map(|e| &mut e.object),
            ObjectKey::ContainerSet(id) => self.container_sets.get_mut(id).map(|e| &mut e.object),
            ObjectKey::Reaction(id) => self.reactions.get_mut(id).map(|e| &mut e.object),
            ObjectKey::ReactionSet(id) => self.reaction_sets.get_mut(id).map(|e| &mut e.object),
            ObjectKey::ChemModel(id) => self.models.get_mut(id).map(|e| &mut e.object),
            ObjectKey::ChemSequence(id) => self.sequences.get_mut(id).map(|e| &mut e.object),
            ObjectKey::ChemFile(id) => self.files.get_mut(id).map(|e| &mut e.object),
        }
    }

    /// Records that `parent` observes `child`.
    pub(crate) fn attach(&mut self, child: impl Into<ObjectKey>, parent: impl Into<ObjectKey>) {
        let parent = parent.into();
        if let Some(object) = self.object_entry_mut(child.into()) {
            object.add_parent(parent);
        }
    }

    pub(crate) fn detach(&mut self, child: impl Into<ObjectKey>, parent: impl Into<ObjectKey>) {
        let parent = parent.into();
        if let Some(object) = self.object_entry_mut(child.into()) {
            object.remove_parent(parent);
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }
}
