use super::ids::{ChemModelId, ChemSequenceId, ContainerId, ContainerSetId, ReactionSetId};

/// One snapshot of a chemical system: at most one molecule set, reaction set, ring set
/// and crystal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChemModel {
    pub(crate) molecules: Option<ContainerSetId>,
    pub(crate) reactions: Option<ReactionSetId>,
    pub(crate) rings: Option<ContainerSetId>,
    pub(crate) crystal: Option<ContainerId>,
}

impl ChemModel {
    pub fn molecules(&self) -> Option<ContainerSetId> {
        self.molecules
    }

    pub fn reactions(&self) -> Option<ReactionSetId> {
        self.reactions
    }

    pub fn rings(&self) -> Option<ContainerSetId> {
        self.rings
    }

    pub fn crystal(&self) -> Option<ContainerId> {
        self.crystal
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_none()
            && self.reactions.is_none()
            && self.rings.is_none()
            && self.crystal.is_none()
    }
}

/// An ordered series of models, e.g. the frames of a trajectory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChemSequence {
    pub(crate) models: Vec<ChemModelId>,
}

impl ChemSequence {
    pub fn models(&self) -> &[ChemModelId] {
        &self.models
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChemFile {
    pub(crate) sequences: Vec<ChemSequenceId>,
}

impl ChemFile {
    pub fn sequences(&self) -> &[ChemSequenceId] {
        &self.sequences
    }
}
