use slotmap::new_key_type;

new_key_type! {
    pub struct AtomId;
    pub struct BondId;
    pub struct LonePairId;
    pub struct SingleElectronId;
    pub struct ContainerId;
    pub struct ContainerSetId;
    pub struct ReactionId;
    pub struct ReactionSetId;
    pub struct ChemModelId;
    pub struct ChemSequenceId;
    pub struct ChemFileId;
}

/// Any entity stored in a `ChemSpace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKey {
    Atom(AtomId),
    Bond(BondId),
    LonePair(LonePairId),
    SingleElectron(SingleElectronId),
    Container(ContainerId),
    ContainerSet(ContainerSetId),
    Reaction(ReactionId),
    ReactionSet(ReactionSetId),
    ChemModel(ChemModelId),
    ChemSequence(ChemSequenceId),
    ChemFile(ChemFileId),
}

/// A bond, lone pair or single electron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectronContainerId {
    Bond(BondId),
    LonePair(LonePairId),
    SingleElectron(SingleElectronId),
}

macro_rules! impl_object_key_from {
    ($($id:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$id> for ObjectKey {
                fn from(id: $id) -> Self {
                    ObjectKey::$variant(id)
                }
            }
        )*
    };
}

impl_object_key_from! {
    AtomId => Atom,
    BondId => Bond,
    LonePairId => LonePair,
    SingleElectronId => SingleElectron,
    ContainerId => Container,
    ContainerSetId => ContainerSet,
    ReactionId => Reaction,
    ReactionSetId => ReactionSet,
    ChemModelId => ChemModel,
    ChemSequenceId => ChemSequence,
    ChemFileId => ChemFile,
}

impl From<BondId> for ElectronContainerId {
    fn from(id: BondId) -> Self {
        ElectronContainerId::Bond(id)
    }
}

impl From<LonePairId> for ElectronContainerId {
    fn from(id: LonePairId) -> Self {
        ElectronContainerId::LonePair(id)
    }
}

impl From<SingleElectronId> for ElectronContainerId {
    fn from(id: SingleElectronId) -> Self {
        ElectronContainerId::SingleElectron(id)
    }
}

impl From<ElectronContainerId> for ObjectKey {
    fn from(id: ElectronContainerId) -> Self {
        match id {
            ElectronContainerId::Bond(b) => ObjectKey::Bond(b),
            ElectronContainerId::LonePair(lp) => ObjectKey::LonePair(lp),
            ElectronContainerId::SingleElectron(se) => ObjectKey::SingleElectron(se),
        }
    }
}
