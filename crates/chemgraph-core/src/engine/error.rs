use thiserror::Error;

use crate::core::models::atom::AtomFieldError;
use crate::core::models::ids::{AtomId, BondId, ContainerId, ObjectKey};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChemError {
    #[error("Object not found in space: {0:?}")]
    UnknownObject(ObjectKey),

    #[error("Atom {atom:?} is not a member of container {container:?}")]
    NoSuchAtom {
        atom: AtomId,
        container: ContainerId,
    },

    #[error("Bond {bond:?} is not a member of container {container:?}")]
    NoSuchBond {
        bond: BondId,
        container: ContainerId,
    },

    #[error("Index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Atom {atom:?} is already present at index {index}")]
    AtomAlreadyPresent { atom: AtomId, index: usize },

    #[error("Object {key:?} is not a {expected}")]
    WrongKind {
        key: ObjectKey,
        expected: &'static str,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported mutation: {source}")]
    UnsupportedMutation {
        #[from]
        source: AtomFieldError,
    },

    #[error("No atom type matches atom {atom:?}")]
    NoMatchingAtomType { atom: AtomId },

    #[error("Collaborator failed: {0}")]
    Collaborator(String),
}
