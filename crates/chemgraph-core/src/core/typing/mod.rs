//! Atom-type perception data.
//!
//! [`registry::AtomTypeRegistry`] holds named atom types and answers "which type fits an
//! atom in this environment". The environment is plain data gathered by the caller, so
//! the registry stays independent of where the atom is stored.

pub mod registry;

use crate::core::models::bond::BondOrder;

/// The local situation of an atom that atom types are matched against.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomEnvironment {
    pub symbol: String,
    pub formal_charge: i32,
    /// Highest order over connected bonds, `Unset` for isolated atoms.
    pub max_bond_order: BondOrder,
    /// Number of explicitly connected atoms.
    pub neighbour_count: u32,
}
