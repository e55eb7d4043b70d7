//! Seams for atom-type perception and implicit hydrogen addition.
//!
//! The perception workflow only talks to [`AtomTypeMatcher`] and [`HydrogenAdder`]. The
//! registry-backed implementations here are the defaults; callers can plug in their own.

use super::error::ChemError;
use super::space::ChemSpace;
use crate::core::models::atom_type::AtomType;
use crate::core::models::ids::{AtomId, ContainerId};
use crate::core::typing::AtomEnvironment;
use crate::core::typing::registry::{AtomTypeRegistry, RegistryLoadError};
use tracing::debug;

/// Finds the atom type that describes an atom in its container.
pub trait AtomTypeMatcher {
    /// # Errors
    ///
    /// [`ChemError::NoMatchingAtomType`] when no known type fits, or any lookup error
    /// for unknown keys and non-member atoms.
    fn find_matching_atom_type(
        &self,
        space: &ChemSpace,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<AtomType, ChemError>;
}

/// Sets implicit hydrogen counts on the atoms of a container.
///
/// Implementations read each atom's current atom-type name.
pub trait HydrogenAdder {
    fn add_implicit_hydrogens(
        &self,
        space: &mut ChemSpace,
        container: ContainerId,
    ) -> Result<(), ChemError>;
}

impl ChemSpace {
    /// Symbol, charge, maximum bond order and explicit neighbour count of a member atom.
    pub fn atom_environment(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<AtomEnvironment, ChemError> {
        let value = self.atom(atom)?;
        Ok(AtomEnvironment {
            symbol: value.symbol().unwrap_or_default().to_string(),
            formal_charge: value.formal_charge().unwrap_or(0),
            max_bond_order: self.maximum_bond_order(container, atom)?,
            neighbour_count: u32::try_from(self.connected_atom_count(container, atom)?)
                .unwrap_or(u32::MAX),
        })
    }
}

/// Matches atoms against an [`AtomTypeRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryAtomTypeMatcher {
    registry: AtomTypeRegistry,
}

impl RegistryAtomTypeMatcher {
    pub fn new(registry: AtomTypeRegistry) -> Self {
        Self { registry }
    }

    /// A matcher over the atom types shipped with the crate.
    pub fn embedded() -> Result<Self, RegistryLoadError> {
        Ok(Self::new(AtomTypeRegistry::embedded()?))
    }

    pub fn registry(&self) -> &AtomTypeRegistry {
        &self.registry
    }
}

impl AtomTypeMatcher for RegistryAtomTypeMatcher {
    fn find_matching_atom_type(
        &self,
        space: &ChemSpace,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<AtomType, ChemError> {
        let env = space.atom_environment(container, atom)?;
        self.registry
            .find_match(&env)
            .cloned()
            .ok_or(ChemError::NoMatchingAtomType { atom })
    }
}

/// Fills each atom's free valence with hydrogens: the formal neighbour count of its named
/// atom type minus its explicit neighbours. Pseudo atoms are left alone.
#[derive(Debug, Clone)]
pub struct NeighbourCountHydrogenAdder {
    registry: AtomTypeRegistry,
}

impl NeighbourCountHydrogenAdder {
    pub fn new(registry: AtomTypeRegistry) -> Self {
        Self { registry }
    }

    pub fn embedded() -> Result<Self, RegistryLoadError> {
        Ok(Self::new(AtomTypeRegistry::embedded()?))
    }

    fn hydrogen_count(
        &self,
        space: &ChemSpace,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<u32, ChemError> {
        let name = space
            .atom(atom)?
            .atom_type_name()
            .ok_or_else(|| ChemError::Collaborator(format!("atom {atom:?} has no atom type")))?;
        let atom_type = self
            .registry
            .get(name)
            .ok_or_else(|| ChemError::Collaborator(format!("unknown atom type '{name}'")))?;
        let capacity = atom_type.formal_neighbour_count.unwrap_or(0);
        let explicit =
            u32::try_from(space.connected_atom_count(container, atom)?).unwrap_or(u32::MAX);
        Ok(capacity.saturating_sub(explicit))
    }
}

impl HydrogenAdder for NeighbourCountHydrogenAdder {
    fn add_implicit_hydrogens(
        &self,
        space: &mut ChemSpace,
        container: ContainerId,
    ) -> Result<(), ChemError> {
        let atoms = space.container(container)?.atoms().to_vec();
        let mut counts = Vec::with_capacity(atoms.len());
        for atom in atoms {
            if space.atom(atom)?.is_pseudo() {
                continue;
            }
            counts.push((atom, self.hydrogen_count(space, container, atom)?));
        }
        for (atom, count) in counts {
            space.set_implicit_hydrogen_count(atom, Some(count))?;
        }
        debug!(?container, "Implicit hydrogens assigned.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bond::BondOrder;

    fn acetone(space: &mut ChemSpace) -> (ContainerId, Vec<AtomId>) {
        let mol = space.new_atom_container();
        let atoms: Vec<AtomId> = ["C", "C", "C", "O"].iter().map(|s| space.new_atom(s)).collect();
        for &atom in &atoms {
            space.add_atom(mol, atom).unwrap();
        }
        space.add_new_bond(mol, 0, 1, BondOrder::Single).unwrap();
        space.add_new_bond(mol, 0, 3, BondOrder::Double).unwrap();
        space.add_new_bond(mol, 0, 2, BondOrder::Single).unwrap();
        (mol, atoms)
    }

    #[test]
    fn environment_reflects_the_container() {
        let mut space = ChemSpace::new();
        let (mol, atoms) = acetone(&mut space);
        let env = space.atom_environment(mol, atoms[0]).unwrap();
        assert_eq!(env.symbol, "C");
        assert_eq!(env.max_bond_order, BondOrder::Double);
        assert_eq!(env.neighbour_count, 3);
    }

    #[test]
    fn registry_matcher_types_acetone() {
        let mut space = ChemSpace::new();
        let (mol, atoms) = acetone(&mut space);
        let matcher = RegistryAtomTypeMatcher::embedded().unwrap();
        let names: Vec<Option<String>> = atoms
            .iter()
            .map(|&a| {
                matcher
                    .find_matching_atom_type(&space, mol, a)
                    .unwrap()
                    .name
            })
            .collect();
        assert_eq!(
            names,
            vec![
                Some("C.sp2".to_string()),
                Some("C.sp3".to_string()),
                Some("C.sp3".to_string()),
                Some("O.sp2".to_string()),
            ]
        );
    }

    #[test]
    fn matcher_reports_unknown_elements() {
        let mut space = ChemSpace::new();
        let mol = space.new_atom_container();
        let xenon = space.new_atom("Xe");
        space.add_atom(mol, xenon).unwrap();
        let matcher = RegistryAtomTypeMatcher::embedded().unwrap();
        assert_eq!(
            matcher.find_matching_atom_type(&space, mol, xenon),
            Err(ChemError::NoMatchingAtomType { atom: xenon })
        );
    }

    #[test]
    fn adder_fills_free_valence() {
        let mut space = ChemSpace::new();
        let (mol, atoms) = acetone(&mut space);
        for (&atom, name) in atoms.iter().zip(["C.sp2", "C.sp3", "C.sp3", "O.sp2"]) {
            space.set_atom_type_name(atom, Some(name)).unwrap();
        }
        let adder = NeighbourCountHydrogenAdder::embedded().unwrap();
        adder.add_implicit_hydrogens(&mut space, mol).unwrap();
        let counts: Vec<Option<u32>> = atoms
            .iter()
            .map(|&a| space.atom(a).unwrap().implicit_hydrogen_count())
            .collect();
        assert_eq!(counts, vec![Some(0), Some(3), Some(3), Some(0)]);
    }

    #[test]
    fn adder_requires_type_names() {
        let mut space = ChemSpace::new();
        let (mol, atoms) = acetone(&mut space);
        let adder = NeighbourCountHydrogenAdder::embedded().unwrap();
        assert!(matches!(
            adder.add_implicit_hydrogens(&mut space, mol),
            Err(ChemError::Collaborator(_))
        ));
        assert_eq!(
            space.atom(atoms[1]).unwrap().implicit_hydrogen_count(),
            None
        );
    }
}
