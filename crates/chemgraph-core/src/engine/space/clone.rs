//! Identity-remapping deep copies.
//!
//! Every public `clone_*` call runs one [`Cloner`] pass. The pass keeps an old-to-new key
//! map, so an object reachable along several paths (an atom shared by a polymer and its
//! monomer, a molecule listed twice in a set) is copied exactly once and every reference
//! inside the copy points at the new objects. Property values are copied as they are; an
//! [`PropertyValue::Object`](crate::core::object::PropertyValue::Object) still names the
//! original object and is never followed.

use super::{ChemSpace, Entry};
use crate::core::models::container::{AtomContainer, ContainerKind};
use crate::core::models::ids::{
    AtomId, BondId, ChemFileId, ChemModelId, ChemSequenceId, ContainerId, ContainerSetId,
    LonePairId, ReactionId, ReactionSetId, SingleElectronId,
};
use crate::core::models::reaction::{Mapped, Mapping, Reaction};
use crate::core::models::set::{ChemObjectSet, ContainerSet, ReactionSet};
use crate::engine::error::ChemError;
use slotmap::SecondaryMap;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

#[derive(Default)]
struct CloneMap {
    atoms: SecondaryMap<AtomId, AtomId>,
    bonds: SecondaryMap<BondId, BondId>,
    lone_pairs: SecondaryMap<LonePairId, LonePairId>,
    single_electrons: SecondaryMap<SingleElectronId, SingleElectronId>,
    containers: SecondaryMap<ContainerId, ContainerId>,
    container_sets: SecondaryMap<ContainerSetId, ContainerSetId>,
    reactions: SecondaryMap<ReactionId, ReactionId>,
    reaction_sets: SecondaryMap<ReactionSetId, ReactionSetId>,
    models: SecondaryMap<ChemModelId, ChemModelId>,
    sequences: SecondaryMap<ChemSequenceId, ChemSequenceId>,
}

struct Cloner<'s> {
    space: &'s mut ChemSpace,
    map: CloneMap,
}

impl<'s> Cloner<'s> {
    fn new(space: &'s mut ChemSpace) -> Self {
        Self {
            space,
            map: CloneMap::default(),
        }
    }

    fn atom(&mut self, id: AtomId) -> Result<AtomId, ChemError> {
        if let Some(&copy) = self.map.atoms.get(id) {
            return Ok(copy);
        }
        let entry = self.space.atom_entry(id)?.clone();
        let fragment = entry.value.fragment_container();
        let copy = self.space.atoms.insert(entry);
        self.map.atoms.insert(id, copy);
        if let Some(fragment) = fragment {
            let fragment_copy = self.container(fragment)?;
            self.space
                .atom_entry_mut(copy)?
                .value
                .set_fragment_container(Some(fragment_copy))?;
            self.space.attach(fragment_copy, copy);
        }
        Ok(copy)
    }

    fn bond(&mut self, id: BondId) -> Result<BondId, ChemError> {
        if let Some(&copy) = self.map.bonds.get(id) {
            return Ok(copy);
        }
        let mut entry = self.space.bond_entry(id)?.clone();
        let atoms = entry
            .value
            .atoms()
            .iter()
            .map(|&a| self.atom(a))
            .collect::<Result<Vec<_>, _>>()?;
        entry.value.set_atoms(atoms);
        let copy = self.space.bonds.insert(entry);
        self.map.bonds.insert(id, copy);
        Ok(copy)
    }

    fn lone_pair(&mut self, id: LonePairId) -> Result<LonePairId, ChemError> {
        if let Some(&copy) = self.map.lone_pairs.get(id) {
            return Ok(copy);
        }
        let mut entry = self.space.lone_pair_entry(id)?.clone();
        if let Some(atom) = entry.value.atom() {
            entry.value.set_atom(Some(self.atom(atom)?));
        }
        let copy = self.space.lone_pairs.insert(entry);
        self.map.lone_pairs.insert(id, copy);
        Ok(copy)
    }

    fn single_electron(&mut self, id: SingleElectronId) -> Result<SingleElectronId, ChemError> {
        if let Some(&copy) = self.map.single_electrons.get(id) {
            return Ok(copy);
        }
        let mut entry = self.space.single_electron_entry(id)?.clone();
        if let Some(atom) = entry.value.atom() {
            entry.value.set_atom(Some(self.atom(atom)?));
        }
        let copy = self.space.single_electrons.insert(entry);
        self.map.single_electrons.insert(id, copy);
        Ok(copy)
    }

    fn container(&mut self, id: ContainerId) -> Result<ContainerId, ChemError> {
        if let Some(&copy) = self.map.containers.get(id) {
            return Ok(copy);
        }
        let Entry { object, value } = self.space.container_entry(id)?.clone();
        // Registered before its members so that cycles through fragments resolve.
        let copy = self.space.containers.insert(Entry {
            object,
            value: AtomContainer::default(),
        });
        self.map.containers.insert(id, copy);

        let atoms = value
            .atoms
            .iter()
            .map(|&a| self.atom(a))
            .collect::<Result<Vec<_>, _>>()?;
        let bonds = value
            .bonds
            .iter()
            .map(|&b| self.bond(b))
            .collect::<Result<Vec<_>, _>>()?;
        let lone_pairs = value
            .lone_pairs
            .iter()
            .map(|&lp| self.lone_pair(lp))
            .collect::<Result<Vec<_>, _>>()?;
        let single_electrons = value
            .single_electrons
            .iter()
            .map(|&se| self.single_electron(se))
            .collect::<Result<Vec<_>, _>>()?;
        let map = &self.map;
        let stereo = value
            .stereo
            .iter()
            .filter_map(|element| {
                let mapped = element.map(
                    |a| map.atoms.get(a).copied(),
                    |b| map.bonds.get(b).copied(),
                );
                if mapped.is_none() {
                    warn!(container = ?id, "Dropping stereo element with unresolved references.");
                }
                mapped
            })
            .collect();
        let kind = self.kind(&value.kind)?;

        for &atom in &atoms {
            self.space.attach(atom, copy);
        }
        for &bond in &bonds {
            self.space.attach(bond, copy);
        }
        for &lp in &lone_pairs {
            self.space.attach(lp, copy);
        }
        for &se in &single_electrons {
            self.space.attach(se, copy);
        }
        for child in kind.children() {
            self.space.attach(child, copy);
        }
        self.space.container_entry_mut(copy)?.value = AtomContainer {
            atoms,
            bonds,
            lone_pairs,
            single_electrons,
            stereo,
            kind,
        };
        Ok(copy)
    }

    fn kind(&mut self, kind: &ContainerKind) -> Result<ContainerKind, ChemError> {
        Ok(match kind {
            ContainerKind::Strand(strand) => {
                let mut strand = strand.clone();
                strand.monomers = self.named(&strand.monomers)?;
                ContainerKind::Strand(strand)
            }
            ContainerKind::Polymer(polymer) => {
                let mut polymer = polymer.clone();
                polymer.monomers = self.named(&polymer.monomers)?;
                ContainerKind::Polymer(polymer)
            }
            ContainerKind::BioPolymer(bio) => {
                let mut bio = bio.clone();
                bio.strands = self.named(&bio.strands)?;
                ContainerKind::BioPolymer(bio)
            }
            other => other.clone(),
        })
    }

    fn named(
        &mut self,
        members: &HashMap<String, ContainerId>,
    ) -> Result<HashMap<String, ContainerId>, ChemError> {
        let mut copy = HashMap::with_capacity(members.len());
        for (name, &container) in members {
            copy.insert(name.clone(), self.container(container)?);
        }
        Ok(copy)
    }

    fn members(
        &mut self,
        set: &ChemObjectSet<ContainerId>,
    ) -> Result<ChemObjectSet<ContainerId>, ChemError> {
        let mut copy = ChemObjectSet::new();
        for entry in set.entries() {
            copy.add_with_multiplier(self.container(entry.item)?, entry.multiplier);
        }
        Ok(copy)
    }

    fn container_set(&mut self, id: ContainerSetId) -> Result<ContainerSetId, ChemError> {
        if let Some(&copy) = self.map.container_sets.get(id) {
            return Ok(copy);
        }
        let Entry { object, value } = self.space.container_set_entry(id)?.clone();
        let members = self.members(&value.members)?;
        let children: Vec<ContainerId> = members.iter().collect();
        let copy = self.space.container_sets.insert(Entry {
            object,
            value: ContainerSet {
                kind: value.kind,
                members,
            },
        });
        for child in children {
            self.space.attach(child, copy);
        }
        self.map.container_sets.insert(id, copy);
        Ok(copy)
    }

    fn mapped(&self, reaction: ReactionId, target: Mapped) -> Mapped {
        let image = match target {
            Mapped::Atom(a) => self.map.atoms.get(a).copied().map(Mapped::Atom),
            Mapped::Bond(b) => self.map.bonds.get(b).copied().map(Mapped::Bond),
        };
        image.unwrap_or_else(|| {
            warn!(?reaction, ?target, "Mapping target outside the reaction; keeping original.");
            target
        })
    }

    fn reaction(&mut self, id: ReactionId) -> Result<ReactionId, ChemError> {
        if let Some(&copy) = self.map.reactions.get(id) {
            return Ok(copy);
        }
        let Entry { object, value } = self.space.reaction_entry(id)?.clone();
        let reactants = self.members(&value.reactants)?;
        let products = self.members(&value.products)?;
        let agents = self.members(&value.agents)?;
        let mappings = value
            .mappings
            .iter()
            .map(|m| Mapping {
                first: self.mapped(id, m.first),
                second: self.mapped(id, m.second),
            })
            .collect();
        let reaction = Reaction {
            reactants,
            products,
            agents,
            mappings,
            direction: value.direction,
        };
        let children: Vec<ContainerId> = reaction.all_participants().collect();
        let copy = self.space.reactions.insert(Entry {
            object,
            value: reaction,
        });
        for child in children {
            self.space.attach(child, copy);
        }
        self.map.reactions.insert(id, copy);
        Ok(copy)
    }

    fn reaction_set(&mut self, id: ReactionSetId) -> Result<ReactionSetId, ChemError> {
        if let Some(&copy) = self.map.reaction_sets.get(id) {
            return Ok(copy);
        }
        let Entry { object, value } = self.space.reaction_set_entry(id)?.clone();
        let mut members = ChemObjectSet::new();
        for entry in value.members.entries() {
            members.add_with_multiplier(self.reaction(entry.item)?, entry.multiplier);
        }
        let children: Vec<ReactionId> = members.iter().collect();
        let copy = self.space.reaction_sets.insert(Entry {
            object,
            value: ReactionSet { members },
        });
        for child in children {
            self.space.attach(child, copy);
        }
        self.map.reaction_sets.insert(id, copy);
        Ok(copy)
    }

    fn model(&mut self, id: ChemModelId) -> Result<ChemModelId, ChemError> {
        if let Some(&copy) = self.map.models.get(id) {
            return Ok(copy);
        }
        let Entry { object, mut value } = self.space.model_entry(id)?.clone();
        value.molecules = value.molecules.map(|s| self.container_set(s)).transpose()?;
        value.reactions = value.reactions.map(|s| self.reaction_set(s)).transpose()?;
        value.rings = value.rings.map(|s| self.container_set(s)).transpose()?;
        value.crystal = value.crystal.map(|c| self.container(c)).transpose()?;
        let copy = self.space.models.insert(Entry { object, value });
        if let Some(set) = value.molecules {
            self.space.attach(set, copy);
        }
        if let Some(set) = value.reactions {
            self.space.attach(set, copy);
        }
        if let Some(set) = value.rings {
            self.space.attach(set, copy);
        }
        if let Some(crystal) = value.crystal {
            self.space.attach(crystal, copy);
        }
        self.map.models.insert(id, copy);
        Ok(copy)
    }

    fn sequence(&mut self, id: ChemSequenceId) -> Result<ChemSequenceId, ChemError> {
        if let Some(&copy) = self.map.sequences.get(id) {
            return Ok(copy);
        }
        let Entry { object, mut value } = self.space.sequence_entry(id)?.clone();
        value.models = value
            .models
            .iter()
            .map(|&m| self.model(m))
            .collect::<Result<Vec<_>, _>>()?;
        let children = value.models.clone();
        let copy = self.space.sequences.insert(Entry { object, value });
        for child in children {
            self.space.attach(child, copy);
        }
        self.map.sequences.insert(id, copy);
        Ok(copy)
    }

    fn file(&mut self, id: ChemFileId) -> Result<ChemFileId, ChemError> {
        let Entry { object, mut value } = self.space.file_entry(id)?.clone();
        value.sequences = value
            .sequences
            .iter()
            .map(|&s| self.sequence(s))
            .collect::<Result<Vec<_>, _>>()?;
        let children = value.sequences.clone();
        let copy = self.space.files.insert(Entry { object, value });
        for child in children {
            self.space.attach(child, copy);
        }
        Ok(copy)
    }
}

impl ChemSpace {
    /// Copies an atom. A fragment atom's container is copied with it.
    pub fn clone_atom(&mut self, id: AtomId) -> Result<AtomId, ChemError> {
        Cloner::new(self).atom(id)
    }

    /// Copies a bond together with its atoms.
    pub fn clone_bond(&mut self, id: BondId) -> Result<BondId, ChemError> {
        Cloner::new(self).bond(id)
    }

    pub fn clone_lone_pair(&mut self, id: LonePairId) -> Result<LonePairId, ChemError> {
        Cloner::new(self).lone_pair(id)
    }

    pub fn clone_single_electron(
        &mut self,
        id: SingleElectronId,
    ) -> Result<SingleElectronId, ChemError> {
        Cloner::new(self).single_electron(id)
    }

    /// Deep copy of a container: new atoms, electron containers and stereo elements, with
    /// every internal reference pointing into the copy. Sub-containers (fragments,
    /// monomers, strands) are copied as well; listeners are not.
    #[instrument(skip_all, name = "clone_container")]
    pub fn clone_container(&mut self, id: ContainerId) -> Result<ContainerId, ChemError> {
        let mut cloner = Cloner::new(self);
        let copy = cloner.container(id)?;
        debug!(
            atoms = cloner.map.atoms.len(),
            bonds = cloner.map.bonds.len(),
            containers = cloner.map.containers.len(),
            "Cloned container."
        );
        Ok(copy)
    }

    /// Copies a set and its members, keeping multipliers.
    #[instrument(skip_all, name = "clone_container_set")]
    pub fn clone_container_set(&mut self, id: ContainerSetId) -> Result<ContainerSetId, ChemError> {
        Cloner::new(self).container_set(id)
    }

    /// Copies a reaction, its participants and its mappings.
    #[instrument(skip_all, name = "clone_reaction")]
    pub fn clone_reaction(&mut self, id: ReactionId) -> Result<ReactionId, ChemError> {
        Cloner::new(self).reaction(id)
    }

    #[instrument(skip_all, name = "clone_reaction_set")]
    pub fn clone_reaction_set(&mut self, id: ReactionSetId) -> Result<ReactionSetId, ChemError> {
        Cloner::new(self).reaction_set(id)
    }

    #[instrument(skip_all, name = "clone_chem_model")]
    pub fn clone_chem_model(&mut self, id: ChemModelId) -> Result<ChemModelId, ChemError> {
        Cloner::new(self).model(id)
    }

    #[instrument(skip_all, name = "clone_chem_sequence")]
    pub fn clone_chem_sequence(&mut self, id: ChemSequenceId) -> Result<ChemSequenceId, ChemError> {
        Cloner::new(self).sequence(id)
    }

    #[instrument(skip_all, name = "clone_chem_file")]
    pub fn clone_chem_file(&mut self, id: ChemFileId) -> Result<ChemFileId, ChemError> {
        Cloner::new(self).file(id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::CountingListener;
    use super::*;
    use crate::core::models::bond::BondOrder;
    use crate::core::models::ids::ObjectKey;
    use crate::core::models::stereo::{StereoElement, TetrahedralWinding};
    use crate::core::object::{ChemFlags, PropertyValue};
    use std::time::{Duration, Instant};

    fn acetone(space: &mut ChemSpace) -> ContainerId {
        let mol = space.new_atom_container();
        for symbol in ["C", "C", "C", "O"] {
            let atom = space.new_atom(symbol);
            space.add_atom(mol, atom).unwrap();
        }
        space.add_new_bond(mol, 0, 1, BondOrder::Single).unwrap();
        space.add_new_bond(mol, 0, 3, BondOrder::Double).unwrap();
        space.add_new_bond(mol, 0, 2, BondOrder::Single).unwrap();
        mol
    }

    mod containers {
        use super::*;

        #[test]
        fn clone_owns_new_members() {
            let mut space = ChemSpace::new();
            let mol = acetone(&mut space);
            space.add_new_lone_pair(mol, 3).unwrap();
            let copy = space.clone_container(mol).unwrap();

            let original = space.container(mol).unwrap();
            let cloned = space.container(copy).unwrap();
            assert_eq!(cloned.atom_count(), 4);
            assert_eq!(cloned.bond_count(), 3);
            assert_eq!(cloned.lone_pairs().len(), 1);
            for atom in cloned.atoms() {
                assert!(!original.contains_atom(*atom));
            }
            for bond in cloned.bonds() {
                assert!(!original.contains_bond(*bond));
                for atom in space.bond(*bond).unwrap().atoms() {
                    assert!(cloned.contains_atom(*atom));
                }
            }
            let lp = cloned.lone_pairs()[0];
            assert_eq!(space.lone_pair(lp).unwrap().atom(), Some(cloned.atoms()[3]));
        }

        #[test]
        fn clone_is_independent_of_the_original() {
            let mut space = ChemSpace::new();
            let mol = acetone(&mut space);
            space.set_property(mol, "name", "acetone").unwrap();
            space.set_flag(mol, ChemFlags::VISITED, true).unwrap();
            let copy = space.clone_container(mol).unwrap();

            let original_c1 = space.atom_at(mol, 0).unwrap();
            space.set_formal_charge(original_c1, Some(1)).unwrap();
            space.set_property(copy, "name", "propanone").unwrap();

            let cloned_c1 = space.atom_at(copy, 0).unwrap();
            assert_eq!(space.atom(cloned_c1).unwrap().formal_charge(), Some(0));
            assert_eq!(
                space.property::<String>(mol, "name").unwrap().as_deref(),
                Some("acetone")
            );
            assert!(space.flag(copy, ChemFlags::VISITED).unwrap());
            assert_eq!(space.bond_order_sum(copy, cloned_c1).unwrap(), 4.0);
        }

        #[test]
        fn listeners_are_not_cloned() {
            let mut space = ChemSpace::new();
            let mol = acetone(&mut space);
            let (listener, handle) = CountingListener::new();
            space.add_listener(mol, &handle).unwrap();
            let copy = space.clone_container(mol).unwrap();
            listener.reset();

            assert_eq!(space.listener_count(copy).unwrap(), 0);
            let cloned_atom = space.atom_at(copy, 0).unwrap();
            space.set_id(cloned_atom, Some("c1")).unwrap();
            assert!(!listener.changed());
            assert_eq!(
                space.parents(cloned_atom).unwrap(),
                &[ObjectKey::Container(copy)]
            );
        }

        #[test]
        fn stereo_elements_point_into_the_clone() {
            let mut space = ChemSpace::new();
            let mol = space.new_atom_container();
            let atoms: Vec<AtomId> = (0..5).map(|_| space.new_atom("C")).collect();
            for &atom in &atoms {
                space.add_atom(mol, atom).unwrap();
            }
            let element = StereoElement::tetrahedral(
                atoms[0],
                [atoms[1], atoms[2], atoms[3], atoms[4]],
                TetrahedralWinding::AntiClockwise,
            );
            space.add_stereo_element(mol, element).unwrap();
            let copy = space.clone_container(mol).unwrap();

            let cloned = space.container(copy).unwrap();
            let StereoElement::Tetrahedral(t) = &cloned.stereo_elements()[0] else {
                panic!("expected tetrahedral element");
            };
            assert_eq!(t.focus, cloned.atoms()[0]);
            let ligands = <[AtomId; 4]>::try_from(&cloned.atoms()[1..]).unwrap();
            assert_eq!(t.ligands, ligands);
            assert_eq!(t.winding, TetrahedralWinding::AntiClockwise);
        }

        #[test]
        fn atomless_bond_survives_cloning() {
            let mut space = ChemSpace::new();
            let mol = space.new_atom_container();
            let bond = space.new_empty_bond();
            space.add_bond(mol, bond).unwrap();
            let copy = space.clone_container(mol).unwrap();
            let cloned_bond = space.bond_at(copy, 0).unwrap();
            assert_ne!(cloned_bond, bond);
            assert!(space.bond(cloned_bond).unwrap().atoms().is_empty());
        }

        #[test]
        fn self_referential_property_is_not_followed() {
            let mut space = ChemSpace::new();
            let mol = acetone(&mut space);
            let atom = space.atom_at(mol, 0).unwrap();
            space
                .set_property(mol, "self", ObjectKey::from(mol))
                .unwrap();
            space
                .set_property(atom, "owner", ObjectKey::from(mol))
                .unwrap();

            let start = Instant::now();
            let copy = space.clone_container(mol).unwrap();
            assert!(start.elapsed() < Duration::from_millis(100));

            assert_eq!(
                space.properties(copy).unwrap().get("self"),
                Some(&PropertyValue::Object(ObjectKey::Container(mol)))
            );
        }

        #[test]
        fn polymer_clone_shares_atoms_with_its_monomers() {
            let mut space = ChemSpace::new();
            let polymer = space.new_polymer();
            let monomer = space.new_monomer();
            space.set_monomer_name(monomer, Some("ALA1")).unwrap();
            let atom = space.new_atom("C");
            space.add_atom_to_monomer(polymer, atom, monomer).unwrap();

            let copy = space.clone_container(polymer).unwrap();
            let cloned_monomer = space.monomer_named(copy, "ALA1").unwrap().unwrap();
            assert_ne!(cloned_monomer, monomer);
            assert_eq!(
                space.container(copy).unwrap().atoms(),
                space.container(cloned_monomer).unwrap().atoms()
            );
            assert_ne!(space.atom_at(copy, 0).unwrap(), atom);
        }
    }

    mod standalone {
        use super::*;

        #[test]
        fn cloning_a_bond_clones_its_atoms() {
            let mut space = ChemSpace::new();
            let a = space.new_atom("C");
            let b = space.new_atom("O");
            let bond = space.new_bond(a, b, BondOrder::Double).unwrap();
            let copy = space.clone_bond(bond).unwrap();
            let atoms = space.bond(copy).unwrap().atoms().to_vec();
            assert_eq!(atoms.len(), 2);
            assert!(!atoms.contains(&a) && !atoms.contains(&b));
            assert_eq!(space.atom(atoms[1]).unwrap().symbol(), Some("O"));
            assert_eq!(space.bond(copy).unwrap().order(), BondOrder::Double);
        }

        #[test]
        fn cloning_a_fragment_atom_clones_its_fragment() {
            let mut space = ChemSpace::new();
            let fragment_atom = space.new_fragment_atom("Ph");
            let fragment = space.fragment(fragment_atom).unwrap().unwrap();
            let inner = space.new_atom("C");
            space.add_atom(fragment, inner).unwrap();

            let copy = space.clone_atom(fragment_atom).unwrap();
            let cloned_fragment = space.fragment(copy).unwrap().unwrap();
            assert_ne!(cloned_fragment, fragment);
            assert_eq!(space.container(cloned_fragment).unwrap().atom_count(), 1);
            assert_ne!(space.atom_at(cloned_fragment, 0).unwrap(), inner);
        }

        #[test]
        fn cloning_a_lone_pair_clones_its_atom() {
            let mut space = ChemSpace::new();
            let atom = space.new_atom("N");
            let lp = space.new_lone_pair(atom).unwrap();
            let copy = space.clone_lone_pair(lp).unwrap();
            let cloned_atom = space.lone_pair(copy).unwrap().atom().unwrap();
            assert_ne!(cloned_atom, atom);
            let se = space.new_empty_single_electron();
            let se_copy = space.clone_single_electron(se).unwrap();
            assert_eq!(space.single_electron(se_copy).unwrap().atom(), None);
        }
    }

    mod aggregates {
        use super::*;
        use crate::core::models::reaction::ReactionRole;

        #[test]
        fn set_clone_copies_each_member_once() {
            let mut space = ChemSpace::new();
            let mol = acetone(&mut space);
            let set = space.new_container_set();
            space.add_to_set_with_multiplier(set, mol, 2.0).unwrap();
            space.add_to_set_with_multiplier(set, mol, 3.0).unwrap();

            let copy = space.clone_container_set(set).unwrap();
            let members = space.set_members(copy).unwrap();
            assert_eq!(members.len(), 2);
            assert_eq!(members.get(0), members.get(1));
            assert_ne!(members.get(0), Some(mol));
            assert_eq!(members.multipliers(), vec![2.0, 3.0]);
        }

        #[test]
        fn reaction_clone_remaps_mappings() {
            let mut space = ChemSpace::new();
            let reactant = acetone(&mut space);
            let product = acetone(&mut space);
            let reaction = space.new_reaction();
            space.add_reactant(reaction, reactant).unwrap();
            space
                .add_product_with_coefficient(reaction, product, 2.0)
                .unwrap();
            let from = space.atom_at(reactant, 3).unwrap();
            let to = space.atom_at(product, 3).unwrap();
            space.add_mapping(reaction, Mapping::new(from, to)).unwrap();

            let copy = space.clone_reaction(reaction).unwrap();
            let cloned = space.reaction(copy).unwrap();
            let cloned_reactant = cloned.reactants().get(0).unwrap();
            let cloned_product = cloned.products().get(0).unwrap();
            assert_eq!(
                cloned.mappings()[0],
                Mapping::new(
                    space.atom_at(cloned_reactant, 3).unwrap(),
                    space.atom_at(cloned_product, 3).unwrap()
                )
            );
            assert_eq!(
                space
                    .coefficient(copy, ReactionRole::Product, cloned_product)
                    .unwrap(),
                2.0
            );
        }

        #[test]
        fn model_clone_rebuilds_the_hierarchy() {
            let mut space = ChemSpace::new();
            let mol = acetone(&mut space);
            let set = space.new_container_set();
            space.add_to_set(set, mol).unwrap();
            let crystal = space.new_crystal();
            let model = space.new_chem_model();
            space.set_model_molecules(model, Some(set)).unwrap();
            space.set_model_crystal(model, Some(crystal)).unwrap();
            let sequence = space.new_chem_sequence();
            space.add_chem_model(sequence, model).unwrap();
            let file = space.new_chem_file();
            space.add_chem_sequence(file, sequence).unwrap();

            let copy = space.clone_chem_file(file).unwrap();
            let cloned_sequence = space.chem_sequence_at(copy, 0).unwrap();
            let cloned_model = space.chem_model_at(cloned_sequence, 0).unwrap();
            let cloned_set = space.chem_model(cloned_model).unwrap().molecules().unwrap();
            assert_ne!(cloned_model, model);
            assert_ne!(cloned_set, set);
            assert_ne!(
                space.chem_model(cloned_model).unwrap().crystal(),
                Some(crystal)
            );

            let (listener, handle) = CountingListener::new();
            space.add_listener(copy, &handle).unwrap();
            let cloned_mol = space.set_member_at(cloned_set, 0).unwrap();
            let cloned_atom = space.atom_at(cloned_mol, 0).unwrap();
            space.set_id(cloned_atom, Some("x")).unwrap();
            assert!(listener.changed());
            listener.reset();
            let original_atom = space.atom_at(mol, 0).unwrap();
            space.set_id(original_atom, Some("y")).unwrap();
            assert!(!listener.changed());
        }
    }
}
