use super::ids::{AtomId, BondId, ContainerId, LonePairId, SingleElectronId};
use super::pdb::{PdbResidue, PdbStructure};
use super::stereo::StereoElement;
use nalgebra::Vector3;
use std::collections::HashMap;

pub const DEFAULT_SPACE_GROUP: &str = "P1";

/// Unit cell and symmetry of a crystal.
#[derive(Debug, Clone, PartialEq)]
pub struct Crystal {
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
    pub c: Vector3<f64>,
    pub space_group: String,
    pub z: Option<u32>,
}

impl Default for Crystal {
    fn default() -> Self {
        Self {
            a: Vector3::zeros(),
            b: Vector3::zeros(),
            c: Vector3::zeros(),
            space_group: DEFAULT_SPACE_GROUP.to_string(),
            z: Some(1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Monomer {
    pub name: Option<String>,
    pub monomer_type: Option<String>,
    pub residue: Option<PdbResidue>,
}

/// A named strand of a bio-polymer, grouping its monomers by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strand {
    pub name: Option<String>,
    pub strand_type: Option<String>,
    pub(crate) monomers: HashMap<String, ContainerId>,
}

impl Strand {
    pub fn monomer(&self, name: &str) -> Option<ContainerId> {
        self.monomers.get(name).copied()
    }

    pub fn monomer_names(&self) -> impl Iterator<Item = &str> {
        self.monomers.keys().map(String::as_str)
    }

    pub fn monomer_count(&self) -> usize {
        self.monomers.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polymer {
    pub(crate) monomers: HashMap<String, ContainerId>,
}

impl Polymer {
    pub fn monomer(&self, name: &str) -> Option<ContainerId> {
        self.monomers.get(name).copied()
    }

    pub fn monomer_names(&self) -> impl Iterator<Item = &str> {
        self.monomers.keys().map(String::as_str)
    }

    pub fn monomer_count(&self) -> usize {
        self.monomers.len()
    }
}

/// A polymer organised in strands. Secondary-structure records make it a PDB polymer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BioPolymer {
    pub(crate) strands: HashMap<String, ContainerId>,
    pub structures: Vec<PdbStructure>,
}

impl BioPolymer {
    pub fn strand(&self, name: &str) -> Option<ContainerId> {
        self.strands.get(name).copied()
    }

    pub fn strand_names(&self) -> impl Iterator<Item = &str> {
        self.strands.keys().map(String::as_str)
    }

    pub fn strand_count(&self) -> usize {
        self.strands.len()
    }
}

/// What an atom container represents beyond its chemical graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ContainerKind {
    #[default]
    Molecule,
    Ring,
    Crystal(Crystal),
    Monomer(Monomer),
    Strand(Strand),
    Polymer(Polymer),
    BioPolymer(BioPolymer),
}

impl ContainerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Molecule => "molecule",
            Self::Ring => "ring",
            Self::Crystal(_) => "crystal",
            Self::Monomer(_) => "monomer",
            Self::Strand(_) => "strand",
            Self::Polymer(_) => "polymer",
            Self::BioPolymer(_) => "bio-polymer",
        }
    }

    /// Sub-containers owned through name maps.
    pub fn children(&self) -> Vec<ContainerId> {
        match self {
            Self::Strand(s) => s.monomers.values().copied().collect(),
            Self::Polymer(p) => p.monomers.values().copied().collect(),
            Self::BioPolymer(b) => b.strands.values().copied().collect(),
            _ => Vec::new(),
        }
    }
}

/// A chemical graph: ordered atoms plus the electron containers and stereo elements
/// over them. Membership is by key, so an atom may sit in several containers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomContainer {
    pub(crate) atoms: Vec<AtomId>,
    pub(crate) bonds: Vec<BondId>,
    pub(crate) lone_pairs: Vec<LonePairId>,
    pub(crate) single_electrons: Vec<SingleElectronId>,
    pub(crate) stereo: Vec<StereoElement>,
    pub(crate) kind: ContainerKind,
}

impl AtomContainer {
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[BondId] {
        &self.bonds
    }

    pub fn lone_pairs(&self) -> &[LonePairId] {
        &self.lone_pairs
    }

    pub fn single_electrons(&self) -> &[SingleElectronId] {
        &self.single_electrons
    }

    pub fn stereo_elements(&self) -> &[StereoElement] {
        &self.stereo
    }

    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn electron_container_count(&self) -> usize {
        self.bonds.len() + self.lone_pairs.len() + self.single_electrons.len()
    }

    pub fn contains_atom(&self, atom: AtomId) -> bool {
        self.atoms.contains(&atom)
    }

    pub fn contains_bond(&self, bond: BondId) -> bool {
        self.bonds.contains(&bond)
    }

    pub fn contains_lone_pair(&self, lone_pair: LonePairId) -> bool {
        self.lone_pairs.contains(&lone_pair)
    }

    pub fn contains_single_electron(&self, electron: SingleElectronId) -> bool {
        self.single_electrons.contains(&electron)
    }

    pub fn atom_index(&self, atom: AtomId) -> Option<usize> {
        self.atoms.iter().position(|&a| a == atom)
    }

    pub fn bond_index(&self, bond: BondId) -> Option<usize> {
        self.bonds.iter().position(|&b| b == bond)
    }

    /// True iff the container holds neither atoms nor bonds.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    pub fn crystal(&self) -> Option<&Crystal> {
        match &self.kind {
            ContainerKind::Crystal(c) => Some(c),
            _ => None,
        }
    }

    pub fn crystal_mut(&mut self) -> Option<&mut Crystal> {
        match &mut self.kind {
            ContainerKind::Crystal(c) => Some(c),
            _ => None,
        }
    }

    pub fn monomer(&self) -> Option<&Monomer> {
        match &self.kind {
            ContainerKind::Monomer(m) => Some(m),
            _ => None,
        }
    }

    pub fn monomer_mut(&mut self) -> Option<&mut Monomer> {
        match &mut self.kind {
            ContainerKind::Monomer(m) => Some(m),
            _ => None,
        }
    }

    pub fn strand(&self) -> Option<&Strand> {
        match &self.kind {
            ContainerKind::Strand(s) => Some(s),
            _ => None,
        }
    }

    pub fn strand_mut(&mut self) -> Option<&mut Strand> {
        match &mut self.kind {
            ContainerKind::Strand(s) => Some(s),
            _ => None,
        }
    }

    pub fn polymer(&self) -> Option<&Polymer> {
        match &self.kind {
            ContainerKind::Polymer(p) => Some(p),
            _ => None,
        }
    }

    pub fn bio_polymer(&self) -> Option<&BioPolymer> {
        match &self.kind {
            ContainerKind::BioPolymer(b) => Some(b),
            _ => None,
        }
    }

    pub fn bio_polymer_mut(&mut self) -> Option<&mut BioPolymer> {
        match &mut self.kind {
            ContainerKind::BioPolymer(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_ring(&self) -> bool {
        matches!(self.kind, ContainerKind::Ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn atom(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn bond(n: u64) -> BondId {
        BondId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_container_is_empty() {
        let container = AtomContainer::new(ContainerKind::Molecule);
        assert!(container.is_empty());
        assert_eq!(container.electron_container_count(), 0);
    }

    #[test]
    fn container_with_only_bonds_is_not_empty() {
        let mut container = AtomContainer::default();
        container.bonds.push(bond(1));
        assert!(!container.is_empty());
    }

    #[test]
    fn index_lookups_follow_insertion_order() {
        let mut container = AtomContainer::default();
        container.atoms.extend([atom(3), atom(1), atom(2)]);
        assert_eq!(container.atom_index(atom(1)), Some(1));
        assert_eq!(container.atom_index(atom(9)), None);
        assert!(container.contains_atom(atom(2)));
    }

    #[test]
    fn crystal_defaults_to_p1_with_one_molecule_per_cell() {
        let crystal = Crystal::default();
        assert_eq!(crystal.space_group, "P1");
        assert_eq!(crystal.z, Some(1));
        assert_eq!(crystal.a, Vector3::zeros());
    }

    #[test]
    fn kind_accessors_only_match_their_variant() {
        let container = AtomContainer::new(ContainerKind::Crystal(Crystal::default()));
        assert!(container.crystal().is_some());
        assert!(container.monomer().is_none());
        assert!(!container.is_ring());
        assert_eq!(container.kind().name(), "crystal");
    }

    #[test]
    fn polymer_children_are_its_monomers() {
        let mut polymer = Polymer::default();
        let monomer = ContainerId::from(KeyData::from_ffi(4));
        polymer.monomers.insert("TRP279".to_string(), monomer);
        let kind = ContainerKind::Polymer(polymer);
        assert_eq!(kind.children(), vec![monomer]);
    }
}
