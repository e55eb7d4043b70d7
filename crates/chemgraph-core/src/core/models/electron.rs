use super::ids::AtomId;

pub const LONE_PAIR_ELECTRONS: u32 = 2;
pub const SINGLE_ELECTRON_ELECTRONS: u32 = 1;

/// Anything that holds electrons and references the atoms they belong to.
///
/// Implemented by bonds, lone pairs and single electrons. Lone pairs and single electrons
/// have a fixed electron count; their `set_electron_count` leaves the count unchanged.
pub trait ElectronContainer {
    fn electron_count(&self) -> Option<u32>;
    fn set_electron_count(&mut self, count: Option<u32>);
    fn atoms(&self) -> &[AtomId];

    fn contains(&self, atom: AtomId) -> bool {
        self.atoms().contains(&atom)
    }
}

/// A non-bonding electron pair located on one atom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LonePair {
    atom: Option<AtomId>,
}

impl LonePair {
    pub fn new(atom: AtomId) -> Self {
        Self { atom: Some(atom) }
    }

    pub fn atom(&self) -> Option<AtomId> {
        self.atom
    }

    pub fn set_atom(&mut self, atom: Option<AtomId>) {
        self.atom = atom;
    }
}

impl ElectronContainer for LonePair {
    fn electron_count(&self) -> Option<u32> {
        Some(LONE_PAIR_ELECTRONS)
    }

    fn set_electron_count(&mut self, _count: Option<u32>) {}

    fn atoms(&self) -> &[AtomId] {
        self.atom.as_slice()
    }
}

/// An unpaired electron located on one atom (a radical centre).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleElectron {
    atom: Option<AtomId>,
}

impl SingleElectron {
    pub fn new(atom: AtomId) -> Self {
        Self { atom: Some(atom) }
    }

    pub fn atom(&self) -> Option<AtomId> {
        self.atom
    }

    pub fn set_atom(&mut self, atom: Option<AtomId>) {
        self.atom = atom;
    }
}

impl ElectronContainer for SingleElectron {
    fn electron_count(&self) -> Option<u32> {
        Some(SINGLE_ELECTRON_ELECTRONS)
    }

    fn set_electron_count(&mut self, _count: Option<u32>) {}

    fn atoms(&self) -> &[AtomId] {
        self.atom.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn lone_pair_has_two_electrons_and_ignores_overrides() {
        let mut lp = LonePair::new(dummy_atom_id(1));
        assert_eq!(lp.electron_count(), Some(2));
        lp.set_electron_count(Some(3));
        assert_eq!(lp.electron_count(), Some(2));
    }

    #[test]
    fn single_electron_has_one_electron_and_ignores_overrides() {
        let mut se = SingleElectron::new(dummy_atom_id(1));
        assert_eq!(se.electron_count(), Some(1));
        se.set_electron_count(None);
        assert_eq!(se.electron_count(), Some(1));
    }

    #[test]
    fn contains_checks_the_located_atom() {
        let a = dummy_atom_id(1);
        let lp = LonePair::new(a);
        assert!(lp.contains(a));
        assert!(!lp.contains(dummy_atom_id(2)));
        assert_eq!(ElectronContainer::atoms(&lp), &[a]);
    }

    #[test]
    fn atomless_containers_are_empty() {
        let lp = LonePair::default();
        let se = SingleElectron::default();
        assert!(lp.atom().is_none());
        assert!(ElectronContainer::atoms(&lp).is_empty());
        assert!(ElectronContainer::atoms(&se).is_empty());
    }

    #[test]
    fn set_atom_relocates_the_electrons() {
        let mut se = SingleElectron::new(dummy_atom_id(1));
        se.set_atom(Some(dummy_atom_id(2)));
        assert_eq!(se.atom(), Some(dummy_atom_id(2)));
        se.set_atom(None);
        assert!(!se.contains(dummy_atom_id(2)));
    }
}
