use super::ChemSpace;
use crate::core::models::bond::{Bond, BondOrder};
use crate::core::models::container::{AtomContainer, ContainerKind};
use crate::core::models::ids::{AtomId, BondId, ContainerId, ContainerSetId};
use crate::core::models::set::ContainerSetKind;
use crate::engine::error::ChemError;

impl ChemSpace {
    pub fn new_ring(&mut self) -> ContainerId {
        self.new_container_of_kind(ContainerKind::Ring)
    }

    /// A cycle of `size` fresh atoms of `symbol` joined by single bonds.
    pub fn new_ring_of_size(
        &mut self,
        size: usize,
        symbol: &str,
    ) -> Result<ContainerId, ChemError> {
        if size < 3 {
            return Err(ChemError::InvalidArgument(format!(
                "a ring needs at least three atoms, got {size}"
            )));
        }
        let ring = self.new_ring();
        let atoms: Vec<AtomId> = (0..size).map(|_| self.new_atom(symbol)).collect();
        for &atom in &atoms {
            self.add_atom(ring, atom)?;
        }
        for (i, &atom) in atoms.iter().enumerate() {
            let next = atoms[(i + 1) % size];
            let bond = self.insert_bond(Bond::new(atom, next, BondOrder::Single));
            self.add_bond(ring, bond)?;
        }
        Ok(ring)
    }

    /// A ring holding the members of an existing container.
    pub fn new_ring_from(&mut self, source: ContainerId) -> Result<ContainerId, ChemError> {
        self.container(source)?;
        let ring = self.new_ring();
        self.merge(ring, source)?;
        Ok(ring)
    }

    pub(super) fn ring_container(&self, ring: ContainerId) -> Result<&AtomContainer, ChemError> {
        let value = self.container(ring)?;
        if value.is_ring() {
            Ok(value)
        } else {
            Err(ChemError::WrongKind {
                key: ring.into(),
                expected: "ring",
            })
        }
    }

    pub fn ring_size(&self, ring: ContainerId) -> Result<usize, ChemError> {
        Ok(self.ring_container(ring)?.atom_count())
    }

    /// The ring bond at `atom` other than `bond`, walking the cycle one step.
    pub fn next_bond(
        &self,
        ring: ContainerId,
        bond: BondId,
        atom: AtomId,
    ) -> Result<Option<BondId>, ChemError> {
        self.ring_container(ring)?;
        Ok(self.connected_bonds(ring, atom)?.find(|&b| b != bond))
    }

    pub fn ring_bond_order_sum(&self, ring: ContainerId) -> Result<u32, ChemError> {
        let value = self.ring_container(ring)?;
        let mut sum = 0;
        for &bond in value.bonds() {
            sum += self.bond(bond)?.order().numeric();
        }
        Ok(sum)
    }

    // --- Ring sets ---

    pub fn new_ring_set(&mut self) -> ContainerSetId {
        self.new_container_set_of_kind(ContainerSetKind::Rings)
    }

    pub fn add_ring(&mut self, set: ContainerSetId, ring: ContainerId) -> Result<(), ChemError> {
        self.ring_container(ring)?;
        self.add_to_set(set, ring)
    }

    fn rings_where(
        &self,
        set: ContainerSetId,
        mut predicate: impl FnMut(&AtomContainer) -> bool,
    ) -> Result<Vec<ContainerId>, ChemError> {
        let mut result = Vec::new();
        for ring in self.set_members(set)?.iter() {
            if !result.contains(&ring) && predicate(self.container(ring)?) {
                result.push(ring);
            }
        }
        Ok(result)
    }

    pub fn rings_containing_atom(
        &self,
        set: ContainerSetId,
        atom: AtomId,
    ) -> Result<Vec<ContainerId>, ChemError> {
        self.rings_where(set, |r| r.contains_atom(atom))
    }

    pub fn rings_containing_bond(
        &self,
        set: ContainerSetId,
        bond: BondId,
    ) -> Result<Vec<ContainerId>, ChemError> {
        self.rings_where(set, |r| r.contains_bond(bond))
    }

    /// Rings of the set sharing at least one atom with `ring`, each listed once and
    /// `ring` itself excluded.
    pub fn connected_rings(
        &self,
        set: ContainerSetId,
        ring: ContainerId,
    ) -> Result<Vec<ContainerId>, ChemError> {
        let atoms = self.container(ring)?.atoms().to_vec();
        let mut result = self.rings_where(set, |r| atoms.iter().any(|&a| r.contains_atom(a)))?;
        result.retain(|&r| r != ring);
        Ok(result)
    }

    pub fn ring_set_contains_atom(
        &self,
        set: ContainerSetId,
        atom: AtomId,
    ) -> Result<bool, ChemError> {
        Ok(!self.rings_containing_atom(set, atom)?.is_empty())
    }

    pub fn ring_set_contains_bond(
        &self,
        set: ContainerSetId,
        bond: BondId,
    ) -> Result<bool, ChemError> {
        Ok(!self.rings_containing_bond(set, bond)?.is_empty())
    }

    /// Adds the rings of `source` that `target` does not hold yet.
    pub fn merge_ring_sets(
        &mut self,
        target: ContainerSetId,
        source: ContainerSetId,
    ) -> Result<(), ChemError> {
        self.container_set(target)?;
        let rings: Vec<ContainerId> = self.set_members(source)?.iter().collect();
        for ring in rings {
            if !self.set_members(target)?.contains(ring) {
                self.add_to_set(target, ring)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two six-membered rings fused along one bond.
    fn fused_pair(space: &mut ChemSpace) -> (ContainerSetId, ContainerId, ContainerId) {
        let first = space.new_ring_of_size(6, "C").unwrap();
        let shared = space.container(first).unwrap().atoms()[..2].to_vec();
        let shared_bond = space.bond_at(first, 0).unwrap();

        let second = space.new_ring();
        space.add_atom(second, shared[0]).unwrap();
        space.add_atom(second, shared[1]).unwrap();
        let mut previous = shared[1];
        for _ in 0..4 {
            let atom = space.new_atom("C");
            space.add_atom(second, atom).unwrap();
            space
                .add_new_bond_between(second, previous, atom, BondOrder::Single)
                .unwrap();
            previous = atom;
        }
        space
            .add_new_bond_between(second, previous, shared[0], BondOrder::Single)
            .unwrap();
        space.add_bond(second, shared_bond).unwrap();

        let set = space.new_ring_set();
        space.add_ring(set, first).unwrap();
        space.add_ring(set, second).unwrap();
        (set, first, second)
    }

    #[test]
    fn fused_rings_are_connected_once() {
        let mut space = ChemSpace::new();
        let (set, first, second) = fused_pair(&mut space);
        assert_eq!(space.connected_rings(set, first).unwrap(), vec![second]);
        assert_eq!(space.connected_rings(set, second).unwrap(), vec![first]);
    }

    #[test]
    fn rings_containing_shared_members() {
        let mut space = ChemSpace::new();
        let (set, first, second) = fused_pair(&mut space);
        let shared_atom = space.atom_at(first, 0).unwrap();
        let shared_bond = space.bond_at(first, 0).unwrap();
        let lone_atom = space.atom_at(first, 3).unwrap();
        assert_eq!(
            space.rings_containing_atom(set, shared_atom).unwrap(),
            vec![first, second]
        );
        assert_eq!(
            space.rings_containing_bond(set, shared_bond).unwrap(),
            vec![first, second]
        );
        assert_eq!(
            space.rings_containing_atom(set, lone_atom).unwrap(),
            vec![first]
        );
        assert!(space.ring_set_contains_bond(set, shared_bond).unwrap());
        let outsider = space.new_atom("N");
        assert!(!space.ring_set_contains_atom(set, outsider).unwrap());
    }

    #[test]
    fn ring_of_size_is_a_closed_cycle() {
        let mut space = ChemSpace::new();
        let ring = space.new_ring_of_size(5, "C").unwrap();
        assert_eq!(space.ring_size(ring).unwrap(), 5);
        assert_eq!(space.container(ring).unwrap().bond_count(), 5);
        assert_eq!(space.ring_bond_order_sum(ring).unwrap(), 5);
        let first = space.atom_at(ring, 0).unwrap();
        assert_eq!(space.connected_bond_count(ring, first).unwrap(), 2);
        assert!(matches!(
            space.new_ring_of_size(2, "C"),
            Err(ChemError::InvalidArgument(_))
        ));
    }

    #[test]
    fn next_bond_walks_the_cycle() {
        let mut space = ChemSpace::new();
        let ring = space.new_ring_of_size(4, "C").unwrap();
        let b0 = space.bond_at(ring, 0).unwrap();
        let b1 = space.bond_at(ring, 1).unwrap();
        let shared = space.atom_at(ring, 1).unwrap();
        assert_eq!(space.next_bond(ring, b0, shared).unwrap(), Some(b1));
        assert_eq!(space.next_bond(ring, b1, shared).unwrap(), Some(b0));
    }

    #[test]
    fn ring_queries_reject_plain_containers() {
        let mut space = ChemSpace::new();
        let mol = space.new_atom_container();
        assert!(matches!(
            space.ring_size(mol),
            Err(ChemError::WrongKind {
                expected: "ring",
                ..
            })
        ));
        let set = space.new_ring_set();
        assert!(space.add_ring(set, mol).is_err());
        let ring = space.new_ring_from(mol).unwrap();
        assert_eq!(space.ring_size(ring).unwrap(), 0);
    }

    #[test]
    fn merging_ring_sets_skips_known_rings() {
        let mut space = ChemSpace::new();
        let (set, first, _) = fused_pair(&mut space);
        let extra = space.new_ring_of_size(3, "C").unwrap();
        let other = space.new_ring_set();
        space.add_ring(other, first).unwrap();
        space.add_ring(other, extra).unwrap();
        space.merge_ring_sets(set, other).unwrap();
        assert_eq!(space.set_members(set).unwrap().len(), 3);
        assert_eq!(
            space.container_set(set).unwrap().kind(),
            ContainerSetKind::Rings
        );
    }
}
