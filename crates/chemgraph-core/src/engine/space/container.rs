use super::ChemSpace;
use crate::core::models::bond::{Bond, BondOrder, BondStereo};
use crate::core::models::container::{AtomContainer, ContainerKind};
use crate::core::models::electron::ElectronContainer;
use crate::core::models::ids::{
    AtomId, BondId, ContainerId, ElectronContainerId, LonePairId, ObjectKey, SingleElectronId,
};
use crate::core::models::stereo::StereoElement;
use crate::engine::config::DuplicateAtomPolicy;
use crate::engine::error::ChemError;
use tracing::debug;

impl ChemSpace {
    pub fn new_atom_container(&mut self) -> ContainerId {
        self.insert_container(AtomContainer::new(ContainerKind::Molecule))
    }

    /// A new container holding the same atoms, electron containers and stereo elements
    /// as `source` (shared, not copied).
    pub fn new_atom_container_from(
        &mut self,
        source: ContainerId,
    ) -> Result<ContainerId, ChemError> {
        self.container(source)?;
        let id = self.new_atom_container();
        self.merge(id, source)?;
        Ok(id)
    }

    pub(crate) fn new_container_of_kind(&mut self, kind: ContainerKind) -> ContainerId {
        self.insert_container(AtomContainer::new(kind))
    }

    pub fn container(&self, id: ContainerId) -> Result<&AtomContainer, ChemError> {
        Ok(&self.container_entry(id)?.value)
    }

    pub fn atom_at(&self, container: ContainerId, index: usize) -> Result<AtomId, ChemError> {
        let atoms = self.container(container)?.atoms();
        atoms.get(index).copied().ok_or(ChemError::IndexOutOfRange {
            index,
            len: atoms.len(),
        })
    }

    pub fn bond_at(&self, container: ContainerId, index: usize) -> Result<BondId, ChemError> {
        let bonds = self.container(container)?.bonds();
        bonds.get(index).copied().ok_or(ChemError::IndexOutOfRange {
            index,
            len: bonds.len(),
        })
    }

    /// True iff the container holds neither atoms nor bonds.
    pub fn is_empty(&self, container: ContainerId) -> Result<bool, ChemError> {
        Ok(self.container(container)?.is_empty())
    }

    fn member_container(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<&AtomContainer, ChemError> {
        let value = self.container(container)?;
        if value.contains_atom(atom) {
            Ok(value)
        } else {
            Err(ChemError::NoSuchAtom { atom, container })
        }
    }

    pub(super) fn ensure_members(
        &self,
        container: ContainerId,
        atoms: &[AtomId],
    ) -> Result<(), ChemError> {
        for &atom in atoms {
            self.member_container(container, atom)?;
        }
        Ok(())
    }

    // --- Adding ---

    /// Appends `atom`.
    ///
    /// # Errors
    ///
    /// Adding an atom that is already a member is ignored, or rejected with
    /// [`ChemError::AtomAlreadyPresent`] under [`DuplicateAtomPolicy::Reject`].
    pub fn add_atom(&mut self, container: ContainerId, atom: AtomId) -> Result<(), ChemError> {
        self.atom(atom)?;
        if let Some(index) = self.container(container)?.atom_index(atom) {
            return match self.config.duplicate_atoms {
                DuplicateAtomPolicy::Ignore => {
                    debug!(?atom, ?container, index, "Atom already present; ignoring add.");
                    Ok(())
                }
                DuplicateAtomPolicy::Reject => Err(ChemError::AtomAlreadyPresent { atom, index }),
            };
        }
        self.container_entry_mut(container)?.value.atoms.push(atom);
        self.attach(atom, container);
        self.notify_changed(container);
        Ok(())
    }

    /// Puts `atom` at `index`, substituting it for the previous atom in every bond, lone
    /// pair, single electron and stereo element of the container.
    ///
    /// # Errors
    ///
    /// [`ChemError::IndexOutOfRange`] if `index` is not an existing slot, and
    /// [`ChemError::AtomAlreadyPresent`] if `atom` already sits at another index.
    pub fn set_atom(
        &mut self,
        container: ContainerId,
        index: usize,
        atom: AtomId,
    ) -> Result<(), ChemError> {
        self.atom(atom)?;
        let value = self.container(container)?;
        let old = *value.atoms.get(index).ok_or(ChemError::IndexOutOfRange {
            index,
            len: value.atoms.len(),
        })?;
        if old == atom {
            return Ok(());
        }
        if let Some(existing) = value.atom_index(atom) {
            return Err(ChemError::AtomAlreadyPresent {
                atom,
                index: existing,
            });
        }

        let bonds = value.bonds.clone();
        let lone_pairs = value.lone_pairs.clone();
        let single_electrons = value.single_electrons.clone();
        for bond in bonds {
            if let Some(entry) = self.bonds.get_mut(bond) {
                entry.value.replace_atom(old, atom);
            }
        }
        for lp in lone_pairs {
            if let Some(entry) = self.lone_pairs.get_mut(lp) {
                if entry.value.atom() == Some(old) {
                    entry.value.set_atom(Some(atom));
                }
            }
        }
        for se in single_electrons {
            if let Some(entry) = self.single_electrons.get_mut(se) {
                if entry.value.atom() == Some(old) {
                    entry.value.set_atom(Some(atom));
                }
            }
        }
        let value = &mut self.container_entry_mut(container)?.value;
        value.atoms[index] = atom;
        for element in &mut value.stereo {
            element.replace_atom(old, atom);
        }
        self.detach(old, container);
        self.attach(atom, container);
        self.notify_changed(container);
        Ok(())
    }

    /// Appends an existing bond. Every atom of the bond must already be a member.
    pub fn add_bond(&mut self, container: ContainerId, bond: BondId) -> Result<(), ChemError> {
        let atoms = self.bond(bond)?.atoms().to_vec();
        self.ensure_members(container, &atoms)?;
        let value = &mut self.container_entry_mut(container)?.value;
        if value.bonds.contains(&bond) {
            return Ok(());
        }
        value.bonds.push(bond);
        self.attach(bond, container);
        self.notify_changed(container);
        Ok(())
    }

    /// Creates a bond between the atoms at positions `begin` and `end` and appends it.
    pub fn add_new_bond(
        &mut self,
        container: ContainerId,
        begin: usize,
        end: usize,
        order: BondOrder,
    ) -> Result<BondId, ChemError> {
        self.add_new_bond_with_stereo(container, begin, end, order, BondStereo::None)
    }

    pub fn add_new_bond_with_stereo(
        &mut self,
        container: ContainerId,
        begin: usize,
        end: usize,
        order: BondOrder,
        stereo: BondStereo,
    ) -> Result<BondId, ChemError> {
        let a = self.atom_at(container, begin)?;
        let b = self.atom_at(container, end)?;
        let bond = self.insert_bond(Bond::with_stereo(a, b, order, stereo));
        self.add_bond(container, bond)?;
        Ok(bond)
    }

    /// Creates a bond between two member atoms and appends it.
    pub fn add_new_bond_between(
        &mut self,
        container: ContainerId,
        begin: AtomId,
        end: AtomId,
        order: BondOrder,
    ) -> Result<BondId, ChemError> {
        self.ensure_members(container, &[begin, end])?;
        let bond = self.insert_bond(Bond::new(begin, end, order));
        self.add_bond(container, bond)?;
        Ok(bond)
    }

    pub fn add_lone_pair(
        &mut self,
        container: ContainerId,
        lone_pair: LonePairId,
    ) -> Result<(), ChemError> {
        let atoms = self.lone_pair(lone_pair)?.atoms().to_vec();
        self.ensure_members(container, &atoms)?;
        let value = &mut self.container_entry_mut(container)?.value;
        if value.lone_pairs.contains(&lone_pair) {
            return Ok(());
        }
        value.lone_pairs.push(lone_pair);
        self.attach(lone_pair, container);
        self.notify_changed(container);
        Ok(())
    }

    /// Creates a lone pair on the atom at `atom_index` and appends it.
    pub fn add_new_lone_pair(
        &mut self,
        container: ContainerId,
        atom_index: usize,
    ) -> Result<LonePairId, ChemError> {
        let atom = self.atom_at(container, atom_index)?;
        let lone_pair = self.new_lone_pair(atom)?;
        self.add_lone_pair(container, lone_pair)?;
        Ok(lone_pair)
    }

    pub fn add_single_electron(
        &mut self,
        container: ContainerId,
        electron: SingleElectronId,
    ) -> Result<(), ChemError> {
        let atoms = self.single_electron(electron)?.atoms().to_vec();
        self.ensure_members(container, &atoms)?;
        let value = &mut self.container_entry_mut(container)?.value;
        if value.single_electrons.contains(&electron) {
            return Ok(());
        }
        value.single_electrons.push(electron);
        self.attach(electron, container);
        self.notify_changed(container);
        Ok(())
    }

    pub fn add_new_single_electron(
        &mut self,
        container: ContainerId,
        atom_index: usize,
    ) -> Result<SingleElectronId, ChemError> {
        let atom = self.atom_at(container, atom_index)?;
        let electron = self.new_single_electron(atom)?;
        self.add_single_electron(container, electron)?;
        Ok(electron)
    }

    pub fn add_electron_container(
        &mut self,
        container: ContainerId,
        electron_container: ElectronContainerId,
    ) -> Result<(), ChemError> {
        match electron_container {
            ElectronContainerId::Bond(b) => self.add_bond(container, b),
            ElectronContainerId::LonePair(lp) => self.add_lone_pair(container, lp),
            ElectronContainerId::SingleElectron(se) => self.add_single_electron(container, se),
        }
    }

    /// Appends a stereo element; every atom and bond it references must be a member.
    pub fn add_stereo_element(
        &mut self,
        container: ContainerId,
        element: StereoElement,
    ) -> Result<(), ChemError> {
        self.ensure_members(container, &element.atoms())?;
        let value = self.container(container)?;
        for bond in element.bonds() {
            if !value.contains_bond(bond) {
                return Err(ChemError::NoSuchBond { bond, container });
            }
        }
        self.container_entry_mut(container)?
            .value
            .stereo
            .push(element);
        self.notify_changed(container);
        Ok(())
    }

    pub fn stereo_elements(&self, container: ContainerId) -> Result<&[StereoElement], ChemError> {
        Ok(self.container(container)?.stereo_elements())
    }

    /// Adds every member of `other` that `container` does not hold yet.
    pub fn merge(&mut self, container: ContainerId, other: ContainerId) -> Result<(), ChemError> {
        self.container(container)?;
        if container == other {
            return Ok(());
        }
        let source = self.container(other)?.clone();
        let value = &mut self.container_entry_mut(container)?.value;
        let mut added: Vec<ObjectKey> = Vec::new();
        for atom in source.atoms {
            if !value.atoms.contains(&atom) {
                value.atoms.push(atom);
                added.push(atom.into());
            }
        }
        for bond in source.bonds {
            if !value.bonds.contains(&bond) {
                value.bonds.push(bond);
                added.push(bond.into());
            }
        }
        for lp in source.lone_pairs {
            if !value.lone_pairs.contains(&lp) {
                value.lone_pairs.push(lp);
                added.push(lp.into());
            }
        }
        for se in source.single_electrons {
            if !value.single_electrons.contains(&se) {
                value.single_electrons.push(se);
                added.push(se.into());
            }
        }
        for element in source.stereo {
            if !value.stereo.contains(&element) {
                value.stereo.push(element);
            }
        }
        for child in added {
            self.attach(child, container);
        }
        self.notify_changed(container);
        Ok(())
    }

    // --- Removing ---

    /// Removes `atom` together with every bond, lone pair, single electron and stereo
    /// element that references it.
    pub fn remove_atom(&mut self, container: ContainerId, atom: AtomId) -> Result<(), ChemError> {
        let value = self.member_container(container, atom)?;
        let bonds: Vec<BondId> = value
            .bonds
            .iter()
            .copied()
            .filter(|&b| self.bonds.get(b).is_some_and(|e| e.value.contains(atom)))
            .collect();
        let lone_pairs: Vec<LonePairId> = value
            .lone_pairs
            .iter()
            .copied()
            .filter(|&lp| {
                self.lone_pairs
                    .get(lp)
                    .is_some_and(|e| e.value.contains(atom))
            })
            .collect();
        let single_electrons: Vec<SingleElectronId> = value
            .single_electrons
            .iter()
            .copied()
            .filter(|&se| {
                self.single_electrons
                    .get(se)
                    .is_some_and(|e| e.value.contains(atom))
            })
            .collect();

        let value = &mut self.container_entry_mut(container)?.value;
        value.atoms.retain(|&a| a != atom);
        value.bonds.retain(|b| !bonds.contains(b));
        value.lone_pairs.retain(|lp| !lone_pairs.contains(lp));
        value
            .single_electrons
            .retain(|se| !single_electrons.contains(se));
        value
            .stereo
            .retain(|s| !s.contains_atom(atom) && !bonds.iter().any(|&b| s.contains_bond(b)));

        self.detach(atom, container);
        for bond in bonds {
            self.detach(bond, container);
        }
        for lp in lone_pairs {
            self.detach(lp, container);
        }
        for se in single_electrons {
            self.detach(se, container);
        }
        self.notify_changed(container);
        Ok(())
    }

    pub fn remove_atom_at(
        &mut self,
        container: ContainerId,
        index: usize,
    ) -> Result<AtomId, ChemError> {
        let atom = self.atom_at(container, index)?;
        self.remove_atom(container, atom)?;
        Ok(atom)
    }

    /// Removes a bond and the stereo elements that reference it.
    pub fn remove_bond(&mut self, container: ContainerId, bond: BondId) -> Result<(), ChemError> {
        let value = &mut self.container_entry_mut(container)?.value;
        if !value.contains_bond(bond) {
            return Err(ChemError::NoSuchBond { bond, container });
        }
        value.bonds.retain(|&b| b != bond);
        value.stereo.retain(|s| !s.contains_bond(bond));
        self.detach(bond, container);
        self.notify_changed(container);
        Ok(())
    }

    pub fn remove_bond_between(
        &mut self,
        container: ContainerId,
        a: AtomId,
        b: AtomId,
    ) -> Result<Option<BondId>, ChemError> {
        let bond = self.bond_between(container, a, b)?;
        if let Some(bond) = bond {
            self.remove_bond(container, bond)?;
        }
        Ok(bond)
    }

    pub fn remove_lone_pair(
        &mut self,
        container: ContainerId,
        lone_pair: LonePairId,
    ) -> Result<bool, ChemError> {
        let value = &mut self.container_entry_mut(container)?.value;
        let before = value.lone_pairs.len();
        value.lone_pairs.retain(|&lp| lp != lone_pair);
        let removed = before != value.lone_pairs.len();
        if removed {
            self.detach(lone_pair, container);
            self.notify_changed(container);
        }
        Ok(removed)
    }

    pub fn remove_single_electron(
        &mut self,
        container: ContainerId,
        electron: SingleElectronId,
    ) -> Result<bool, ChemError> {
        let value = &mut self.container_entry_mut(container)?.value;
        let before = value.single_electrons.len();
        value.single_electrons.retain(|&se| se != electron);
        let removed = before != value.single_electrons.len();
        if removed {
            self.detach(electron, container);
            self.notify_changed(container);
        }
        Ok(removed)
    }

    pub fn remove_electron_container(
        &mut self,
        container: ContainerId,
        electron_container: ElectronContainerId,
    ) -> Result<bool, ChemError> {
        match electron_container {
            ElectronContainerId::Bond(b) => match self.remove_bond(container, b) {
                Ok(()) => Ok(true),
                Err(ChemError::NoSuchBond { .. }) => Ok(false),
                Err(e) => Err(e),
            },
            ElectronContainerId::LonePair(lp) => self.remove_lone_pair(container, lp),
            ElectronContainerId::SingleElectron(se) => self.remove_single_electron(container, se),
        }
    }

    /// Removes every bond, lone pair and single electron. Atoms stay.
    pub fn remove_all_electron_containers(
        &mut self,
        container: ContainerId,
    ) -> Result<(), ChemError> {
        let value = &mut self.container_entry_mut(container)?.value;
        let bonds = std::mem::take(&mut value.bonds);
        let lone_pairs = std::mem::take(&mut value.lone_pairs);
        let single_electrons = std::mem::take(&mut value.single_electrons);
        value.stereo.retain(|s| s.bonds().is_empty());
        for bond in bonds {
            self.detach(bond, container);
        }
        for lp in lone_pairs {
            self.detach(lp, container);
        }
        for se in single_electrons {
            self.detach(se, container);
        }
        self.notify_changed(container);
        Ok(())
    }

    pub fn remove_all_bonds(&mut self, container: ContainerId) -> Result<(), ChemError> {
        let value = &mut self.container_entry_mut(container)?.value;
        let bonds = std::mem::take(&mut value.bonds);
        value.stereo.retain(|s| s.bonds().is_empty());
        for bond in bonds {
            self.detach(bond, container);
        }
        self.notify_changed(container);
        Ok(())
    }

    /// Empties the container of atoms, electron containers and stereo elements.
    pub fn remove_all_elements(&mut self, container: ContainerId) -> Result<(), ChemError> {
        self.remove_all_electron_containers(container)?;
        let value = &mut self.container_entry_mut(container)?.value;
        let atoms = std::mem::take(&mut value.atoms);
        value.stereo.clear();
        for atom in atoms {
            self.detach(atom, container);
        }
        self.notify_changed(container);
        Ok(())
    }

    // --- Connectivity ---

    /// Bonds of the container that involve `atom`, in container order.
    ///
    /// # Errors
    ///
    /// [`ChemError::NoSuchAtom`] if `atom` is not a member.
    pub fn connected_bonds(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<impl Iterator<Item = BondId> + '_, ChemError> {
        let value = self.member_container(container, atom)?;
        let bonds = value
            .bonds
            .iter()
            .copied()
            .filter(move |&b| self.bonds.get(b).is_some_and(|e| e.value.contains(atom)));
        Ok(bonds)
    }

    /// Atoms sharing a bond with `atom`, following bond order.
    pub fn connected_atoms(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<impl Iterator<Item = AtomId> + '_, ChemError> {
        let atoms = self
            .connected_bonds(container, atom)?
            .filter_map(move |b| self.bonds.get(b))
            .flat_map(move |e| e.value.connected_atoms(atom));
        Ok(atoms)
    }

    pub fn connected_lone_pairs(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<impl Iterator<Item = LonePairId> + '_, ChemError> {
        let value = self.member_container(container, atom)?;
        let lone_pairs = value.lone_pairs.iter().copied().filter(move |&lp| {
            self.lone_pairs
                .get(lp)
                .is_some_and(|e| e.value.contains(atom))
        });
        Ok(lone_pairs)
    }

    pub fn connected_single_electrons(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<impl Iterator<Item = SingleElectronId> + '_, ChemError> {
        let value = self.member_container(container, atom)?;
        Ok(value.single_electrons.iter().copied().filter(move |&se| {
            self.single_electrons
                .get(se)
                .is_some_and(|e| e.value.contains(atom))
        }))
    }

    /// Bonds, then lone pairs, then single electrons involving `atom`.
    pub fn connected_electron_containers(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<Vec<ElectronContainerId>, ChemError> {
        let mut result: Vec<ElectronContainerId> = self
            .connected_bonds(container, atom)?
            .map(Into::into)
            .collect();
        result.extend(
            self.connected_lone_pairs(container, atom)?
                .map(ElectronContainerId::from),
        );
        result.extend(
            self.connected_single_electrons(container, atom)?
                .map(ElectronContainerId::from),
        );
        Ok(result)
    }

    pub fn connected_bond_count(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<usize, ChemError> {
        Ok(self.connected_bonds(container, atom)?.count())
    }

    pub fn connected_atom_count(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<usize, ChemError> {
        Ok(self.connected_atoms(container, atom)?.count())
    }

    pub fn connected_lone_pair_count(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<usize, ChemError> {
        Ok(self.connected_lone_pairs(container, atom)?.count())
    }

    pub fn connected_single_electron_count(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<usize, ChemError> {
        Ok(self.connected_single_electrons(container, atom)?.count())
    }

    pub fn bond_between(
        &self,
        container: ContainerId,
        a: AtomId,
        b: AtomId,
    ) -> Result<Option<BondId>, ChemError> {
        self.member_container(container, b)?;
        let bond = self
            .connected_bonds(container, a)?
            .find(|&bond| self.bonds.get(bond).is_some_and(|e| e.value.contains(b)));
        Ok(bond)
    }

    fn connected_orders(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<Vec<BondOrder>, ChemError> {
        let orders = self
            .connected_bonds(container, atom)?
            .filter_map(|b| self.bonds.get(b))
            .map(|e| e.value.order())
            .collect();
        Ok(orders)
    }

    fn order_without_bonds(&self, atom: AtomId) -> Result<BondOrder, ChemError> {
        Ok(match self.atom(atom)?.implicit_hydrogen_count() {
            Some(n) if n > 0 => BondOrder::Single,
            _ => BondOrder::Unset,
        })
    }

    /// Highest order over the atom's bonds. Without bonds: `Single` if the atom carries
    /// implicit hydrogens, `Unset` otherwise.
    pub fn maximum_bond_order(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<BondOrder, ChemError> {
        match self.connected_orders(container, atom)?.into_iter().max() {
            Some(order) => Ok(order),
            None => self.order_without_bonds(atom),
        }
    }

    /// Lowest order over the atom's bonds, with the same fallback as the maximum.
    pub fn minimum_bond_order(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<BondOrder, ChemError> {
        match self.connected_orders(container, atom)?.into_iter().min() {
            Some(order) => Ok(order),
            None => self.order_without_bonds(atom),
        }
    }

    pub fn bond_order_sum(&self, container: ContainerId, atom: AtomId) -> Result<f64, ChemError> {
        let sum = self
            .connected_orders(container, atom)?
            .into_iter()
            .map(|o| f64::from(o.numeric()))
            .sum();
        Ok(sum)
    }

    pub fn single_electron_sum(
        &self,
        container: ContainerId,
        atom: AtomId,
    ) -> Result<usize, ChemError> {
        self.connected_single_electron_count(container, atom)
    }

    pub fn lone_pair_count(&self, container: ContainerId) -> Result<usize, ChemError> {
        Ok(self.container(container)?.lone_pairs().len())
    }
}
