use super::ChemSpace;
use crate::core::models::atom::{Atom, DEFAULT_PSEUDO_LABEL};
use crate::core::models::bond::{Bond, BondOrder, BondStereo};
use crate::core::models::container::AtomContainer;
use crate::core::models::electron::{ElectronContainer, LonePair, SingleElectron};
use crate::core::models::ids::{
    AtomId, BondId, ContainerId, ElectronContainerId, LonePairId, ObjectKey, SingleElectronId,
};
use crate::core::models::pdb::PdbRecord;
use crate::engine::error::ChemError;
use nalgebra::{Point2, Point3};
use std::collections::HashSet;

impl ChemSpace {
    // --- Atoms ---

    pub fn new_atom(&mut self, symbol: &str) -> AtomId {
        self.insert_atom(Atom::new(symbol))
    }

    /// Stores a pre-built atom value.
    pub fn new_atom_from(&mut self, atom: Atom) -> AtomId {
        self.insert_atom(atom)
    }

    pub fn new_atom_with_point2d(&mut self, symbol: &str, point: Point2<f64>) -> AtomId {
        self.insert_atom(Atom::with_point2d(symbol, point))
    }

    pub fn new_atom_with_point3d(&mut self, symbol: &str, point: Point3<f64>) -> AtomId {
        self.insert_atom(Atom::with_point3d(symbol, point))
    }

    pub fn new_pdb_atom(&mut self, symbol: &str, record: PdbRecord) -> AtomId {
        let mut atom = Atom::new(symbol);
        atom.set_pdb(Some(record));
        self.insert_atom(atom)
    }

    pub fn new_pseudo_atom(&mut self, label: &str) -> AtomId {
        self.insert_atom(Atom::pseudo(label))
    }

    /// A pseudo atom copying the typing and coordinates of `source`.
    pub fn new_pseudo_atom_from(&mut self, source: AtomId) -> Result<AtomId, ChemError> {
        let atom = self.atom(source)?.clone();
        let label = atom.label().unwrap_or(DEFAULT_PSEUDO_LABEL).to_string();
        Ok(self.insert_atom(atom.into_pseudo(&label)))
    }

    /// A fragment atom together with the (empty) container it stands for.
    pub fn new_fragment_atom(&mut self, label: &str) -> AtomId {
        let fragment = self.insert_container(AtomContainer::default());
        let id = self.insert_atom(Atom::fragment(label, Some(fragment)));
        self.attach(fragment, id);
        id
    }

    pub fn atom(&self, id: AtomId) -> Result<&Atom, ChemError> {
        Ok(&self.atom_entry(id)?.value)
    }

    /// Applies `f` to an atom and notifies its observers.
    pub fn update_atom<R>(
        &mut self,
        id: AtomId,
        f: impl FnOnce(&mut Atom) -> R,
    ) -> Result<R, ChemError> {
        let result = f(&mut self.atom_entry_mut(id)?.value);
        self.notify_changed(id);
        Ok(result)
    }

    pub fn set_point2d(&mut self, id: AtomId, point: Option<Point2<f64>>) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_point2d(point))
    }

    pub fn set_point3d(&mut self, id: AtomId, point: Option<Point3<f64>>) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_point3d(point))
    }

    pub fn set_fractional_point3d(
        &mut self,
        id: AtomId,
        point: Option<Point3<f64>>,
    ) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_fractional_point3d(point))
    }

    pub fn set_implicit_hydrogen_count(
        &mut self,
        id: AtomId,
        count: Option<u32>,
    ) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_implicit_hydrogen_count(count))
    }

    pub fn set_formal_charge(&mut self, id: AtomId, charge: Option<i32>) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_formal_charge(charge))
    }

    pub fn set_charge(&mut self, id: AtomId, charge: Option<f64>) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_charge(charge))
    }

    pub fn set_stereo_parity(&mut self, id: AtomId, parity: i32) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_stereo_parity(parity))
    }

    pub fn set_atom_type_name(&mut self, id: AtomId, name: Option<&str>) -> Result<(), ChemError> {
        self.update_atom(id, |a| a.set_atom_type_name(name))
    }

    pub fn set_label(&mut self, id: AtomId, label: &str) -> Result<(), ChemError> {
        self.atom_entry_mut(id)?.value.set_label(label)?;
        self.notify_changed(id);
        Ok(())
    }

    /// Fails with [`ChemError::UnsupportedMutation`] for fragment atoms.
    pub fn set_exact_mass(&mut self, id: AtomId, mass: Option<f64>) -> Result<(), ChemError> {
        self.atom_entry_mut(id)?.value.set_exact_mass(mass)?;
        self.notify_changed(id);
        Ok(())
    }

    /// The stored exact mass, or for fragment atoms the sum over the fragment's atoms with
    /// unset masses counting as zero.
    pub fn exact_mass(&self, id: AtomId) -> Result<Option<f64>, ChemError> {
        let mut visiting = HashSet::new();
        self.exact_mass_inner(id, &mut visiting)
    }

    fn exact_mass_inner(
        &self,
        id: AtomId,
        visiting: &mut HashSet<AtomId>,
    ) -> Result<Option<f64>, ChemError> {
        let atom = self.atom(id)?;
        if !atom.is_fragment() {
            return Ok(atom.exact_mass());
        }
        let Some(fragment) = atom.fragment_container() else {
            return Ok(None);
        };
        if !visiting.insert(id) {
            return Ok(Some(0.0));
        }
        let mut total = 0.0;
        for &member in self.container(fragment)?.atoms() {
            total += self.exact_mass_inner(member, visiting)?.unwrap_or(0.0);
        }
        visiting.remove(&id);
        Ok(Some(total))
    }

    pub fn fragment(&self, id: AtomId) -> Result<Option<ContainerId>, ChemError> {
        Ok(self.atom(id)?.fragment_container())
    }

    pub fn set_fragment(
        &mut self,
        id: AtomId,
        fragment: Option<ContainerId>,
    ) -> Result<(), ChemError> {
        if let Some(container) = fragment {
            self.container(container)?;
        }
        let entry = self.atom_entry_mut(id)?;
        let previous = entry.value.fragment_container();
        entry.value.set_fragment_container(fragment)?;
        if let Some(old) = previous {
            self.detach(old, id);
        }
        if let Some(new) = fragment {
            self.attach(new, id);
        }
        self.notify_changed(id);
        Ok(())
    }

    // --- Bonds ---

    fn ensure_atoms_exist(&self, atoms: &[AtomId]) -> Result<(), ChemError> {
        for &atom in atoms {
            self.atom(atom)?;
        }
        Ok(())
    }

    /// Every container holding `key` must also hold each of `atoms`.
    fn ensure_atoms_in_owners(
        &self,
        key: impl Into<ObjectKey>,
        atoms: &[AtomId],
    ) -> Result<(), ChemError> {
        for &parent in self.parents(key)? {
            if let ObjectKey::Container(container) = parent {
                self.ensure_members(container, atoms)?;
            }
        }
        Ok(())
    }

    pub fn new_bond(
        &mut self,
        begin: AtomId,
        end: AtomId,
        order: BondOrder,
    ) -> Result<BondId, ChemError> {
        self.new_bond_with_stereo(begin, end, order, BondStereo::None)
    }

    pub fn new_bond_with_stereo(
        &mut self,
        begin: AtomId,
        end: AtomId,
        order: BondOrder,
        stereo: BondStereo,
    ) -> Result<BondId, ChemError> {
        self.ensure_atoms_exist(&[begin, end])?;
        let bond = Bond::with_stereo(begin, end, order, stereo);
        Ok(self.insert_bond(bond))
    }

    pub fn new_multi_center_bond(
        &mut self,
        atoms: Vec<AtomId>,
        order: BondOrder,
    ) -> Result<BondId, ChemError> {
        if atoms.len() < 2 {
            return Err(ChemError::InvalidArgument(format!(
                "a bond needs at least two atoms, got {}",
                atoms.len()
            )));
        }
        self.ensure_atoms_exist(&atoms)?;
        Ok(self.insert_bond(Bond::multi_center(atoms, order)))
    }

    /// A bond without atoms, to be completed with [`ChemSpace::set_bond_atoms`].
    pub fn new_empty_bond(&mut self) -> BondId {
        self.insert_bond(Bond::default())
    }

    pub fn bond(&self, id: BondId) -> Result<&Bond, ChemError> {
        Ok(&self.bond_entry(id)?.value)
    }

    pub fn update_bond<R>(
        &mut self,
        id: BondId,
        f: impl FnOnce(&mut Bond) -> R,
    ) -> Result<R, ChemError> {
        let result = f(&mut self.bond_entry_mut(id)?.value);
        self.notify_changed(id);
        Ok(result)
    }

    pub fn set_bond_order(&mut self, id: BondId, order: BondOrder) -> Result<(), ChemError> {
        self.update_bond(id, |b| b.set_order(order))
    }

    pub fn set_bond_stereo(&mut self, id: BondId, stereo: BondStereo) -> Result<(), ChemError> {
        self.update_bond(id, |b| b.set_stereo(stereo))
    }

    /// # Errors
    ///
    /// [`ChemError::NoSuchAtom`] if a container holding the bond lacks one of `atoms`.
    pub fn set_bond_atoms(&mut self, id: BondId, atoms: Vec<AtomId>) -> Result<(), ChemError> {
        self.ensure_atoms_exist(&atoms)?;
        self.ensure_atoms_in_owners(id, &atoms)?;
        self.update_bond(id, |b| b.set_atoms(atoms))
    }

    /// Mean 2D position of the bond's atoms; `None` if any atom lacks a 2D point.
    pub fn bond_center_2d(&self, id: BondId) -> Result<Option<Point2<f64>>, ChemError> {
        let bond = self.bond(id)?;
        if bond.atom_count() == 0 {
            return Ok(None);
        }
        let mut sum = nalgebra::Vector2::zeros();
        for &atom in bond.atoms() {
            match self.atom(atom)?.point2d() {
                Some(p) => sum += p.coords,
                None => return Ok(None),
            }
        }
        Ok(Some(Point2::from(sum / bond.atom_count() as f64)))
    }

    /// Mean 3D position of the bond's atoms; `None` if any atom lacks a 3D point.
    pub fn bond_center_3d(&self, id: BondId) -> Result<Option<Point3<f64>>, ChemError> {
        let bond = self.bond(id)?;
        if bond.atom_count() == 0 {
            return Ok(None);
        }
        let mut sum = nalgebra::Vector3::zeros();
        for &atom in bond.atoms() {
            match self.atom(atom)?.point3d() {
                Some(p) => sum += p.coords,
                None => return Ok(None),
            }
        }
        Ok(Some(Point3::from(sum / bond.atom_count() as f64)))
    }

    /// Bond length from 3D coordinates.
    pub fn bond_length(&self, id: BondId) -> Result<Option<f64>, ChemError> {
        let bond = self.bond(id)?;
        let (Some(begin), Some(end)) = (bond.begin(), bond.end()) else {
            return Ok(None);
        };
        let (Some(p), Some(q)) = (self.atom(begin)?.point3d(), self.atom(end)?.point3d()) else {
            return Ok(None);
        };
        Ok(Some(nalgebra::distance(&p, &q)))
    }

    // --- Lone pairs and single electrons ---

    pub fn new_lone_pair(&mut self, atom: AtomId) -> Result<LonePairId, ChemError> {
        self.atom(atom)?;
        Ok(self.insert_lone_pair(LonePair::new(atom)))
    }

    pub fn new_empty_lone_pair(&mut self) -> LonePairId {
        self.insert_lone_pair(LonePair::default())
    }

    pub fn new_single_electron(&mut self, atom: AtomId) -> Result<SingleElectronId, ChemError> {
        self.atom(atom)?;
        Ok(self.insert_single_electron(SingleElectron::new(atom)))
    }

    pub fn new_empty_single_electron(&mut self) -> SingleElectronId {
        self.insert_single_electron(SingleElectron::default())
    }

    pub fn lone_pair(&self, id: LonePairId) -> Result<&LonePair, ChemError> {
        Ok(&self.lone_pair_entry(id)?.value)
    }

    pub fn single_electron(&self, id: SingleElectronId) -> Result<&SingleElectron, ChemError> {
        Ok(&self.single_electron_entry(id)?.value)
    }

    pub fn set_lone_pair_atom(
        &mut self,
        id: LonePairId,
        atom: Option<AtomId>,
    ) -> Result<(), ChemError> {
        if let Some(a) = atom {
            self.atom(a)?;
            self.ensure_atoms_in_owners(id, &[a])?;
        }
        self.lone_pair_entry_mut(id)?.value.set_atom(atom);
        self.notify_changed(id);
        Ok(())
    }

    pub fn set_single_electron_atom(
        &mut self,
        id: SingleElectronId,
        atom: Option<AtomId>,
    ) -> Result<(), ChemError> {
        if let Some(a) = atom {
            self.atom(a)?;
            self.ensure_atoms_in_owners(id, &[a])?;
        }
        self.single_electron_entry_mut(id)?.value.set_atom(atom);
        self.notify_changed(id);
        Ok(())
    }

    fn electron_container(
        &self,
        id: ElectronContainerId,
    ) -> Result<&dyn ElectronContainer, ChemError> {
        let container: &dyn ElectronContainer = match id {
            ElectronContainerId::Bond(b) => &self.bond_entry(b)?.value,
            ElectronContainerId::LonePair(lp) => &self.lone_pair_entry(lp)?.value,
            ElectronContainerId::SingleElectron(se) => &self.single_electron_entry(se)?.value,
        };
        Ok(container)
    }

    pub fn electron_count(&self, id: ElectronContainerId) -> Result<Option<u32>, ChemError> {
        Ok(self.electron_container(id)?.electron_count())
    }

    /// Lone pairs and single electrons keep their fixed counts.
    pub fn set_electron_count(
        &mut self,
        id: ElectronContainerId,
        count: Option<u32>,
    ) -> Result<(), ChemError> {
        match id {
            ElectronContainerId::Bond(b) => self.bond_entry_mut(b)?.value.set_electron_count(count),
            ElectronContainerId::LonePair(lp) => {
                self.lone_pair_entry_mut(lp)?
                    .value
                    .set_electron_count(count)
            }
            ElectronContainerId::SingleElectron(se) => {
                self.single_electron_entry_mut(se)?
                    .value
                    .set_electron_count(count)
            }
        }
        self.notify_changed(id);
        Ok(())
    }

    pub fn electron_container_atoms(
        &self,
        id: ElectronContainerId,
    ) -> Result<&[AtomId], ChemError> {
        Ok(self.electron_container(id)?.atoms())
    }
}
