use super::ChemSpace;
use crate::core::models::container::{BioPolymer, ContainerKind, Crystal, Monomer, Polymer, Strand};
use crate::core::models::ids::{AtomId, ContainerId};
use crate::core::models::pdb::{PdbResidue, PdbStructure};
use crate::engine::error::ChemError;
use nalgebra::Vector3;
use std::collections::HashMap;

fn wrong_kind(container: ContainerId, expected: &'static str) -> ChemError {
    ChemError::WrongKind {
        key: container.into(),
        expected,
    }
}

impl ChemSpace {
    // --- Crystals ---

    pub fn new_crystal(&mut self) -> ContainerId {
        self.new_container_of_kind(ContainerKind::Crystal(Crystal::default()))
    }

    /// A crystal whose unit cell holds the members of `source`.
    pub fn new_crystal_from(&mut self, source: ContainerId) -> Result<ContainerId, ChemError> {
        self.container(source)?;
        let crystal = self.new_crystal();
        self.merge(crystal, source)?;
        Ok(crystal)
    }

    pub fn crystal(&self, id: ContainerId) -> Result<&Crystal, ChemError> {
        self.container(id)?
            .crystal()
            .ok_or_else(|| wrong_kind(id, "crystal"))
    }

    pub fn update_crystal<R>(
        &mut self,
        id: ContainerId,
        f: impl FnOnce(&mut Crystal) -> R,
    ) -> Result<R, ChemError> {
        let crystal = self
            .container_entry_mut(id)?
            .value
            .crystal_mut()
            .ok_or_else(|| wrong_kind(id, "crystal"))?;
        let result = f(crystal);
        self.notify_changed(id);
        Ok(result)
    }

    pub fn set_crystal_axes(
        &mut self,
        id: ContainerId,
        a: Vector3<f64>,
        b: Vector3<f64>,
        c: Vector3<f64>,
    ) -> Result<(), ChemError> {
        self.update_crystal(id, |crystal| {
            crystal.a = a;
            crystal.b = b;
            crystal.c = c;
        })
    }

    pub fn set_space_group(&mut self, id: ContainerId, group: &str) -> Result<(), ChemError> {
        self.update_crystal(id, |crystal| crystal.space_group = group.to_string())
    }

    pub fn set_z(&mut self, id: ContainerId, z: Option<u32>) -> Result<(), ChemError> {
        self.update_crystal(id, |crystal| crystal.z = z)
    }

    // --- Monomers and strands ---

    pub fn new_monomer(&mut self) -> ContainerId {
        self.new_container_of_kind(ContainerKind::Monomer(Monomer::default()))
    }

    pub fn monomer(&self, id: ContainerId) -> Result<&Monomer, ChemError> {
        self.container(id)?
            .monomer()
            .ok_or_else(|| wrong_kind(id, "monomer"))
    }

    pub fn update_monomer<R>(
        &mut self,
        id: ContainerId,
        f: impl FnOnce(&mut Monomer) -> R,
    ) -> Result<R, ChemError> {
        let monomer = self
            .container_entry_mut(id)?
            .value
            .monomer_mut()
            .ok_or_else(|| wrong_kind(id, "monomer"))?;
        let result = f(monomer);
        self.notify_changed(id);
        Ok(result)
    }

    pub fn set_monomer_name(
        &mut self,
        id: ContainerId,
        name: Option<&str>,
    ) -> Result<(), ChemError> {
        self.update_monomer(id, |m| m.name = name.map(str::to_string))
    }

    pub fn set_monomer_type(
        &mut self,
        id: ContainerId,
        monomer_type: Option<&str>,
    ) -> Result<(), ChemError> {
        self.update_monomer(id, |m| m.monomer_type = monomer_type.map(str::to_string))
    }

    pub fn set_monomer_residue(
        &mut self,
        id: ContainerId,
        residue: Option<PdbResidue>,
    ) -> Result<(), ChemError> {
        self.update_monomer(id, |m| m.residue = residue)
    }

    pub fn new_strand(&mut self) -> ContainerId {
        self.new_container_of_kind(ContainerKind::Strand(Strand::default()))
    }

    pub fn strand(&self, id: ContainerId) -> Result<&Strand, ChemError> {
        self.container(id)?
            .strand()
            .ok_or_else(|| wrong_kind(id, "strand"))
    }

    pub fn set_strand_name(
        &mut self,
        id: ContainerId,
        name: Option<&str>,
    ) -> Result<(), ChemError> {
        let strand = self
            .container_entry_mut(id)?
            .value
            .strand_mut()
            .ok_or_else(|| wrong_kind(id, "strand"))?;
        strand.name = name.map(str::to_string);
        self.notify_changed(id);
        Ok(())
    }

    pub fn set_strand_type(
        &mut self,
        id: ContainerId,
        strand_type: Option<&str>,
    ) -> Result<(), ChemError> {
        let strand = self
            .container_entry_mut(id)?
            .value
            .strand_mut()
            .ok_or_else(|| wrong_kind(id, "strand"))?;
        strand.strand_type = strand_type.map(str::to_string);
        self.notify_changed(id);
        Ok(())
    }

    // --- Polymers ---

    pub fn new_polymer(&mut self) -> ContainerId {
        self.new_container_of_kind(ContainerKind::Polymer(Polymer::default()))
    }

    pub fn polymer(&self, id: ContainerId) -> Result<&Polymer, ChemError> {
        self.container(id)?
            .polymer()
            .ok_or_else(|| wrong_kind(id, "polymer"))
    }

    fn monomer_map(&self, owner: ContainerId) -> Result<&HashMap<String, ContainerId>, ChemError> {
        match &self.container(owner)?.kind {
            ContainerKind::Polymer(p) => Ok(&p.monomers),
            ContainerKind::Strand(s) => Ok(&s.monomers),
            _ => Err(wrong_kind(owner, "polymer or strand")),
        }
    }

    fn monomer_map_mut(
        &mut self,
        owner: ContainerId,
    ) -> Result<&mut HashMap<String, ContainerId>, ChemError> {
        match &mut self.container_entry_mut(owner)?.value.kind {
            ContainerKind::Polymer(p) => Ok(&mut p.monomers),
            ContainerKind::Strand(s) => Ok(&mut s.monomers),
            _ => Err(wrong_kind(owner, "polymer or strand")),
        }
    }

    fn monomer_name(&self, monomer: ContainerId) -> Result<String, ChemError> {
        self.monomer(monomer)?
            .name
            .clone()
            .ok_or_else(|| ChemError::InvalidArgument("monomer has no name".to_string()))
    }

    fn ensure_atom(&mut self, container: ContainerId, atom: AtomId) -> Result<(), ChemError> {
        if !self.container(container)?.contains_atom(atom) {
            self.add_atom(container, atom)?;
        }
        Ok(())
    }

    /// Adds `atom` to a polymer or strand and to `monomer`, registering the monomer under
    /// its name the first time it is seen.
    pub fn add_atom_to_monomer(
        &mut self,
        owner: ContainerId,
        atom: AtomId,
        monomer: ContainerId,
    ) -> Result<(), ChemError> {
        self.monomer_map(owner)?;
        let name = self.monomer_name(monomer)?;
        self.atom(atom)?;

        self.ensure_atom(owner, atom)?;
        self.ensure_atom(monomer, atom)?;
        let monomers = self.monomer_map_mut(owner)?;
        if !monomers.contains_key(&name) {
            monomers.insert(name, monomer);
            self.attach(monomer, owner);
            self.notify_changed(owner);
        }
        Ok(())
    }

    /// Looks a monomer up by name in a polymer or strand.
    pub fn monomer_named(
        &self,
        owner: ContainerId,
        name: &str,
    ) -> Result<Option<ContainerId>, ChemError> {
        Ok(self.monomer_map(owner)?.get(name).copied())
    }

    pub fn monomer_names(&self, owner: ContainerId) -> Result<Vec<String>, ChemError> {
        let mut names: Vec<String> = self.monomer_map(owner)?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Monomers of a polymer or strand; for a bio-polymer, summed over its strands.
    pub fn monomer_count(&self, owner: ContainerId) -> Result<usize, ChemError> {
        if let Some(bio) = self.container(owner)?.bio_polymer() {
            let mut count = 0;
            for &strand in bio.strands.values() {
                count += self.strand(strand)?.monomer_count();
            }
            return Ok(count);
        }
        Ok(self.monomer_map(owner)?.len())
    }

    /// Unregisters the named monomer and removes its atoms from `owner`.
    pub fn remove_monomer(&mut self, owner: ContainerId, name: &str) -> Result<bool, ChemError> {
        let Some(monomer) = self.monomer_map(owner)?.get(name).copied() else {
            return Ok(false);
        };
        let atoms = self.container(monomer)?.atoms().to_vec();
        for atom in atoms {
            if self.container(owner)?.contains_atom(atom) {
                self.remove_atom(owner, atom)?;
            }
        }
        self.monomer_map_mut(owner)?.remove(name);
        self.detach(monomer, owner);
        self.notify_changed(owner);
        Ok(true)
    }

    // --- Bio-polymers ---

    pub fn new_bio_polymer(&mut self) -> ContainerId {
        self.new_container_of_kind(ContainerKind::BioPolymer(BioPolymer::default()))
    }

    pub fn bio_polymer(&self, id: ContainerId) -> Result<&BioPolymer, ChemError> {
        self.container(id)?
            .bio_polymer()
            .ok_or_else(|| wrong_kind(id, "bio-polymer"))
    }

    /// Adds `atom` to the bio-polymer, to `strand` and to `monomer` within that strand.
    pub fn add_atom_to_strand(
        &mut self,
        bio_polymer: ContainerId,
        atom: AtomId,
        monomer: ContainerId,
        strand: ContainerId,
    ) -> Result<(), ChemError> {
        self.bio_polymer(bio_polymer)?;
        let strand_name = self
            .strand(strand)?
            .name
            .clone()
            .ok_or_else(|| ChemError::InvalidArgument("strand has no name".to_string()))?;
        self.monomer_name(monomer)?;
        self.atom(atom)?;

        self.ensure_atom(bio_polymer, atom)?;
        self.add_atom_to_monomer(strand, atom, monomer)?;
        let value = &mut self.container_entry_mut(bio_polymer)?.value;
        let Some(bio) = value.bio_polymer_mut() else {
            return Err(wrong_kind(bio_polymer, "bio-polymer"));
        };
        if !bio.strands.contains_key(&strand_name) {
            bio.strands.insert(strand_name, strand);
            self.attach(strand, bio_polymer);
            self.notify_changed(bio_polymer);
        }
        Ok(())
    }

    pub fn strand_named(
        &self,
        bio_polymer: ContainerId,
        name: &str,
    ) -> Result<Option<ContainerId>, ChemError> {
        Ok(self.bio_polymer(bio_polymer)?.strand(name))
    }

    pub fn strand_names(&self, bio_polymer: ContainerId) -> Result<Vec<String>, ChemError> {
        let mut names: Vec<String> = self
            .bio_polymer(bio_polymer)?
            .strand_names()
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    /// The monomer called `monomer` inside the strand called `strand`.
    pub fn bio_polymer_monomer(
        &self,
        bio_polymer: ContainerId,
        strand: &str,
        monomer: &str,
    ) -> Result<Option<ContainerId>, ChemError> {
        match self.bio_polymer(bio_polymer)?.strand(strand) {
            Some(strand) => self.monomer_named(strand, monomer),
            None => Ok(None),
        }
    }

    /// Unregisters the named strand and removes its atoms from the bio-polymer.
    pub fn remove_strand(
        &mut self,
        bio_polymer: ContainerId,
        name: &str,
    ) -> Result<bool, ChemError> {
        let Some(strand) = self.bio_polymer(bio_polymer)?.strand(name) else {
            return Ok(false);
        };
        let atoms = self.container(strand)?.atoms().to_vec();
        for atom in atoms {
            if self.container(bio_polymer)?.contains_atom(atom) {
                self.remove_atom(bio_polymer, atom)?;
            }
        }
        let value = &mut self.container_entry_mut(bio_polymer)?.value;
        if let Some(bio) = value.bio_polymer_mut() {
            bio.strands.remove(name);
        }
        self.detach(strand, bio_polymer);
        self.notify_changed(bio_polymer);
        Ok(true)
    }

    pub fn add_structure(
        &mut self,
        bio_polymer: ContainerId,
        structure: PdbStructure,
    ) -> Result<(), ChemError> {
        let value = &mut self.container_entry_mut(bio_polymer)?.value;
        let Some(bio) = value.bio_polymer_mut() else {
            return Err(wrong_kind(bio_polymer, "bio-polymer"));
        };
        bio.structures.push(structure);
        self.notify_changed(bio_polymer);
        Ok(())
    }

    pub fn structures(&self, bio_polymer: ContainerId) -> Result<&[PdbStructure], ChemError> {
        Ok(&self.bio_polymer(bio_polymer)?.structures)
    }
}
