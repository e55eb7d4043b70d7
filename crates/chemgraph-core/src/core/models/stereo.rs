use super::ids::{AtomId, BondId};

/// Winding of the ligands around a tetrahedral centre, looking from the first ligand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrahedralWinding {
    Clockwise,
    AntiClockwise,
}

impl TetrahedralWinding {
    pub fn invert(self) -> Self {
        match self {
            Self::Clockwise => Self::AntiClockwise,
            Self::AntiClockwise => Self::Clockwise,
        }
    }
}

/// Relative placement of the two substituent bonds of a stereo double bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conformation {
    Opposite,
    Together,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetrahedralChirality {
    pub focus: AtomId,
    pub ligands: [AtomId; 4],
    pub winding: TetrahedralWinding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBondStereochemistry {
    pub focus: BondId,
    pub ligand_bonds: [BondId; 2],
    pub conformation: Conformation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomParity {
    pub focus: AtomId,
    pub surrounding: [AtomId; 4],
    pub parity: i32,
}

/// A stereo descriptor owned by an atom container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StereoElement {
    Tetrahedral(TetrahedralChirality),
    DoubleBond(DoubleBondStereochemistry),
    Parity(AtomParity),
}

impl StereoElement {
    pub fn tetrahedral(focus: AtomId, ligands: [AtomId; 4], winding: TetrahedralWinding) -> Self {
        Self::Tetrahedral(TetrahedralChirality {
            focus,
            ligands,
            winding,
        })
    }

    pub fn double_bond(
        focus: BondId,
        ligand_bonds: [BondId; 2],
        conformation: Conformation,
    ) -> Self {
        Self::DoubleBond(DoubleBondStereochemistry {
            focus,
            ligand_bonds,
            conformation,
        })
    }

    pub fn parity(focus: AtomId, surrounding: [AtomId; 4], parity: i32) -> Self {
        Self::Parity(AtomParity {
            focus,
            surrounding,
            parity,
        })
    }

    /// Atoms referenced directly by the element (focus first).
    pub fn atoms(&self) -> Vec<AtomId> {
        match self {
            Self::Tetrahedral(t) => std::iter::once(t.focus).chain(t.ligands).collect(),
            Self::Parity(p) => std::iter::once(p.focus).chain(p.surrounding).collect(),
            Self::DoubleBond(_) => Vec::new(),
        }
    }

    /// Bonds referenced directly by the element (focus first).
    pub fn bonds(&self) -> Vec<BondId> {
        match self {
            Self::DoubleBond(d) => std::iter::once(d.focus).chain(d.ligand_bonds).collect(),
            _ => Vec::new(),
        }
    }

    pub fn contains_atom(&self, atom: AtomId) -> bool {
        self.atoms().contains(&atom)
    }

    pub fn contains_bond(&self, bond: BondId) -> bool {
        self.bonds().contains(&bond)
    }

    /// Substitutes `new` for every reference to `old`, keeping positions.
    pub fn replace_atom(&mut self, old: AtomId, new: AtomId) -> bool {
        let swap = |slot: &mut AtomId| {
            if *slot == old {
                *slot = new;
                true
            } else {
                false
            }
        };
        match self {
            Self::Tetrahedral(t) => {
                let mut hit = swap(&mut t.focus);
                for ligand in &mut t.ligands {
                    hit |= swap(ligand);
                }
                hit
            }
            Self::Parity(p) => {
                let mut hit = swap(&mut p.focus);
                for ligand in &mut p.surrounding {
                    hit |= swap(ligand);
                }
                hit
            }
            Self::DoubleBond(_) => false,
        }
    }

    /// Rebuilds the element with every reference passed through the given maps.
    ///
    /// Returns `None` when a referenced atom or bond has no image.
    pub fn map(
        &self,
        atom: impl Fn(AtomId) -> Option<AtomId>,
        bond: impl Fn(BondId) -> Option<BondId>,
    ) -> Option<Self> {
        let map_four = |ids: [AtomId; 4]| -> Option<[AtomId; 4]> {
            Some([atom(ids[0])?, atom(ids[1])?, atom(ids[2])?, atom(ids[3])?])
        };
        Some(match self {
            Self::Tetrahedral(t) => Self::Tetrahedral(TetrahedralChirality {
                focus: atom(t.focus)?,
                ligands: map_four(t.ligands)?,
                winding: t.winding,
            }),
            Self::Parity(p) => Self::Parity(AtomParity {
                focus: atom(p.focus)?,
                surrounding: map_four(p.surrounding)?,
                parity: p.parity,
            }),
            Self::DoubleBond(d) => Self::DoubleBond(DoubleBondStereochemistry {
                focus: bond(d.focus)?,
                ligand_bonds: [bond(d.ligand_bonds[0])?, bond(d.ligand_bonds[1])?],
                conformation: d.conformation,
            }),
        })
    }
}
