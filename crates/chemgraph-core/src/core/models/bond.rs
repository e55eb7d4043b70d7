use super::electron::ElectronContainer;
use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Unset,
    Single,
    Double,
    Triple,
    Quadruple,
    Quintuple,
    Sextuple,
}

impl BondOrder {
    /// Number of shared electron pairs; `Unset` counts as zero.
    pub fn numeric(self) -> u32 {
        self as u32
    }

    pub fn from_numeric(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Unset),
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            4 => Some(Self::Quadruple),
            5 => Some(Self::Quintuple),
            6 => Some(Self::Sextuple),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "unset" => Ok(Self::Unset),
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "4" | "q" | "quadruple" => Ok(Self::Quadruple),
            "5" | "quintuple" => Ok(Self::Quintuple),
            "6" | "sextuple" => Ok(Self::Sextuple),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Unset => "Unset",
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Quadruple => "Quadruple",
                Self::Quintuple => "Quintuple",
                Self::Sextuple => "Sextuple",
            }
        )
    }
}

/// Wedge/hash and double-bond stereo annotation of a bond, relative to its first atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    Up,
    UpInverted,
    Down,
    DownInverted,
    UpOrDown,
    UpOrDownInverted,
    EOrZ,
    E,
    Z,
}

impl BondStereo {
    /// The same annotation seen from the other end of the bond.
    pub fn inverted(self) -> Self {
        match self {
            Self::Up => Self::UpInverted,
            Self::UpInverted => Self::Up,
            Self::Down => Self::DownInverted,
            Self::DownInverted => Self::Down,
            Self::UpOrDown => Self::UpOrDownInverted,
            Self::UpOrDownInverted => Self::UpOrDown,
            other => other,
        }
    }
}

/// A bond between two or more atoms.
///
/// The common case has exactly two atoms; multi-centre bonds (e.g. in organometallic
/// complexes) hold more. A bond created with [`Bond::default`] has no atoms yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bond {
    atoms: Vec<AtomId>,
    order: BondOrder,
    stereo: BondStereo,
    electron_count: Option<u32>,
}

impl Bond {
    pub fn new(begin: AtomId, end: AtomId, order: BondOrder) -> Self {
        Self::with_stereo(begin, end, order, BondStereo::None)
    }

    pub fn with_stereo(begin: AtomId, end: AtomId, order: BondOrder, stereo: BondStereo) -> Self {
        Self {
            atoms: vec![begin, end],
            order,
            stereo,
            electron_count: Some(order.numeric() * 2),
        }
    }

    pub fn multi_center(atoms: Vec<AtomId>, order: BondOrder) -> Self {
        Self {
            atoms,
            order,
            stereo: BondStereo::None,
            electron_count: Some(order.numeric() * 2),
        }
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atom(&self, index: usize) -> Option<AtomId> {
        self.atoms.get(index).copied()
    }

    pub fn begin(&self) -> Option<AtomId> {
        self.atom(0)
    }

    pub fn end(&self) -> Option<AtomId> {
        self.atom(1)
    }

    pub fn is_multi_center(&self) -> bool {
        self.atoms.len() > 2
    }

    pub fn contains(&self, atom: AtomId) -> bool {
        self.atoms.contains(&atom)
    }

    /// For a two-centre bond, the partner of `atom`.
    pub fn other(&self, atom: AtomId) -> Option<AtomId> {
        match self.atoms.as_slice() {
            [a, b] if *a == atom => Some(*b),
            [a, b] if *b == atom => Some(*a),
            _ => None,
        }
    }

    /// Every atom of the bond except `atom`; empty when `atom` is not part of the bond.
    pub fn connected_atoms(&self, atom: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        let member = self.contains(atom);
        self.atoms
            .iter()
            .copied()
            .filter(move |&a| member && a != atom)
    }

    /// Two bonds are connected when they share at least one atom.
    pub fn is_connected_to(&self, other: &Bond) -> bool {
        self.atoms.iter().any(|a| other.contains(*a))
    }

    pub fn set_atoms(&mut self, atoms: Vec<AtomId>) {
        self.atoms = atoms;
    }

    /// Replaces the atom at `index`; returns `false` when `index` is out of range.
    pub fn set_atom_at(&mut self, index: usize, atom: AtomId) -> bool {
        match self.atoms.get_mut(index) {
            Some(slot) => {
                *slot = atom;
                true
            }
            None => false,
        }
    }

    /// Substitutes `new` for every occurrence of `old`, keeping positions.
    pub fn replace_atom(&mut self, old: AtomId, new: AtomId) -> bool {
        let mut replaced = false;
        for slot in self.atoms.iter_mut().filter(|slot| **slot == old) {
            *slot = new;
            replaced = true;
        }
        replaced
    }

    pub fn order(&self) -> BondOrder {
        self.order
    }

    /// Sets the order and recomputes the electron count (two per shared pair).
    pub fn set_order(&mut self, order: BondOrder) {
        self.order = order;
        self.electron_count = Some(order.numeric() * 2);
    }

    pub fn stereo(&self) -> BondStereo {
        self.stereo
    }

    pub fn set_stereo(&mut self, stereo: BondStereo) {
        self.stereo = stereo;
    }
}

impl ElectronContainer for Bond {
    fn electron_count(&self) -> Option<u32> {
        self.electron_count
    }

    fn set_electron_count(&mut self, count: Option<u32>) {
        self.electron_count = count;
    }

    fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }
}
