use super::bond::BondOrder;
use super::isotope::Isotope;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hybridization {
    S,
    Sp1,
    Sp2,
    Sp3,
    Planar3,
    Sp3d1,
    Sp3d2,
    Sp3d3,
    Sp3d4,
    Sp3d5,
}

#[derive(Debug, Error)]
#[error("Invalid hybridization string")]
pub struct ParseHybridizationError;

impl FromStr for Hybridization {
    type Err = ParseHybridizationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" => Ok(Self::S),
            "sp" | "sp1" => Ok(Self::Sp1),
            "sp2" => Ok(Self::Sp2),
            "sp3" => Ok(Self::Sp3),
            "planar3" => Ok(Self::Planar3),
            "sp3d1" => Ok(Self::Sp3d1),
            "sp3d2" => Ok(Self::Sp3d2),
            "sp3d3" => Ok(Self::Sp3d3),
            "sp3d4" => Ok(Self::Sp3d4),
            "sp3d5" => Ok(Self::Sp3d5),
            _ => Err(ParseHybridizationError),
        }
    }
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::S => "S",
                Self::Sp1 => "SP1",
                Self::Sp2 => "SP2",
                Self::Sp3 => "SP3",
                Self::Planar3 => "PLANAR3",
                Self::Sp3d1 => "SP3D1",
                Self::Sp3d2 => "SP3D2",
                Self::Sp3d3 => "SP3D3",
                Self::Sp3d4 => "SP3D4",
                Self::Sp3d5 => "SP3D5",
            }
        )
    }
}

/// An isotope annotated with the bonding characteristics of a perceived atom type.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    pub isotope: Isotope,
    /// Type name, e.g. `"C.sp3"`.
    pub name: Option<String>,
    pub max_bond_order: BondOrder,
    pub bond_order_sum: Option<f64>,
    pub covalent_radius: Option<f64>,
    pub formal_charge: Option<i32>,
    pub formal_neighbour_count: Option<u32>,
    pub hybridization: Option<Hybridization>,
    pub valency: Option<u32>,
    pub hydrogen_bond_donor: bool,
    pub hydrogen_bond_acceptor: bool,
    pub aromatic: bool,
}

impl Default for AtomType {
    fn default() -> Self {
        Self {
            isotope: Isotope::default(),
            name: None,
            max_bond_order: BondOrder::Unset,
            bond_order_sum: None,
            covalent_radius: None,
            formal_charge: Some(0),
            formal_neighbour_count: None,
            hybridization: None,
            valency: None,
            hydrogen_bond_donor: false,
            hydrogen_bond_acceptor: false,
            aromatic: false,
        }
    }
}

impl AtomType {
    pub fn new(symbol: &str) -> Self {
        Self::from_isotope(Isotope::new(symbol))
    }

    pub fn named(name: &str, symbol: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new(symbol)
        }
    }

    pub fn from_isotope(isotope: Isotope) -> Self {
        Self {
            isotope,
            ..Self::default()
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.isotope.symbol()
    }
}
