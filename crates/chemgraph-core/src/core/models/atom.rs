use super::atom_type::{AtomType, Hybridization};
use super::bond::BondOrder;
use super::element::Element;
use super::ids::ContainerId;
use super::isotope::Isotope;
use super::pdb::PdbRecord;
use nalgebra::{Point2, Point3};
use thiserror::Error;

pub const DEFAULT_PSEUDO_LABEL: &str = "*";
const PSEUDO_SYMBOL: &str = "R";

/// The closed set of atom specialisations.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomKind {
    Regular,
    /// A labelled placeholder (R-group, attachment point, ...).
    Pseudo { label: String },
    /// A pseudo atom standing for a whole fragment, whose exact mass is the sum of the
    /// fragment's atoms.
    Fragment {
        label: String,
        fragment: Option<ContainerId>,
        expanded: bool,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AtomFieldError {
    #[error("the exact mass of a fragment atom is derived from its fragment")]
    DerivedExactMass,
    #[error("only pseudo atoms carry a label")]
    NotPseudo,
    #[error("only fragment atoms carry a fragment")]
    NotFragment,
}

/// An atom: an atom type plus coordinates, hydrogen count, stereo parity and charge.
///
/// Pseudo and fragment atoms start with zero formal charge, exact mass, hydrogen count
/// and partial charge, and ignore stereo parity updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    atom_type: AtomType,
    point2d: Option<Point2<f64>>,
    point3d: Option<Point3<f64>>,
    fractional_point3d: Option<Point3<f64>>,
    implicit_hydrogen_count: Option<u32>,
    stereo_parity: i32,
    charge: Option<f64>,
    kind: AtomKind,
    pdb: Option<Box<PdbRecord>>,
}

impl Default for Atom {
    fn default() -> Self {
        Self::from_atom_type(AtomType::default())
    }
}

impl Atom {
    pub fn new(symbol: &str) -> Self {
        Self::from_atom_type(AtomType::new(symbol))
    }

    pub fn from_element(element: Element) -> Self {
        Self::from_atom_type(AtomType::from_isotope(Isotope::from_element(element)))
    }

    pub fn from_atom_type(atom_type: AtomType) -> Self {
        Self {
            atom_type,
            point2d: None,
            point3d: None,
            fractional_point3d: None,
            implicit_hydrogen_count: None,
            stereo_parity: 0,
            charge: None,
            kind: AtomKind::Regular,
            pdb: None,
        }
    }

    pub fn with_point2d(symbol: &str, point: Point2<f64>) -> Self {
        Self {
            point2d: Some(point),
            ..Self::new(symbol)
        }
    }

    pub fn with_point3d(symbol: &str, point: Point3<f64>) -> Self {
        Self {
            point3d: Some(point),
            ..Self::new(symbol)
        }
    }

    pub fn pseudo(label: &str) -> Self {
        Self::new(PSEUDO_SYMBOL).into_pseudo(label)
    }

    /// Turns this atom into a pseudo atom, keeping typing and coordinates.
    pub fn into_pseudo(mut self, label: &str) -> Self {
        self.pin_pseudo_fields();
        self.kind = AtomKind::Pseudo {
            label: label.to_string(),
        };
        self
    }

    pub fn fragment(label: &str, fragment: Option<ContainerId>) -> Self {
        let mut atom = Self::new(PSEUDO_SYMBOL);
        atom.pin_pseudo_fields();
        atom.atom_type.isotope.exact_mass = None;
        atom.kind = AtomKind::Fragment {
            label: label.to_string(),
            fragment,
            expanded: false,
        };
        atom
    }

    fn pin_pseudo_fields(&mut self) {
        self.atom_type.formal_charge = Some(0);
        self.atom_type.isotope.exact_mass = Some(0.0);
        self.implicit_hydrogen_count = Some(0);
        self.stereo_parity = 0;
        self.charge = Some(0.0);
    }

    // --- Element, isotope and atom type ---

    pub fn atom_type(&self) -> &AtomType {
        &self.atom_type
    }

    pub fn element(&self) -> &Element {
        &self.atom_type.isotope.element
    }

    pub fn isotope(&self) -> &Isotope {
        &self.atom_type.isotope
    }

    pub fn symbol(&self) -> Option<&str> {
        self.atom_type.symbol()
    }

    pub fn set_symbol(&mut self, symbol: Option<&str>) {
        self.atom_type.isotope.element.symbol = symbol.map(str::to_string);
    }

    pub fn atomic_number(&self) -> Option<u32> {
        self.atom_type.isotope.element.atomic_number
    }

    pub fn set_atomic_number(&mut self, atomic_number: Option<u32>) {
        self.atom_type.isotope.element.atomic_number = atomic_number;
    }

    pub fn mass_number(&self) -> Option<u32> {
        self.atom_type.isotope.mass_number
    }

    pub fn set_mass_number(&mut self, mass_number: Option<u32>) {
        self.atom_type.isotope.mass_number = mass_number;
    }

    /// The stored exact mass. Always `None` for fragment atoms, whose mass is derived from
    /// the fragment by the owning space.
    pub fn exact_mass(&self) -> Option<f64> {
        self.atom_type.isotope.exact_mass
    }

    pub fn set_exact_mass(&mut self, exact_mass: Option<f64>) -> Result<(), AtomFieldError> {
        if self.is_fragment() {
            return Err(AtomFieldError::DerivedExactMass);
        }
        self.atom_type.isotope.exact_mass = exact_mass;
        Ok(())
    }

    pub fn natural_abundance(&self) -> Option<f64> {
        self.atom_type.isotope.natural_abundance
    }

    pub fn set_natural_abundance(&mut self, abundance: Option<f64>) {
        self.atom_type.isotope.natural_abundance = abundance;
    }

    pub fn atom_type_name(&self) -> Option<&str> {
        self.atom_type.name.as_deref()
    }

    pub fn set_atom_type_name(&mut self, name: Option<&str>) {
        self.atom_type.name = name.map(str::to_string);
    }

    pub fn max_bond_order(&self) -> BondOrder {
        self.atom_type.max_bond_order
    }

    pub fn set_max_bond_order(&mut self, order: BondOrder) {
        self.atom_type.max_bond_order = order;
    }

    pub fn bond_order_sum(&self) -> Option<f64> {
        self.atom_type.bond_order_sum
    }

    pub fn set_bond_order_sum(&mut self, sum: Option<f64>) {
        self.atom_type.bond_order_sum = sum;
    }

    pub fn covalent_radius(&self) -> Option<f64> {
        self.atom_type.covalent_radius
    }

    pub fn set_covalent_radius(&mut self, radius: Option<f64>) {
        self.atom_type.covalent_radius = radius;
    }

    pub fn formal_charge(&self) -> Option<i32> {
        self.atom_type.formal_charge
    }

    pub fn set_formal_charge(&mut self, charge: Option<i32>) {
        self.atom_type.formal_charge = charge;
    }

    pub fn formal_neighbour_count(&self) -> Option<u32> {
        self.atom_type.formal_neighbour_count
    }

    pub fn set_formal_neighbour_count(&mut self, count: Option<u32>) {
        self.atom_type.formal_neighbour_count = count;
    }

    pub fn hybridization(&self) -> Option<Hybridization> {
        self.atom_type.hybridization
    }

    pub fn set_hybridization(&mut self, hybridization: Option<Hybridization>) {
        self.atom_type.hybridization = hybridization;
    }

    pub fn valency(&self) -> Option<u32> {
        self.atom_type.valency
    }

    pub fn set_valency(&mut self, valency: Option<u32>) {
        self.atom_type.valency = valency;
    }

    pub fn is_hydrogen_bond_donor(&self) -> bool {
        self.atom_type.hydrogen_bond_donor
    }

    pub fn set_hydrogen_bond_donor(&mut self, donor: bool) {
        self.atom_type.hydrogen_bond_donor = donor;
    }

    pub fn is_hydrogen_bond_acceptor(&self) -> bool {
        self.atom_type.hydrogen_bond_acceptor
    }

    pub fn set_hydrogen_bond_acceptor(&mut self, acceptor: bool) {
        self.atom_type.hydrogen_bond_acceptor = acceptor;
    }

    pub fn is_aromatic(&self) -> bool {
        self.atom_type.aromatic
    }

    pub fn set_aromatic(&mut self, aromatic: bool) {
        self.atom_type.aromatic = aromatic;
    }

    /// Copies the bonding characteristics of `atom_type` onto this atom. Element and
    /// isotope data are left untouched.
    pub fn apply_atom_type(&mut self, atom_type: &AtomType) {
        self.atom_type.name = atom_type.name.clone();
        self.atom_type.max_bond_order = atom_type.max_bond_order;
        self.atom_type.bond_order_sum = atom_type.bond_order_sum;
        self.atom_type.covalent_radius = atom_type.covalent_radius;
        self.atom_type.formal_charge = atom_type.formal_charge;
        self.atom_type.formal_neighbour_count = atom_type.formal_neighbour_count;
        self.atom_type.hybridization = atom_type.hybridization;
        self.atom_type.valency = atom_type.valency;
        self.atom_type.hydrogen_bond_donor = atom_type.hydrogen_bond_donor;
        self.atom_type.hydrogen_bond_acceptor = atom_type.hydrogen_bond_acceptor;
        self.atom_type.aromatic = atom_type.aromatic;
    }

    // --- Atom-level state ---

    pub fn point2d(&self) -> Option<Point2<f64>> {
        self.point2d
    }

    pub fn set_point2d(&mut self, point: Option<Point2<f64>>) {
        self.point2d = point;
    }

    pub fn point3d(&self) -> Option<Point3<f64>> {
        self.point3d
    }

    pub fn set_point3d(&mut self, point: Option<Point3<f64>>) {
        self.point3d = point;
    }

    pub fn fractional_point3d(&self) -> Option<Point3<f64>> {
        self.fractional_point3d
    }

    pub fn set_fractional_point3d(&mut self, point: Option<Point3<f64>>) {
        self.fractional_point3d = point;
    }

    pub fn implicit_hydrogen_count(&self) -> Option<u32> {
        self.implicit_hydrogen_count
    }

    pub fn set_implicit_hydrogen_count(&mut self, count: Option<u32>) {
        self.implicit_hydrogen_count = count;
    }

    pub fn stereo_parity(&self) -> i32 {
        self.stereo_parity
    }

    /// No effect on pseudo and fragment atoms.
    pub fn set_stereo_parity(&mut self, parity: i32) {
        if !self.is_pseudo() {
            self.stereo_parity = parity;
        }
    }

    /// Partial charge.
    pub fn charge(&self) -> Option<f64> {
        self.charge
    }

    pub fn set_charge(&mut self, charge: Option<f64>) {
        self.charge = charge;
    }

    // --- Specialisations ---

    pub fn kind(&self) -> &AtomKind {
        &self.kind
    }

    /// True for pseudo atoms and for fragment atoms.
    pub fn is_pseudo(&self) -> bool {
        !matches!(self.kind, AtomKind::Regular)
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, AtomKind::Fragment { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            AtomKind::Regular => None,
            AtomKind::Pseudo { label } | AtomKind::Fragment { label, .. } => Some(label),
        }
    }

    pub fn set_label(&mut self, new_label: &str) -> Result<(), AtomFieldError> {
        match &mut self.kind {
            AtomKind::Regular => Err(AtomFieldError::NotPseudo),
            AtomKind::Pseudo { label } | AtomKind::Fragment { label, .. } => {
                *label = new_label.to_string();
                Ok(())
            }
        }
    }

    pub fn fragment_container(&self) -> Option<ContainerId> {
        match &self.kind {
            AtomKind::Fragment { fragment, .. } => *fragment,
            _ => None,
        }
    }

    pub(crate) fn set_fragment_container(
        &mut self,
        container: Option<ContainerId>,
    ) -> Result<(), AtomFieldError> {
        match &mut self.kind {
            AtomKind::Fragment { fragment, .. } => {
                *fragment = container;
                Ok(())
            }
            _ => Err(AtomFieldError::NotFragment),
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.kind, AtomKind::Fragment { expanded: true, .. })
    }

    pub fn set_expanded(&mut self, value: bool) -> Result<(), AtomFieldError> {
        match &mut self.kind {
            AtomKind::Fragment { expanded, .. } => {
                *expanded = value;
                Ok(())
            }
            _ => Err(AtomFieldError::NotFragment),
        }
    }

    pub fn pdb(&self) -> Option<&PdbRecord> {
        self.pdb.as_deref()
    }

    pub fn pdb_mut(&mut self) -> Option<&mut PdbRecord> {
        self.pdb.as_deref_mut()
    }

    pub fn set_pdb(&mut self, record: Option<PdbRecord>) {
        self.pdb = record.map(Box::new);
    }
}
