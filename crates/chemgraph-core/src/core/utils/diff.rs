//! Field-by-field comparison of chemical values, for tests and debugging.
//!
//! Every function returns an empty string when the two values agree, otherwise a compact
//! description such as `AtomDiff{H:3/2, IsotopeDiff{MN:12/13}}`.

use crate::core::models::atom::Atom;
use crate::core::models::atom_type::AtomType;
use crate::core::models::bond::Bond;
use crate::core::models::electron::ElectronContainer;
use crate::core::models::element::Element;
use crate::core::models::isotope::Isotope;
use crate::core::object::ChemObject;
use std::fmt::Debug;

struct DiffBuilder {
    name: &'static str,
    parts: Vec<String>,
}

impl DiffBuilder {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            parts: Vec::new(),
        }
    }

    fn field<T: PartialEq + Debug>(mut self, label: &str, a: T, b: T) -> Self {
        if a != b {
            self.parts.push(format!("{label}:{a:?}/{b:?}"));
        }
        self
    }

    fn nested(mut self, diff: String) -> Self {
        if !diff.is_empty() {
            self.parts.push(diff);
        }
        self
    }

    fn finish(self) -> String {
        if self.parts.is_empty() {
            String::new()
        } else {
            format!("{}{{{}}}", self.name, self.parts.join(", "))
        }
    }
}

pub fn objects(a: &ChemObject, b: &ChemObject) -> String {
    DiffBuilder::new("ChemObjectDiff")
        .field("ID", a.id(), b.id())
        .field("F", a.flags(), b.flags())
        .field("P", a.properties().len(), b.properties().len())
        .finish()
}

pub fn elements(a: &Element, b: &Element) -> String {
    DiffBuilder::new("ElementDiff")
        .field("S", a.symbol(), b.symbol())
        .field("AN", a.atomic_number, b.atomic_number)
        .finish()
}

pub fn isotopes(a: &Isotope, b: &Isotope) -> String {
    DiffBuilder::new("IsotopeDiff")
        .field("MN", a.mass_number, b.mass_number)
        .field("EM", a.exact_mass, b.exact_mass)
        .field("AB", a.natural_abundance, b.natural_abundance)
        .nested(elements(&a.element, &b.element))
        .finish()
}

pub fn atom_types(a: &AtomType, b: &AtomType) -> String {
    DiffBuilder::new("AtomTypeDiff")
        .field("ID", a.name.as_deref(), b.name.as_deref())
        .field("MBO", a.max_bond_order, b.max_bond_order)
        .field("BOS", a.bond_order_sum, b.bond_order_sum)
        .field("CR", a.covalent_radius, b.covalent_radius)
        .field("FC", a.formal_charge, b.formal_charge)
        .field("FNC", a.formal_neighbour_count, b.formal_neighbour_count)
        .field("H", a.hybridization, b.hybridization)
        .field("V", a.valency, b.valency)
        .field("HBD", a.hydrogen_bond_donor, b.hydrogen_bond_donor)
        .field("HBA", a.hydrogen_bond_acceptor, b.hydrogen_bond_acceptor)
        .field("AR", a.aromatic, b.aromatic)
        .nested(isotopes(&a.isotope, &b.isotope))
        .finish()
}

pub fn atoms(a: &Atom, b: &Atom) -> String {
    DiffBuilder::new("AtomDiff")
        .field("H", a.implicit_hydrogen_count(), b.implicit_hydrogen_count())
        .field("SP", a.stereo_parity(), b.stereo_parity())
        .field("C", a.charge(), b.charge())
        .field("2D", a.point2d(), b.point2d())
        .field("3D", a.point3d(), b.point3d())
        .field("F3D", a.fractional_point3d(), b.fractional_point3d())
        .field("L", a.label(), b.label())
        .nested(atom_types(a.atom_type(), b.atom_type()))
        .finish()
}

/// Compares order, stereo and electron counts. Atom references are compared by count
/// only, since the two bonds may live in different spaces.
pub fn bonds(a: &Bond, b: &Bond) -> String {
    DiffBuilder::new("BondDiff")
        .field("BO", a.order(), b.order())
        .field("S", a.stereo(), b.stereo())
        .field("AC", a.atom_count(), b.atom_count())
        .field("EC", a.electron_count(), b.electron_count())
        .finish()
}
