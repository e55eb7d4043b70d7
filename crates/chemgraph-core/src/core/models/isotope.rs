use super::element::Element;

const MASS_TOLERANCE: f64 = 1e-7;

/// An element with a specific mass number, exact mass and natural abundance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Isotope {
    pub element: Element,
    pub mass_number: Option<u32>,
    pub exact_mass: Option<f64>,
    pub natural_abundance: Option<f64>,
}

impl Isotope {
    pub fn new(symbol: &str) -> Self {
        Self::from_element(Element::new(symbol))
    }

    pub fn from_element(element: Element) -> Self {
        Self {
            element,
            ..Self::default()
        }
    }

    pub fn with_mass_number(symbol: &str, mass_number: u32) -> Self {
        Self {
            mass_number: Some(mass_number),
            ..Self::new(symbol)
        }
    }

    pub fn with_exact_mass(
        symbol: &str,
        atomic_number: u32,
        mass_number: u32,
        exact_mass: f64,
        natural_abundance: f64,
    ) -> Self {
        Self {
            element: Element::with_atomic_number(symbol, atomic_number),
            mass_number: Some(mass_number),
            exact_mass: Some(exact_mass),
            natural_abundance: Some(natural_abundance),
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.element.symbol()
    }

    pub fn atomic_number(&self) -> Option<u32> {
        self.element.atomic_number
    }

    /// Value identity used by formula tallies: same symbol and mass number, and masses and
    /// abundances equal within a small tolerance (both unset also counts as equal).
    pub fn is_same(&self, other: &Isotope) -> bool {
        self.element.symbol == other.element.symbol
            && self.mass_number == other.mass_number
            && approx_eq(self.exact_mass, other.exact_mass)
            && approx_eq(self.natural_abundance, other.natural_abundance)
    }
}

fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => (x - y).abs() < MASS_TOLERANCE,
        _ => false,
    }
}
