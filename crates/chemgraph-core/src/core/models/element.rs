use crate::core::utils::periodic_table;

/// A chemical element, identified by symbol and atomic number.
///
/// Symbols outside the periodic table (pseudo-atom labels such as `"R"` or `"*"`) are
/// accepted and get atomic number 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub symbol: Option<String>,
    pub atomic_number: Option<u32>,
}

impl Element {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: Some(symbol.to_string()),
            atomic_number: Some(periodic_table::atomic_number(symbol).unwrap_or(0)),
        }
    }

    pub fn with_atomic_number(symbol: &str, atomic_number: u32) -> Self {
        Self {
            symbol: Some(symbol.to_string()),
            atomic_number: Some(atomic_number),
        }
    }

    pub fn from_atomic_number(atomic_number: u32) -> Self {
        Self {
            symbol: periodic_table::symbol(atomic_number).map(str::to_string),
            atomic_number: Some(atomic_number),
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Same symbol and atomic number.
    pub fn is_same(&self, other: &Element) -> bool {
        self.symbol == other.symbol && self.atomic_number == other.atomic_number
    }
}
