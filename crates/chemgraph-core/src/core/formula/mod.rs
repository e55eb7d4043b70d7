//! Molecular formula arithmetic.
//!
//! A [`MolecularFormula`] is a tally of isotopes with an optional aggregate charge.
//! Charges use a "never set" state: combining two unset charges stays unset, while
//! combining with at least one set charge yields a number, treating the unset side as zero.

pub mod adduct;
pub mod formula_set;
pub mod molecular_formula;

pub use adduct::AdductFormula;
pub use formula_set::MolecularFormulaSet;
pub use molecular_formula::MolecularFormula;

/// Sums two optional charges; `None` only when both are `None`.
pub fn sum_charges(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_plus_unset_stays_unset() {
        assert_eq!(sum_charges(None, None), None);
    }

    #[test]
    fn unset_side_counts_as_zero() {
        assert_eq!(sum_charges(Some(0), None), Some(0));
        assert_eq!(sum_charges(None, Some(-2)), Some(-2));
        assert_eq!(sum_charges(Some(1), Some(1)), Some(2));
    }
}
