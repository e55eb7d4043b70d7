use super::formula_set::MolecularFormulaSet;
use super::molecular_formula::MolecularFormula;
use super::sum_charges;
use crate::core::models::isotope::Isotope;

/// A set of formulas forming one adduct, e.g. `[M+H]+`.
///
/// Charge and isotope tallies aggregate over the members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdductFormula {
    members: MolecularFormulaSet,
}

impl AdductFormula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, formula: MolecularFormula) {
        self.members.add(formula);
    }

    pub fn members(&self) -> &MolecularFormulaSet {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut MolecularFormulaSet {
        &mut self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member charges; `None` if no member has a charge.
    pub fn charge(&self) -> Option<i32> {
        self.members
            .iter()
            .fold(None, |acc, f| sum_charges(acc, f.charge()))
    }

    pub fn count_of(&self, isotope: &Isotope) -> u32 {
        self.members
            .iter()
            .fold(0u32, |total, f| total.saturating_add(f.count_of(isotope)))
    }

    /// Distinct isotopes over all members.
    pub fn isotope_count(&self) -> usize {
        self.isotopes().len()
    }

    pub fn isotopes(&self) -> Vec<&Isotope> {
        let mut distinct: Vec<&Isotope> = Vec::new();
        for (isotope, _) in self.members.iter().flat_map(MolecularFormula::isotopes) {
            if !distinct.iter().any(|i| i.is_same(isotope)) {
                distinct.push(isotope);
            }
        }
        distinct
    }

    pub fn contains_isotope(&self, isotope: &Isotope) -> bool {
        self.members.iter().any(|f| f.contains(isotope))
    }

    /// All members merged into one formula.
    pub fn flatten(&self) -> MolecularFormula {
        let mut merged = MolecularFormula::new();
        for formula in &self.members {
            merged.add_formula(formula);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charged(symbol: &str, charge: Option<i32>) -> MolecularFormula {
        let mut f = MolecularFormula::new();
        f.add_isotope(Isotope::new(symbol));
        f.set_charge(charge);
        f
    }

    #[test]
    fn charge_sums_member_charges() {
        let mut adduct = AdductFormula::new();
        adduct.add(charged("Na", Some(1)));
        adduct.add(charged("K", Some(1)));
        assert_eq!(adduct.charge(), Some(2));
    }

    #[test]
    fn charge_is_unset_when_no_member_is_charged() {
        let mut adduct = AdductFormula::new();
        adduct.add(charged("C", None));
        assert_eq!(adduct.charge(), None);
        assert_eq!(AdductFormula::new().charge(), None);
    }

    #[test]
    fn isotopes_aggregate_across_members() {
        let mut adduct = AdductFormula::new();
        adduct.add(charged("C", None));
        adduct.add(charged("C", None));
        adduct.add(charged("H", Some(1)));
        assert_eq!(adduct.count_of(&Isotope::new("C")), 2);
        assert_eq!(adduct.isotope_count(), 2);
        assert!(adduct.contains_isotope(&Isotope::new("H")));
        assert_eq!(adduct.flatten().to_string(), "C2H");
    }
}
