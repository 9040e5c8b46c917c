//! Guitars and the cases they own.

use super::{Case, InstrumentBase, Valued};
use crate::error::{InventoryError, InventoryResult};
use crate::types::GuitarType;
use std::fmt;

/// A guitar, exclusively owning an ordered list of cases.
#[derive(Debug, Clone, PartialEq)]
pub struct Guitar {
    base: InstrumentBase,
    guitar_type: GuitarType,
    body_material: String,
    cases: Vec<Case>,
}

impl Guitar {
    /// Create a guitar without cases.
    pub fn new(base: InstrumentBase, guitar_type: GuitarType, body_material: impl Into<String>) -> Self {
        Self {
            base,
            guitar_type,
            body_material: body_material.into(),
            cases: Vec::new(),
        }
    }

    /// Builder-style variant of [`Guitar::add_cases`].
    pub fn with_cases(mut self, cases: impl IntoIterator<Item = Case>) -> Self {
        self.add_cases(cases);
        self
    }

    pub fn base(&self) -> &InstrumentBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut InstrumentBase {
        &mut self.base
    }

    pub fn code(&self) -> &str {
        self.base.code()
    }

    pub fn guitar_type(&self) -> GuitarType {
        self.guitar_type
    }

    pub fn body_material(&self) -> &str {
        &self.body_material
    }

    pub fn set_guitar_type(&mut self, guitar_type: GuitarType) {
        self.guitar_type = guitar_type;
    }

    pub fn set_body_material(&mut self, material: impl Into<String>) {
        self.body_material = material.into();
    }

    /// Read-only view of the cases, in insertion order.
    ///
    /// Callers wanting to change a case go through [`Guitar::edit_case`].
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Merge cases into the list, skipping any whose code is already held.
    ///
    /// Existing cases win, as does the first of several duplicates in the
    /// input. Returns the number of cases actually added.
    ///
    /// Duplicates are detected by exact code equality, so "F-1" and "f-1" are
    /// both kept. Lookups ignore case and act on the first match in order.
    pub fn add_cases(&mut self, cases: impl IntoIterator<Item = Case>) -> usize {
        let mut added = 0;
        for mut case in cases {
            if self.cases.contains(&case) {
                continue;
            }
            case.attach_to(self.base.code());
            self.cases.push(case);
            added += 1;
        }
        added
    }

    /// Find a case by code, ignoring case.
    pub fn find_case(&self, code: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.matches_code(code))
    }

    /// Replace the case matching `code` in place.
    ///
    /// The replacement must not reuse the code of another case on this guitar.
    pub fn edit_case(&mut self, code: &str, mut new_case: Case) -> InventoryResult<()> {
        let position = self
            .position_of(code)
            .ok_or_else(|| InventoryError::not_found(format!("case not found: {}", code)))?;

        let clashes = self
            .cases
            .iter()
            .enumerate()
            .any(|(i, c)| i != position && *c == new_case);
        if clashes {
            return Err(InventoryError::conflict(format!(
                "a case with code {} already exists on guitar {}",
                new_case.code(),
                self.base.code()
            )));
        }

        new_case.attach_to(self.base.code());
        self.cases[position] = new_case;
        Ok(())
    }

    /// Remove the case matching `code` and hand it back.
    pub fn remove_case(&mut self, code: &str) -> InventoryResult<Case> {
        let position = self
            .position_of(code)
            .ok_or_else(|| InventoryError::not_found(format!("case not found: {}", code)))?;
        Ok(self.cases.remove(position))
    }

    /// Point every held case's back-reference at this guitar.
    pub(crate) fn attach_cases(&mut self) {
        let code = self.base.code().to_string();
        for case in &mut self.cases {
            case.attach_to(&code);
        }
    }

    fn position_of(&self, code: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.matches_code(code))
    }
}

impl Valued for Guitar {
    fn compute_value(&self, base_price: f64) -> f64 {
        base_price + self.cases.iter().map(Case::price).sum::<f64>()
    }
}

impl fmt::Display for Guitar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Guitar{{{}, type={}, body_material={}, cases=[",
            self.base, self.guitar_type, self.body_material
        )?;
        for (i, case) in self.cases.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", case)?;
        }
        f.write_str("]}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn guitar() -> Guitar {
        let base = InstrumentBase::new("GT-1", "Strato", "Fender", 500.0, 3, None).unwrap();
        Guitar::new(base, GuitarType::Electric, "Alder")
    }

    fn case(code: &str, price: f64) -> Case {
        Case::new(code, "Case", price).unwrap()
    }

    #[test]
    fn test_add_cases_deduplicates() {
        let mut g = guitar();
        assert_eq!(g.add_cases(vec![case("F-1", 10.0), case("F-2", 20.0)]), 2);

        // two new cases plus one already held
        let added = g.add_cases(vec![case("F-3", 1.0), case("F-1", 99.0), case("F-4", 2.0)]);
        assert_eq!(added, 2);
        assert_eq!(g.cases().len(), 4);
        assert_eq!(g.find_case("F-1").unwrap().price(), 10.0);
    }

    #[test]
    fn test_add_cases_sets_back_reference() {
        let mut g = guitar();
        g.add_cases(vec![case("F-1", 10.0)]);
        assert_eq!(g.cases()[0].guitar_code(), Some("GT-1"));
    }

    #[test]
    fn test_codes_differing_in_case_are_both_kept() {
        let mut g = guitar();
        g.add_cases(vec![case("F-1", 10.0)]);
        assert_eq!(g.add_cases(vec![case("f-1", 20.0)]), 1);
        assert_eq!(g.cases().len(), 2);

        // lookups hit the first case in order
        assert_eq!(g.find_case("f-1").unwrap().code(), "F-1");
        let removed = g.remove_case("f-1").unwrap();
        assert_eq!(removed.code(), "F-1");
        assert_eq!(g.cases()[0].code(), "f-1");
    }

    #[test]
    fn test_add_no_cases_is_noop() {
        let mut g = guitar();
        assert_eq!(g.add_cases(Vec::new()), 0);
        assert!(g.cases().is_empty());
    }

    #[test]
    fn test_find_case_ignores_case() {
        let g = guitar().with_cases(vec![case("FUNDA-A", 10.0)]);
        assert!(g.find_case("funda-a").is_some());
        assert!(g.find_case("funda-b").is_none());
    }

    #[test]
    fn test_edit_case_replaces_in_place() {
        let mut g = guitar().with_cases(vec![case("F-1", 10.0), case("F-2", 20.0)]);
        g.edit_case("f-1", case("F-9", 15.0)).unwrap();

        let codes: Vec<_> = g.cases().iter().map(Case::code).collect();
        assert_eq!(codes, vec!["F-9", "F-2"]);
        assert_eq!(g.cases()[0].guitar_code(), Some("GT-1"));
    }

    #[test]
    fn test_edit_case_errors() {
        let mut g = guitar().with_cases(vec![case("F-1", 10.0), case("F-2", 20.0)]);
        assert_matches!(g.edit_case("F-7", case("F-8", 1.0)), Err(InventoryError::NotFound(_)));
        assert_matches!(g.edit_case("F-1", case("F-2", 1.0)), Err(InventoryError::Conflict(_)));
        // keeping the same code is fine
        g.edit_case("F-1", case("F-1", 11.0)).unwrap();
        assert_eq!(g.find_case("F-1").unwrap().price(), 11.0);
    }

    #[test]
    fn test_remove_case() {
        let mut g = guitar().with_cases(vec![case("F-1", 10.0)]);
        assert_matches!(g.remove_case("F-2"), Err(InventoryError::NotFound(_)));
        let removed = g.remove_case("f-1").unwrap();
        assert_eq!(removed.code(), "F-1");
        assert!(g.cases().is_empty());
    }

    #[test]
    fn test_value_adds_case_prices() {
        let g = guitar().with_cases(vec![case("F-1", 10.0), case("F-2", 20.5)]);
        assert!((g.compute_value(500.0) - 530.5).abs() < 1e-9);
        assert_eq!(guitar().compute_value(500.0), 500.0);
    }

    #[test]
    fn test_cases_view_is_a_copy_when_cloned() {
        let g = guitar().with_cases(vec![case("F-1", 10.0)]);
        let mut snapshot = g.cases().to_vec();
        snapshot.clear();
        assert_eq!(g.cases().len(), 1);
    }
}
