//! Instrument storage.

use crate::error::{InventoryError, InventoryResult};
use crate::filter::InstrumentFilter;
use crate::model::{Case, Guitar, Instrument, Keyboard};
use parking_lot::RwLock;
use std::sync::Arc;

/// Trait for instrument storage.
///
/// Codes are unique ignoring case and every lookup by code ignores case.
/// Listing operations return snapshots in insertion order.
pub trait InstrumentStore: Send + Sync {
    /// Add an instrument. Fails with a conflict if its code is taken.
    fn add(&self, instrument: Instrument) -> InventoryResult<()>;

    /// Snapshot of every instrument, in insertion order.
    fn list(&self) -> Vec<Instrument>;

    /// Find an instrument by code.
    fn find(&self, code: &str) -> Option<Instrument>;

    /// Replace the instrument matching `code`, keeping its position.
    fn edit(&self, code: &str, instrument: Instrument) -> InventoryResult<()>;

    /// Remove the instrument matching `code` and hand it back.
    fn remove(&self, code: &str) -> InventoryResult<Instrument>;

    /// Merge cases into a guitar. Returns how many were actually added.
    fn add_cases_to_guitar(&self, guitar_code: &str, cases: Vec<Case>) -> InventoryResult<usize>;

    /// Replace a case held by a guitar.
    fn edit_case_on_guitar(
        &self,
        guitar_code: &str,
        case_code: &str,
        case: Case,
    ) -> InventoryResult<()>;

    /// Remove a case from a guitar and hand it back.
    fn remove_case_from_guitar(&self, guitar_code: &str, case_code: &str)
        -> InventoryResult<Case>;

    /// Number of instruments held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether an instrument with this code exists.
    fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    /// Guitars only, in insertion order.
    fn list_guitars(&self) -> Vec<Guitar> {
        self.list()
            .into_iter()
            .filter_map(Instrument::into_guitar)
            .collect()
    }

    /// Keyboards only, in insertion order.
    fn list_keyboards(&self) -> Vec<Keyboard> {
        self.list()
            .into_iter()
            .filter_map(Instrument::into_keyboard)
            .collect()
    }

    /// Instruments matching the filter, in insertion order.
    fn filter(&self, filter: &InstrumentFilter) -> Vec<Instrument> {
        filter.apply(&self.list())
    }
}

/// In-memory implementation of [`InstrumentStore`].
///
/// A single lock guards the instrument list: writers are exclusive with each
/// other and with snapshots, readers run concurrently. Clones share the list.
#[derive(Debug, Default)]
pub struct InMemoryInstrumentStore {
    instruments: Arc<RwLock<Vec<Instrument>>>,
}

impl InMemoryInstrumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all instruments from the store.
    pub fn clear(&self) {
        self.instruments.write().clear();
    }

    fn position_of(instruments: &[Instrument], code: &str) -> Option<usize> {
        instruments.iter().position(|i| i.matches_code(code))
    }

    /// Run `f` on the guitar matching `guitar_code` under the write lock.
    fn with_guitar<T>(
        &self,
        guitar_code: &str,
        f: impl FnOnce(&mut Guitar) -> InventoryResult<T>,
    ) -> InventoryResult<T> {
        let mut instruments = self.instruments.write();
        let instrument = instruments
            .iter_mut()
            .find(|i| i.matches_code(guitar_code))
            .ok_or_else(|| {
                InventoryError::not_found(format!("instrument not found: {}", guitar_code))
            })?;
        let guitar = instrument
            .as_guitar_mut()
            .ok_or_else(|| InventoryError::not_a_guitar(guitar_code))?;
        f(guitar)
    }
}

impl Clone for InMemoryInstrumentStore {
    fn clone(&self) -> Self {
        Self {
            instruments: Arc::clone(&self.instruments),
        }
    }
}

impl InstrumentStore for InMemoryInstrumentStore {
    fn add(&self, mut instrument: Instrument) -> InventoryResult<()> {
        let mut instruments = self.instruments.write();

        if Self::position_of(&instruments, instrument.code()).is_some() {
            return Err(InventoryError::conflict(format!(
                "an instrument with code {} already exists",
                instrument.code()
            )));
        }

        if let Some(guitar) = instrument.as_guitar_mut() {
            guitar.attach_cases();
        }
        instruments.push(instrument);
        Ok(())
    }

    fn list(&self) -> Vec<Instrument> {
        self.instruments.read().clone()
    }

    fn find(&self, code: &str) -> Option<Instrument> {
        self.instruments
            .read()
            .iter()
            .find(|i| i.matches_code(code))
            .cloned()
    }

    fn edit(&self, code: &str, mut instrument: Instrument) -> InventoryResult<()> {
        let mut instruments = self.instruments.write();

        let position = Self::position_of(&instruments, code)
            .ok_or_else(|| InventoryError::not_found(format!("instrument not found: {}", code)))?;

        let clashes = instruments
            .iter()
            .enumerate()
            .any(|(i, other)| i != position && other.matches_code(instrument.code()));
        if clashes {
            return Err(InventoryError::conflict(format!(
                "an instrument with code {} already exists",
                instrument.code()
            )));
        }

        if let Some(guitar) = instrument.as_guitar_mut() {
            guitar.attach_cases();
        }
        instruments[position] = instrument;
        Ok(())
    }

    fn remove(&self, code: &str) -> InventoryResult<Instrument> {
        let mut instruments = self.instruments.write();
        let position = Self::position_of(&instruments, code)
            .ok_or_else(|| InventoryError::not_found(format!("instrument not found: {}", code)))?;
        Ok(instruments.remove(position))
    }

    fn add_cases_to_guitar(&self, guitar_code: &str, cases: Vec<Case>) -> InventoryResult<usize> {
        self.with_guitar(guitar_code, |guitar| Ok(guitar.add_cases(cases)))
    }

    fn edit_case_on_guitar(
        &self,
        guitar_code: &str,
        case_code: &str,
        case: Case,
    ) -> InventoryResult<()> {
        self.with_guitar(guitar_code, |guitar| guitar.edit_case(case_code, case))
    }

    fn remove_case_from_guitar(
        &self,
        guitar_code: &str,
        case_code: &str,
    ) -> InventoryResult<Case> {
        self.with_guitar(guitar_code, |guitar| guitar.remove_case(case_code))
    }

    fn len(&self) -> usize {
        self.instruments.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstrumentBase;
    use crate::types::{GuitarType, KeyboardSensitivity};
    use assert_matches::assert_matches;

    fn guitar(code: &str) -> Instrument {
        Guitar::new(
            InstrumentBase::new(code, "Strato", "Fender", 500.0, 3, None).unwrap(),
            GuitarType::Electric,
            "Alder",
        )
        .into()
    }

    fn keyboard(code: &str) -> Instrument {
        Keyboard::new(
            InstrumentBase::new(code, "Yamaha P45", "Yamaha", 400.0, 5, None).unwrap(),
            88,
            true,
            KeyboardSensitivity::Medium,
        )
        .unwrap()
        .into()
    }

    fn case(code: &str) -> Case {
        Case::new(code, "Gig bag", 25.0).unwrap()
    }

    #[test]
    fn test_add_and_find_ignoring_case() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("ABC123")).unwrap();

        let lower = store.find("abc123").unwrap();
        let upper = store.find("ABC123").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.code(), "ABC123");
        assert!(store.find("XYZ").is_none());
    }

    #[test]
    fn test_duplicate_code_is_rejected_and_store_unchanged() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();

        assert_matches!(store.add(keyboard("gt-1")), Err(InventoryError::Conflict(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("GT-1").unwrap().type_tag(), "guitarra");
    }

    #[test]
    fn test_add_sets_case_back_references() {
        let store = InMemoryInstrumentStore::new();
        let mut g = guitar("GT-1");
        // cases built detached, then attached to the guitar on insert
        if let Instrument::Guitar(inner) = &mut g {
            inner.add_cases(vec![case("F-1")]);
        }
        store.add(g).unwrap();

        let stored = store.find("GT-1").unwrap();
        let cases = stored.as_guitar().unwrap().cases();
        assert_eq!(cases[0].guitar_code(), Some("GT-1"));
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = InMemoryInstrumentStore::new();
        store.add(keyboard("KB-1")).unwrap();
        store.add(guitar("GT-1")).unwrap();
        store.add(keyboard("KB-2")).unwrap();
        store.add(guitar("GT-2")).unwrap();

        let codes: Vec<_> = store.list().iter().map(|i| i.code().to_string()).collect();
        assert_eq!(codes, vec!["KB-1", "GT-1", "KB-2", "GT-2"]);

        let guitars: Vec<_> = store.list_guitars().iter().map(|g| g.code().to_string()).collect();
        assert_eq!(guitars, vec!["GT-1", "GT-2"]);

        let keyboards: Vec<_> = store
            .list_keyboards()
            .iter()
            .map(|k| k.code().to_string())
            .collect();
        assert_eq!(keyboards, vec!["KB-1", "KB-2"]);
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();

        let mut snapshot = store.list();
        snapshot.clear();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();
        store.add(guitar("GT-2")).unwrap();

        store.edit("gt-1", keyboard("KB-9")).unwrap();
        let codes: Vec<_> = store.list().iter().map(|i| i.code().to_string()).collect();
        assert_eq!(codes, vec!["KB-9", "GT-2"]);
        assert!(store.find("GT-1").is_none());
    }

    #[test]
    fn test_edit_repoints_case_back_references() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();
        store.add_cases_to_guitar("GT-1", vec![case("F-1")]).unwrap();

        let held = store.find("GT-1").unwrap().into_guitar().unwrap();
        let renamed = Guitar::new(
            InstrumentBase::new("GT-9", "Telecaster", "Fender", 550.0, 2, None).unwrap(),
            GuitarType::Electric,
            "Ash",
        )
        .with_cases(held.cases().to_vec());

        store.edit("GT-1", renamed.into()).unwrap();
        assert!(store.find("GT-1").is_none());

        let stored = store.find("gt-9").unwrap();
        let cases = stored.as_guitar().unwrap().cases();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].code(), "F-1");
        assert_eq!(cases[0].guitar_code(), Some("GT-9"));
        assert_eq!(stored.value(), 575.0);
    }

    #[test]
    fn test_edit_errors() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();
        store.add(guitar("GT-2")).unwrap();

        assert_matches!(store.edit("NOPE", guitar("GT-3")), Err(InventoryError::NotFound(_)));
        assert_matches!(store.edit("GT-1", guitar("gt-2")), Err(InventoryError::Conflict(_)));
        store.edit("GT-1", guitar("GT-1")).unwrap();
    }

    #[test]
    fn test_remove() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();

        assert_matches!(store.remove("GT-2"), Err(InventoryError::NotFound(_)));
        let removed = store.remove("gt-1").unwrap();
        assert_eq!(removed.code(), "GT-1");
        assert!(store.is_empty());
    }

    #[test]
    fn test_case_operations_guard_the_guitar() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();
        store.add(keyboard("KB-1")).unwrap();

        assert_matches!(
            store.add_cases_to_guitar("NOPE", vec![case("F-1")]),
            Err(InventoryError::NotFound(_))
        );
        assert_matches!(
            store.add_cases_to_guitar("KB-1", vec![case("F-1")]),
            Err(InventoryError::Validation(_))
        );
        assert_matches!(
            store.remove_case_from_guitar("KB-1", "F-1"),
            Err(InventoryError::Validation(_))
        );
        assert_matches!(
            store.edit_case_on_guitar("GT-1", "F-1", case("F-2")),
            Err(InventoryError::NotFound(_))
        );
    }

    #[test]
    fn test_case_operations_on_guitar() {
        let store = InMemoryInstrumentStore::new();
        store.add(guitar("GT-1")).unwrap();

        let added = store
            .add_cases_to_guitar("gt-1", vec![case("F-1"), case("F-2"), case("F-1")])
            .unwrap();
        assert_eq!(added, 2);

        store
            .edit_case_on_guitar("GT-1", "f-2", Case::new("F-3", "Hard case", 90.0).unwrap())
            .unwrap();
        let removed = store.remove_case_from_guitar("GT-1", "F-1").unwrap();
        assert_eq!(removed.code(), "F-1");

        let stored = store.find("GT-1").unwrap();
        let cases = stored.as_guitar().unwrap().cases();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].code(), "F-3");
        assert_eq!(cases[0].guitar_code(), Some("GT-1"));
        assert_eq!(stored.value(), 590.0);
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryInstrumentStore::new();
        let other = store.clone();
        store.add(guitar("GT-1")).unwrap();
        assert!(other.contains("gt-1"));
        other.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let store = InMemoryInstrumentStore::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.add(guitar(&format!("GT-{}-{}", t, i))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }
}
