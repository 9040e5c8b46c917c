//! Inventory service - the single entry point shared by every caller.

use crate::error::{InventoryError, InventoryResult};
use crate::filter::InstrumentFilter;
use crate::model::{Case, Guitar, Instrument, Keyboard, Programmable};
use crate::store::{InMemoryInstrumentStore, InstrumentStore};
use observability::InventoryMetrics;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Facade over an [`InstrumentStore`].
///
/// Cheap to clone: clones share the store. Mutations are logged and counted;
/// rejected operations are logged at `warn` with the error kind.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InstrumentStore>,
    metrics: InventoryMetrics,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InstrumentStore>) -> Self {
        Self {
            store,
            metrics: InventoryMetrics::new(),
        }
    }

    /// Service over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryInstrumentStore::new()))
    }

    /// Add an instrument.
    #[instrument(skip(self, instrument), fields(code = %instrument.code(), kind = instrument.type_tag()))]
    pub fn add(&self, instrument: Instrument) -> InventoryResult<()> {
        let result = self.store.add(instrument);
        self.record("add", &result);
        if result.is_ok() {
            info!("Instrument added");
        }
        result
    }

    /// Every instrument, in insertion order.
    pub fn list(&self) -> Vec<Instrument> {
        let instruments = self.store.list();
        debug!(count = instruments.len(), "Listed instruments");
        instruments
    }

    pub fn list_guitars(&self) -> Vec<Guitar> {
        let guitars = self.store.list_guitars();
        debug!(count = guitars.len(), "Listed guitars");
        guitars
    }

    pub fn list_keyboards(&self) -> Vec<Keyboard> {
        let keyboards = self.store.list_keyboards();
        debug!(count = keyboards.len(), "Listed keyboards");
        keyboards
    }

    /// Find an instrument by code, ignoring case.
    pub fn find(&self, code: &str) -> Option<Instrument> {
        let found = self.store.find(code);
        debug!(code, found = found.is_some(), "Looked up instrument");
        found
    }

    /// Replace the instrument matching `code`.
    #[instrument(skip(self, instrument), fields(new_code = %instrument.code(), kind = instrument.type_tag()))]
    pub fn edit(&self, code: &str, instrument: Instrument) -> InventoryResult<()> {
        let result = self.store.edit(code, instrument);
        self.record("edit", &result);
        if result.is_ok() {
            info!("Instrument replaced");
        }
        result
    }

    /// Remove the instrument matching `code`.
    #[instrument(skip(self))]
    pub fn remove(&self, code: &str) -> InventoryResult<Instrument> {
        let result = self.store.remove(code);
        self.record("remove", &result);
        if let Ok(removed) = &result {
            info!(kind = removed.type_tag(), "Instrument removed");
        }
        result
    }

    /// Merge cases into a guitar, returning how many were new.
    #[instrument(skip(self, cases), fields(requested = cases.len()))]
    pub fn add_cases(&self, guitar_code: &str, cases: Vec<Case>) -> InventoryResult<usize> {
        let result = self.store.add_cases_to_guitar(guitar_code, cases);
        self.record("add_cases", &result);
        if let Ok(added) = &result {
            info!(added, "Cases added to guitar");
        }
        result
    }

    #[instrument(skip(self, case), fields(new_case_code = %case.code()))]
    pub fn edit_case(&self, guitar_code: &str, case_code: &str, case: Case) -> InventoryResult<()> {
        let result = self.store.edit_case_on_guitar(guitar_code, case_code, case);
        self.record("edit_case", &result);
        if result.is_ok() {
            info!("Case replaced");
        }
        result
    }

    #[instrument(skip(self))]
    pub fn remove_case(&self, guitar_code: &str, case_code: &str) -> InventoryResult<Case> {
        let result = self.store.remove_case_from_guitar(guitar_code, case_code);
        self.record("remove_case", &result);
        if result.is_ok() {
            info!("Case removed");
        }
        result
    }

    /// Instruments matching every populated criterion, in insertion order.
    pub fn filter(&self, filter: &InstrumentFilter) -> Vec<Instrument> {
        let matched = self.store.filter(filter);
        debug!(?filter, count = matched.len(), "Filtered instruments");
        matched
    }

    /// Value of the instrument matching `code` at its own base price.
    pub fn value(&self, code: &str) -> InventoryResult<f64> {
        self.find(code)
            .map(|i| i.value())
            .ok_or_else(|| InventoryError::not_found(format!("instrument not found: {}", code)))
    }

    /// Save a preset on a keyboard.
    #[instrument(skip(self))]
    pub fn save_preset(&self, code: &str, preset: &str) -> InventoryResult<String> {
        let result = self.keyboard(code).map(|k| k.save_preset(preset));
        self.record("save_preset", &result);
        result
    }

    /// Load a preset on a keyboard.
    #[instrument(skip(self))]
    pub fn load_preset(&self, code: &str, preset: &str) -> InventoryResult<String> {
        let result = self.keyboard(code).map(|k| k.load_preset(preset));
        self.record("load_preset", &result);
        result
    }

    /// Number of instruments held.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn keyboard(&self, code: &str) -> InventoryResult<Keyboard> {
        let instrument = self
            .store
            .find(code)
            .ok_or_else(|| InventoryError::not_found(format!("instrument not found: {}", code)))?;
        instrument.into_keyboard().ok_or_else(|| {
            InventoryError::validation(format!("the code must belong to a keyboard: {}", code))
        })
    }

    fn record<T>(&self, operation: &'static str, result: &InventoryResult<T>) {
        match result {
            Ok(_) => self.metrics.record_operation(operation, "ok"),
            Err(e) => {
                warn!(operation, kind = e.kind().as_str(), error = %e, "Operation rejected");
                self.metrics.record_operation(operation, e.kind().as_str());
            }
        }
        self.metrics.set_instrument_count(self.store.len());
    }
}

impl std::fmt::Debug for InventoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryService")
            .field("instruments", &self.store.len())
            .finish()
    }
}
