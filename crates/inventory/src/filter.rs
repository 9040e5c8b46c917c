//! Multi-criteria instrument filter.
//!
//! An [`InstrumentFilter`] is a plain criteria object in which every field is
//! optional. [`InstrumentFilter::predicate`] turns it into a [`Predicate`]:
//! one check per populated field, all of them required to hold.

use crate::model::Instrument;
use crate::types::{GuitarType, KeyboardSensitivity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter criteria. Absent fields put no constraint on their dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentFilter {
    /// Substring of the name, ignoring case.
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    /// Exact brand, ignoring case.
    #[serde(rename = "marca")]
    pub brand: Option<String>,
    #[serde(rename = "precioMin")]
    pub price_min: Option<f64>,
    #[serde(rename = "precioMax")]
    pub price_max: Option<f64>,
    #[serde(rename = "stockMin")]
    pub stock_min: Option<i64>,
    #[serde(rename = "stockMax")]
    pub stock_max: Option<i64>,
    /// Restricts the result to guitars of this type.
    #[serde(rename = "tipoGuitarra")]
    pub guitar_type: Option<GuitarType>,
    /// Restricts the result to keyboards of this sensitivity.
    #[serde(rename = "sensibilidad")]
    pub sensitivity: Option<KeyboardSensitivity>,
}

impl InstrumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Inclusive base price bounds.
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Inclusive stock bounds.
    pub fn with_stock_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.stock_min = min;
        self.stock_max = max;
        self
    }

    pub fn with_guitar_type(mut self, guitar_type: GuitarType) -> Self {
        self.guitar_type = Some(guitar_type);
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: KeyboardSensitivity) -> Self {
        self.sensitivity = Some(sensitivity);
        self
    }

    /// True when no criteria are set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the conjunction of one check per populated field.
    pub fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::default();

        if let Some(name) = &self.name {
            let needle = name.to_lowercase();
            predicate.push(move |i| i.name().to_lowercase().contains(&needle));
        }
        if let Some(brand) = &self.brand {
            let brand = brand.to_lowercase();
            predicate.push(move |i| i.brand().to_lowercase() == brand);
        }
        if let Some(min) = self.price_min {
            predicate.push(move |i| i.base_price() >= min);
        }
        if let Some(max) = self.price_max {
            predicate.push(move |i| i.base_price() <= max);
        }
        if let Some(min) = self.stock_min {
            predicate.push(move |i| i64::from(i.stock()) >= min);
        }
        if let Some(max) = self.stock_max {
            predicate.push(move |i| i64::from(i.stock()) <= max);
        }
        if let Some(guitar_type) = self.guitar_type {
            predicate.push(move |i| {
                i.as_guitar()
                    .is_some_and(|g| g.guitar_type() == guitar_type)
            });
        }
        if let Some(sensitivity) = self.sensitivity {
            predicate.push(move |i| {
                i.as_keyboard()
                    .is_some_and(|k| k.sensitivity() == sensitivity)
            });
        }

        predicate
    }

    /// Check a single instrument against the criteria.
    pub fn matches(&self, instrument: &Instrument) -> bool {
        self.predicate().test(instrument)
    }

    /// Keep the matching instruments, in input order.
    pub fn apply<'a, I>(&self, instruments: I) -> Vec<Instrument>
    where
        I: IntoIterator<Item = &'a Instrument>,
    {
        let predicate = self.predicate();
        instruments
            .into_iter()
            .filter(|i| predicate.test(i))
            .cloned()
            .collect()
    }
}

type Check = Box<dyn Fn(&Instrument) -> bool + Send + Sync>;

/// Conjunction of instrument checks. An empty predicate accepts everything.
#[derive(Default)]
pub struct Predicate {
    checks: Vec<Check>,
}

impl Predicate {
    fn push(&mut self, check: impl Fn(&Instrument) -> bool + Send + Sync + 'static) {
        self.checks.push(Box::new(check));
    }

    pub fn test(&self, instrument: &Instrument) -> bool {
        self.checks.iter().all(|check| check(instrument))
    }

    /// Number of checks combined.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("checks", &self.checks.len())
            .finish()
    }
}
