//! Entity model: instruments, their variants and guitar cases.
//!
//! ```text
//! Instrument (closed sum type, wire tag "type")
//!  ├── Guitar   ("guitarra")  base + type + body material + owned Cases
//!  └── Keyboard ("teclado")   base + key count + digital + sensitivity
//! ```
//!
//! Every variant embeds an [`InstrumentBase`] holding the shared attributes.
//! Setters validate their input and leave the entity untouched on failure.

mod case;
mod guitar;
mod keyboard;
mod record;

pub use case::Case;
pub use guitar::Guitar;
pub use keyboard::Keyboard;
pub use record::{BaseRecord, CaseRecord, GuitarRecord, InstrumentRecord, KeyboardRecord};

use crate::error::{InventoryError, InventoryResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-variant value computation.
///
/// There is no default: each variant states how its extras contribute to
/// the value of the base price it is given.
pub trait Valued {
    /// Compute the value of this item for the given base price. Pure.
    fn compute_value(&self, base_price: f64) -> f64;
}

/// Instruments able to store and recall presets.
///
/// No preset state is kept; both operations only describe what happened.
pub trait Programmable {
    fn save_preset(&self, preset: &str) -> String;
    fn load_preset(&self, preset: &str) -> String;
}

/// Case-insensitive comparison of two codes.
pub fn codes_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

pub(crate) fn validate_code(code: &str, what: &str) -> InventoryResult<()> {
    if code.trim().is_empty() {
        return Err(InventoryError::validation(format!(
            "the {} code must be present and not blank",
            what
        )));
    }
    Ok(())
}

pub(crate) fn validate_price(price: f64) -> InventoryResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::validation(format!("invalid price: {}", price)));
    }
    Ok(())
}

pub(crate) fn validate_count(value: i64, what: &str) -> InventoryResult<u32> {
    u32::try_from(value)
        .map_err(|_| InventoryError::validation(format!("invalid {}: {}", what, value)))
}

/// Attributes shared by every instrument variant.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentBase {
    code: String,
    name: String,
    brand: String,
    base_price: f64,
    stock: u32,
    intake_date: Option<NaiveDate>,
}

impl InstrumentBase {
    /// Create the shared attributes, validating code, price and stock.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        base_price: f64,
        stock: i64,
        intake_date: Option<NaiveDate>,
    ) -> InventoryResult<Self> {
        let code = code.into();
        validate_code(&code, "instrument")?;
        validate_price(base_price)?;
        let stock = validate_count(stock, "stock")?;

        Ok(Self {
            code,
            name: name.into(),
            brand: brand.into(),
            base_price,
            stock,
            intake_date,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn intake_date(&self) -> Option<NaiveDate> {
        self.intake_date
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_brand(&mut self, brand: impl Into<String>) {
        self.brand = brand.into();
    }

    /// Set the base price. Negative values are rejected.
    pub fn set_base_price(&mut self, price: f64) -> InventoryResult<()> {
        validate_price(price)?;
        self.base_price = price;
        Ok(())
    }

    /// Set the stock. Negative values are rejected.
    pub fn set_stock(&mut self, stock: i64) -> InventoryResult<()> {
        self.stock = validate_count(stock, "stock")?;
        Ok(())
    }

    pub fn set_intake_date(&mut self, date: Option<NaiveDate>) {
        self.intake_date = date;
    }
}

impl fmt::Display for InstrumentBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code={}, name={}, brand={}, price={}, stock={}, intake_date=",
            self.code, self.name, self.brand, self.base_price, self.stock
        )?;
        match self.intake_date {
            Some(date) => write!(f, "{}", date),
            None => f.write_str("not available"),
        }
    }
}

/// An instrument held in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstrumentRecord", into = "InstrumentRecord")]
pub enum Instrument {
    Guitar(Guitar),
    Keyboard(Keyboard),
}

impl Instrument {
    /// Wire discriminator of the variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Instrument::Guitar(_) => "guitarra",
            Instrument::Keyboard(_) => "teclado",
        }
    }

    pub fn base(&self) -> &InstrumentBase {
        match self {
            Instrument::Guitar(g) => g.base(),
            Instrument::Keyboard(k) => k.base(),
        }
    }

    pub fn base_mut(&mut self) -> &mut InstrumentBase {
        match self {
            Instrument::Guitar(g) => g.base_mut(),
            Instrument::Keyboard(k) => k.base_mut(),
        }
    }

    pub fn code(&self) -> &str {
        self.base().code()
    }

    pub fn name(&self) -> &str {
        self.base().name()
    }

    pub fn brand(&self) -> &str {
        self.base().brand()
    }

    pub fn base_price(&self) -> f64 {
        self.base().base_price()
    }

    pub fn stock(&self) -> u32 {
        self.base().stock()
    }

    pub fn intake_date(&self) -> Option<NaiveDate> {
        self.base().intake_date()
    }

    /// Value of the instrument at its own base price.
    pub fn value(&self) -> f64 {
        self.compute_value(self.base_price())
    }

    /// Case-insensitive code comparison used by lookups.
    pub fn matches_code(&self, code: &str) -> bool {
        codes_match(self.code(), code)
    }

    pub fn as_guitar(&self) -> Option<&Guitar> {
        match self {
            Instrument::Guitar(g) => Some(g),
            Instrument::Keyboard(_) => None,
        }
    }

    pub fn as_guitar_mut(&mut self) -> Option<&mut Guitar> {
        match self {
            Instrument::Guitar(g) => Some(g),
            Instrument::Keyboard(_) => None,
        }
    }

    pub fn as_keyboard(&self) -> Option<&Keyboard> {
        match self {
            Instrument::Keyboard(k) => Some(k),
            Instrument::Guitar(_) => None,
        }
    }

    pub fn into_guitar(self) -> Option<Guitar> {
        match self {
            Instrument::Guitar(g) => Some(g),
            Instrument::Keyboard(_) => None,
        }
    }

    pub fn into_keyboard(self) -> Option<Keyboard> {
        match self {
            Instrument::Keyboard(k) => Some(k),
            Instrument::Guitar(_) => None,
        }
    }
}

impl Valued for Instrument {
    fn compute_value(&self, base_price: f64) -> f64 {
        match self {
            Instrument::Guitar(g) => g.compute_value(base_price),
            Instrument::Keyboard(k) => k.compute_value(base_price),
        }
    }
}

impl From<Guitar> for Instrument {
    fn from(guitar: Guitar) -> Self {
        Instrument::Guitar(guitar)
    }
}

impl From<Keyboard> for Instrument {
    fn from(keyboard: Keyboard) -> Self {
        Instrument::Keyboard(keyboard)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instrument::Guitar(g) => write!(f, "{}", g),
            Instrument::Keyboard(k) => write!(f, "{}", k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GuitarType, KeyboardSensitivity};
    use assert_matches::assert_matches;

    fn base(code: &str, price: f64) -> InstrumentBase {
        InstrumentBase::new(code, "Strato", "Fender", price, 3, None).unwrap()
    }

    #[test]
    fn test_codes_match_ignores_case() {
        assert!(codes_match("ABC123", "abc123"));
        assert!(codes_match("GuItÁrRa-1", "guitárra-1"));
        assert!(!codes_match("ABC123", "ABC12"));
    }

    #[test]
    fn test_base_validation() {
        assert_matches!(
            InstrumentBase::new("GT-1", "Strato", "Fender", -1.0, 3, None),
            Err(InventoryError::Validation(_))
        );
        assert_matches!(
            InstrumentBase::new("GT-1", "Strato", "Fender", 1.0, -3, None),
            Err(InventoryError::Validation(_))
        );
        assert_matches!(
            InstrumentBase::new("", "Strato", "Fender", 1.0, 3, None),
            Err(InventoryError::Validation(_))
        );
        assert_matches!(
            InstrumentBase::new("GT-1", "Strato", "Fender", f64::NAN, 3, None),
            Err(InventoryError::Validation(_))
        );
    }

    #[test]
    fn test_setters_keep_old_value_on_failure() {
        let mut b = base("GT-1", 500.0);
        assert_matches!(b.set_base_price(-10.0), Err(InventoryError::Validation(_)));
        assert_matches!(b.set_stock(-1), Err(InventoryError::Validation(_)));
        assert_eq!(b.base_price(), 500.0);
        assert_eq!(b.stock(), 3);

        b.set_base_price(0.0).unwrap();
        b.set_stock(0).unwrap();
        assert_eq!(b.base_price(), 0.0);
        assert_eq!(b.stock(), 0);
    }

    #[test]
    fn test_instrument_dispatch() {
        let guitar: Instrument =
            Guitar::new(base("GT-1", 500.0), GuitarType::Electric, "Alder").into();
        let keyboard: Instrument = Keyboard::new(
            base("KB-1", 400.0),
            61,
            true,
            KeyboardSensitivity::Medium,
        )
        .unwrap()
        .into();

        assert_eq!(guitar.type_tag(), "guitarra");
        assert_eq!(keyboard.type_tag(), "teclado");
        assert!(guitar.as_guitar().is_some());
        assert!(guitar.as_keyboard().is_none());
        assert!(keyboard.as_keyboard().is_some());
        assert!((keyboard.value() - 460.0).abs() < 1e-9);
        assert_eq!(guitar.value(), 500.0);
    }

    #[test]
    fn test_base_display_without_date() {
        let b = base("GT-1", 500.0);
        assert!(b.to_string().ends_with("intake_date=not available"));
    }
}
