//! Keyboards.

use super::{validate_count, InstrumentBase, Programmable, Valued};
use crate::error::InventoryResult;
use crate::types::KeyboardSensitivity;
use std::fmt;

/// Surcharge applied to the value of digital keyboards.
pub const DIGITAL_SURCHARGE: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct Keyboard {
    base: InstrumentBase,
    key_count: u32,
    digital: bool,
    sensitivity: KeyboardSensitivity,
}

impl Keyboard {
    /// Create a keyboard. A negative key count is rejected.
    pub fn new(
        base: InstrumentBase,
        key_count: i64,
        digital: bool,
        sensitivity: KeyboardSensitivity,
    ) -> InventoryResult<Self> {
        Ok(Self {
            base,
            key_count: validate_count(key_count, "key count")?,
            digital,
            sensitivity,
        })
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

    pub fn key_count(&self) -> u32 {
        self.key_count
    }

    pub fn is_digital(&self) -> bool {
        self.digital
    }

    pub fn sensitivity(&self) -> KeyboardSensitivity {
        self.sensitivity
    }

    pub fn set_key_count(&mut self, key_count: i64) -> InventoryResult<()> {
        self.key_count = validate_count(key_count, "key count")?;
        Ok(())
    }

    pub fn set_digital(&mut self, digital: bool) {
        self.digital = digital;
    }

    pub fn set_sensitivity(&mut self, sensitivity: KeyboardSensitivity) {
        self.sensitivity = sensitivity;
    }
}

impl Valued for Keyboard {
    fn compute_value(&self, base_price: f64) -> f64 {
        if self.digital {
            base_price * (1.0 + DIGITAL_SURCHARGE)
        } else {
            base_price
        }
    }
}

impl Programmable for Keyboard {
    fn save_preset(&self, preset: &str) -> String {
        format!(
            "Preset {} guardado en el teclado {} con codigo {}",
            preset,
            self.base.name(),
            self.base.code()
        )
    }

    fn load_preset(&self, preset: &str) -> String {
        format!(
            "Preset {} cargado en el teclado {} con codigo {}",
            preset,
            self.base.name(),
            self.base.code()
        )
    }
}

impl fmt::Display for Keyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Keyboard{{{}, keys={}, digital={}, sensitivity={}}}",
            self.base, self.key_count, self.digital, self.sensitivity
        )
    }
}
