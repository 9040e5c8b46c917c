//! Enumerated attributes of the instrument variants.
//!
//! - `GuitarType`: Electric, Acoustic, Electroacoustic, Classical
//! - `KeyboardSensitivity`: None, Basic, Medium, High, Professional
//!
//! Both travel over the wire as human-readable display strings
//! ("Eléctrica", "Básica", ...) and parse them back case-insensitively,
//! ignoring surrounding whitespace.

use crate::error::{InventoryError, InventoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of guitar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GuitarType {
    Electric,
    Acoustic,
    Electroacoustic,
    Classical,
}

impl GuitarType {
    /// All guitar types, in declaration order.
    pub const ALL: [GuitarType; 4] = [
        GuitarType::Electric,
        GuitarType::Acoustic,
        GuitarType::Electroacoustic,
        GuitarType::Classical,
    ];

    /// Human-readable value used on the wire.
    pub fn display_name(&self) -> &'static str {
        match self {
            GuitarType::Electric => "Eléctrica",
            GuitarType::Acoustic => "Acústica",
            GuitarType::Electroacoustic => "Electroacústica",
            GuitarType::Classical => "Clásica",
        }
    }

    /// Parse from the display value, ignoring case and surrounding whitespace.
    pub fn from_display(value: &str) -> InventoryResult<Self> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.display_name().to_lowercase() == normalized)
            .ok_or_else(|| InventoryError::validation(format!("invalid guitar type: {}", value)))
    }

    /// Parse an optional value; absence is a validation error.
    pub fn from_optional(value: Option<&str>) -> InventoryResult<Self> {
        match value {
            Some(v) => Self::from_display(v),
            None => Err(InventoryError::validation("the guitar type cannot be null")),
        }
    }
}

impl fmt::Display for GuitarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for GuitarType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display(s)
    }
}

impl TryFrom<String> for GuitarType {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_display(&value)
    }
}

impl From<GuitarType> for String {
    fn from(value: GuitarType) -> Self {
        value.display_name().to_string()
    }
}

/// Touch sensitivity of a keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyboardSensitivity {
    None,
    Basic,
    Medium,
    High,
    Professional,
}

impl KeyboardSensitivity {
    /// All sensitivity levels, from lowest to highest.
    pub const ALL: [KeyboardSensitivity; 5] = [
        KeyboardSensitivity::None,
        KeyboardSensitivity::Basic,
        KeyboardSensitivity::Medium,
        KeyboardSensitivity::High,
        KeyboardSensitivity::Professional,
    ];

    /// Human-readable value used on the wire.
    pub fn display_name(&self) -> &'static str {
        match self {
            KeyboardSensitivity::None => "Ninguna",
            KeyboardSensitivity::Basic => "Básica",
            KeyboardSensitivity::Medium => "Intermedia",
            KeyboardSensitivity::High => "Alta",
            KeyboardSensitivity::Professional => "Profesional",
        }
    }

    /// Parse from the display value, ignoring case and surrounding whitespace.
    pub fn from_display(value: &str) -> InventoryResult<Self> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.display_name().to_lowercase() == normalized)
            .ok_or_else(|| InventoryError::validation(format!("invalid sensitivity: {}", value)))
    }

    /// Parse an optional value; absence is a validation error.
    pub fn from_optional(value: Option<&str>) -> InventoryResult<Self> {
        match value {
            Some(v) => Self::from_display(v),
            None => Err(InventoryError::validation("the sensitivity cannot be null")),
        }
    }
}

impl fmt::Display for KeyboardSensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for KeyboardSensitivity {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display(s)
    }
}

impl TryFrom<String> for KeyboardSensitivity {
    type Error = InventoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_display(&value)
    }
}

impl From<KeyboardSensitivity> for String {
    fn from(value: KeyboardSensitivity) -> Self {
        value.display_name().to_string()
    }
}
