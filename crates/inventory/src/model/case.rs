//! Guitar cases (fundas).

use super::{codes_match, validate_code, validate_price};
use super::CaseRecord;
use crate::error::InventoryResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A case sold together with a guitar.
///
/// A case is owned by exactly one guitar. The guitar code it keeps is a
/// plain back-reference used for display; it never owns or locates the
/// guitar. Two cases are equal when their codes are equal, whatever their
/// other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CaseRecord", into = "CaseRecord")]
pub struct Case {
    code: String,
    name: String,
    price: f64,
    guitar_code: Option<String>,
}

impl Case {
    /// Create a detached case.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> InventoryResult<Self> {
        let code = code.into();
        validate_code(&code, "case")?;
        validate_price(price)?;
        Ok(Self {
            code,
            name: name.into(),
            price,
            guitar_code: None,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Code of the guitar holding this case, if attached.
    pub fn guitar_code(&self) -> Option<&str> {
        self.guitar_code.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the price. Negative values are rejected.
    pub fn set_price(&mut self, price: f64) -> InventoryResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Case-insensitive code comparison used by lookups.
    pub fn matches_code(&self, code: &str) -> bool {
        codes_match(&self.code, code)
    }

    pub(crate) fn attach_to(&mut self, guitar_code: &str) {
        self.guitar_code = Some(guitar_code.to_string());
    }
}

impl PartialEq for Case {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Case {}

impl Hash for Case {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Case{{code={}, name={}, price={}, guitar={}}}",
            self.code,
            self.name,
            self.price,
            self.guitar_code.as_deref().unwrap_or("N/A")
        )
    }
}
