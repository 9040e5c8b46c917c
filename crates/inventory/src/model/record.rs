//! Wire representation of the model.
//!
//! Records carry the JSON field names used by the HTTP API and convert to
//! the model through its validating constructors, so anything that
//! deserializes into an [`Instrument`] or a [`Case`] already satisfies the
//! model invariants.

use super::{Case, Guitar, Instrument, InstrumentBase, Keyboard};
use crate::error::InventoryError;
use crate::types::{GuitarType, KeyboardSensitivity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Instrument as sent over the wire, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstrumentRecord {
    #[serde(rename = "guitarra")]
    Guitar(GuitarRecord),
    #[serde(rename = "teclado")]
    Keyboard(KeyboardRecord),
}

/// Fields shared by every instrument record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRecord {
    pub codigo: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub precio_base: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub fecha_ingreso: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuitarRecord {
    #[serde(flatten)]
    pub base: BaseRecord,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub material_cuerpo: String,
    #[serde(default)]
    pub fundas: Vec<CaseRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardRecord {
    #[serde(flatten)]
    pub base: BaseRecord,
    #[serde(default)]
    pub numero_teclas: i64,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub sensibilidad: Option<String>,
}

/// Case as sent over the wire. The guitar back-reference is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub codigo: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub precio: f64,
}

impl TryFrom<BaseRecord> for InstrumentBase {
    type Error = InventoryError;

    fn try_from(r: BaseRecord) -> Result<Self, Self::Error> {
        InstrumentBase::new(r.codigo, r.nombre, r.marca, r.precio_base, r.stock, r.fecha_ingreso)
    }
}

impl From<&InstrumentBase> for BaseRecord {
    fn from(base: &InstrumentBase) -> Self {
        Self {
            codigo: base.code().to_string(),
            nombre: base.name().to_string(),
            marca: base.brand().to_string(),
            precio_base: base.base_price(),
            stock: i64::from(base.stock()),
            fecha_ingreso: base.intake_date(),
        }
    }
}

impl TryFrom<CaseRecord> for Case {
    type Error = InventoryError;

    fn try_from(r: CaseRecord) -> Result<Self, Self::Error> {
        Case::new(r.codigo, r.nombre, r.precio)
    }
}

impl From<Case> for CaseRecord {
    fn from(case: Case) -> Self {
        Self {
            codigo: case.code().to_string(),
            nombre: case.name().to_string(),
            precio: case.price(),
        }
    }
}

impl TryFrom<GuitarRecord> for Guitar {
    type Error = InventoryError;

    fn try_from(r: GuitarRecord) -> Result<Self, Self::Error> {
        let base = InstrumentBase::try_from(r.base)?;
        let guitar_type = GuitarType::from_optional(r.tipo.as_deref())?;
        let cases = r
            .fundas
            .into_iter()
            .map(Case::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Guitar::new(base, guitar_type, r.material_cuerpo).with_cases(cases))
    }
}

impl TryFrom<KeyboardRecord> for Keyboard {
    type Error = InventoryError;

    fn try_from(r: KeyboardRecord) -> Result<Self, Self::Error> {
        let base = InstrumentBase::try_from(r.base)?;
        let sensitivity = KeyboardSensitivity::from_optional(r.sensibilidad.as_deref())?;
        Keyboard::new(base, r.numero_teclas, r.digital, sensitivity)
    }
}

impl TryFrom<InstrumentRecord> for Instrument {
    type Error = InventoryError;

    fn try_from(record: InstrumentRecord) -> Result<Self, Self::Error> {
        match record {
            InstrumentRecord::Guitar(r) => Guitar::try_from(r).map(Instrument::Guitar),
            InstrumentRecord::Keyboard(r) => Keyboard::try_from(r).map(Instrument::Keyboard),
        }
    }
}

impl From<Instrument> for InstrumentRecord {
    fn from(instrument: Instrument) -> Self {
        match instrument {
            Instrument::Guitar(g) => InstrumentRecord::Guitar(GuitarRecord {
                base: BaseRecord::from(g.base()),
                tipo: Some(g.guitar_type().display_name().to_string()),
                material_cuerpo: g.body_material().to_string(),
                fundas: g.cases().iter().cloned().map(CaseRecord::from).collect(),
            }),
            Instrument::Keyboard(k) => InstrumentRecord::Keyboard(KeyboardRecord {
                base: BaseRecord::from(k.base()),
                numero_teclas: i64::from(k.key_count()),
                digital: k.is_digital(),
                sensibilidad: Some(k.sensitivity().display_name().to_string()),
            }),
        }
    }
}
