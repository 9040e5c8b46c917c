//! API response models.

use serde::{Deserialize, Serialize};

/// Envelope returned by mutating endpoints and by every error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub error: bool,
    pub mensaje: String,
}

impl ApiResponse {
    pub fn ok(mensaje: impl Into<String>) -> Self {
        Self {
            error: false,
            mensaje: mensaje.into(),
        }
    }

    pub fn error(mensaje: impl Into<String>) -> Self {
        Self {
            error: true,
            mensaje: mensaje.into(),
        }
    }
}

/// Computed value of an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueResponse {
    pub codigo: String,
    pub valor: f64,
}
