//! API error type and its HTTP mapping.

use crate::api::models::ApiResponse;
use crate::error::{ErrorKind, InventoryError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Message returned when the request body is missing or is not valid JSON.
pub const MALFORMED_BODY: &str =
    "El cuerpo de la petición es requerido y debe estar en formato JSON válido.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Error raised by the inventory itself.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// A code in the path is blank.
    #[error("El código {0} debe existir y no estar vacío")]
    BlankCode(&'static str),

    /// The body could not be read as the expected JSON.
    #[error("{prefix} {0}", prefix = MALFORMED_BODY)]
    MalformedBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Inventory(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
            },
            ApiError::BlankCode(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Inventory(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(ApiResponse::error(self.message()))).into_response()
    }
}

/// Reject blank path codes. `what` reads naturally after "El código".
pub(crate) fn require_code<'a>(code: &'a str, what: &'static str) -> Result<&'a str, ApiError> {
    if code.trim().is_empty() {
        return Err(ApiError::BlankCode(what));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(InventoryError::validation("x")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(InventoryError::not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(InventoryError::conflict("x")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::BlankCode("de la funda").status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_blank_code_message() {
        assert_eq!(
            ApiError::BlankCode("del instrumento").to_string(),
            "El código del instrumento debe existir y no estar vacío"
        );
        assert!(require_code("  ", "del instrumento").is_err());
        assert_eq!(require_code("GT-1", "del instrumento").unwrap(), "GT-1");
    }

    #[test]
    fn test_inventory_message_has_no_kind_prefix() {
        let err = ApiError::from(InventoryError::not_found("El instrumento no existe"));
        assert_eq!(err.message(), "El instrumento no existe");
    }
}
