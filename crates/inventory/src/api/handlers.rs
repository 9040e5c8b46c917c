//! HTTP request handlers for the inventory API.

use crate::api::error::{require_code, ApiError};
use crate::api::models::{ApiResponse, ValueResponse};
use crate::error::InventoryError;
use crate::filter::InstrumentFilter;
use crate::model::{Case, Instrument};
use crate::service::InventoryService;
use axum::extract::{FromRequest, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

const INSTRUMENT: &str = "del instrumento";
const CASE: &str = "de la funda";

/// Shared state for inventory API handlers.
pub struct InventoryApiState {
    pub service: InventoryService,
}

impl InventoryApiState {
    pub fn new(service: InventoryService) -> Self {
        Self { service }
    }
}

/// JSON body whose rejections answer with the API envelope.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

type Envelope = (StatusCode, Json<ApiResponse>);

fn envelope(status: StatusCode, mensaje: &str) -> Envelope {
    (status, Json(ApiResponse::ok(mensaje)))
}

/// GET /instrumentos/healthCheck
pub async fn health_check() -> &'static str {
    "Status Ok!"
}

/// POST /instrumentos
pub async fn add_instrument(
    State(state): State<Arc<InventoryApiState>>,
    ApiJson(instrument): ApiJson<Instrument>,
) -> Result<Envelope, ApiError> {
    state.service.add(instrument)?;
    Ok(envelope(StatusCode::CREATED, "Instrumento agregado correctamente"))
}

/// GET /instrumentos
pub async fn list_instruments(
    State(state): State<Arc<InventoryApiState>>,
) -> Json<Vec<Instrument>> {
    Json(state.service.list())
}

/// GET /instrumentos/guitarras
pub async fn list_guitars(State(state): State<Arc<InventoryApiState>>) -> Json<Vec<Instrument>> {
    Json(
        state
            .service
            .list_guitars()
            .into_iter()
            .map(Instrument::from)
            .collect(),
    )
}

/// GET /instrumentos/teclados
pub async fn list_keyboards(
    State(state): State<Arc<InventoryApiState>>,
) -> Json<Vec<Instrument>> {
    Json(
        state
            .service
            .list_keyboards()
            .into_iter()
            .map(Instrument::from)
            .collect(),
    )
}

/// GET /instrumentos/:codigo
pub async fn find_instrument(
    State(state): State<Arc<InventoryApiState>>,
    Path(code): Path<String>,
) -> Result<Json<Instrument>, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    state
        .service
        .find(code)
        .map(Json)
        .ok_or_else(|| InventoryError::not_found("El instrumento no existe").into())
}

/// PUT /instrumentos/:codigo
pub async fn edit_instrument(
    State(state): State<Arc<InventoryApiState>>,
    Path(code): Path<String>,
    ApiJson(instrument): ApiJson<Instrument>,
) -> Result<Envelope, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    state.service.edit(code, instrument)?;
    Ok(envelope(StatusCode::OK, "Instrumento editado correctamente"))
}

/// DELETE /instrumentos/:codigo
pub async fn remove_instrument(
    State(state): State<Arc<InventoryApiState>>,
    Path(code): Path<String>,
) -> Result<Envelope, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    state.service.remove(code)?;
    Ok(envelope(StatusCode::OK, "Instrumento eliminado correctamente"))
}

/// POST /instrumentos/guitarras/:codigo/fundas
///
/// A `null` body adds nothing.
pub async fn add_cases(
    State(state): State<Arc<InventoryApiState>>,
    Path(code): Path<String>,
    ApiJson(cases): ApiJson<Option<Vec<Case>>>,
) -> Result<Envelope, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    state.service.add_cases(code, cases.unwrap_or_default())?;
    Ok(envelope(StatusCode::CREATED, "Fundas agregadas correctamente"))
}

/// PUT /instrumentos/guitarras/:codigo/fundas/:codigoFunda
pub async fn edit_case(
    State(state): State<Arc<InventoryApiState>>,
    Path((code, case_code)): Path<(String, String)>,
    ApiJson(case): ApiJson<Case>,
) -> Result<Envelope, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    let case_code = require_code(&case_code, CASE)?;
    state.service.edit_case(code, case_code, case)?;
    Ok(envelope(StatusCode::OK, "Funda modificada correctamente"))
}

/// DELETE /instrumentos/guitarras/:codigo/fundas/:codigoFunda
pub async fn remove_case(
    State(state): State<Arc<InventoryApiState>>,
    Path((code, case_code)): Path<(String, String)>,
) -> Result<Envelope, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    let case_code = require_code(&case_code, CASE)?;
    state.service.remove_case(code, case_code)?;
    Ok(envelope(StatusCode::OK, "Funda eliminada correctamente"))
}

/// POST /instrumentos/filtrar
pub async fn filter_instruments(
    State(state): State<Arc<InventoryApiState>>,
    ApiJson(filter): ApiJson<InstrumentFilter>,
) -> Json<Vec<Instrument>> {
    Json(state.service.filter(&filter))
}

/// POST /instrumentos/teclados/:codigo/presets/:nombre
pub async fn save_preset(
    State(state): State<Arc<InventoryApiState>>,
    Path((code, preset)): Path<(String, String)>,
) -> Result<Json<ApiResponse>, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    let message = state.service.save_preset(code, &preset)?;
    Ok(Json(ApiResponse::ok(message)))
}

/// GET /instrumentos/teclados/:codigo/presets/:nombre
pub async fn load_preset(
    State(state): State<Arc<InventoryApiState>>,
    Path((code, preset)): Path<(String, String)>,
) -> Result<Json<ApiResponse>, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    let message = state.service.load_preset(code, &preset)?;
    Ok(Json(ApiResponse::ok(message)))
}

/// GET /instrumentos/:codigo/valor
pub async fn instrument_value(
    State(state): State<Arc<InventoryApiState>>,
    Path(code): Path<String>,
) -> Result<Json<ValueResponse>, ApiError> {
    let code = require_code(&code, INSTRUMENT)?;
    let valor = state.service.value(code)?;
    Ok(Json(ValueResponse {
        codigo: code.to_string(),
        valor,
    }))
}
