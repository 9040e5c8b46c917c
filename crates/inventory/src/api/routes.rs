//! Axum route definitions for the inventory API.

use crate::api::handlers::{self, InventoryApiState};
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;

/// Create all inventory routes.
///
/// # Routes
///
/// - `GET /instrumentos/healthCheck` - Liveness text
/// - `POST /instrumentos` / `GET /instrumentos` - Add / list
/// - `GET /instrumentos/guitarras`, `GET /instrumentos/teclados` - List one variant
/// - `GET|PUT|DELETE /instrumentos/:codigo` - Find / replace / remove
/// - `GET /instrumentos/:codigo/valor` - Computed value
/// - `POST /instrumentos/guitarras/:codigo/fundas` - Add cases
/// - `PUT|DELETE /instrumentos/guitarras/:codigo/fundas/:codigoFunda` - Replace / remove a case
/// - `POST /instrumentos/filtrar` - Filter
/// - `POST|GET /instrumentos/teclados/:codigo/presets/:nombre` - Save / load a preset
pub fn inventory_routes(state: Arc<InventoryApiState>) -> Router {
    Router::new()
        .route("/instrumentos/healthCheck", get(handlers::health_check))
        .route(
            "/instrumentos",
            post(handlers::add_instrument).get(handlers::list_instruments),
        )
        .route("/instrumentos/guitarras", get(handlers::list_guitars))
        .route("/instrumentos/teclados", get(handlers::list_keyboards))
        .route("/instrumentos/filtrar", post(handlers::filter_instruments))
        .route(
            "/instrumentos/:codigo",
            get(handlers::find_instrument)
                .put(handlers::edit_instrument)
                .delete(handlers::remove_instrument),
        )
        .route("/instrumentos/:codigo/valor", get(handlers::instrument_value))
        .route(
            "/instrumentos/guitarras/:codigo/fundas",
            post(handlers::add_cases),
        )
        .route(
            "/instrumentos/guitarras/:codigo/fundas/:codigoFunda",
            put(handlers::edit_case).delete(handlers::remove_case),
        )
        .route(
            "/instrumentos/teclados/:codigo/presets/:nombre",
            post(handlers::save_preset).get(handlers::load_preset),
        )
        .with_state(state)
}
