//! HTTP API for the inventory.
//!
//! ## Modules
//!
//! - `handlers` - request handlers over [`InventoryService`](crate::InventoryService)
//! - `routes` - axum router under `/instrumentos`
//! - `error` - mapping of inventory errors to status codes
//! - `models` - response envelope and small response bodies

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

pub use error::ApiError;
pub use handlers::InventoryApiState;
pub use models::ApiResponse;
pub use routes::inventory_routes;
