//! # Inventory Crate
//!
//! In-memory inventory of musical instruments for the Tienda service.
//!
//! ## Key Components
//!
//! - **Entity Model**: `Instrument` (`Guitar` | `Keyboard`), `Case`, value computation
//! - **Store**: `InstrumentStore` trait with the `InMemoryInstrumentStore` implementation
//! - **Filter Engine**: `InstrumentFilter` criteria compiled into a `Predicate`
//! - **Service**: `InventoryService`, the facade every caller goes through
//! - **HTTP API** (feature `api`): axum routes under `/instrumentos`
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  api (axum)  ──►  InventoryService           │
//! │                      │                       │
//! │                      ▼                       │
//! │            dyn InstrumentStore               │
//! │         InMemoryInstrumentStore              │
//! │      RwLock<Vec<Instrument>> + filter        │
//! └──────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod filter;
pub mod model;
pub mod service;
pub mod store;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{ErrorKind, InventoryError, InventoryResult};
pub use filter::{InstrumentFilter, Predicate};
pub use model::{
    codes_match, Case, Guitar, Instrument, InstrumentBase, Keyboard, Programmable, Valued,
};
pub use service::InventoryService;
pub use store::{InMemoryInstrumentStore, InstrumentStore};
pub use types::{GuitarType, KeyboardSensitivity};
