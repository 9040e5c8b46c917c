//! Observability infrastructure for Tienda
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics for the HTTP server and the inventory
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("tienda", LogFormat::Pretty, "info")?;
//! observability::init_metrics("0.0.0.0", 9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{build_filter, init_logging, LogFormat};
pub use metrics::{init_metrics, metrics_address, InventoryMetrics, RequestMetricsGuard, ServerMetrics};
