//! HTTP server infrastructure for Tienda
//!
//! Provides the axum server lifecycle, graceful shutdown and the health
//! endpoint shared by every deployment.
//!
//! # Architecture
//!
//! [`HttpServer`] implements the [`Server`] trait. The [`ServerExt`] trait
//! adds `spawn()` and `run_with_ctrl_c()`. Shutdown is driven by a
//! `CancellationToken` from `tokio_util`.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! let config = ServerConfig::new("0.0.0.0", 8080);
//! let server = HttpServer::new(config, "tienda", app_router);
//! server.run_with_ctrl_c().await?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - bind address
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`health`] - `/health` endpoint
//! - [`shutdown`] - graceful shutdown utilities

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod shutdown;
pub mod traits;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
