//! HTTP server layer
//!
//! Axum server with:
//! - Server-rendered list, create and edit pages
//! - JSON record listing and health check
//! - Request tracing and timeout
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
