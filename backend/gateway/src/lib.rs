//! docsift Gateway HTTP API Server
//!
//! Provides the classification endpoint, liveness probes and CORS policy.

pub mod classify_api;
pub mod cors;
pub mod error;
pub mod health_api;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
