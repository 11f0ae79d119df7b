//! Axum web adapter for the runboard dashboard.
//!
//! Exposes the log directory over HTTP: full snapshots of the current log,
//! archived-log listings and retrieval, and a per-subscriber SSE tail of
//! the current log. Router construction, handlers, error mapping, and the
//! server bootstrap all live here; the domain logic lives in
//! `runboard-core`.

#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for the lib test target; these are
// exercised by tests/integration_routes.rs
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use state::AppState;
