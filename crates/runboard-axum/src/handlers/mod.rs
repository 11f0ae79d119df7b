//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to the core log store.

pub mod logs;
