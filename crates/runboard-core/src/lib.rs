//! Core domain for the runboard dashboard server.
//!
//! Everything here is transport-agnostic: reading append-only,
//! newline-delimited JSON run logs from a directory owned by an external
//! writer, and tracking per-subscriber tail progress over the current log.
//! The HTTP surface lives in the `runboard-axum` adapter crate.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod record;
pub mod store;
pub mod tail;

// Re-export commonly used types for convenience
pub use config::{
    DEFAULT_ARCHIVE_PREFIX, DEFAULT_ARCHIVE_SUFFIX, DEFAULT_CURRENT_FILE, LogDirConfig,
};
pub use record::{Record, decode, encode};
pub use store::{LogHandle, LogMetadata, LogStore, StoreError};
pub use tail::{TailCursor, TailTracker};
