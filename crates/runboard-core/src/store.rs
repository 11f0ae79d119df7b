//! On-disk log directory access.
//!
//! Reads are stateless and side-effect-free: the log is append-only and
//! owned by an external writer, so no locking is required on this side.
//! Missing files and directories are ordinary conditions ("no log yet"),
//! not errors; the only failure surfaced to callers is an archived-log name
//! that cannot be validated or found.

use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::Serialize;
use thiserror::Error;

use crate::config::LogDirConfig;
use crate::record::{self, Record};

/// Errors from resolving an archived log by name.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The name fails the naming/extension/path-containment check.
    #[error("invalid log name: {0}")]
    InvalidName(String),

    /// The name is valid but no such log exists.
    #[error("log not found: {0}")]
    NotFound(String),
}

/// Identity of one log file inside the log directory.
///
/// Obtained from [`LogStore::current_log`] or [`LogStore::resolve_archived`];
/// the path is known to be inside the log directory by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHandle(PathBuf);

impl LogHandle {
    /// The underlying file path.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Derived view over an archived log, recomputed on every listing.
#[derive(Debug, Clone, Serialize)]
pub struct LogMetadata {
    /// Bare file name inside the log directory.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// Last-modified time in fractional seconds since the Unix epoch.
    pub modified: f64,
}

/// Access to the on-disk log directory.
///
/// Cheap to clone; holds only the directory layout.
#[derive(Debug, Clone)]
pub struct LogStore {
    config: LogDirConfig,
}

impl LogStore {
    pub fn new(config: LogDirConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LogDirConfig {
        &self.config
    }

    /// Resolve the fixed current-log path.
    ///
    /// The file is not required to exist; readers check lazily.
    pub fn current_log(&self) -> LogHandle {
        LogHandle(self.config.root.join(&self.config.current_file))
    }

    /// Enumerate archived logs, newest first.
    ///
    /// Archived logs are the files whose names match the configured
    /// prefix/suffix. Entries are sorted by byte-wise lexicographic
    /// comparison of the file name, descending, so writers that embed a
    /// sortable timestamp or sequence number in the name list newest first.
    /// This ordering is part of the API contract.
    ///
    /// A missing or unreadable directory yields an empty listing; entries
    /// that vanish between enumeration and stat are skipped.
    pub async fn list_archived(&self) -> Vec<LogMetadata> {
        let mut logs = Vec::new();
        let Ok(mut entries) = tokio::fs::read_dir(&self.config.root).await else {
            return logs;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.config.is_archive_name(&name) {
                continue;
            }
            let Ok(meta) = entry.metadata().await else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0.0, |d| d.as_secs_f64());
            logs.push(LogMetadata {
                name,
                size: meta.len(),
                modified,
            });
        }
        logs.sort_by(|a, b| b.name.cmp(&a.name));
        logs
    }

    /// Read and decode every line of a log, in file order.
    ///
    /// The file is read as bytes and split lossily, so a torn multi-byte
    /// character damages only the line it sits on. A missing or unreadable
    /// file yields an empty sequence.
    pub async fn read_all(&self, handle: &LogHandle) -> Vec<Record> {
        let Ok(bytes) = tokio::fs::read(handle.path()).await else {
            return Vec::new();
        };
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(record::decode)
            .collect()
    }

    /// Resolve an archived log by name.
    ///
    /// The name must end with the archive suffix and must be a bare file
    /// name - a single normal path component - so the joined path cannot
    /// escape the log directory. Validation happens before any filesystem
    /// access.
    pub fn resolve_archived(&self, name: &str) -> Result<LogHandle, StoreError> {
        if !name.ends_with(&self.config.archive_suffix) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        let mut components = Path::new(name).components();
        let bare = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none();
        if !bare {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let path = self.config.root.join(name);
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(LogHandle(path))
    }
}
