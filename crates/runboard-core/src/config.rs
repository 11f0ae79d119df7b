//! Log directory configuration.
//!
//! The directory layout is an explicit value passed into the store at
//! construction time; there are no process-wide path constants.

use std::path::PathBuf;

/// Default file name of the mutable, actively-written log.
pub const DEFAULT_CURRENT_FILE: &str = "current-run.jsonl";

/// Default file-name prefix for archived logs.
pub const DEFAULT_ARCHIVE_PREFIX: &str = "ralph_";

/// Default file-name suffix for archived logs.
pub const DEFAULT_ARCHIVE_SUFFIX: &str = ".jsonl";

/// Layout of the log directory served by the dashboard.
///
/// The directory holds one mutable current log plus zero or more immutable
/// archived logs whose names match `archive_prefix`/`archive_suffix`. The
/// external writer owns the directory and the naming convention; this
/// config only records the convention so it can be validated and listed.
#[derive(Debug, Clone)]
pub struct LogDirConfig {
    /// Directory containing the current log and the archived logs.
    pub root: PathBuf,
    /// File name of the mutable current log inside `root`.
    pub current_file: String,
    /// Archived logs are the files whose names start with this prefix...
    pub archive_prefix: String,
    /// ...and end with this suffix.
    pub archive_suffix: String,
}

impl LogDirConfig {
    /// Config for `root` with the default naming convention.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            current_file: DEFAULT_CURRENT_FILE.to_string(),
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            archive_suffix: DEFAULT_ARCHIVE_SUFFIX.to_string(),
        }
    }

    /// Set the current-log file name.
    #[must_use]
    pub fn with_current_file(mut self, name: impl Into<String>) -> Self {
        self.current_file = name.into();
        self
    }

    /// Set the archived-log name prefix.
    #[must_use]
    pub fn with_archive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archive_prefix = prefix.into();
        self
    }

    /// Set the archived-log name suffix.
    #[must_use]
    pub fn with_archive_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.archive_suffix = suffix.into();
        self
    }

    /// Whether `name` matches the archived-log naming convention.
    pub fn is_archive_name(&self, name: &str) -> bool {
        name.len() >= self.archive_prefix.len() + self.archive_suffix.len()
            && name.starts_with(&self.archive_prefix)
            && name.ends_with(&self.archive_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_convention_matches_archived_names() {
        let config = LogDirConfig::new("/var/log/runs");
        assert!(config.is_archive_name("ralph_2024-05-01.jsonl"));
        assert!(config.is_archive_name("ralph_1.jsonl"));
        assert!(!config.is_archive_name("current-run.jsonl"));
        assert!(!config.is_archive_name("notes.txt"));
    }

    #[test]
    fn prefix_and_suffix_may_not_overlap() {
        let config = LogDirConfig::new("/var/log/runs")
            .with_archive_prefix("run.")
            .with_archive_suffix(".jsonl");
        // "run.jsonl" starts with the prefix and ends with the suffix, but
        // only because the two share bytes.
        assert!(!config.is_archive_name("run.jsonl"));
        assert!(config.is_archive_name("run.7.jsonl"));
    }

    #[test]
    fn builders_override_the_defaults() {
        let config = LogDirConfig::new("/data")
            .with_current_file("live.jsonl")
            .with_archive_prefix("job_")
            .with_archive_suffix(".log");
        assert_eq!(config.current_file, "live.jsonl");
        assert!(config.is_archive_name("job_9.log"));
        assert!(!config.is_archive_name("ralph_9.jsonl"));
    }
}
