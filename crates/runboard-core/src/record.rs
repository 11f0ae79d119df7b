//! Record codec - one log line to/from one structured record.
//!
//! Logs are newline-delimited JSON written incrementally by an external
//! process, so a reader can observe a line mid-write. Blank and undecodable
//! lines are expected transient noise: they decode to `None` and are
//! skipped, never surfaced as errors.

use serde_json::Value;

/// One decoded structured log event.
///
/// The payload schema is owned by the external writer; the server treats it
/// as an opaque JSON value and never validates beyond well-formedness.
pub type Record = Value;

/// Decode one log line (line terminator already stripped).
///
/// Returns `None` for blank lines and for lines that are not well-formed
/// JSON. Callers skip `None` and continue with the remaining lines; a bad
/// line never aborts a read.
pub fn decode(line: &str) -> Option<Record> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!("Skipping undecodable log line: {}", e);
            None
        }
    }
}

/// Encode a record back to its single-line form.
///
/// The inverse of [`decode`], used when framing a record for delivery.
/// Encoding a well-formed record cannot fail.
pub fn encode(record: &Record) -> String {
    record.to_string()
}
