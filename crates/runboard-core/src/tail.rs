//! Tail tracking - incremental delivery of newly appended records.
//!
//! Growth is detected by a cheap byte-size comparison; when the size
//! changes, the whole file is re-read and re-decoded from the start. Byte
//! offsets do not line up with record boundaries across partial writes, so
//! the record sequence is re-derived each time rather than appended to.
//! Incremental byte-offset tailing is a known extension point.

use crate::record::Record;
use crate::store::{LogHandle, LogStore};

/// Per-subscriber progress marker.
///
/// Within one session the offset never decreases and never exceeds the
/// number of successfully decoded records. Never persisted: a new session
/// always starts from a client-supplied offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TailCursor {
    /// Count of records already delivered to this subscriber.
    pub offset: usize,
    /// Byte size of the log the last time it was read, 0 if never read.
    pub last_size: u64,
}

impl TailCursor {
    /// Cursor for a subscriber that has already seen `offset` records.
    pub fn from_offset(offset: usize) -> Self {
        Self {
            offset,
            last_size: 0,
        }
    }
}

/// Watches one log for growth on behalf of one subscriber.
///
/// Polling is a pure read: the tracker holds no mutable state and the
/// caller threads the cursor from one poll to the next, so concurrent
/// sessions share nothing but the read-only file contents.
#[derive(Debug, Clone)]
pub struct TailTracker {
    store: LogStore,
    handle: LogHandle,
}

impl TailTracker {
    pub fn new(store: LogStore, handle: LogHandle) -> Self {
        Self { store, handle }
    }

    /// Return the records appended since `cursor`, plus the advanced cursor.
    ///
    /// A missing file or an unchanged byte size yields no records and an
    /// unchanged cursor. If the file shrank or was replaced between polls,
    /// no records are returned and the offset resets to the newly decoded
    /// count: the tracker self-heals rather than failing.
    pub async fn poll(&self, cursor: TailCursor) -> (Vec<Record>, TailCursor) {
        let Ok(meta) = tokio::fs::metadata(self.handle.path()).await else {
            return (Vec::new(), cursor);
        };
        let size = meta.len();
        if size == cursor.last_size {
            return (Vec::new(), cursor);
        }

        let mut records = self.store.read_all(&self.handle).await;
        let total = records.len();
        let next = TailCursor {
            offset: total,
            last_size: size,
        };
        if total < cursor.offset {
            return (Vec::new(), next);
        }

        let new = records.split_off(cursor.offset);
        (new, next)
    }
}
