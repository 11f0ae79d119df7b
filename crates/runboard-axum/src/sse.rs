//! SSE tail session - a per-subscriber polling stream over one log.
//!
//! Each subscriber gets its own session: a cursor seeded with the
//! client-supplied offset, a fixed-cadence interval, and a tail tracker.
//! Every tick polls once and emits one SSE event per newly appended
//! record, in file order. The SSE layer interleaves `: keepalive` comment
//! lines whenever a cadence interval passes without data. When the client
//! disconnects, axum drops the stream; dropping it cancels the pending
//! tick and releases the session's cursor - there is no explicit
//! unsubscribe protocol.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream, StreamExt};
use runboard_core::{Record, TailCursor, TailTracker};
use serde::Serialize;
use tokio::time::MissedTickBehavior;

/// Wire frame for one streamed record.
///
/// `index` is the record's absolute 0-based position in the full log, so a
/// client can resume with `?offset=` after a dropped connection.
#[derive(Debug, Serialize)]
pub struct StreamFrame {
    pub index: usize,
    pub event: Record,
}

/// One polling step: poll the tracker once and frame the new records with
/// their absolute indices.
async fn poll_frames(
    tracker: &TailTracker,
    cursor: TailCursor,
) -> (Vec<StreamFrame>, TailCursor) {
    let (records, next) = tracker.poll(cursor).await;
    let first_index = next.offset - records.len();
    let frames = records
        .into_iter()
        .enumerate()
        .map(|(i, event)| StreamFrame {
            index: first_index + i,
            event,
        })
        .collect();
    (frames, next)
}

/// Infinite stream of SSE events tailing one log at a fixed cadence.
///
/// Emission order equals file order; each frame is serialized whole before
/// it is handed to the transport.
fn tail_stream(
    tracker: TailTracker,
    start_offset: usize,
    cadence: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    let mut interval = tokio::time::interval(cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let cursor = TailCursor::from_offset(start_offset);

    stream::unfold(
        (tracker, cursor, interval),
        |(tracker, cursor, mut interval)| async move {
            interval.tick().await;
            let (frames, next) = poll_frames(&tracker, cursor).await;
            let events: Vec<Result<Event, Infallible>> = frames
                .iter()
                .filter_map(|frame| match serde_json::to_string(frame) {
                    Ok(json) => Some(Ok(Event::default().data(json))),
                    Err(e) => {
                        tracing::warn!("Failed to serialize stream frame: {}", e);
                        None
                    }
                })
                .collect();
            Some((stream::iter(events), (tracker, next, interval)))
        },
    )
    .flatten()
}

/// Build the SSE response for one subscriber.
///
/// The keepalive comment rides the same cadence as the poll loop, so an
/// idle connection still sees traffic every interval.
pub fn tail_sse(
    tracker: TailTracker,
    start_offset: usize,
    cadence: Duration,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    Sse::new(tail_stream(tracker, start_offset, cadence))
        .keep_alive(KeepAlive::new().interval(cadence).text("keepalive"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use runboard_core::{LogDirConfig, LogStore};
    use serde_json::json;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn tracker_for(dir: &TempDir) -> (TailTracker, PathBuf) {
        let store = LogStore::new(LogDirConfig::new(dir.path()));
        let handle = store.current_log();
        let path = handle.path().to_path_buf();
        (TailTracker::new(store, handle), path)
    }

    #[test]
    fn frame_serializes_index_and_event() {
        let frame = StreamFrame {
            index: 3,
            event: json!({"a": 1}),
        };
        assert_eq!(
            serde_json::to_string(&frame).unwrap(),
            r#"{"index":3,"event":{"a":1}}"#
        );
    }

    #[tokio::test]
    async fn session_delivers_backlog_then_appended_records() {
        let dir = TempDir::new().unwrap();
        let (tracker, path) = tracker_for(&dir);
        std::fs::write(&path, "{\"a\":1}\n\n{\"a\":2}\n").unwrap();

        let (frames, cursor) = poll_frames(&tracker, TailCursor::from_offset(0)).await;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].index, 0);
        assert_eq!(frames[0].event, json!({"a": 1}));
        assert_eq!(frames[1].index, 1);
        assert_eq!(frames[1].event, json!({"a": 2}));

        // Nothing new while the file is unchanged.
        let (frames, cursor) = poll_frames(&tracker, cursor).await;
        assert!(frames.is_empty());

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        writeln!(file, "{{\"a\":3}}").unwrap();

        let (frames, _) = poll_frames(&tracker, cursor).await;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].index, 2);
        assert_eq!(frames[0].event, json!({"a": 3}));
    }

    #[tokio::test]
    async fn session_resuming_mid_log_frames_absolute_indices() {
        let dir = TempDir::new().unwrap();
        let (tracker, path) = tracker_for(&dir);
        std::fs::write(&path, "{\"n\":0}\n{\"n\":1}\n{\"n\":2}\n").unwrap();

        let (frames, _) = poll_frames(&tracker, TailCursor::from_offset(2)).await;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].index, 2);
        assert_eq!(frames[0].event, json!({"n": 2}));
    }

    #[tokio::test]
    async fn session_starting_past_the_end_emits_nothing() {
        let dir = TempDir::new().unwrap();
        let (tracker, path) = tracker_for(&dir);
        std::fs::write(&path, "{\"n\":0}\n").unwrap();

        let (frames, cursor) = poll_frames(&tracker, TailCursor::from_offset(9)).await;
        assert!(frames.is_empty());
        assert_eq!(cursor.offset, 1);
    }
}
