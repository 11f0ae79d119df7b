//! Log handlers - snapshots, archived listings, and the tail stream.

use std::convert::Infallible;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;
use runboard_core::{LogMetadata, Record, TailTracker};
use serde::Deserialize;

use crate::error::HttpError;
use crate::sse;
use crate::state::AppState;

/// Full snapshot of the current log.
pub async fn snapshot(State(state): State<AppState>) -> Json<Vec<Record>> {
    let current = state.store.current_log();
    Json(state.store.read_all(&current).await)
}

/// List archived logs, newest first.
pub async fn list(State(state): State<AppState>) -> Json<Vec<LogMetadata>> {
    Json(state.store.list_archived().await)
}

/// Full snapshot of one archived log.
///
/// 404 if the name fails validation or does not resolve to an existing
/// archived log file.
pub async fn archived(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Record>>, HttpError> {
    let handle = state.store.resolve_archived(&name)?;
    Ok(Json(state.store.read_all(&handle).await))
}

/// Query parameters for the tail stream.
#[derive(Debug, Deserialize)]
pub struct StreamParams {
    /// Count of records the client has already seen; defaults to 0.
    pub offset: Option<usize>,
}

/// Tail the current log via SSE.
///
/// Starts a per-subscriber polling session at the configured cadence. The
/// connection stays open until the client disconnects.
pub async fn stream(
    State(state): State<AppState>,
    Query(params): Query<StreamParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    let tracker = TailTracker::new(state.store.clone(), state.store.current_log());
    sse::tail_sse(tracker, params.offset.unwrap_or(0), state.poll_interval)
}
