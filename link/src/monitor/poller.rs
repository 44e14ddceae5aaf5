//! Background poll loop for the job monitor.

use crate::events::{EventHandlers, Notice};
use crate::jobs::StatusSource;
use crate::models::JobSnapshot;
use crate::monitor::MonitorEvent;
use log::{debug, warn};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// Fallback message when a tick fails without an upstream message.
const FETCH_FALLBACK: &str = "Failed to load jobs";

/// Poll `source` until `close_rx` fires or the event channel is dropped.
///
/// Guarantees, in order of importance:
/// - **one immediate fetch**, then one per `poll_interval`;
/// - **at most one fetch in flight**: ticks that come due mid-fetch are
///   skipped, never queued (`MissedTickBehavior::Skip`);
/// - the shared snapshot is **fully replaced before** the event is
///   published, so observers never read a partial update;
/// - a failed tick emits an error notice and the loop keeps going; the
///   next tick is the retry (no backoff within a tick);
/// - once `close_rx` fires, nothing further is applied; an in-flight
///   fetch is abandoned and its result discarded.
pub(crate) async fn poll_loop(
    source: Arc<dyn StatusSource>,
    state: Arc<RwLock<JobSnapshot>>,
    event_tx: mpsc::Sender<MonitorEvent>,
    mut close_rx: oneshot::Receiver<()>,
    poll_interval: Duration,
    handlers: EventHandlers,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!("[MONITOR] Poll loop started (interval={:?})", poll_interval);

    // Both selects are biased so the close signal always wins a race with
    // a due tick or a resolved fetch.
    'poll: loop {
        tokio::select! {
            biased;
            _ = &mut close_rx => {
                debug!("[MONITOR] Close signal received");
                break 'poll;
            }
            _ = ticker.tick() => {
                // Race the fetch against close so teardown mid-fetch
                // discards the result instead of applying it.
                let result = tokio::select! {
                    biased;
                    _ = &mut close_rx => {
                        debug!("[MONITOR] Closed mid-fetch, result discarded");
                        break 'poll;
                    }
                    result = source.fetch() => result,
                };

                match result {
                    Ok(snapshot) => {
                        {
                            let mut guard = state.write().unwrap_or_else(|e| e.into_inner());
                            *guard = snapshot.clone();
                        }
                        handlers.emit_snapshot(&snapshot);
                        if event_tx.send(MonitorEvent::Snapshot(snapshot)).await.is_err() {
                            debug!("[MONITOR] Event receiver dropped, stopping");
                            break 'poll;
                        }
                    }
                    Err(err) => {
                        warn!("[MONITOR] Tick failed: {}", err);
                        let notice = Notice::error(err.user_message(FETCH_FALLBACK));
                        handlers.emit_notice(&notice);
                        if event_tx.send(MonitorEvent::Notice(notice)).await.is_err() {
                            debug!("[MONITOR] Event receiver dropped, stopping");
                            break 'poll;
                        }
                    }
                }
            }
        }
    }

    debug!("[MONITOR] Poll loop stopped");
}
