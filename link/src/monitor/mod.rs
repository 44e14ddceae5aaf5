//! `JobMonitor` – polling monitor for dataset ingestion jobs.
//!
//! Owns the only copy of the current [`JobSnapshot`]: a background task
//! polls the [`StatusSource`] on a fixed interval and replaces the snapshot
//! in full on every successful tick (reconciliation is replacement, never
//! merge). User-initiated cancellation is applied optimistically through
//! [`JobMonitor::cancel_job`] and reconciled by the next tick.
//!
//! # Examples
//!
//! ```rust,no_run
//! use trainify_link::TrainifyClient;
//! use trainify_link::monitor::MonitorEvent;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TrainifyClient::builder()
//!     .base_url("http://localhost:4000/api")
//!     .build()?;
//!
//! let mut monitor = client.monitor_jobs(Default::default());
//! while let Some(event) = monitor.next().await {
//!     match event {
//!         MonitorEvent::Snapshot(snapshot) => println!("{} job(s)", snapshot.jobs.len()),
//!         MonitorEvent::Notice(notice) => eprintln!("{}", notice),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod poller;

use crate::error::{Result, TrainifyError};
use crate::events::{EventHandlers, Notice};
use crate::jobs::StatusSource;
use crate::models::{JobSnapshot, JobStatus};
use log::debug;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

pub(crate) const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for a [`JobMonitor`].
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Fixed period between polls. Default: 2000 ms.
    pub poll_interval: Duration,

    /// Restore a job's previous status when its cancel request fails.
    ///
    /// Off by default: the shipped behavior leaves the optimistic
    /// `canceled` in place and lets the next poll reconcile, matching the
    /// monitor's original semantics. Turn on for deterministic restore
    /// from the pending-mutation record.
    pub rollback_on_failure: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(2000),
            rollback_on_failure: false,
        }
    }
}

/// Event published by the monitor's background task.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// A snapshot was applied (poll result or optimistic update).
    Snapshot(JobSnapshot),

    /// A transient notice to surface (tick failure, cancel outcome).
    Notice(Notice),
}

/// The mutation applied optimistically, kept until the request resolves so
/// the previous value can be restored deterministically.
#[derive(Debug, Clone)]
struct PendingCancel {
    job_id: String,
    previous_status: JobStatus,
}

/// Handle to a running job monitor.
///
/// Dropping the handle (or calling [`close`](JobMonitor::close)) stops the
/// background task; a fetch already in flight has its result discarded, so
/// no state update is ever applied after teardown.
pub struct JobMonitor {
    source: Arc<dyn StatusSource>,
    state: Arc<RwLock<JobSnapshot>>,
    event_rx: mpsc::Receiver<MonitorEvent>,
    event_tx: mpsc::Sender<MonitorEvent>,
    /// Signal the background task to stop. `None` once closed.
    close_tx: Option<oneshot::Sender<()>>,
    poll_handle: Option<JoinHandle<()>>,
    handlers: EventHandlers,
    options: MonitorOptions,
    pending_cancel: Mutex<Option<PendingCancel>>,
}

impl JobMonitor {
    /// Start polling `source`. One fetch is issued immediately, then one
    /// every `options.poll_interval`.
    pub fn start(
        source: Arc<dyn StatusSource>,
        options: MonitorOptions,
        handlers: EventHandlers,
    ) -> Self {
        let state = Arc::new(RwLock::new(JobSnapshot::default()));
        let (event_tx, event_rx) = mpsc::channel(DEFAULT_EVENT_CHANNEL_CAPACITY);
        let (close_tx, close_rx) = oneshot::channel();

        let poll_handle = tokio::spawn(poller::poll_loop(
            Arc::clone(&source),
            Arc::clone(&state),
            event_tx.clone(),
            close_rx,
            options.poll_interval,
            handlers.clone(),
        ));

        Self {
            source,
            state,
            event_rx,
            event_tx,
            close_tx: Some(close_tx),
            poll_handle: Some(poll_handle),
            handlers,
            options,
            pending_cancel: Mutex::new(None),
        }
    }

    /// Receive the next event. Returns `None` after [`close`](Self::close).
    pub async fn next(&mut self) -> Option<MonitorEvent> {
        self.event_rx.recv().await
    }

    /// The current snapshot (an owned copy; the monitor keeps the original).
    pub fn snapshot(&self) -> JobSnapshot {
        self.read_state().clone()
    }

    /// Request cancellation of `job_id`.
    ///
    /// The caller is expected to have confirmed the action already (the
    /// confirmation dialog is a UI concern). The local status flips to
    /// `canceled` immediately, before the request is sent; the next poll
    /// tick overwrites it with server truth either way.
    pub async fn cancel_job(&self, job_id: &str) -> Result<()> {
        // Optimistic flip, recorded so failure handling can restore it.
        let (previous_status, dataset_name) = {
            let mut guard = self.write_state();
            let job = guard
                .jobs
                .iter_mut()
                .find(|j| j.id == job_id)
                .ok_or_else(|| {
                    TrainifyError::Configuration(format!(
                        "Job {} is not in the current snapshot",
                        job_id
                    ))
                })?;
            let previous = job.status;
            job.status = JobStatus::Canceled;
            (previous, job.dataset_name.clone())
        };

        {
            let mut pending = self.lock_pending();
            *pending = Some(PendingCancel {
                job_id: job_id.to_string(),
                previous_status,
            });
        }

        // Publish the optimistic state before the network round-trip.
        self.publish_snapshot();
        debug!(
            "[MONITOR] Optimistic cancel applied: job_id={} previous={}",
            job_id, previous_status
        );

        let result = self.source.cancel(job_id).await;

        match &result {
            Ok(()) => {
                let notice = Notice::success(format!(
                    "Job \"{}\" has been canceled successfully",
                    dataset_name
                ));
                self.publish_notice(notice);
            }
            Err(err) => {
                if self.options.rollback_on_failure {
                    // Restore deterministically from the pending record.
                    if let Some(pending) = self.lock_pending().take() {
                        let restored = {
                            let mut guard = self.write_state();
                            if let Some(job) =
                                guard.jobs.iter_mut().find(|j| j.id == pending.job_id)
                            {
                                job.status = pending.previous_status;
                                true
                            } else {
                                false
                            }
                        };
                        if restored {
                            debug!(
                                "[MONITOR] Rolled back cancel: job_id={} restored={}",
                                pending.job_id, pending.previous_status
                            );
                            self.publish_snapshot();
                        }
                    }
                }
                let notice = Notice::error(err.user_message("Failed to cancel job"));
                self.publish_notice(notice);
            }
        }

        // Pending state is cleared on success and failure alike.
        *self.lock_pending() = None;

        result
    }

    /// `true` while a cancel request is awaiting its response.
    pub fn has_pending_cancel(&self) -> bool {
        self.lock_pending().is_some()
    }

    /// Stop the background task deterministically.
    ///
    /// After this returns no further events are delivered and no state
    /// update is applied, even if a fetch was in flight.
    pub async fn close(&mut self) {
        if let Some(close_tx) = self.close_tx.take() {
            let _ = close_tx.send(());
        }
        // Closing the receiver unblocks the task if it is parked on a full
        // event channel; already-buffered events can still be drained.
        self.event_rx.close();
        if let Some(handle) = self.poll_handle.take() {
            let _ = handle.await;
        }
        debug!("[MONITOR] Closed");
    }

    // try_send rather than send: cancel_job runs on the caller's task, and
    // the caller is also the channel's consumer. The snapshot is readable
    // via snapshot() regardless of whether the event fit in the channel.
    fn publish_snapshot(&self) {
        let snapshot = self.snapshot();
        self.handlers.emit_snapshot(&snapshot);
        if self.event_tx.try_send(MonitorEvent::Snapshot(snapshot)).is_err() {
            debug!("[MONITOR] Event channel full, snapshot event dropped");
        }
    }

    fn publish_notice(&self, notice: Notice) {
        self.handlers.emit_notice(&notice);
        if self.event_tx.try_send(MonitorEvent::Notice(notice)).is_err() {
            debug!("[MONITOR] Event channel full, notice dropped");
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, JobSnapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, JobSnapshot> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<PendingCancel>> {
        self.pending_cancel.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for JobMonitor {
    fn drop(&mut self) {
        if let Some(close_tx) = self.close_tx.take() {
            let _ = close_tx.send(());
        }
    }
}
