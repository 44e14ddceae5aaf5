//! Integration tests for the job monitor.
//!
//! All tests run against an in-memory `StatusSource` under tokio's paused
//! clock, so polling cadence is deterministic and no server is needed.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trainify_link::models::{Job, JobSnapshot, JobStatus, ProcessingFile};
use trainify_link::monitor::{JobMonitor, MonitorEvent, MonitorOptions};
use trainify_link::{EventHandlers, StatusSource, TrainifyError};

/// Scriptable in-memory status source.
struct FakeSource {
    snapshot: Mutex<JobSnapshot>,
    /// Number of upcoming fetches that should fail.
    fail_fetches: AtomicUsize,
    /// When set, cancel requests fail with a server error.
    fail_cancel: AtomicBool,
    fetch_count: AtomicUsize,
    cancel_count: AtomicUsize,
}

impl FakeSource {
    fn new(snapshot: JobSnapshot) -> Arc<Self> {
        Arc::new(Self {
            snapshot: Mutex::new(snapshot),
            fail_fetches: AtomicUsize::new(0),
            fail_cancel: AtomicBool::new(false),
            fetch_count: AtomicUsize::new(0),
            cancel_count: AtomicUsize::new(0),
        })
    }

    fn set_snapshot(&self, snapshot: JobSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    fn set_status(&self, job_id: &str, status: JobStatus) {
        let mut guard = self.snapshot.lock().unwrap();
        for job in &mut guard.jobs {
            if job.id == job_id {
                job.status = status;
            }
        }
        for file in &mut guard.processing_files {
            if file.job_id == job_id {
                file.status = status;
            }
        }
    }

    fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusSource for FakeSource {
    async fn fetch(&self) -> trainify_link::Result<JobSnapshot> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if self
            .fail_fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(TrainifyError::Server {
                status: 500,
                message: "status backend unavailable".into(),
            });
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn cancel(&self, _job_id: &str) -> trainify_link::Result<()> {
        self.cancel_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_cancel.load(Ordering::SeqCst) {
            return Err(TrainifyError::Server {
                status: 409,
                message: "job can no longer be canceled".into(),
            });
        }
        Ok(())
    }
}

fn job(id: &str, status: JobStatus) -> Job {
    Job {
        id: id.into(),
        owner: "u1".into(),
        dataset_name: format!("dataset-{}", id),
        status,
        created_at: "2026-05-01T10:00:00Z".into(),
        finished_at: None,
        error: None,
    }
}

fn file(id: &str, job_id: &str, status: JobStatus) -> ProcessingFile {
    ProcessingFile {
        id: id.into(),
        job_id: job_id.into(),
        file_name: format!("{}.pdf", id),
        status,
        created_at: "2026-05-01T10:00:00Z".into(),
        finished_at: None,
        error: None,
    }
}

fn snapshot(jobs: Vec<Job>, files: Vec<ProcessingFile>) -> JobSnapshot {
    JobSnapshot {
        jobs,
        processing_files: files,
    }
}

fn options() -> MonitorOptions {
    MonitorOptions {
        poll_interval: Duration::from_millis(2000),
        rollback_on_failure: false,
    }
}

async fn next_snapshot(monitor: &mut JobMonitor) -> JobSnapshot {
    loop {
        match monitor.next().await.expect("monitor closed unexpectedly") {
            MonitorEvent::Snapshot(s) => return s,
            MonitorEvent::Notice(_) => continue,
        }
    }
}

// =============================================================================
// Polling
// =============================================================================

#[tokio::test(start_paused = true)]
async fn first_fetch_is_immediate() {
    let source = FakeSource::new(snapshot(vec![job("j1", JobStatus::Pending)], vec![]));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());

    let seen = next_snapshot(&mut monitor).await;
    assert_eq!(seen.jobs.len(), 1);
    assert_eq!(source.fetches(), 1);

    monitor.close().await;
}

#[tokio::test(start_paused = true)]
async fn failed_tick_reports_error_then_next_tick_recovers() {
    let source = FakeSource::new(snapshot(vec![job("j1", JobStatus::Processing)], vec![]));
    source.fail_fetches.store(1, Ordering::SeqCst);

    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());

    // T1: the failure surfaces as an error notice carrying upstream text.
    match monitor.next().await.unwrap() {
        MonitorEvent::Notice(notice) => {
            assert!(notice.is_error());
            assert_eq!(notice.message, "status backend unavailable");
            assert_eq!(notice.duration, Duration::from_millis(6000));
        }
        other => panic!("expected error notice, got {:?}", other),
    }

    // T2: the next scheduled tick is the retry and succeeds.
    let seen = next_snapshot(&mut monitor).await;
    assert_eq!(seen.jobs[0].status, JobStatus::Processing);
    assert_eq!(source.fetches(), 2);

    monitor.close().await;
}

#[tokio::test(start_paused = true)]
async fn each_snapshot_fully_replaces_the_last() {
    let source = FakeSource::new(snapshot(
        vec![job("old", JobStatus::Completed), job("new", JobStatus::Pending)],
        vec![],
    ));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());
    let first = next_snapshot(&mut monitor).await;
    assert_eq!(first.jobs.len(), 2);

    // The server forgets "old": so does the next snapshot. No merging.
    source.set_snapshot(snapshot(vec![job("new", JobStatus::Processing)], vec![]));
    let second = next_snapshot(&mut monitor).await;
    assert_eq!(second.jobs.len(), 1);
    assert_eq!(second.jobs[0].id, "new");
    assert!(monitor.snapshot().job("old").is_none());

    monitor.close().await;
}

// =============================================================================
// Teardown
// =============================================================================

#[tokio::test(start_paused = true)]
async fn no_updates_after_close() {
    let source = FakeSource::new(snapshot(vec![job("j1", JobStatus::Processing)], vec![]));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());

    let _ = next_snapshot(&mut monitor).await;
    let fetches_before = source.fetches();

    // Close while the next tick is still pending, then let its deadline
    // pass. Nothing may fire.
    monitor.close().await;
    tokio::time::advance(Duration::from_millis(5000)).await;
    tokio::task::yield_now().await;

    assert_eq!(source.fetches(), fetches_before);
    assert!(monitor.next().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn drop_stops_polling() {
    let source = FakeSource::new(snapshot(vec![], vec![]));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());
    let _ = next_snapshot(&mut monitor).await;
    let fetches_before = source.fetches();

    drop(monitor);
    tokio::time::advance(Duration::from_millis(10_000)).await;
    tokio::task::yield_now().await;

    assert_eq!(source.fetches(), fetches_before);
}

// =============================================================================
// Optimistic cancel
// =============================================================================

#[tokio::test(start_paused = true)]
async fn cancel_is_applied_before_the_response() {
    let source = FakeSource::new(snapshot(vec![job("j1", JobStatus::Processing)], vec![]));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());
    let _ = next_snapshot(&mut monitor).await;

    monitor.cancel_job("j1").await.unwrap();

    // The optimistic snapshot event precedes the outcome notice: the local
    // flip happened before the request resolved.
    match monitor.next().await.unwrap() {
        MonitorEvent::Snapshot(s) => assert_eq!(s.jobs[0].status, JobStatus::Canceled),
        other => panic!("expected optimistic snapshot first, got {:?}", other),
    }
    match monitor.next().await.unwrap() {
        MonitorEvent::Notice(notice) => {
            assert!(!notice.is_error());
            assert_eq!(
                notice.message,
                "Job \"dataset-j1\" has been canceled successfully"
            );
        }
        other => panic!("expected success notice, got {:?}", other),
    }
    assert!(!monitor.has_pending_cancel());

    monitor.close().await;
}

#[tokio::test(start_paused = true)]
async fn failed_cancel_keeps_optimistic_state_until_reconciliation() {
    let source = FakeSource::new(snapshot(vec![job("j1", JobStatus::Processing)], vec![]));
    source.fail_cancel.store(true, Ordering::SeqCst);

    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());
    let _ = next_snapshot(&mut monitor).await;

    let result = monitor.cancel_job("j1").await;
    assert!(result.is_err());

    // Observed design: no rollback. The optimistic value stays...
    assert_eq!(monitor.snapshot().jobs[0].status, JobStatus::Canceled);

    // ...and the failure surfaced as an error notice.
    let mut saw_error = false;
    for _ in 0..2 {
        if let Some(MonitorEvent::Notice(notice)) = monitor.next().await {
            assert!(notice.is_error());
            assert_eq!(notice.message, "job can no longer be canceled");
            saw_error = true;
            break;
        }
    }
    assert!(saw_error);

    // The next tick reconciles with server truth (still processing).
    let reconciled = next_snapshot(&mut monitor).await;
    assert_eq!(reconciled.jobs[0].status, JobStatus::Processing);

    monitor.close().await;
}

#[tokio::test(start_paused = true)]
async fn rollback_option_restores_previous_status() {
    let source = FakeSource::new(snapshot(vec![job("j1", JobStatus::Pending)], vec![]));
    source.fail_cancel.store(true, Ordering::SeqCst);

    let opts = MonitorOptions {
        rollback_on_failure: true,
        ..options()
    };
    let mut monitor = JobMonitor::start(source.clone(), opts, EventHandlers::new());
    let _ = next_snapshot(&mut monitor).await;

    let _ = monitor.cancel_job("j1").await;
    assert_eq!(monitor.snapshot().jobs[0].status, JobStatus::Pending);

    monitor.close().await;
}

#[tokio::test(start_paused = true)]
async fn cancel_unknown_job_is_rejected_without_request() {
    let source = FakeSource::new(snapshot(vec![], vec![]));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());
    let _ = next_snapshot(&mut monitor).await;

    assert!(monitor.cancel_job("ghost").await.is_err());
    assert_eq!(source.cancel_count.load(Ordering::SeqCst), 0);

    monitor.close().await;
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test(start_paused = true)]
async fn job_and_file_progress_to_completed_within_one_interval() {
    let source = FakeSource::new(snapshot(
        vec![job("j1", JobStatus::Processing)],
        vec![file("f1", "j1", JobStatus::Processing)],
    ));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());

    let first = next_snapshot(&mut monitor).await;
    assert_eq!(first.jobs[0].status, JobStatus::Processing);
    assert_eq!(first.files_for("j1").len(), 1);
    assert_eq!(first.files_for("j1")[0].status, JobStatus::Processing);

    source.set_status("j1", JobStatus::Completed);

    let second = next_snapshot(&mut monitor).await;
    assert_eq!(second.jobs[0].status, JobStatus::Completed);
    assert_eq!(second.files_for("j1")[0].status, JobStatus::Completed);

    monitor.close().await;
}

#[tokio::test(start_paused = true)]
async fn orphaned_files_show_zero_files_for_missing_job() {
    let source = FakeSource::new(snapshot(
        vec![job("j1", JobStatus::Processing)],
        vec![file("f1", "gone", JobStatus::Processing)],
    ));
    let mut monitor = JobMonitor::start(source.clone(), options(), EventHandlers::new());

    let seen = next_snapshot(&mut monitor).await;
    // The invariant is not enforced client-side: the job simply has no
    // files and the orphan is silently unreachable through it.
    assert!(seen.files_for("j1").is_empty());
    assert!(seen.job("gone").is_none());

    monitor.close().await;
}

// =============================================================================
// Handlers
// =============================================================================

#[tokio::test(start_paused = true)]
async fn registered_handlers_mirror_channel_events() {
    let snapshots = Arc::new(AtomicUsize::new(0));
    let notices = Arc::new(AtomicUsize::new(0));

    let handlers = {
        let snapshots = Arc::clone(&snapshots);
        let notices = Arc::clone(&notices);
        EventHandlers::new()
            .on_snapshot(move |_| {
                snapshots.fetch_add(1, Ordering::SeqCst);
            })
            .on_notice(move |_| {
                notices.fetch_add(1, Ordering::SeqCst);
            })
    };

    let source = FakeSource::new(snapshot(vec![job("j1", JobStatus::Pending)], vec![]));
    source.fail_fetches.store(1, Ordering::SeqCst);

    let mut monitor = JobMonitor::start(source.clone(), options(), handlers);

    // First tick fails, second succeeds.
    let _ = monitor.next().await.unwrap();
    let _ = next_snapshot(&mut monitor).await;

    assert_eq!(notices.load(Ordering::SeqCst), 1);
    assert_eq!(snapshots.load(Ordering::SeqCst), 1);

    monitor.close().await;
}
