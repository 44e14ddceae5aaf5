//! Monitor lifecycle callbacks and transient notices.
//!
//! Every fetch or mutation outcome that a user should see is reduced to a
//! [`Notice`]: one display string, a severity, and how long the consumer
//! should keep it on screen before auto-expiry. Consumers can observe the
//! monitor either through its event channel or by registering callbacks
//! here; both receive the same payloads.
//!
//! # Example
//!
//! ```rust
//! use trainify_link::events::EventHandlers;
//!
//! let handlers = EventHandlers::new()
//!     .on_snapshot(|snapshot| {
//!         println!("{} job(s)", snapshot.jobs.len());
//!     })
//!     .on_notice(|notice| {
//!         eprintln!("[{}] {}", notice.severity, notice.message);
//!     });
//! # let _ = handlers;
//! ```

use crate::models::JobSnapshot;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// How long a success notice stays on screen.
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_millis(4000);

/// How long an error notice stays on screen.
pub const ERROR_NOTICE_DURATION: Duration = Duration::from_millis(6000);

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A transient, auto-expiring notification.
///
/// Notices are plain values: the monitor emits them and forgets them; the
/// consumer decides how to render them and drops each one after
/// [`Notice::duration`]. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Human-readable message (upstream error text when available).
    pub message: String,
    pub severity: Severity,
    /// Display lifetime before the notice should expire.
    pub duration: Duration,
}

impl Notice {
    /// A success notice with the default display duration.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
            duration: SUCCESS_NOTICE_DURATION,
        }
    }

    /// An error notice with the default display duration.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            duration: ERROR_NOTICE_DURATION,
        }
    }

    /// `true` for error notices.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Type alias for the on_snapshot callback.
pub type OnSnapshotCallback = Arc<dyn Fn(&JobSnapshot) + Send + Sync>;

/// Type alias for the on_notice callback.
pub type OnNoticeCallback = Arc<dyn Fn(&Notice) + Send + Sync>;

/// Optional observer callbacks for a job monitor.
///
/// All handlers are optional; register only what you need. Handlers are
/// `Send + Sync` so they can fire from the monitor's background task.
#[derive(Clone, Default)]
pub struct EventHandlers {
    pub(crate) on_snapshot: Option<OnSnapshotCallback>,
    pub(crate) on_notice: Option<OnNoticeCallback>,
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("on_snapshot", &self.on_snapshot.is_some())
            .field("on_notice", &self.on_notice.is_some())
            .finish()
    }
}

impl EventHandlers {
    /// Create an empty handler set (no callbacks registered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked with every applied snapshot.
    pub fn on_snapshot(mut self, f: impl Fn(&JobSnapshot) + Send + Sync + 'static) -> Self {
        self.on_snapshot = Some(Arc::new(f));
        self
    }

    /// Register a callback invoked with every emitted notice.
    pub fn on_notice(mut self, f: impl Fn(&Notice) + Send + Sync + 'static) -> Self {
        self.on_notice = Some(Arc::new(f));
        self
    }

    /// Returns `true` if any handler is registered.
    pub fn has_any(&self) -> bool {
        self.on_snapshot.is_some() || self.on_notice.is_some()
    }

    pub(crate) fn emit_snapshot(&self, snapshot: &JobSnapshot) {
        if let Some(cb) = &self.on_snapshot {
            cb(snapshot);
        }
    }

    pub(crate) fn emit_notice(&self, notice: &Notice) {
        if let Some(cb) = &self.on_notice {
            cb(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn notice_constructors_pick_durations() {
        let ok = Notice::success("saved");
        assert_eq!(ok.duration, SUCCESS_NOTICE_DURATION);
        assert!(!ok.is_error());

        let bad = Notice::error("boom");
        assert_eq!(bad.duration, ERROR_NOTICE_DURATION);
        assert!(bad.is_error());
    }

    #[test]
    fn handlers_dispatch_when_registered() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let handlers = EventHandlers::new().on_notice(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(handlers.has_any());
        handlers.emit_notice(&Notice::error("x"));
        handlers.emit_notice(&Notice::success("y"));
        assert_eq!(count.load(Ordering::SeqCst), 2);

        // No snapshot handler registered: emit is a no-op.
        handlers.emit_snapshot(&JobSnapshot::default());
    }
}
