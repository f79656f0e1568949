//! Cancellation and progress reporting for long-running operations.
//!
//! A [`RunControl`] travels with one invocation of an expensive routine.
//! Workers poll its [`CancellationToken`] every [`CANCEL_CHECK_INTERVAL`]
//! iterations and advance a [`ProgressTracker`] as units of work finish.
//! The tracker only ever forwards increasing fractions to the callback, even
//! when several worker threads finish out of order.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{CyaneaError, Result};

/// Number of inner iterations between two cancellation polls.
pub const CANCEL_CHECK_INTERVAL: usize = 64;

/// A cloneable, thread-safe cancellation flag.
///
/// Clones share the same flag: cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the "not cancelled" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

type ProgressFn = dyn Fn(f64) + Send + Sync;

/// Cancellation signal and progress callback for one operation.
#[derive(Clone, Default)]
pub struct RunControl {
    token: Option<CancellationToken>,
    progress: Option<Arc<ProgressFn>>,
}

impl RunControl {
    /// No cancellation, no progress reporting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Attach a progress callback receiving fractions in `[0.0, 1.0]`.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Whether the attached token (if any) has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(|t| t.is_cancelled())
    }

    /// Return [`CyaneaError::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CyaneaError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Start tracking progress over `total` units of work.
    pub fn tracker(&self, total: usize) -> ProgressTracker<'_> {
        ProgressTracker {
            control: self,
            total,
            done: AtomicUsize::new(0),
            last_reported: Mutex::new(0.0),
        }
    }
}

impl fmt::Debug for RunControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunControl")
            .field("token", &self.token)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Counts finished units of work and reports a monotone fraction.
pub struct ProgressTracker<'a> {
    control: &'a RunControl,
    total: usize,
    done: AtomicUsize,
    last_reported: Mutex<f64>,
}

impl ProgressTracker<'_> {
    /// Record `units` finished units of work.
    pub fn advance(&self, units: usize) {
        let done = self.done.fetch_add(units, Ordering::Relaxed) + units;
        if self.total > 0 {
            self.report((done as f64 / self.total as f64).min(1.0));
        }
    }

    /// Report completion (1.0).
    pub fn finish(&self) {
        self.report(1.0);
    }

    /// Number of units recorded so far.
    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    fn report(&self, fraction: f64) {
        let Some(callback) = self.control.progress.as_ref() else {
            return;
        };
        // A poisoned lock only means another worker panicked mid-report.
        let mut last = match self.last_reported.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if fraction > *last {
            *last = fraction;
            callback(fraction);
        }
    }
}
