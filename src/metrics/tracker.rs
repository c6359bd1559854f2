//! Atomic metrics accumulator

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::clock::{Clock, MonotonicClock};

/// Marks a timestamp slot that has not been set
const UNSET: u64 = u64::MAX;

/// Point-in-time view of the tracker. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Not measured in-process; always 0
    pub crash_rate: f64,
    /// Time from process start to app start
    pub start_time: f64,
    /// Not measured in-process; always 0
    pub retention: f64,
    /// Accumulated session time, including a session still running
    pub session_length: f64,
    pub error_rate: f64,
    pub total_requests: u64,
    pub error_requests: u64,
}

/// Usage metrics shared across the service
pub struct MetricsTracker<C: Clock = MonotonicClock> {
    clock: C,
    process_start_ms: AtomicU64,
    app_start_ms: AtomicU64,
    session_start_ms: AtomicU64,
    session_accum_ms: AtomicU64,
    total_requests: AtomicU64,
    error_requests: AtomicU64,
}

impl MetricsTracker<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for MetricsTracker<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MetricsTracker<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            process_start_ms: AtomicU64::new(UNSET),
            app_start_ms: AtomicU64::new(UNSET),
            session_start_ms: AtomicU64::new(UNSET),
            session_accum_ms: AtomicU64::new(0),
            total_requests: AtomicU64::new(0),
            error_requests: AtomicU64::new(0),
        }
    }

    /// Record the process start. Only the first call counts.
    pub fn mark_process_start(&self) {
        let now = self.clock.now_ms();
        let _ = self
            .process_start_ms
            .compare_exchange(UNSET, now, Ordering::SeqCst, Ordering::SeqCst);
    }

    /// Record the startup duration. Ignored before `mark_process_start` and after the first call.
    pub fn mark_app_start(&self) {
        let process_start = self.process_start_ms.load(Ordering::SeqCst);
        if process_start == UNSET {
            return;
        }
        let elapsed = self.clock.now_ms().saturating_sub(process_start);
        let _ = self
            .app_start_ms
            .compare_exchange(UNSET, elapsed, Ordering::SeqCst, Ordering::SeqCst);
    }

    /// Start a session unless one is already running
    pub fn on_session_start(&self) {
        let now = self.clock.now_ms();
        let _ = self
            .session_start_ms
            .compare_exchange(UNSET, now, Ordering::SeqCst, Ordering::SeqCst);
    }

    /// Close the running session and fold its length into the total
    pub fn on_session_stop(&self) {
        let start = self.session_start_ms.swap(UNSET, Ordering::SeqCst);
        if start != UNSET {
            let length = self.clock.now_ms().saturating_sub(start);
            self.session_accum_ms.fetch_add(length, Ordering::SeqCst);
        }
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::SeqCst);
        if !success {
            self.error_requests.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let app_start_ms = match self.app_start_ms.load(Ordering::SeqCst) {
            UNSET => 0,
            ms => ms,
        };

        let accumulated = self.session_accum_ms.load(Ordering::SeqCst);
        let session_ms = match self.session_start_ms.load(Ordering::SeqCst) {
            UNSET => accumulated,
            start => accumulated + self.clock.now_ms().saturating_sub(start),
        };

        let total = self.total_requests.load(Ordering::SeqCst);
        let errors = self.error_requests.load(Ordering::SeqCst);
        let error_rate = if total == 0 {
            0.0
        } else {
            errors as f64 / total as f64
        };

        MetricsSnapshot {
            crash_rate: 0.0,
            start_time: app_start_ms as f64 / 1000.0,
            retention: 0.0,
            session_length: session_ms as f64 / 1000.0,
            error_rate,
            total_requests: total,
            error_requests: errors,
        }
    }
}
