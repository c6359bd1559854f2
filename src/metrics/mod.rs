//! In-process usage metrics
//!
//! Startup time, session length and request error rate. The tracker is a
//! plain object shared through `Arc`; callers that need to record events are
//! handed a reference to it.

mod clock;
mod tracker;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use tracker::{MetricsSnapshot, MetricsTracker};
