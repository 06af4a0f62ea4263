//! Time calculation utilities for scroll animations
//!
//! Pure functions for animation progress and interpolation, plus the
//! recurring timer that paces the step loop.

use std::time::Duration;

/// Animation duration for a scroll distance: half a millisecond per unit,
/// capped at `max_duration_ms`
#[inline]
pub fn animation_duration(distance: f64, max_duration_ms: f64) -> f64 {
    (distance.abs() / 2.0).min(max_duration_ms)
}

/// Animation progress (0.0 to 1.0) from elapsed time and duration
///
/// A zero duration counts as already complete.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Convert a millisecond count to a `Duration`, treating negatives as zero
#[inline]
pub fn ms_to_duration(ms: f64) -> Duration {
    Duration::from_nanos((ms.max(0.0) * 1_000_000.0).round() as u64)
}

/// Recurring timer: remembers when the next step is due
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl Ticker {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Schedule the next step one interval after `now_ms`
    pub fn arm(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.interval_ms);
    }

    pub fn disarm(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        self.next_due_ms.is_some_and(|due| now_ms >= due)
    }

    /// Milliseconds until the next step, or None when nothing is scheduled
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.next_due_ms.map(|due| (due - now_ms).max(0.0))
    }
}
