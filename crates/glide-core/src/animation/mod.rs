#![forbid(unsafe_code)]

//! Time-sampled motion models.
//!
//! Both models are polled, never scheduled: the caller passes the current
//! [`Instant`] on every call and the model reports how far the animation has
//! progressed since the previous sample. This keeps them deterministic under
//! test and independent of the host's frame rate.
//!
//! Elapsed time is measured in whole milliseconds.

pub mod scroll;
pub mod zoom;

use web_time::{Duration, Instant};

pub use scroll::ScrollCalculation;
pub use zoom::{FIXED_ZOOM_LEVELS, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL, ZoomCalculation};

/// Common surface of the motion models.
pub trait Motion {
    /// Whether an animation is in flight.
    fn is_running(&self) -> bool;

    /// Drop any in-flight animation and return to the idle state.
    fn reset(&mut self);
}

/// Monotonic start marker for a running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub(crate) fn start(now: Instant) -> Self {
        Self { started: now }
    }

    /// Whole milliseconds since start. Clocks that run backwards read as zero.
    pub(crate) fn elapsed_ms(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started);
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Duration in whole milliseconds, saturating.
pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
