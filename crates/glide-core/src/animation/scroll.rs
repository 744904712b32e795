#![forbid(unsafe_code)]

//! Constant-velocity interpolation of a single scroll axis.
//!
//! A [`ScrollCalculation`] turns a requested signed distance into a series of
//! per-frame deltas spread evenly over a configured duration. The caller
//! applies each delta to the real viewport; the model never touches a
//! surface.
//!
//! # Invariants
//!
//! 1. When idle, every numeric field is zero and no stopwatch runs.
//! 2. While running, `speed == total_distance / max(duration_ms, 1)`.
//! 3. The deltas returned between a cold start and the return to idle sum to
//!    the sum of the distances requested in that run (same-direction
//!    requests are merged, see [`ScrollCalculation::scroll`]).
//!
//! # Failure Modes
//!
//! - Zero duration: the speed uses a 1ms floor and the first poll delivers
//!   the whole distance, so there is never a division by zero.
//! - Polling while idle returns `0.0`.

use web_time::{Duration, Instant};

use super::{Motion, Stopwatch, duration_ms};

/// Interpolation state for one scroll axis.
#[derive(Debug, Clone, Default)]
pub struct ScrollCalculation {
    stopwatch: Option<Stopwatch>,
    duration: Duration,
    total_distance: f64,
    scrolled_distance: f64,
    speed: f64,
    last_sample_ms: u64,
}

impl ScrollCalculation {
    /// Create an idle model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.stopwatch.is_some()
    }

    /// Total distance of the current run (after merging).
    #[inline]
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Distance delivered so far in the current run.
    #[inline]
    #[must_use]
    pub fn scrolled_distance(&self) -> f64 {
        self.scrolled_distance
    }

    /// Distance still to be delivered.
    #[inline]
    #[must_use]
    pub fn remaining_distance(&self) -> f64 {
        self.total_distance - self.scrolled_distance
    }

    /// Signed speed in distance per millisecond.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Duration captured when the current run started.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start or extend an animation covering `distance` over `duration`.
    ///
    /// If a run is in flight and `distance` points the same way, the
    /// undelivered remainder is carried into the new run so consecutive
    /// wheel notches blend into one motion. A request in the opposite
    /// direction discards the remainder and starts over from `distance`.
    pub fn scroll(&mut self, distance: f64, duration: Duration, now: Instant) {
        if self.is_scrolling() && sign(self.speed) == sign(distance) {
            self.total_distance = distance + self.total_distance - self.scrolled_distance;
        } else {
            self.total_distance = distance;
        }

        self.scrolled_distance = 0.0;
        self.last_sample_ms = 0;
        self.duration = duration;
        self.speed = self.total_distance / duration_ms(duration).max(1) as f64;
        self.stopwatch = Some(Stopwatch::start(now));
    }

    /// Delta to apply for the time elapsed since the previous poll.
    ///
    /// Once the configured duration has elapsed, returns the exact remainder
    /// and goes idle.
    pub fn calculate_distance(&mut self, now: Instant) -> f64 {
        let Some(stopwatch) = self.stopwatch else {
            return 0.0;
        };

        let elapsed = stopwatch.elapsed_ms(now);
        if elapsed >= duration_ms(self.duration) {
            let distance = self.remaining_distance();
            self.reset();
            return distance;
        }

        // A poll earlier than the previous one contributes nothing.
        let step = elapsed.saturating_sub(self.last_sample_ms);
        let distance = self.speed * step as f64;
        self.last_sample_ms = self.last_sample_ms.max(elapsed);
        self.scrolled_distance += distance;
        distance
    }
}

impl Motion for ScrollCalculation {
    fn is_running(&self) -> bool {
        self.is_scrolling()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Three-way sign where zero is its own direction.
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
