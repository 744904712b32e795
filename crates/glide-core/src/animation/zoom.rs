#![forbid(unsafe_code)]

//! Multiplicative interpolation between zoom percentages.
//!
//! Zoom levels are perceived logarithmically, so [`ZoomCalculation`] moves
//! from the initial level to the target by a constant *factor* per
//! millisecond rather than a constant step:
//!
//!   level(t) = initial × velocity^t,  velocity = (target / initial)^(1 / duration)
//!
//! # Invariants
//!
//! 1. The target is always within [`MIN_ZOOM_LEVEL`, `MAX_ZOOM_LEVEL`].
//! 2. A poll at or after the configured duration returns the target exactly
//!    and returns the model to idle.
//! 3. The initial level is re-anchored to the caller's live value on every
//!    [`ZoomCalculation::zoom`] call; external zoom changes are respected.
//!
//! # Failure Modes
//!
//! - Zero duration: the exponent is guarded to `1.0` and the first poll jumps
//!   straight to the target.
//! - Non-positive or non-finite initial level: velocity is `1.0` and the
//!   first poll jumps to the target.
//! - Non-finite base level: treated as [`DEFAULT_ZOOM_LEVEL`] before the
//!   target is computed.
//! - NaN target (a NaN scale, or a zero base times an infinite scale): the
//!   base level is kept as the target. Infinite targets clamp like any other.

use web_time::{Duration, Instant};

use super::{Motion, Stopwatch, duration_ms};

/// Smallest reachable zoom percentage.
pub const MIN_ZOOM_LEVEL: f64 = 20.0;

/// Largest reachable zoom percentage.
pub const MAX_ZOOM_LEVEL: f64 = 400.0;

/// Unscaled zoom percentage.
pub const DEFAULT_ZOOM_LEVEL: f64 = 100.0;

/// Stepped zoom levels, ascending.
pub const FIXED_ZOOM_LEVELS: [f64; 14] = [
    20.0, 25.0, 35.0, 50.0, 75.0, 100.0, 125.0, 150.0, 175.0, 200.0, 250.0, 300.0, 350.0, 400.0,
];

/// Interpolation state for zoom-level changes.
#[derive(Debug, Clone, Default)]
pub struct ZoomCalculation {
    stopwatch: Option<Stopwatch>,
    duration: Duration,
    initial_zoom_level: f64,
    target_zoom_level: f64,
    velocity: f64,
    /// Sign of the scale that started or last extended the run.
    direction: i8,
}

impl ZoomCalculation {
    /// Create an idle model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.stopwatch.is_some()
    }

    /// Level the current run started from.
    #[inline]
    #[must_use]
    pub fn initial_zoom_level(&self) -> f64 {
        self.initial_zoom_level
    }

    /// Level the current run lands on.
    #[inline]
    #[must_use]
    pub fn target_zoom_level(&self) -> f64 {
        self.target_zoom_level
    }

    /// Multiplicative factor applied per elapsed millisecond.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Start or extend a zoom from `current_zoom_level` by `scale`.
    ///
    /// `scale` is a signed fraction (`0.1` = 10% larger). A request in the
    /// same direction as the run in flight compounds on the previous target;
    /// otherwise the target is computed from `current_zoom_level`. With
    /// `use_fixed_levels`, the target snaps to the next entry of
    /// [`FIXED_ZOOM_LEVELS`] beyond the base in the direction of `scale`.
    pub fn zoom(
        &mut self,
        current_zoom_level: f64,
        scale: f64,
        use_fixed_levels: bool,
        duration: Duration,
        now: Instant,
    ) {
        let direction = sign(scale);
        let base = if self.is_zooming() && self.direction == direction {
            self.target_zoom_level
        } else {
            current_zoom_level
        };
        let base = if base.is_finite() {
            base
        } else {
            DEFAULT_ZOOM_LEVEL
        };

        let target = if use_fixed_levels {
            snap_to_fixed_level(base, direction)
        } else {
            (base + base * scale).round()
        };
        // NaN scale, or zero base times an infinite scale.
        let target = if target.is_nan() { base } else { target };

        self.initial_zoom_level = current_zoom_level;
        self.target_zoom_level = target.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
        self.direction = direction;

        if current_zoom_level.is_finite() && current_zoom_level > 0.0 {
            let exponent = 1.0 / duration_ms(duration).max(1) as f64;
            self.velocity = (self.target_zoom_level / current_zoom_level).powf(exponent);
            self.duration = duration;
        } else {
            self.velocity = 1.0;
            self.duration = Duration::ZERO;
        }

        self.stopwatch = Some(Stopwatch::start(now));
    }

    /// Zoom level to show at `now`, or `None` when idle.
    ///
    /// Once the configured duration has elapsed, returns the target exactly
    /// and goes idle.
    pub fn calculate_zoom(&mut self, now: Instant) -> Option<f64> {
        let stopwatch = self.stopwatch?;

        let elapsed = stopwatch.elapsed_ms(now);
        if elapsed >= duration_ms(self.duration) {
            let level = self.target_zoom_level;
            self.reset();
            return Some(level);
        }

        Some(self.initial_zoom_level * self.velocity.powf(elapsed as f64))
    }
}

impl Motion for ZoomCalculation {
    fn is_running(&self) -> bool {
        self.is_zooming()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Next fixed level strictly beyond `base` in `direction`, saturating.
fn snap_to_fixed_level(base: f64, direction: i8) -> f64 {
    match direction {
        1 => FIXED_ZOOM_LEVELS
            .iter()
            .copied()
            .find(|&level| level > base)
            .unwrap_or(MAX_ZOOM_LEVEL),
        -1 => FIXED_ZOOM_LEVELS
            .iter()
            .rev()
            .copied()
            .find(|&level| level < base)
            .unwrap_or(MIN_ZOOM_LEVEL),
        _ => base,
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn fixed_levels_are_ascending_and_bounded() {
        assert!(FIXED_ZOOM_LEVELS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(FIXED_ZOOM_LEVELS[0], MIN_ZOOM_LEVEL);
        assert_eq!(FIXED_ZOOM_LEVELS[FIXED_ZOOM_LEVELS.len() - 1], MAX_ZOOM_LEVEL);
    }

    #[test]
    fn continuous_target_rounds() {
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.1, false, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), 110.0);
        assert!(zoom.is_zooming());

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(133.0, -0.1, false, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), 120.0);
    }

    #[test]
    fn fixed_levels_step_to_neighbours() {
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.1, true, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), 125.0);

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, -0.1, true, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), 75.0);

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(110.0, 0.1, true, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), 125.0);
    }

    #[test]
    fn fixed_levels_saturate_at_extremes() {
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(400.0, 0.1, true, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), MAX_ZOOM_LEVEL);

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(20.0, -0.1, true, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), MIN_ZOOM_LEVEL);
    }

    #[test]
    fn target_is_clamped() {
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(390.0, 0.1, false, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), MAX_ZOOM_LEVEL);

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(21.0, -0.5, false, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), MIN_ZOOM_LEVEL);
    }

    #[test]
    fn same_direction_compounds_on_previous_target() {
        let start = Instant::now();
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.1, false, MS_100, start);
        let mid = zoom.calculate_zoom(at(start, 40)).unwrap();

        zoom.zoom(mid, 0.1, false, MS_100, at(start, 40));
        assert_eq!(zoom.target_zoom_level(), 121.0);
        assert_eq!(zoom.initial_zoom_level(), mid);
    }

    #[test]
    fn fixed_levels_compound_across_notches() {
        let start = Instant::now();
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.1, true, MS_100, start);
        zoom.zoom(105.0, 0.1, true, MS_100, at(start, 10));
        assert_eq!(zoom.target_zoom_level(), 150.0);
    }

    #[test]
    fn reversal_uses_live_level() {
        let start = Instant::now();
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.5, false, MS_100, start);
        zoom.zoom(120.0, -0.5, false, MS_100, at(start, 30));
        assert_eq!(zoom.target_zoom_level(), 60.0);
    }

    #[test]
    fn interpolation_is_exponential() {
        let start = Instant::now();
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 1.0, false, MS_100, start);
        assert_eq!(zoom.target_zoom_level(), 200.0);

        let mid = zoom.calculate_zoom(at(start, 50)).unwrap();
        assert!((mid - 100.0 * 2f64.sqrt()).abs() < 1e-6, "mid: {mid}");
    }

    #[test]
    fn converges_exactly_on_target() {
        let start = Instant::now();
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.37, false, MS_100, start);
        let target = zoom.target_zoom_level();

        assert_eq!(zoom.calculate_zoom(at(start, 100)), Some(target));
        assert!(!zoom.is_zooming());
        assert_eq!(zoom.calculate_zoom(at(start, 120)), None);
    }

    #[test]
    fn zero_duration_jumps() {
        let start = Instant::now();
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.2, false, Duration::ZERO, start);
        assert_eq!(zoom.velocity(), 1.2);
        assert_eq!(zoom.calculate_zoom(start), Some(120.0));
    }

    #[test]
    fn zero_initial_level_jumps() {
        let start = Instant::now();
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(0.0, 0.2, false, MS_100, start);
        assert_eq!(zoom.velocity(), 1.0);
        assert_eq!(zoom.target_zoom_level(), MIN_ZOOM_LEVEL);
        assert_eq!(zoom.calculate_zoom(start), Some(MIN_ZOOM_LEVEL));
    }

    #[test]
    fn non_finite_level_falls_back_to_default() {
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(f64::NAN, 0.1, false, MS_100, Instant::now());
        assert_eq!(zoom.target_zoom_level(), 110.0);
        assert_eq!(zoom.velocity(), 1.0);
    }

    #[test]
    fn non_finite_scale_keeps_target_in_range() {
        let start = Instant::now();

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, f64::NAN, false, MS_100, start);
        assert_eq!(zoom.target_zoom_level(), 100.0);
        assert_eq!(zoom.calculate_zoom(at(start, 100)), Some(100.0));

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(0.0, f64::INFINITY, false, MS_100, start);
        assert_eq!(zoom.target_zoom_level(), MIN_ZOOM_LEVEL);
        assert_eq!(zoom.calculate_zoom(at(start, 100)), Some(MIN_ZOOM_LEVEL));

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, f64::INFINITY, false, MS_100, start);
        assert_eq!(zoom.target_zoom_level(), MAX_ZOOM_LEVEL);

        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, f64::NEG_INFINITY, true, MS_100, start);
        assert_eq!(zoom.target_zoom_level(), 75.0);
    }

    #[test]
    fn reset_clears_state() {
        let mut zoom = ZoomCalculation::new();
        zoom.zoom(100.0, 0.1, false, MS_100, Instant::now());
        zoom.reset();
        assert!(!zoom.is_running());
        assert_eq!(zoom.target_zoom_level(), 0.0);
        assert_eq!(zoom.velocity(), 0.0);
    }
}
