#![forbid(unsafe_code)]

//! Per-surface bundle of motion models.

use std::fmt;

use glide_core::animation::{Motion, ScrollCalculation, ZoomCalculation};
use web_time::Instant;

use crate::surface::{Surface, ViewScroller};

/// One horizontal, one vertical, and one zoom model paired with the surface
/// they drive and its scroll primitive.
pub struct WheelCalculator<S> {
    surface: S,
    scroller: Box<dyn ViewScroller>,
    horizontal: ScrollCalculation,
    vertical: ScrollCalculation,
    zoom: ZoomCalculation,
    /// Set once the native handle has been seen; realization is one-shot.
    realized: bool,
}

impl<S> fmt::Debug for WheelCalculator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelCalculator")
            .field("horizontal", &self.horizontal)
            .field("vertical", &self.vertical)
            .field("zoom", &self.zoom)
            .field("realized", &self.realized)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> WheelCalculator<S> {
    /// Idle bundle for `surface`.
    pub fn new(surface: S, scroller: Box<dyn ViewScroller>) -> Self {
        Self {
            surface,
            scroller,
            horizontal: ScrollCalculation::new(),
            vertical: ScrollCalculation::new(),
            zoom: ZoomCalculation::new(),
            realized: false,
        }
    }

    /// Whether any of the three models is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.horizontal.is_running() || self.vertical.is_running() || self.zoom.is_running()
    }

    /// The surface this bundle drives.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Horizontal axis model.
    pub fn horizontal(&self) -> &ScrollCalculation {
        &self.horizontal
    }

    /// Vertical axis model.
    pub fn vertical(&self) -> &ScrollCalculation {
        &self.vertical
    }

    /// Zoom model.
    pub fn zoom(&self) -> &ZoomCalculation {
        &self.zoom
    }

    pub(crate) fn horizontal_mut(&mut self) -> &mut ScrollCalculation {
        &mut self.horizontal
    }

    pub(crate) fn vertical_mut(&mut self) -> &mut ScrollCalculation {
        &mut self.vertical
    }

    pub(crate) fn zoom_mut(&mut self) -> &mut ZoomCalculation {
        &mut self.zoom
    }

    pub(crate) fn is_realized(&self) -> bool {
        self.realized
    }

    pub(crate) fn mark_realized(&mut self) {
        self.realized = true;
    }

    /// Poll every running model at `now` and apply the results.
    pub(crate) fn advance(&mut self, now: Instant) {
        if self.vertical.is_scrolling() {
            let distance = self.vertical.calculate_distance(now);
            self.scroller.scroll_vertically(distance);
        }

        if self.horizontal.is_scrolling() {
            let distance = self.horizontal.calculate_distance(now);
            self.scroller.scroll_horizontally(distance);
        }

        if let Some(level) = self.zoom.calculate_zoom(now) {
            self.surface.set_zoom_level(level);
        }
    }
}
