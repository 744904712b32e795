#![forbid(unsafe_code)]

//! Collaborator contracts implemented by the host.
//!
//! A [`Surface`] is an editor view the host owns: it has a zoom level, pixel
//! bounds, a native window once realized, and it can be closed at any time.
//! The scroll primitives live behind a separate [`ViewScroller`] so the host
//! can inject whatever actually moves the viewport (a view's own scroller, a
//! viewport-left adjustment, a recording double in tests).
//!
//! Implementations are usually cheap handles (`Rc<RefCell<View>>` and the
//! like); the controller stores one per registered surface and never assumes
//! it owns the view behind it.

use glide_core::event::NativeHandle;
use glide_core::geometry::Rect;

/// Applies scroll distances to a viewport.
pub trait ViewScroller {
    /// Move the viewport vertically by `pixels`. Positive scrolls toward the
    /// top of the document.
    fn scroll_vertically(&mut self, pixels: f64);

    /// Move the viewport horizontally by `pixels`. Positive moves the
    /// viewport's left edge to the right.
    fn scroll_horizontally(&mut self, pixels: f64);
}

/// An animatable editor view.
pub trait Surface {
    /// Current zoom percentage.
    fn zoom_level(&self) -> f64;

    /// Apply a zoom percentage.
    fn set_zoom_level(&mut self, level: f64);

    /// Whether the view has been closed or disposed.
    fn is_closed(&self) -> bool;

    /// Native window hosting the view, once realized.
    fn native_handle(&self) -> Option<NativeHandle>;

    /// Height of one text line in pixels.
    fn line_height(&self) -> f64;

    /// View bounds in screen pixels.
    fn bounds(&self) -> Rect;

    /// Whether the pointer is over the view or its adornments right now.
    fn is_pointer_over(&self) -> bool {
        false
    }
}

/// Direction of a line-based scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Toward the start of the document.
    Up,
    /// Toward the end of the document.
    Down,
}

impl ScrollDirection {
    /// Sign applied to line distances.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}
