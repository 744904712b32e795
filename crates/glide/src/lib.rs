#![forbid(unsafe_code)]

//! glide public facade crate.
//!
//! Re-exports the types a host needs to wire smooth wheel scrolling and
//! zooming into its editor views, plus a prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use glide_core::animation::{
    FIXED_ZOOM_LEVELS, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL, Motion, ScrollCalculation, ZoomCalculation,
};
pub use glide_core::event::{Modifiers, NativeHandle, WheelGesture, WheelMessage};
pub use glide_core::geometry::{Point, Rect};
pub use glide_core::settings::{SettingsError, WheelSettings, ZoomScale};

#[cfg(feature = "tracing-json")]
pub use glide_core::logging::init_json_logging;

// --- Runtime re-exports ----------------------------------------------------

pub use glide_runtime::{
    Dispatch, FrameReport, HookAction, IgnoreReason, Registration, ScrollDirection, Surface,
    SurfaceId, ViewScroller, WheelCalculator, WheelController,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Dispatch, HookAction, Modifiers, NativeHandle, ScrollDirection, Surface, SurfaceId,
        ViewScroller, WheelController, WheelMessage, WheelSettings,
    };

    pub use crate::{core, runtime};
}

pub use glide_core as core;
pub use glide_runtime as runtime;
