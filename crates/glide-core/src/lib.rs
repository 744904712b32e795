#![forbid(unsafe_code)]

//! Core: wheel input decoding, settings, and scroll/zoom motion models.
//!
//! # Role in glide
//! `glide-core` is the leaf layer. It knows nothing about editor surfaces or
//! the host's message loop; it only turns wheel deltas into time-sampled
//! motion.
//!
//! # Primary responsibilities
//! - **ScrollCalculation**: constant-velocity interpolation of one scroll axis.
//! - **ZoomCalculation**: exponential interpolation between zoom percentages,
//!   with clamping and fixed-level snapping.
//! - **WheelMessage**: decoding of raw wheel messages (delta, key state,
//!   pointer position) and gesture classification.
//! - **WheelSettings**: durations, rates, and feature toggles.
//!
//! # How it fits in the system
//! The runtime (`glide-runtime`) owns one bundle of motion models per editor
//! surface, feeds them from [`event::WheelMessage`]s, and polls them once per
//! rendered frame.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod settings;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
