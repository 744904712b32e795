#![forbid(unsafe_code)]

//! Runtime: surface registry, wheel routing, and the frame driver.
//!
//! # Role in glide
//! `glide-runtime` is what a host embeds. It keeps one
//! [`WheelCalculator`] per editor surface, decides which surface a wheel
//! message belongs to, feeds the matching motion model, and applies the
//! animated results once per rendered frame.
//!
//! # Primary responsibilities
//! - **WheelController**: registration, pointer tracking, hook bookkeeping,
//!   message routing, and the per-frame pass over active bundles.
//! - **Registry**: generation-checked storage so closed surfaces never stay
//!   reachable.
//! - **Surface / ViewScroller**: the contracts the host implements.

pub mod calculator;
pub mod controller;
pub mod registry;
pub mod surface;

pub use calculator::WheelCalculator;
pub use controller::{
    Dispatch, FrameReport, HookAction, IgnoreReason, Registration, WheelController,
};
pub use registry::{Registry, SurfaceId};
pub use surface::{ScrollDirection, Surface, ViewScroller};
