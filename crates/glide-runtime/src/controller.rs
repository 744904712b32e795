#![forbid(unsafe_code)]

//! Wheel routing and the frame driver.
//!
//! [`WheelController`] is the single context object the host keeps for the
//! lifetime of its wheel hook. It owns:
//!
//! - the registry of every surface's [`WheelCalculator`], keyed by
//!   [`SurfaceId`],
//! - the active set: ids whose bundles have an animation in flight,
//! - the set of native handles already hooked,
//! - the "current surface" under the pointer.
//!
//! # Host protocol
//!
//! 1. [`register`](WheelController::register) each view; install the hook if
//!    the returned [`HookAction`] says so, otherwise wait for the view to be
//!    realized and call
//!    [`on_surface_realized`](WheelController::on_surface_realized).
//! 2. Forward pointer enter/leave and close notifications.
//! 3. Forward every hooked message to
//!    [`handle_wheel_message`](WheelController::handle_wheel_message) and
//!    mark it handled when the returned [`Dispatch`] says so.
//! 4. Call [`on_frame`](WheelController::on_frame) once per rendered frame.
//!
//! Everything runs on the host's UI thread; nothing here blocks or schedules.
//!
//! # Invariants
//!
//! 1. An id is in the active set iff its bundle is live and running, checked
//!    after every routing call and every frame.
//! 2. A wheel message only ever mutates the current surface's bundle.
//! 3. A native handle is reported for installation at most once until it is
//!    disposed.
//!
//! # Failure Modes
//!
//! None are fatal. Missing settings, no current surface, closed surfaces, and
//! disabled gestures all yield [`Dispatch::Ignored`] so the host's default
//! handling runs.

use ahash::AHashSet;
use glide_core::event::{Modifiers, NativeHandle, WheelGesture, WheelMessage};
use glide_core::geometry::Point;
use glide_core::logging::{TARGET_FRAME, TARGET_ROUTER, TARGET_SETTINGS};
use glide_core::settings::WheelSettings;
use web_time::Instant;

use crate::calculator::WheelCalculator;
use crate::registry::{Registry, SurfaceId};
use crate::surface::{ScrollDirection, Surface, ViewScroller};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What the host should do about a native handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    /// Attach the wheel intercept to this handle.
    Install(NativeHandle),
    /// The handle (or this surface's realization) was already processed.
    AlreadyHooked,
    /// No native handle yet; call `on_surface_realized` once it exists.
    Deferred,
    /// The surface is closed or unknown.
    Unavailable,
}

/// Result of registering a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Id to pass back in later notifications.
    pub id: SurfaceId,
    /// Hook instruction for the host.
    pub hook: HookAction,
}

/// Why a message was passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Not a wheel message.
    NotWheel,
    /// Settings have not been installed yet.
    SettingsUninitialized,
    /// No surface is under the pointer.
    NoCurrentSurface,
    /// The current surface has no bundle.
    UnknownSurface,
    /// The current surface has been closed.
    SurfaceClosed,
    /// The gesture is turned off in settings.
    GestureDisabled(WheelGesture),
}

/// Outcome of routing one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event was consumed and an animation started or extended.
    Handled(WheelGesture),
    /// The host should apply its default behavior.
    Ignored(IgnoreReason),
}

impl Dispatch {
    /// Whether the host should mark the message handled.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Summary of one frame-driver pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Bundles polled and applied this frame.
    pub advanced: usize,
    /// Bundles removed from the active set this frame.
    pub evicted: usize,
    /// Bundles still active after the sweep.
    pub active: usize,
}

// ---------------------------------------------------------------------------
// WheelController
// ---------------------------------------------------------------------------

/// Routes wheel input to per-surface animations and drives them each frame.
pub struct WheelController<S> {
    settings: Option<WheelSettings>,
    calculators: Registry<WheelCalculator<S>>,
    active: Vec<SurfaceId>,
    hooked: AHashSet<NativeHandle>,
    current: Option<SurfaceId>,
}

impl<S> std::fmt::Debug for WheelController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelController")
            .field("settings", &self.settings)
            .field("registered", &self.calculators.len())
            .field("active", &self.active)
            .field("hooked", &self.hooked.len())
            .field("current", &self.current)
            .finish()
    }
}

impl<S: Surface> Default for WheelController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> WheelController<S> {
    /// Controller without settings; wheel messages are ignored until
    /// [`install_settings`](Self::install_settings) is called.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: None,
            calculators: Registry::new(),
            active: Vec::new(),
            hooked: AHashSet::new(),
            current: None,
        }
    }

    /// Controller with settings already installed.
    #[must_use]
    pub fn with_settings(settings: WheelSettings) -> Self {
        let mut controller = Self::new();
        controller.install_settings(settings);
        controller
    }

    // --- Settings ----------------------------------------------------------

    /// Install or replace the settings. Values are clamped into range.
    ///
    /// Animations in flight keep the duration they started with.
    pub fn install_settings(&mut self, settings: WheelSettings) {
        let settings = settings.normalized();
        tracing::debug!(
            target: TARGET_SETTINGS,
            scroll_duration_ms = settings.scroll_duration_ms,
            vertical_scroll_rate = settings.vertical_scroll_rate,
            horizontal_scrolling_enabled = settings.horizontal_scrolling_enabled,
            horizontal_scroll_rate = settings.horizontal_scroll_rate,
            zooming_enabled = settings.zooming_enabled,
            zoom_duration_ms = settings.zoom_duration_ms,
            replaced = self.settings.is_some(),
            "settings installed"
        );
        self.settings = Some(settings);
    }

    /// Installed settings, if any.
    #[must_use]
    pub fn settings(&self) -> Option<&WheelSettings> {
        self.settings.as_ref()
    }

    // --- Queries -----------------------------------------------------------

    /// Number of registered surfaces.
    #[must_use]
    pub fn registered_len(&self) -> usize {
        self.calculators.len()
    }

    /// Number of bundles with an animation in flight.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Whether `id`'s bundle is in the active set.
    #[must_use]
    pub fn is_active(&self, id: SurfaceId) -> bool {
        self.active.contains(&id)
    }

    /// Surface currently under the pointer.
    #[must_use]
    pub fn current_surface(&self) -> Option<SurfaceId> {
        self.current
    }

    /// Whether the intercept is installed on `handle`.
    #[must_use]
    pub fn is_hooked(&self, handle: NativeHandle) -> bool {
        self.hooked.contains(&handle)
    }

    /// Bundle for `id`.
    #[must_use]
    pub fn calculator(&self, id: SurfaceId) -> Option<&WheelCalculator<S>> {
        self.calculators.get(id)
    }

    /// Surface for `id`.
    #[must_use]
    pub fn surface(&self, id: SurfaceId) -> Option<&S> {
        self.calculators.get(id).map(WheelCalculator::surface)
    }

    /// Open surface whose bounds contain `point` (screen pixels).
    ///
    /// Lets the host resynchronize pointer tracking; routing itself only
    /// follows enter/leave notifications.
    #[must_use]
    pub fn surface_at(&self, point: Point) -> Option<SurfaceId> {
        self.calculators
            .iter()
            .find(|(_, calc)| {
                let surface = calc.surface();
                !surface.is_closed() && surface.bounds().contains(point)
            })
            .map(|(id, _)| id)
    }

    // --- Registration and lifecycle ---------------------------------------

    /// Register a surface and the primitive that scrolls it.
    ///
    /// A surface that is already closed still gets an id, but is never
    /// hooked or made current; its bundle is dropped right away.
    pub fn register(&mut self, surface: S, scroller: Box<dyn ViewScroller>) -> Registration {
        let closed = surface.is_closed();
        let handle = surface.native_handle();
        let pointer_over = surface.is_pointer_over() && !closed;
        let id = self.calculators.insert(WheelCalculator::new(surface, scroller));

        if pointer_over {
            self.current = Some(id);
        }

        let hook = match handle {
            _ if closed => {
                self.calculators.remove(id);
                HookAction::Unavailable
            }
            Some(handle) => {
                if let Some(calc) = self.calculators.get_mut(id) {
                    calc.mark_realized();
                }
                self.hook(handle)
            }
            None => HookAction::Deferred,
        };

        tracing::debug!(
            target: TARGET_ROUTER,
            surface = ?id,
            hook = ?hook,
            pointer_over,
            "surface registered"
        );

        Registration { id, hook }
    }

    /// The surface's native handle now exists. Consumed once per surface.
    pub fn on_surface_realized(&mut self, id: SurfaceId, handle: NativeHandle) -> HookAction {
        let action = match self.calculators.get_mut(id) {
            None => HookAction::Unavailable,
            Some(calc) if calc.surface().is_closed() => HookAction::Unavailable,
            Some(calc) if calc.is_realized() => HookAction::AlreadyHooked,
            Some(calc) => {
                calc.mark_realized();
                self.hook(handle)
            }
        };

        tracing::debug!(
            target: TARGET_ROUTER,
            surface = ?id,
            handle = handle.0,
            action = ?action,
            "surface realized"
        );
        action
    }

    /// The native handle was destroyed; a new window reusing the value can be
    /// hooked again.
    pub fn on_handle_disposed(&mut self, handle: NativeHandle) {
        if self.hooked.remove(&handle) {
            tracing::debug!(target: TARGET_ROUTER, handle = handle.0, "handle disposed");
        }
    }

    /// The pointer entered `id`.
    pub fn on_pointer_enter(&mut self, id: SurfaceId) {
        let open = self
            .calculators
            .get(id)
            .is_some_and(|calc| !calc.surface().is_closed());
        if open {
            self.current = Some(id);
        }
    }

    /// The pointer left `id`. Ignored unless `id` is the current surface.
    pub fn on_pointer_leave(&mut self, id: SurfaceId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }

    /// `id` was closed. Its bundle is dropped and the id retired.
    ///
    /// Returns `false` if `id` was not registered.
    pub fn on_surface_closed(&mut self, id: SurfaceId) -> bool {
        if self.calculators.remove(id).is_none() {
            return false;
        }

        self.active.retain(|active| *active != id);
        if self.current == Some(id) {
            self.current = None;
        }

        tracing::debug!(target: TARGET_ROUTER, surface = ?id, "surface closed");
        true
    }

    fn hook(&mut self, handle: NativeHandle) -> HookAction {
        if self.hooked.insert(handle) {
            HookAction::Install(handle)
        } else {
            HookAction::AlreadyHooked
        }
    }

    // --- Routing -----------------------------------------------------------

    /// Route one intercepted message.
    ///
    /// `keyboard` is the host's modifier snapshot; it supplies Alt, which the
    /// message's key-state word does not carry.
    pub fn handle_wheel_message(
        &mut self,
        msg: &WheelMessage,
        keyboard: Modifiers,
        now: Instant,
    ) -> Dispatch {
        let dispatch = self.route(msg, keyboard, now);

        match dispatch {
            Dispatch::Handled(gesture) => tracing::trace!(
                target: TARGET_ROUTER,
                handle = msg.hwnd.0,
                delta = msg.delta(),
                gesture = gesture.name(),
                "wheel handled"
            ),
            Dispatch::Ignored(IgnoreReason::NotWheel) => {}
            Dispatch::Ignored(reason) => tracing::trace!(
                target: TARGET_ROUTER,
                handle = msg.hwnd.0,
                delta = msg.delta(),
                reason = ?reason,
                "wheel ignored"
            ),
        }
        dispatch
    }

    fn route(&mut self, msg: &WheelMessage, keyboard: Modifiers, now: Instant) -> Dispatch {
        if !msg.is_wheel() {
            return Dispatch::Ignored(IgnoreReason::NotWheel);
        }
        let Some(settings) = self.settings.as_ref() else {
            return Dispatch::Ignored(IgnoreReason::SettingsUninitialized);
        };
        let Some(id) = self.current else {
            return Dispatch::Ignored(IgnoreReason::NoCurrentSurface);
        };
        let Some(calc) = self.calculators.get_mut(id) else {
            self.current = None;
            return Dispatch::Ignored(IgnoreReason::UnknownSurface);
        };
        if calc.surface().is_closed() {
            self.on_surface_closed(id);
            return Dispatch::Ignored(IgnoreReason::SurfaceClosed);
        }

        let gesture = WheelGesture::classify(msg.modifiers(keyboard));
        if !settings.allows(gesture) {
            return Dispatch::Ignored(IgnoreReason::GestureDisabled(gesture));
        }

        let delta = msg.delta();
        match gesture {
            WheelGesture::Zoom { fixed_levels } => {
                let scale = settings.zoom_scale.scale(delta);
                let current_level = calc.surface().zoom_level();
                calc.zoom_mut().zoom(
                    current_level,
                    scale,
                    fixed_levels,
                    settings.zoom_duration(),
                    now,
                );
            }
            WheelGesture::HorizontalScroll => {
                let distance = settings.horizontal_distance(f64::from(delta));
                calc.horizontal_mut()
                    .scroll(distance, settings.scroll_duration(), now);
            }
            WheelGesture::VerticalScroll => {
                let distance = settings.vertical_distance(f64::from(delta));
                calc.vertical_mut()
                    .scroll(distance, settings.scroll_duration(), now);
            }
        }

        self.activate(id);
        Dispatch::Handled(gesture)
    }

    // --- Programmatic scrolling -------------------------------------------

    /// Animate a raw vertical distance on `id`. Rates are not applied.
    ///
    /// Returns `false` if settings are missing or the surface is closed or
    /// unknown.
    pub fn scroll_vertically(&mut self, id: SurfaceId, distance: f64, now: Instant) -> bool {
        self.scroll_axis(id, distance, Axis::Vertical, now)
    }

    /// Animate a raw horizontal distance on `id`. Rates are not applied.
    pub fn scroll_horizontally(&mut self, id: SurfaceId, distance: f64, now: Instant) -> bool {
        self.scroll_axis(id, distance, Axis::Horizontal, now)
    }

    /// Animate `count` lines on `id`, using the surface's line height.
    pub fn scroll_by_lines(
        &mut self,
        id: SurfaceId,
        direction: ScrollDirection,
        count: u32,
        now: Instant,
    ) -> bool {
        let Some(line_height) = self.surface(id).map(Surface::line_height) else {
            return false;
        };
        let distance = direction.sign() * line_height * f64::from(count);
        self.scroll_vertically(id, distance, now)
    }

    /// Animate a pixel request the way the view's own scroller would see it:
    /// Shift with horizontal scrolling enabled scrolls sideways, anything
    /// else scrolls vertically. Rates are applied.
    pub fn scroll_by_pixels(
        &mut self,
        id: SurfaceId,
        distance: f64,
        keyboard: Modifiers,
        now: Instant,
    ) -> bool {
        let Some(settings) = self.settings.as_ref() else {
            return false;
        };

        if settings.horizontal_scrolling_enabled && keyboard.contains(Modifiers::SHIFT) {
            let distance = settings.horizontal_distance(distance);
            self.scroll_horizontally(id, distance, now)
        } else {
            let distance = settings.vertical_distance(distance);
            self.scroll_vertically(id, distance, now)
        }
    }

    /// Animate a horizontal pixel request with the horizontal rate applied.
    ///
    /// Unlike Shift+wheel the sign is kept: a positive distance moves the
    /// viewport right. Works whether or not Shift+wheel scrolling is
    /// enabled.
    pub fn scroll_horizontally_by_pixels(
        &mut self,
        id: SurfaceId,
        distance: f64,
        now: Instant,
    ) -> bool {
        let Some(rate) = self.settings.as_ref().map(|s| s.horizontal_scroll_rate) else {
            return false;
        };
        let distance = distance * f64::from(rate) / 100.0;
        self.scroll_horizontally(id, distance, now)
    }

    fn scroll_axis(&mut self, id: SurfaceId, distance: f64, axis: Axis, now: Instant) -> bool {
        let Some(duration) = self.settings.as_ref().map(WheelSettings::scroll_duration) else {
            return false;
        };
        let Some(calc) = self.calculators.get_mut(id) else {
            return false;
        };
        if calc.surface().is_closed() {
            return false;
        }

        match axis {
            Axis::Vertical => calc.vertical_mut().scroll(distance, duration, now),
            Axis::Horizontal => calc.horizontal_mut().scroll(distance, duration, now),
        }
        self.activate(id);
        true
    }

    fn activate(&mut self, id: SurfaceId) {
        if !self.active.contains(&id) {
            self.active.push(id);
        }
    }

    // --- Frame driver ------------------------------------------------------

    /// Advance every active bundle to `now` and apply the results, then
    /// evict bundles that finished or whose surface closed.
    pub fn on_frame(&mut self, now: Instant) -> FrameReport {
        let mut report = FrameReport::default();
        if self.active.is_empty() {
            return report;
        }

        let before = self.active.len();
        let mut closed = Vec::new();
        for &id in &self.active {
            let Some(calc) = self.calculators.get_mut(id) else {
                continue;
            };
            if calc.surface().is_closed() {
                closed.push(id);
                continue;
            }
            calc.advance(now);
            report.advanced += 1;
        }
        for id in closed {
            self.on_surface_closed(id);
        }

        let calculators = &self.calculators;
        self.active
            .retain(|id| calculators.get(*id).is_some_and(WheelCalculator::is_running));
        report.evicted = before - self.active.len();
        report.active = self.active.len();

        tracing::trace!(
            target: TARGET_FRAME,
            advanced = report.advanced,
            evicted = report.evicted,
            active = report.active,
            "frame"
        );
        report
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}
