//! Shared test double for an editor view.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::event::NativeHandle;
use glide_core::geometry::Rect;
use glide_runtime::{Surface, ViewScroller};

#[derive(Debug)]
pub struct ViewState {
    pub zoom_level: f64,
    pub zoom_history: Vec<f64>,
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
    pub closed: bool,
    pub handle: Option<NativeHandle>,
    pub line_height: f64,
    pub bounds: Rect,
    pub pointer_over: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom_level: 100.0,
            zoom_history: Vec::new(),
            vertical: Vec::new(),
            horizontal: Vec::new(),
            closed: false,
            handle: None,
            line_height: 16.0,
            bounds: Rect::default(),
            pointer_over: false,
        }
    }
}

/// Cheap handle to a recorded view, as a host would hand out.
#[derive(Debug, Clone, Default)]
pub struct MockView(pub Rc<RefCell<ViewState>>);

impl MockView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle(handle: usize) -> Self {
        let view = Self::new();
        view.0.borrow_mut().handle = Some(NativeHandle(handle));
        view
    }

    pub fn with_bounds(self, bounds: Rect) -> Self {
        self.0.borrow_mut().bounds = bounds;
        self
    }

    pub fn pointer_over(self) -> Self {
        self.0.borrow_mut().pointer_over = true;
        self
    }

    pub fn close(&self) {
        self.0.borrow_mut().closed = true;
    }

    pub fn set_zoom(&self, level: f64) {
        self.0.borrow_mut().zoom_level = level;
    }

    pub fn zoom(&self) -> f64 {
        self.0.borrow().zoom_level
    }

    pub fn zoom_history(&self) -> Vec<f64> {
        self.0.borrow().zoom_history.clone()
    }

    pub fn vertical_total(&self) -> f64 {
        self.0.borrow().vertical.iter().sum()
    }

    pub fn horizontal_total(&self) -> f64 {
        self.0.borrow().horizontal.iter().sum()
    }

    pub fn vertical_calls(&self) -> Vec<f64> {
        self.0.borrow().vertical.clone()
    }

    pub fn untouched(&self) -> bool {
        let state = self.0.borrow();
        state.vertical.is_empty() && state.horizontal.is_empty() && state.zoom_history.is_empty()
    }

    pub fn scroller(&self) -> Box<dyn ViewScroller> {
        Box::new(self.clone())
    }
}

impl ViewScroller for MockView {
    fn scroll_vertically(&mut self, pixels: f64) {
        self.0.borrow_mut().vertical.push(pixels);
    }

    fn scroll_horizontally(&mut self, pixels: f64) {
        self.0.borrow_mut().horizontal.push(pixels);
    }
}

impl Surface for MockView {
    fn zoom_level(&self) -> f64 {
        self.0.borrow().zoom_level
    }

    fn set_zoom_level(&mut self, level: f64) {
        let mut state = self.0.borrow_mut();
        state.zoom_level = level;
        state.zoom_history.push(level);
    }

    fn is_closed(&self) -> bool {
        self.0.borrow().closed
    }

    fn native_handle(&self) -> Option<NativeHandle> {
        self.0.borrow().handle
    }

    fn line_height(&self) -> f64 {
        self.0.borrow().line_height
    }

    fn bounds(&self) -> Rect {
        self.0.borrow().bounds
    }

    fn is_pointer_over(&self) -> bool {
        self.0.borrow().pointer_over
    }
}
