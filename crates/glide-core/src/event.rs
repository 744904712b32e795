#![forbid(unsafe_code)]

//! Raw wheel messages and gesture classification.
//!
//! The host forwards every message it intercepts on a hooked native window as
//! a [`WheelMessage`]: the message id plus its two word-sized parameters,
//! exactly as the platform delivered them. This module decodes them.
//!
//! # Wire layout
//!
//! | Field          | Bits    | Meaning                                         |
//! |----------------|---------|-------------------------------------------------|
//! | `wparam` low   | 0..16   | key-state flags ([`MK_SHIFT`], [`MK_CONTROL`])  |
//! | `wparam` high  | 16..32  | signed wheel delta, [`WHEEL_DELTA`] per notch   |
//! | `lparam` low   | 0..16   | signed screen x of the pointer                  |
//! | `lparam` high  | 16..32  | signed screen y of the pointer                  |
//!
//! The key-state word never carries Alt, so the host supplies a keyboard
//! snapshot as [`Modifiers`] next to the message; the two are merged by
//! [`WheelMessage::modifiers`].

use bitflags::bitflags;

use crate::geometry::Point;

/// Message id of a vertical mouse-wheel notification.
pub const WM_MOUSEWHEEL: u32 = 0x020A;

/// Wheel delta of one physical notch.
pub const WHEEL_DELTA: i32 = 120;

/// Key-state flag: a Shift key is down.
pub const MK_SHIFT: usize = 0x0004;

/// Key-state flag: a Control key is down.
pub const MK_CONTROL: usize = 0x0008;

bitflags! {
    /// Modifier keys held while the wheel turned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Opaque identifier of a native window the host can hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub usize);

/// A raw message intercepted on a hooked native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelMessage {
    /// Window the message was delivered to.
    pub hwnd: NativeHandle,
    /// Message id.
    pub msg: u32,
    /// First parameter (key state and delta for wheel messages).
    pub wparam: usize,
    /// Second parameter (pointer position for wheel messages).
    pub lparam: isize,
}

impl WheelMessage {
    /// Wrap a raw message.
    #[must_use]
    pub const fn new(hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            hwnd,
            msg,
            wparam,
            lparam,
        }
    }

    /// Encode a wheel message. Only Shift and Control survive in the
    /// key-state word.
    #[must_use]
    pub fn wheel(hwnd: NativeHandle, delta: i16, keys: Modifiers, position: Point) -> Self {
        let mut key_state = 0usize;
        if keys.contains(Modifiers::SHIFT) {
            key_state |= MK_SHIFT;
        }
        if keys.contains(Modifiers::CTRL) {
            key_state |= MK_CONTROL;
        }
        let wparam = (usize::from(delta as u16) << 16) | key_state;

        let x = usize::from(position.x as i16 as u16);
        let y = usize::from(position.y as i16 as u16);
        let lparam = ((y << 16) | x) as isize;

        Self::new(hwnd, WM_MOUSEWHEEL, wparam, lparam)
    }

    /// Whether this is a vertical wheel notification.
    #[inline]
    #[must_use]
    pub const fn is_wheel(&self) -> bool {
        self.msg == WM_MOUSEWHEEL
    }

    /// Signed wheel delta (multiples of [`WHEEL_DELTA`] for notched wheels).
    #[inline]
    #[must_use]
    pub const fn delta(&self) -> i32 {
        ((self.wparam as u32) >> 16) as u16 as i16 as i32
    }

    /// Modifier flags carried by the key-state word.
    #[must_use]
    pub fn key_state(&self) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        if self.wparam & MK_SHIFT == MK_SHIFT {
            modifiers |= Modifiers::SHIFT;
        }
        if self.wparam & MK_CONTROL == MK_CONTROL {
            modifiers |= Modifiers::CTRL;
        }
        modifiers
    }

    /// Key-state flags merged with the host's keyboard snapshot.
    #[must_use]
    pub fn modifiers(&self, keyboard: Modifiers) -> Modifiers {
        self.key_state() | keyboard
    }

    /// Pointer position in screen coordinates.
    #[must_use]
    pub const fn screen_position(&self) -> Point {
        let raw = self.lparam as u32;
        Point::new((raw & 0xFFFF) as u16 as i16 as i32, (raw >> 16) as u16 as i16 as i32)
    }
}

/// What a wheel turn asks for, decided by the held modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelGesture {
    /// Control held: change the zoom level. Alt selects stepped levels.
    Zoom {
        /// Snap to the fixed zoom levels instead of scaling continuously.
        fixed_levels: bool,
    },
    /// Shift held: scroll sideways.
    HorizontalScroll,
    /// No relevant modifier: scroll up or down.
    VerticalScroll,
}

impl WheelGesture {
    /// Classify by modifiers. Control wins over Shift.
    #[must_use]
    pub fn classify(modifiers: Modifiers) -> Self {
        if modifiers.contains(Modifiers::CTRL) {
            Self::Zoom {
                fixed_levels: modifiers.contains(Modifiers::ALT),
            }
        } else if modifiers.contains(Modifiers::SHIFT) {
            Self::HorizontalScroll
        } else {
            Self::VerticalScroll
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Zoom { .. } => "zoom",
            Self::HorizontalScroll => "horizontal",
            Self::VerticalScroll => "vertical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HWND: NativeHandle = NativeHandle(0x1234);

    #[test]
    fn delta_is_signed_high_word() {
        let down = WheelMessage::new(HWND, WM_MOUSEWHEEL, 0xFF88_0000, 0);
        assert_eq!(down.delta(), -120);

        let up = WheelMessage::new(HWND, WM_MOUSEWHEEL, 0x0078_0008, 0);
        assert_eq!(up.delta(), 120);
        assert_eq!(up.key_state(), Modifiers::CTRL);
    }

    #[test]
    fn encode_then_decode_wheel() {
        let msg = WheelMessage::wheel(
            HWND,
            -240,
            Modifiers::SHIFT | Modifiers::ALT,
            Point::new(-15, 700),
        );
        assert!(msg.is_wheel());
        assert_eq!(msg.delta(), -240);
        assert_eq!(msg.key_state(), Modifiers::SHIFT);
        assert_eq!(msg.screen_position(), Point::new(-15, 700));
    }

    #[test]
    fn keyboard_snapshot_is_merged() {
        let msg = WheelMessage::wheel(HWND, 120, Modifiers::CTRL, Point::default());
        assert_eq!(
            msg.modifiers(Modifiers::ALT),
            Modifiers::CTRL | Modifiers::ALT
        );
    }

    #[test]
    fn other_messages_are_not_wheel() {
        let msg = WheelMessage::new(HWND, 0x020E, 0x0078_0000, 0);
        assert!(!msg.is_wheel());
    }

    #[test]
    fn classification_priority() {
        assert_eq!(
            WheelGesture::classify(Modifiers::CTRL | Modifiers::SHIFT),
            WheelGesture::Zoom {
                fixed_levels: false
            }
        );
        assert_eq!(
            WheelGesture::classify(Modifiers::CTRL | Modifiers::ALT),
            WheelGesture::Zoom { fixed_levels: true }
        );
        assert_eq!(
            WheelGesture::classify(Modifiers::SHIFT),
            WheelGesture::HorizontalScroll
        );
        assert_eq!(
            WheelGesture::classify(Modifiers::ALT),
            WheelGesture::VerticalScroll
        );
        assert_eq!(
            WheelGesture::classify(Modifiers::NONE),
            WheelGesture::VerticalScroll
        );
    }
}
