#![forbid(unsafe_code)]

//! Wheel behavior settings.
//!
//! [`WheelSettings`] holds the resolved values the engine reads: animation
//! durations, scroll rates, and the horizontal-scroll and zoom toggles.
//! Storage and editing of these values belong to the host; with the
//! `settings-file` feature they can also be loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # glide.toml
//! scroll_duration_ms = 150
//! vertical_scroll_rate = 120
//! horizontal_scrolling_enabled = true
//! zooming_enabled = true
//! zoom_scale = "symmetric"
//! ```
//!
//! ```rust,ignore
//! let settings = WheelSettings::from_toml_file("glide.toml")?;
//! ```
//!
//! # Ranges
//!
//! Durations are clamped to `0..=1000` ms and rates to `-400..=400` percent.
//! Loaders clamp; [`WheelSettings::validate`] reports instead.

#[cfg(feature = "settings-file")]
use std::path::Path;

#[cfg(feature = "settings-file")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::event::WheelGesture;

/// Longest accepted animation duration.
pub const MAX_DURATION_MS: u32 = 1000;

/// Smallest accepted scroll rate, in percent.
pub const MIN_RATE_PERCENT: i32 = -400;

/// Largest accepted scroll rate, in percent.
pub const MAX_RATE_PERCENT: i32 = 400;

// ---------------------------------------------------------------------------
// Zoom scale policy
// ---------------------------------------------------------------------------

/// How a wheel delta converts into a zoom scale fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "settings-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "settings-file", serde(rename_all = "snake_case"))]
pub enum ZoomScale {
    /// `delta / 1200` when zooming in, `delta / 1320` when zooming out.
    #[default]
    Asymmetric,
    /// `delta / 1200` in both directions.
    Symmetric,
}

impl ZoomScale {
    /// Signed scale fraction for a wheel delta.
    #[must_use]
    pub fn scale(self, delta: i32) -> f64 {
        let delta = f64::from(delta);
        match self {
            Self::Asymmetric if delta < 0.0 => delta / 1320.0,
            Self::Asymmetric | Self::Symmetric => delta / 1200.0,
        }
    }
}

// ---------------------------------------------------------------------------
// WheelSettings
// ---------------------------------------------------------------------------

/// Resolved wheel behavior settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "settings-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "settings-file", serde(default))]
pub struct WheelSettings {
    /// Scroll animation length in ms. Default: 100.
    pub scroll_duration_ms: u32,
    /// Vertical distance per wheel delta, in percent. Default: 100.
    pub vertical_scroll_rate: i32,
    /// Shift+wheel scrolls horizontally. Default: false.
    pub horizontal_scrolling_enabled: bool,
    /// Horizontal distance per wheel delta, in percent. Default: 100.
    pub horizontal_scroll_rate: i32,
    /// Ctrl+wheel zooms. Default: false.
    pub zooming_enabled: bool,
    /// Zoom animation length in ms. Default: 100.
    pub zoom_duration_ms: u32,
    /// Delta to zoom-scale conversion. Default: asymmetric.
    pub zoom_scale: ZoomScale,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            scroll_duration_ms: 100,
            vertical_scroll_rate: 100,
            horizontal_scrolling_enabled: false,
            horizontal_scroll_rate: 100,
            zooming_enabled: false,
            zoom_duration_ms: 100,
            zoom_scale: ZoomScale::Asymmetric,
        }
    }
}

impl WheelSettings {
    /// Set the scroll duration (builder pattern). Clamped to 0..=1000.
    #[must_use]
    pub fn with_scroll_duration_ms(mut self, ms: u32) -> Self {
        self.scroll_duration_ms = ms.min(MAX_DURATION_MS);
        self
    }

    /// Set the vertical rate (builder pattern). Clamped to -400..=400.
    #[must_use]
    pub fn with_vertical_scroll_rate(mut self, percent: i32) -> Self {
        self.vertical_scroll_rate = percent.clamp(MIN_RATE_PERCENT, MAX_RATE_PERCENT);
        self
    }

    /// Enable or disable Shift+wheel horizontal scrolling (builder pattern).
    #[must_use]
    pub fn with_horizontal_scrolling(mut self, enabled: bool) -> Self {
        self.horizontal_scrolling_enabled = enabled;
        self
    }

    /// Set the horizontal rate (builder pattern). Clamped to -400..=400.
    #[must_use]
    pub fn with_horizontal_scroll_rate(mut self, percent: i32) -> Self {
        self.horizontal_scroll_rate = percent.clamp(MIN_RATE_PERCENT, MAX_RATE_PERCENT);
        self
    }

    /// Enable or disable Ctrl+wheel zooming (builder pattern).
    #[must_use]
    pub fn with_zooming(mut self, enabled: bool) -> Self {
        self.zooming_enabled = enabled;
        self
    }

    /// Set the zoom duration (builder pattern). Clamped to 0..=1000.
    #[must_use]
    pub fn with_zoom_duration_ms(mut self, ms: u32) -> Self {
        self.zoom_duration_ms = ms.min(MAX_DURATION_MS);
        self
    }

    /// Set the zoom scale policy (builder pattern).
    #[must_use]
    pub fn with_zoom_scale(mut self, zoom_scale: ZoomScale) -> Self {
        self.zoom_scale = zoom_scale;
        self
    }

    /// Copy with every field clamped into its accepted range.
    #[must_use]
    pub fn normalized(&self) -> Self {
        self.clone()
            .with_scroll_duration_ms(self.scroll_duration_ms)
            .with_vertical_scroll_rate(self.vertical_scroll_rate)
            .with_horizontal_scroll_rate(self.horizontal_scroll_rate)
            .with_zoom_duration_ms(self.zoom_duration_ms)
    }

    /// Report every out-of-range field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut errors = Vec::new();

        if self.scroll_duration_ms > MAX_DURATION_MS {
            errors.push(format!(
                "scroll_duration_ms must be <= {MAX_DURATION_MS}, got {}",
                self.scroll_duration_ms
            ));
        }
        if self.zoom_duration_ms > MAX_DURATION_MS {
            errors.push(format!(
                "zoom_duration_ms must be <= {MAX_DURATION_MS}, got {}",
                self.zoom_duration_ms
            ));
        }
        let rates = [
            ("vertical_scroll_rate", self.vertical_scroll_rate),
            ("horizontal_scroll_rate", self.horizontal_scroll_rate),
        ];
        for (name, rate) in rates {
            if !(MIN_RATE_PERCENT..=MAX_RATE_PERCENT).contains(&rate) {
                errors.push(format!(
                    "{name} must be in [{MIN_RATE_PERCENT}, {MAX_RATE_PERCENT}], got {rate}"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Validation(errors))
        }
    }

    /// Scroll animation length.
    #[must_use]
    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.scroll_duration_ms))
    }

    /// Zoom animation length.
    #[must_use]
    pub fn zoom_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.zoom_duration_ms))
    }

    /// Vertical pixel distance for a wheel delta.
    #[must_use]
    pub fn vertical_distance(&self, delta: f64) -> f64 {
        delta * f64::from(self.vertical_scroll_rate) / 100.0
    }

    /// Horizontal pixel distance for a wheel delta. Inverted relative to
    /// vertical so that wheel-down moves the viewport right.
    #[must_use]
    pub fn horizontal_distance(&self, delta: f64) -> f64 {
        delta * f64::from(self.horizontal_scroll_rate) / -100.0
    }

    /// Whether the gesture is enabled. Vertical scrolling always is.
    #[must_use]
    pub fn allows(&self, gesture: WheelGesture) -> bool {
        match gesture {
            WheelGesture::Zoom { .. } => self.zooming_enabled,
            WheelGesture::HorizontalScroll => self.horizontal_scrolling_enabled,
            WheelGesture::VerticalScroll => true,
        }
    }
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[cfg(feature = "settings-file")]
impl WheelSettings {
    /// Load from a TOML string. Out-of-range values are clamped.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s).map_err(SettingsError::Toml)?;
        Ok(settings.normalized())
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(SettingsError::Io)?;
        let settings = Self::from_toml_str(&content)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: crate::logging::TARGET_SETTINGS,
            path = %path.display(),
            format = "toml",
            "settings loaded"
        );
        Ok(settings)
    }

    /// Load from a JSON string. Out-of-range values are clamped.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(s).map_err(SettingsError::Json)?;
        Ok(settings.normalized())
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(SettingsError::Io)?;
        let settings = Self::from_json_str(&content)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: crate::logging::TARGET_SETTINGS,
            path = %path.display(),
            format = "json",
            "settings loaded"
        );
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading or validating settings.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error reading a file.
    #[cfg(feature = "settings-file")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "settings-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "settings-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "settings-file")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "settings-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "settings-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "settings-file")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "settings-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "settings-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
