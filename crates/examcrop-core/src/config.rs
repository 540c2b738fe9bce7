//! Editor configuration.
//!
//! Every tunable constant of the editor lives here so a host can override it
//! from a plain JSON object. Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::geometry::MIN_SPAN;

/// Distance in CSS pixels from the top/bottom scroll edge that still counts
/// as "at the edge" for wheel page navigation.
pub const WHEEL_EDGE_THRESHOLD_PX: f64 = 10.0;

/// Minimum time between two wheel-driven page changes.
pub const WHEEL_THROTTLE_MS: f64 = 500.0;

/// Lifetime of the "question added" notification.
pub const NOTIFICATION_MS: f64 = 1500.0;

/// Tunable parameters of an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum selection span in normalized units (draw discard threshold and
    /// resize gap).
    pub min_span: f64,
    /// Wheel edge threshold in CSS pixels.
    pub wheel_edge_threshold_px: f64,
    /// Wheel navigation throttle window in milliseconds.
    pub wheel_throttle_ms: f64,
    /// Success notification lifetime in milliseconds.
    pub notification_ms: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Upper bound of the first-load width-fit zoom heuristic.
    pub default_zoom_cap: f64,
    /// Multiplier applied per zoom-in / zoom-out step.
    pub zoom_step: f64,
    /// Edge length of a resize handle in CSS pixels (also its hit tolerance).
    pub handle_size_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_span: MIN_SPAN,
            wheel_edge_threshold_px: WHEEL_EDGE_THRESHOLD_PX,
            wheel_throttle_ms: WHEEL_THROTTLE_MS,
            notification_ms: NOTIFICATION_MS,
            min_zoom: 0.1,
            max_zoom: 10.0,
            default_zoom_cap: 3.0,
            zoom_step: 1.2,
            handle_size_px: 10.0,
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that all values are finite and their ranges are coherent.
    pub fn validate(&self) -> Result<(), EditorError> {
        let fields = [
            ("min_span", self.min_span),
            ("wheel_edge_threshold_px", self.wheel_edge_threshold_px),
            ("wheel_throttle_ms", self.wheel_throttle_ms),
            ("notification_ms", self.notification_ms),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("default_zoom_cap", self.default_zoom_cap),
            ("zoom_step", self.zoom_step),
            ("handle_size_px", self.handle_size_px),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EditorError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.min_span <= 0.0 || self.min_span >= 500.0 {
            return Err(EditorError::InvalidConfig(format!(
                "min_span must be in (0, 500), got {}",
                self.min_span
            )));
        }
        if self.min_zoom <= 0.0 {
            return Err(EditorError::InvalidConfig(
                "min_zoom must be positive".to_string(),
            ));
        }
        if self.max_zoom < self.min_zoom {
            return Err(EditorError::InvalidConfig(format!(
                "max_zoom ({}) is below min_zoom ({})",
                self.max_zoom, self.min_zoom
            )));
        }
        if self.default_zoom_cap < 1.0 {
            return Err(EditorError::InvalidConfig(format!(
                "default_zoom_cap must be at least 1.0, got {}",
                self.default_zoom_cap
            )));
        }
        if self.zoom_step <= 1.0 {
            return Err(EditorError::InvalidConfig(format!(
                "zoom_step must be greater than 1.0, got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }
}
