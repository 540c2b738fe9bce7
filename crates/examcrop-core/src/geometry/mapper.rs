//! Conversions between device (client) coordinates, raster pixels and
//! normalized page space.
//!
//! The raster element is usually displayed at a different size than its
//! intrinsic pixel dimensions (fit scale times zoom, CSS scaling, device
//! pixel ratio). Pointer positions are first mapped into intrinsic raster
//! pixels and then scaled into the normalized range.

use serde::{Deserialize, Serialize};

use super::rect::{NormalizedPoint, NormalizedRect};
use super::NORMALIZED_MAX;

/// A pointer position in client coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displayed bounds of the raster element, as reported by
/// `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds with a usable, non-zero area.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Intrinsic pixel dimensions of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rectangle in raster pixel space (fractional).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a client position into normalized page space.
///
/// Positions outside the element are clamped to the nearest page edge.
/// Unmeasured bounds or an empty raster map to the origin.
pub fn to_normalized(
    point: DevicePoint,
    bounds: &ElementBounds,
    raster: RasterSize,
) -> NormalizedPoint {
    if !bounds.is_measurable() || raster.is_empty() {
        return NormalizedPoint::default();
    }

    let raster_w = raster.width as f64;
    let raster_h = raster.height as f64;

    // CSS pixels -> intrinsic raster pixels
    let scale_x = raster_w / bounds.width;
    let scale_y = raster_h / bounds.height;
    let px = (point.x - bounds.left) * scale_x;
    let py = (point.y - bounds.top) * scale_y;

    NormalizedPoint::new(px / raster_w * NORMALIZED_MAX, py / raster_h * NORMALIZED_MAX).clamped()
}

/// Map a normalized point back to client coordinates over `bounds`.
pub fn to_device(point: NormalizedPoint, bounds: &ElementBounds) -> DevicePoint {
    DevicePoint {
        x: bounds.left + point.x / NORMALIZED_MAX * bounds.width,
        y: bounds.top + point.y / NORMALIZED_MAX * bounds.height,
    }
}

/// Map a normalized rectangle into intrinsic raster pixels.
pub fn to_raster_rect(rect: &NormalizedRect, raster: RasterSize) -> PixelRect {
    let sx = raster.width as f64 / NORMALIZED_MAX;
    let sy = raster.height as f64 / NORMALIZED_MAX;
    PixelRect {
        x: rect.xmin * sx,
        y: rect.ymin * sy,
        width: rect.width() * sx,
        height: rect.height() * sy,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: device -> normalized -> device returns the original point
        /// for any display scale between 0.1x and 10x.
        #[test]
        fn prop_round_trip_within_tolerance(
            raster_w in 100u32..=4000,
            raster_h in 100u32..=4000,
            scale in 0.1f64..=10.0,
            left in -500.0f64..=500.0,
            top in -500.0f64..=500.0,
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
        ) {
            let bounds = ElementBounds::new(
                left,
                top,
                raster_w as f64 * scale,
                raster_h as f64 * scale,
            );
            let raster = RasterSize::new(raster_w, raster_h);
            let original = DevicePoint::new(left + fx * bounds.width, top + fy * bounds.height);

            let normalized = to_normalized(original, &bounds, raster);
            let back = to_device(normalized, &bounds);

            prop_assert!((back.x - original.x).abs() < 1e-6, "x: {} vs {}", back.x, original.x);
            prop_assert!((back.y - original.y).abs() < 1e-6, "y: {} vs {}", back.y, original.y);
        }

        /// Property: mapping never leaves the normalized range.
        #[test]
        fn prop_always_in_range(
            x in -1.0e5f64..=1.0e5,
            y in -1.0e5f64..=1.0e5,
            width in 1.0f64..=5000.0,
            height in 1.0f64..=5000.0,
        ) {
            let bounds = ElementBounds::new(0.0, 0.0, width, height);
            let p = to_normalized(DevicePoint::new(x, y), &bounds, RasterSize::new(1000, 1000));
            prop_assert!((0.0..=1000.0).contains(&p.x));
            prop_assert!((0.0..=1000.0).contains(&p.y));
        }
    }
}
