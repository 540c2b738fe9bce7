//! Page-space geometry: normalized rectangles, coordinate mapping and the
//! drag rules that edit a selection.
//!
//! # Coordinate System
//!
//! - Page space is normalized to `0..=1000` on both axes, independent of the
//!   raster's pixel size, zoom or device pixel ratio
//! - Origin is the top-left corner of the page
//! - Device space is client (CSS pixel) coordinates as delivered by pointer
//!   events
//!
//! Everything in this module is pure and never fails: out-of-range input is
//! clamped into the page.

mod drag;
mod mapper;
mod rect;

pub use drag::{drag_rect, is_committable, DragOp, ResizeHandle};
pub use mapper::{
    to_device, to_normalized, to_raster_rect, DevicePoint, ElementBounds, PixelRect, RasterSize,
};
pub use rect::{NormalizedPoint, NormalizedRect};

/// Upper bound of the normalized coordinate range.
pub const NORMALIZED_MAX: f64 = 1000.0;

/// Minimum width and height of a committed selection, in normalized units
/// (1% of the page dimension). Also the minimum gap kept between opposite
/// edges while resizing.
pub const MIN_SPAN: f64 = 10.0;

/// Clamp a coordinate into `0..=NORMALIZED_MAX`. NaN maps to 0.
#[inline]
pub(crate) fn clamp_coord(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, NORMALIZED_MAX)
    }
}
