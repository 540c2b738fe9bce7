//! Pointer hit testing against the selection and its handles.

use crate::geometry::{NormalizedPoint, NormalizedRect, ResizeHandle};

use super::mode::{HitTarget, Tool};

/// Half-extent of a handle's hit box in normalized units, per axis.
///
/// Handles have a fixed on-screen size, so their normalized extent depends
/// on how large the page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleTolerance {
    pub x: f64,
    pub y: f64,
}

impl HandleTolerance {
    /// Tolerance for a handle `handle_px` CSS pixels wide over a page
    /// displayed at `display_width` x `display_height` CSS pixels.
    pub fn from_display(handle_px: f64, display_width: f64, display_height: f64) -> Self {
        let half = handle_px / 2.0;
        let per_axis = |extent: f64| {
            if extent > 0.0 && extent.is_finite() {
                half / extent * 1000.0
            } else {
                0.0
            }
        };
        Self {
            x: per_axis(display_width),
            y: per_axis(display_height),
        }
    }
}

/// Decide what a pointer at `point` would grab.
///
/// With the pan tool everything is background. Handles win over the body and
/// corners win over edge midpoints.
pub fn hit_test(
    tool: Tool,
    selection: Option<&NormalizedRect>,
    point: NormalizedPoint,
    tolerance: HandleTolerance,
) -> HitTarget {
    let rect = match (tool, selection) {
        (Tool::Select, Some(rect)) => rect,
        _ => return HitTarget::Background,
    };

    for handle in ResizeHandle::ALL {
        let anchor = handle.position(rect);
        if (point.x - anchor.x).abs() <= tolerance.x && (point.y - anchor.y).abs() <= tolerance.y {
            return HitTarget::Handle(handle);
        }
    }

    if rect.contains(point) {
        HitTarget::Selection
    } else {
        HitTarget::Background
    }
}
