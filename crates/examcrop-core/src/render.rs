//! Layered rendering bookkeeping.
//!
//! The editor paints two stacked canvases of the same intrinsic size as the
//! page raster:
//!
//! - the **base** layer holds the decoded page image. Redrawing it means
//!   re-blitting a multi-megapixel raster, so it is only invalidated when the
//!   page changes or finishes loading.
//! - the **overlay** layer holds the selection outline and its handles. It is
//!   invalidated on every selection change and redrawn on every pointer-move
//!   frame of a drag.
//!
//! The core never paints; it tells the host which layers are stale and hands
//! over the overlay geometry in raster pixels.

use serde::Serialize;

use crate::geometry::{
    to_raster_rect, NormalizedRect, PixelRect, RasterSize, ResizeHandle, NORMALIZED_MAX,
};
use crate::interaction::Tool;

/// Dirty flags for the two render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLayers {
    base_dirty: bool,
    overlay_dirty: bool,
}

impl Default for RenderLayers {
    fn default() -> Self {
        Self {
            base_dirty: true,
            overlay_dirty: true,
        }
    }
}

impl RenderLayers {
    /// Both layers start dirty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate_base(&mut self) {
        self.base_dirty = true;
    }

    pub fn invalidate_overlay(&mut self) {
        self.overlay_dirty = true;
    }

    pub fn is_base_dirty(&self) -> bool {
        self.base_dirty
    }

    pub fn is_overlay_dirty(&self) -> bool {
        self.overlay_dirty
    }

    /// Consume both flags, returning `(base, overlay)`.
    pub fn take(&mut self) -> (bool, bool) {
        let flags = (self.base_dirty, self.overlay_dirty);
        self.base_dirty = false;
        self.overlay_dirty = false;
        flags
    }
}

/// A handle square in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleBox {
    pub handle: ResizeHandle,
    pub rect: PixelRect,
}

/// Everything the overlay layer draws, in raster pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayGeometry {
    pub selection: PixelRect,
    pub handles: Vec<HandleBox>,
}

/// What the host has to repaint this frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Frame {
    pub redraw_base: bool,
    pub redraw_overlay: bool,
    /// Overlay contents when `redraw_overlay` is set; `None` clears it.
    pub overlay: Option<OverlayGeometry>,
}

/// Compute overlay geometry for a selection.
///
/// `handle_raster_px` is the handle edge length in raster pixels (the
/// on-screen handle size divided by the display scale). Handles are only
/// produced for the select tool.
pub fn overlay_geometry(
    selection: Option<&NormalizedRect>,
    raster: RasterSize,
    tool: Tool,
    handle_raster_px: f64,
) -> Option<OverlayGeometry> {
    let rect = selection?;
    if raster.is_empty() {
        return None;
    }

    let sx = raster.width as f64 / NORMALIZED_MAX;
    let sy = raster.height as f64 / NORMALIZED_MAX;
    let handles = match tool {
        Tool::Select => ResizeHandle::ALL
            .iter()
            .map(|&handle| {
                let anchor = handle.position(rect);
                HandleBox {
                    handle,
                    rect: PixelRect {
                        x: anchor.x * sx - handle_raster_px / 2.0,
                        y: anchor.y * sy - handle_raster_px / 2.0,
                        width: handle_raster_px,
                        height: handle_raster_px,
                    },
                }
            })
            .collect(),
        Tool::Pan => Vec::new(),
    };

    Some(OverlayGeometry {
        selection: to_raster_rect(rect, raster),
        handles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_start_dirty_and_take_clears() {
        let mut layers = RenderLayers::new();
        assert_eq!(layers.take(), (true, true));
        assert_eq!(layers.take(), (false, false));
    }

    #[test]
    fn test_layers_invalidate_independently() {
        let mut layers = RenderLayers::new();
        layers.take();

        layers.invalidate_overlay();
        assert!(!layers.is_base_dirty());
        assert!(layers.is_overlay_dirty());
        assert_eq!(layers.take(), (false, true));

        layers.invalidate_base();
        assert_eq!(layers.take(), (true, false));
    }

    #[test]
    fn test_overlay_geometry_select_tool() {
        let rect = NormalizedRect::new(100.0, 200.0, 500.0, 600.0);
        let geo = overlay_geometry(Some(&rect), RasterSize::new(2000, 1000), Tool::Select, 20.0)
            .unwrap();

        assert_eq!(
            geo.selection,
            PixelRect {
                x: 200.0,
                y: 200.0,
                width: 800.0,
                height: 400.0
            }
        );
        assert_eq!(geo.handles.len(), 8);

        let nw = geo
            .handles
            .iter()
            .find(|h| h.handle == ResizeHandle::NW)
            .unwrap();
        assert_eq!(nw.rect.x, 190.0);
        assert_eq!(nw.rect.y, 190.0);
        assert_eq!(nw.rect.width, 20.0);
    }

    #[test]
    fn test_overlay_geometry_pan_tool_has_no_handles() {
        let rect = NormalizedRect::new(100.0, 200.0, 500.0, 600.0);
        let geo =
            overlay_geometry(Some(&rect), RasterSize::new(1000, 1000), Tool::Pan, 10.0).unwrap();
        assert!(geo.handles.is_empty());
    }

    #[test]
    fn test_overlay_geometry_without_selection() {
        assert!(overlay_geometry(None, RasterSize::new(1000, 1000), Tool::Select, 10.0).is_none());
        let rect = NormalizedRect::full_page();
        assert!(overlay_geometry(Some(&rect), RasterSize::new(0, 0), Tool::Select, 10.0).is_none());
    }
}
