//! Viewport controller: fit scale, zoom and scroll restoration.
//!
//! The page raster is displayed at `fit_scale * zoom` inside a scrollable
//! container. Whenever something changes the layout (page switch, zoom
//! change, container resize) the controller records a [`ScrollAnchor`]: a
//! normalized point of the page that should end up centered in the visible
//! area. The next layout pass consumes the anchor exactly once and turns it
//! into a scroll position for the host to apply.
//!
//! Nothing happens until the layout is ready, meaning the container has been
//! measured and the current page raster has loaded.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EditorConfig;
use crate::geometry::RasterSize;
use crate::interaction::ScrollExtent;

/// Measured size of the scroll container in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// How the page is fitted into the container before zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Whole page visible.
    #[default]
    Contain,
    /// Page width fills the container (more context when editing a crop).
    Width,
}

/// A normalized page point (0 to 1 on both axes) to center in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollAnchor {
    pub x: f64,
    pub y: f64,
}

impl ScrollAnchor {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: unit(x),
            y: unit(y),
        }
    }

    /// Horizontally centered, scrolled to the top.
    pub fn top_center() -> Self {
        Self::new(0.5, 0.0)
    }
}

/// Scroll offsets of the container in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

/// Scale and pending anchor of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub fit_scale: f64,
    pub zoom: f64,
    pub scroll_anchor: Option<ScrollAnchor>,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutOutcome {
    /// Zoom chosen by the first-load heuristic, if it ran and changed zoom.
    pub default_zoom: Option<f64>,
    /// Scroll position the host must apply.
    pub scroll: Option<ScrollPosition>,
}

/// Owns fit scale, zoom and scroll state for one session.
#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    fit_mode: FitMode,
    container: Option<ContainerSize>,
    page: Option<RasterSize>,
    scroll: ScrollPosition,
    min_zoom: f64,
    max_zoom: f64,
    default_zoom_cap: f64,
    default_zoom_latched: bool,
}

impl ViewportController {
    pub fn new(fit_mode: FitMode, config: &EditorConfig) -> Self {
        Self {
            state: ViewportState {
                fit_scale: 1.0,
                zoom: 1.0,
                scroll_anchor: None,
            },
            fit_mode,
            container: None,
            page: None,
            scroll: ScrollPosition::default(),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            default_zoom_cap: config.default_zoom_cap,
            default_zoom_latched: false,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn fit_scale(&self) -> f64 {
        self.state.fit_scale
    }

    /// Effective CSS pixels per raster pixel.
    pub fn scale(&self) -> f64 {
        self.state.fit_scale * self.state.zoom
    }

    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }

    pub fn pending_anchor(&self) -> Option<ScrollAnchor> {
        self.state.scroll_anchor
    }

    /// Container measured and page raster loaded.
    pub fn is_ready(&self) -> bool {
        self.container.is_some() && self.page.is_some()
    }

    /// Displayed page size in CSS pixels.
    pub fn content_size(&self) -> Option<(f64, f64)> {
        let page = self.page?;
        let scale = self.scale();
        Some((page.width as f64 * scale, page.height as f64 * scale))
    }

    /// Record the container size.
    ///
    /// A resize of a ready layout keeps the current view center.
    pub fn set_container(&mut self, size: ContainerSize) {
        if !size.is_measurable() {
            return;
        }
        if self.container == Some(size) {
            return;
        }
        self.request_center_anchor();
        self.container = Some(size);
        self.recompute_fit();
    }

    /// Forget the current raster and queue `anchor` for the next page.
    pub fn begin_page(&mut self, anchor: ScrollAnchor) {
        self.page = None;
        self.state.scroll_anchor = Some(anchor);
    }

    /// The current page raster finished loading.
    pub fn page_loaded(&mut self, size: RasterSize) {
        if size.is_empty() {
            return;
        }
        self.page = Some(size);
        self.recompute_fit();
    }

    /// Queue an anchor unless one is already pending.
    pub fn request_anchor(&mut self, anchor: ScrollAnchor) {
        if self.state.scroll_anchor.is_none() {
            self.state.scroll_anchor = Some(anchor);
        }
    }

    /// Anchor for a page transition: keep the horizontal view center, land
    /// at the top when moving forward and at the bottom when moving back.
    pub fn navigation_anchor(&self, forward: bool) -> ScrollAnchor {
        let x = self.view_center().map_or(0.5, |c| c.x);
        ScrollAnchor::new(x, if forward { 0.0 } else { 1.0 })
    }

    /// The page point currently at the center of the visible area.
    pub fn view_center(&self) -> Option<ScrollAnchor> {
        let container = self.container?;
        let (content_w, content_h) = self.content_size()?;
        if content_w <= 0.0 || content_h <= 0.0 {
            return None;
        }
        Some(ScrollAnchor::new(
            (self.scroll.left + container.width / 2.0) / content_w,
            (self.scroll.top + container.height / 2.0) / content_h,
        ))
    }

    /// Set the zoom multiplier, keeping the view center in place.
    ///
    /// Returns `true` if the zoom changed. Non-finite or non-positive input
    /// is ignored.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() || zoom <= 0.0 {
            return false;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (clamped - self.state.zoom).abs() < f64::EPSILON {
            return false;
        }
        self.request_center_anchor();
        self.state.zoom = clamped;
        true
    }

    /// Remember the host's current scroll offsets.
    pub fn record_scroll(&mut self, left: f64, top: f64) {
        if left.is_finite() && top.is_finite() {
            self.scroll = ScrollPosition { left, top };
        }
    }

    /// Pan by a delta, clamped to the scrollable range.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> Option<ScrollPosition> {
        if !self.is_ready() || !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        let next = self.clamp_scroll(self.scroll.left + dx, self.scroll.top + dy)?;
        self.scroll = next;
        Some(next)
    }

    /// Scroll geometry for wheel edge detection.
    pub fn scroll_extent(&self) -> Option<ScrollExtent> {
        let container = self.container?;
        let (_, content_h) = self.content_size()?;
        Some(ScrollExtent {
            scroll_top: self.scroll.top,
            client_height: container.height,
            scroll_height: content_h.max(container.height),
        })
    }

    /// Run a layout pass.
    ///
    /// On the first ready pass of the session the default zoom heuristic
    /// runs. A pending anchor is then consumed into a scroll position.
    pub fn resolve_layout(&mut self) -> LayoutOutcome {
        let mut outcome = LayoutOutcome::default();
        if !self.is_ready() {
            return outcome;
        }

        if !self.default_zoom_latched {
            self.default_zoom_latched = true;
            if let Some(zoom) = self.default_zoom() {
                if (zoom - self.state.zoom).abs() >= f64::EPSILON {
                    debug!(zoom, "applying width-fit default zoom");
                    self.state.zoom = zoom;
                    outcome.default_zoom = Some(zoom);
                }
            }
        }

        if let Some(anchor) = self.state.scroll_anchor.take() {
            outcome.scroll = self.scroll_for_anchor(anchor);
            if let Some(scroll) = outcome.scroll {
                self.scroll = scroll;
            }
        }

        outcome
    }

    fn request_center_anchor(&mut self) {
        if let Some(center) = self.view_center() {
            self.request_anchor(center);
        }
    }

    fn recompute_fit(&mut self) {
        let (container, page) = match (self.container, self.page) {
            (Some(c), Some(p)) => (c, p),
            _ => return,
        };
        let by_width = container.width / page.width as f64;
        let by_height = container.height / page.height as f64;
        self.state.fit_scale = match self.fit_mode {
            FitMode::Contain => by_width.min(by_height),
            FitMode::Width => by_width,
        };
    }

    /// Width-fit zoom for a page that is narrow relative to the container.
    ///
    /// When fitting by height leaves empty side margins, zoom in until the
    /// page fills the width, between 1x and the configured cap.
    fn default_zoom(&self) -> Option<f64> {
        if self.fit_mode != FitMode::Contain {
            return None;
        }
        let container = self.container?;
        let page = self.page?;
        let by_width = container.width / page.width as f64;
        let fit = self.state.fit_scale;
        if fit <= 0.0 || by_width <= fit {
            return None;
        }
        let zoom = (by_width / fit)
            .clamp(1.0, self.default_zoom_cap)
            .min(self.max_zoom);
        Some(zoom)
    }

    fn scroll_for_anchor(&self, anchor: ScrollAnchor) -> Option<ScrollPosition> {
        let container = self.container?;
        let (content_w, content_h) = self.content_size()?;
        self.clamp_scroll(
            anchor.x * content_w - container.width / 2.0,
            anchor.y * content_h - container.height / 2.0,
        )
    }

    fn clamp_scroll(&self, left: f64, top: f64) -> Option<ScrollPosition> {
        let container = self.container?;
        let (content_w, content_h) = self.content_size()?;
        let max_left = (content_w - container.width).max(0.0);
        let max_top = (content_h - container.height).max(0.0);
        Some(ScrollPosition {
            left: left.clamp(0.0, max_left),
            top: top.clamp(0.0, max_top),
        })
    }
}

#[inline]
fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.5
    } else {
        v.clamp(0.0, 1.0)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
