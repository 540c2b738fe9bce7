//! Scroll-wheel page navigation.
//!
//! Scrolling past the top or bottom edge of the current page turns the page
//! instead. One fast wheel gesture produces a burst of events, so page turns
//! are throttled: after a turn, vertical wheel input is swallowed until the
//! throttle window has elapsed.

use tracing::debug;

/// Scroll geometry of the viewport container at the time of a wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollExtent {
    pub fn at_top(&self, threshold: f64) -> bool {
        self.scroll_top <= threshold
    }

    pub fn at_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - threshold
    }
}

/// One wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_y: f64,
    /// Ctrl/Cmd held: the user intends to zoom.
    pub zoom_modifier: bool,
    pub now_ms: f64,
}

/// Outcome of a wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelAction {
    /// Let the browser scroll natively.
    Scroll,
    /// Swallow the event: a page turn happened too recently.
    Throttled,
    PreviousPage,
    NextPage,
    ZoomIn,
    ZoomOut,
}

impl WheelAction {
    /// Whether the host must call `preventDefault()` on the event.
    pub fn consumes_event(self) -> bool {
        self != WheelAction::Scroll
    }
}

/// Throttled edge detector for wheel-driven page turns.
#[derive(Debug, Clone)]
pub struct WheelNavigator {
    edge_threshold_px: f64,
    throttle_ms: f64,
    last_turn_ms: Option<f64>,
}

impl WheelNavigator {
    pub fn new(edge_threshold_px: f64, throttle_ms: f64) -> Self {
        Self {
            edge_threshold_px,
            throttle_ms,
            last_turn_ms: None,
        }
    }

    /// Classify a wheel event.
    ///
    /// `has_previous` / `has_next` say whether a page exists in each
    /// direction; at the first or last page the wheel scrolls natively.
    pub fn on_wheel(
        &mut self,
        input: WheelInput,
        extent: ScrollExtent,
        has_previous: bool,
        has_next: bool,
    ) -> WheelAction {
        if input.zoom_modifier {
            return if input.delta_y < 0.0 {
                WheelAction::ZoomIn
            } else if input.delta_y > 0.0 {
                WheelAction::ZoomOut
            } else {
                WheelAction::Scroll
            };
        }

        if input.delta_y == 0.0 || !input.delta_y.is_finite() {
            return WheelAction::Scroll;
        }

        if self.is_throttled(input.now_ms) {
            return WheelAction::Throttled;
        }

        let threshold = self.edge_threshold_px;
        let action = if input.delta_y > 0.0 && has_next && extent.at_bottom(threshold) {
            WheelAction::NextPage
        } else if input.delta_y < 0.0 && has_previous && extent.at_top(threshold) {
            WheelAction::PreviousPage
        } else {
            return WheelAction::Scroll;
        };

        debug!(?action, at = input.now_ms, "wheel page turn");
        self.last_turn_ms = Some(input.now_ms);
        action
    }

    fn is_throttled(&self, now_ms: f64) -> bool {
        self.last_turn_ms
            .is_some_and(|last| now_ms - last < self.throttle_ms)
    }
}
