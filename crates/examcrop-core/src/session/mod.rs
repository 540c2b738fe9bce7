//! Page/session controller.
//!
//! A [`Session`] is one opening of the crop editor over a multi-page
//! document. It owns the selection, the interaction machine, the viewport
//! controller and the render-layer flags, and it talks to the host
//! application exclusively through the [`EditorHost`] trait given at
//! construction.
//!
//! All methods are synchronous and are expected to be called from a single
//! UI event loop. Time is passed in as host timestamps (`now_ms`).
//!
//! ## Workflows
//!
//! - **Add mode** is continuous: confirming hands the selection to the host,
//!   clears it, shows a short notification and keeps the editor open.
//! - **Edit mode** is single-shot: the editor opens on the seeded page with
//!   the existing crop selected, and confirming closes it.

mod notification;
mod page;

pub use notification::Notification;
pub use page::Page;

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::geometry::{
    is_committable, to_normalized, DevicePoint, ElementBounds, NormalizedRect, NORMALIZED_MAX,
};
use crate::interaction::{
    hit_test, key_command, HandleTolerance, HitTarget, InteractionMachine, InteractionMode,
    KeyCommand, KeyModifiers, PointerCapture, PointerEffect, PointerSample, ScrollExtent, Tool,
    WheelAction, WheelInput, WheelNavigator,
};
use crate::render::{overlay_geometry, Frame, RenderLayers};
use crate::viewport::{ContainerSize, FitMode, ScrollAnchor, ScrollPosition, ViewportController};

/// Message shown after a successful confirm in add mode.
pub const QUESTION_ADDED_MESSAGE: &str = "Question added";

/// Callbacks into the host application.
///
/// Pointer capture is part of the host contract: the host owns the DOM
/// element the gesture is captured on.
pub trait EditorHost: PointerCapture {
    /// A selection was committed on the page at `page` (position in the
    /// session's page sequence).
    fn on_confirm(&mut self, page: usize, rect: NormalizedRect);

    /// The editor wants to close.
    fn on_close(&mut self);

    /// The selection appeared or disappeared.
    fn on_selection_change(&mut self, _has_selection: bool) {}

    /// The active tool changed.
    fn on_tool_change(&mut self, _tool: Tool) {}

    /// The zoom multiplier changed.
    fn on_zoom_change(&mut self, _zoom: f64) {}

    /// Scroll the viewport container to this position.
    fn apply_scroll(&mut self, _position: ScrollPosition) {}
}

/// An existing crop to reopen for editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditSeed {
    /// Position of the target page in the page sequence.
    pub page: usize,
    pub rect: NormalizedRect,
}

/// How the editor was opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionMode {
    /// Continuous cropping, starting at `start_page`.
    Add { start_page: usize },
    /// Single-shot edit of an existing crop.
    Edit(EditSeed),
}

impl SessionMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, SessionMode::Edit(_))
    }
}

/// One open crop editor.
pub struct Session<H: EditorHost> {
    config: EditorConfig,
    pages: Vec<Page>,
    current: usize,
    mode: SessionMode,
    tool: Tool,
    selection: Option<NormalizedRect>,
    reported_selection: bool,
    machine: InteractionMachine,
    viewport: ViewportController,
    wheel: WheelNavigator,
    layers: RenderLayers,
    notification: Option<Notification>,
    page_loaded: bool,
    closed: bool,
    host: H,
}

impl<H: EditorHost> Session<H> {
    /// Open the editor over `pages`.
    ///
    /// Fails only for host programming errors: an empty document or an
    /// invalid configuration. Out-of-range start pages are clamped.
    pub fn new(
        pages: Vec<Page>,
        mode: SessionMode,
        config: EditorConfig,
        host: H,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        if pages.is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        let last = pages.len() - 1;

        let (current, selection, fit_mode, anchor) = match mode {
            SessionMode::Add { start_page } => (
                start_page.min(last),
                None,
                FitMode::Contain,
                ScrollAnchor::top_center(),
            ),
            SessionMode::Edit(seed) => {
                let given = NormalizedRect::new(
                    seed.rect.xmin,
                    seed.rect.ymin,
                    seed.rect.xmax,
                    seed.rect.ymax,
                );
                let rect = given.with_min_span(config.min_span);
                if rect != given {
                    debug!(?given, widened = ?rect, "edit seed below minimum span");
                }
                let center = rect.center();
                (
                    seed.page.min(last),
                    Some(rect),
                    FitMode::Width,
                    ScrollAnchor::new(center.x / NORMALIZED_MAX, center.y / NORMALIZED_MAX),
                )
            }
        };

        let requested = match mode {
            SessionMode::Add { start_page } => start_page,
            SessionMode::Edit(seed) => seed.page,
        };
        if requested != current {
            warn!(requested, clamped = current, "start page out of range");
        }

        let mut viewport = ViewportController::new(fit_mode, &config);
        viewport.begin_page(anchor);

        info!(
            pages = pages.len(),
            page = current,
            edit = mode.is_edit(),
            "crop session opened"
        );

        let mut session = Self {
            machine: InteractionMachine::new(config.min_span),
            wheel: WheelNavigator::new(config.wheel_edge_threshold_px, config.wheel_throttle_ms),
            config,
            pages,
            current,
            mode,
            tool: Tool::Select,
            selection,
            reported_selection: false,
            viewport,
            layers: RenderLayers::new(),
            notification: None,
            page_loaded: false,
            closed: false,
            host,
        };
        session.report_selection();
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Position of the active page in the page sequence.
    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page(&self) -> &Page {
        &self.pages[self.current]
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn selection(&self) -> Option<NormalizedRect> {
        self.selection
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.machine.mode()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_page_loaded(&self) -> bool {
        self.page_loaded
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Pointer pressed over the page element displayed at `bounds`.
    pub fn pointer_down(&mut self, pointer_id: i32, client: DevicePoint, bounds: ElementBounds) {
        let sample = match self.sample(pointer_id, client, &bounds) {
            Some(sample) => sample,
            None => return,
        };
        let target = self.hit(&sample, &bounds);
        let effect = self.machine.pointer_down(
            self.tool,
            target,
            &sample,
            &mut self.selection,
            &mut self.host,
        );
        self.apply_effect(effect);
    }

    /// Pointer moved. Only the pointer driving the current gesture counts.
    pub fn pointer_move(&mut self, pointer_id: i32, client: DevicePoint, bounds: ElementBounds) {
        if !self.machine.is_active() {
            return;
        }
        let sample = match self.sample(pointer_id, client, &bounds) {
            Some(sample) => sample,
            None => return,
        };
        let effect = self.machine.pointer_move(&sample, &mut self.selection);
        self.apply_effect(effect);
    }

    /// Pointer released or cancelled by the platform.
    pub fn pointer_up(&mut self, pointer_id: i32) {
        if self.closed {
            return;
        }
        let effect = self
            .machine
            .pointer_up(pointer_id, &mut self.selection, &mut self.host);
        self.apply_effect(effect);
    }

    /// CSS cursor for the pointer at `client`.
    pub fn cursor(&self, client: DevicePoint, bounds: ElementBounds) -> &'static str {
        match self.machine.mode() {
            InteractionMode::Panning => "grabbing",
            InteractionMode::Drawing => "crosshair",
            InteractionMode::Moving => "move",
            InteractionMode::Resizing(handle) => handle.cursor(),
            InteractionMode::None => match self.sample(0, client, &bounds) {
                Some(sample) => self.hit(&sample, &bounds).cursor(self.tool),
                None => "default",
            },
        }
    }

    // ------------------------------------------------------------------
    // Keyboard and wheel
    // ------------------------------------------------------------------

    /// Handle a global key press. Returns `true` if the key was consumed.
    pub fn key_down(
        &mut self,
        key: &str,
        modifiers: KeyModifiers,
        text_input_focused: bool,
        now_ms: f64,
    ) -> bool {
        if self.closed {
            return false;
        }
        let command = match key_command(key, modifiers, text_input_focused) {
            Some(command) => command,
            None => return false,
        };

        match command {
            KeyCommand::ToggleTool => self.set_tool(self.tool.toggled()),
            KeyCommand::SelectTool => self.set_tool(Tool::Select),
            KeyCommand::PanTool => self.set_tool(Tool::Pan),
            KeyCommand::PreviousPage => self.previous_page(),
            KeyCommand::NextPage => self.next_page(),
            KeyCommand::Close => self.close(),
            KeyCommand::Confirm => return self.confirm_selection(now_ms),
            KeyCommand::ZoomIn => self.zoom_in(),
            KeyCommand::ZoomOut => self.zoom_out(),
            KeyCommand::ResetZoom => self.reset_zoom(),
        }
        true
    }

    /// Handle a wheel event over the viewport. Returns `true` if the host
    /// must prevent the native scroll.
    pub fn wheel(&mut self, delta_y: f64, zoom_modifier: bool, now_ms: f64) -> bool {
        if self.closed {
            return false;
        }
        // Before layout there is no edge to detect, but zoom and the
        // page-turn throttle still apply.
        let (extent, laid_out) = match self.viewport.scroll_extent() {
            Some(extent) => (extent, true),
            None => (ScrollExtent::default(), false),
        };

        let input = WheelInput {
            delta_y,
            zoom_modifier,
            now_ms,
        };
        let has_previous = laid_out && self.current > 0;
        let has_next = laid_out && self.current + 1 < self.pages.len();
        let action = self.wheel.on_wheel(input, extent, has_previous, has_next);

        match action {
            WheelAction::NextPage => self.next_page(),
            WheelAction::PreviousPage => self.previous_page(),
            WheelAction::ZoomIn => self.zoom_in(),
            WheelAction::ZoomOut => self.zoom_out(),
            WheelAction::Scroll | WheelAction::Throttled => {}
        }
        action.consumes_event()
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// The scroll container was measured or resized.
    pub fn resize_container(&mut self, width: f64, height: f64) {
        if self.closed {
            return;
        }
        self.viewport.set_container(ContainerSize::new(width, height));
        self.layout();
    }

    /// The host scrolled the container (user scroll or our own write).
    pub fn scroll_changed(&mut self, left: f64, top: f64) {
        self.viewport.record_scroll(left, top);
    }

    /// The raster of the page at `index` finished decoding.
    ///
    /// Loads for pages that are no longer active are ignored.
    pub fn page_loaded(&mut self, index: usize) {
        if self.closed || index != self.current {
            debug!(index, current = self.current, "ignoring stale page load");
            return;
        }
        self.page_loaded = true;
        let raster = self.pages[self.current].raster_size();
        self.viewport.page_loaded(raster);
        self.layers.invalidate_base();
        self.layers.invalidate_overlay();
        self.layout();
    }

    /// Layers to repaint since the last frame, plus overlay contents.
    ///
    /// Nothing is reported until the page raster has loaded; the dirty flags
    /// are kept until then.
    pub fn take_frame(&mut self) -> Frame {
        if self.closed || !self.page_loaded {
            return Frame::default();
        }
        let (redraw_base, redraw_overlay) = self.layers.take();
        let overlay = if redraw_overlay {
            let scale = self.viewport.scale();
            let handle_px = if scale > 0.0 {
                self.config.handle_size_px / scale
            } else {
                self.config.handle_size_px
            };
            overlay_geometry(
                self.selection.as_ref(),
                self.page().raster_size(),
                self.tool,
                handle_px,
            )
        } else {
            None
        };
        Frame {
            redraw_base,
            redraw_overlay,
            overlay,
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Switch to the page at `index`, clamped to the document.
    ///
    /// The view keeps its horizontal position and lands at the top when
    /// moving forward or at the bottom when moving back. Any gesture is
    /// abandoned and the selection is cleared.
    pub fn go_to_page(&mut self, index: usize) {
        if self.closed {
            return;
        }
        let target = index.min(self.pages.len() - 1);
        if target == self.current {
            return;
        }

        let forward = target > self.current;
        let anchor = self.viewport.navigation_anchor(forward);
        debug!(from = self.current, to = target, ?anchor, "page change");

        self.machine.cancel(&mut self.host);
        self.selection = None;
        self.report_selection();

        self.current = target;
        self.page_loaded = false;
        self.viewport.begin_page(anchor);
        self.layers.invalidate_base();
        self.layers.invalidate_overlay();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current + 1);
    }

    pub fn previous_page(&mut self) {
        if self.current > 0 {
            self.go_to_page(self.current - 1);
        }
    }

    // ------------------------------------------------------------------
    // Lifted toolbar state
    // ------------------------------------------------------------------

    /// Change the active tool. An in-progress gesture is abandoned.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.closed || tool == self.tool {
            return;
        }
        self.abandon_gesture();
        self.tool = tool;
        self.layers.invalidate_overlay();
        self.host.on_tool_change(tool);
    }

    /// Set the zoom multiplier (clamped), keeping the view center.
    pub fn set_zoom(&mut self, zoom: f64) {
        if self.closed {
            return;
        }
        if self.viewport.set_zoom(zoom) {
            self.host.on_zoom_change(self.viewport.zoom());
            self.layers.invalidate_overlay();
            self.layout();
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.viewport.zoom() * self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.viewport.zoom() / self.config.zoom_step);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(1.0);
    }

    // ------------------------------------------------------------------
    // Commit and close
    // ------------------------------------------------------------------

    /// Commit the current selection to the host.
    ///
    /// Returns `false` (and does nothing) without a committable selection.
    /// In add mode the editor stays open and shows a notification; in edit
    /// mode it closes.
    pub fn confirm_selection(&mut self, now_ms: f64) -> bool {
        if self.closed {
            return false;
        }
        self.abandon_gesture();

        let rect = match self.selection {
            Some(rect) if is_committable(&rect, self.config.min_span) => rect,
            _ => return false,
        };

        info!(page = self.current, ?rect, "selection confirmed");
        self.host.on_confirm(self.current, rect);
        self.selection = None;
        self.layers.invalidate_overlay();
        self.report_selection();

        match self.mode {
            SessionMode::Add { .. } => {
                self.notification = Some(Notification::new(
                    QUESTION_ADDED_MESSAGE,
                    now_ms,
                    self.config.notification_ms,
                ));
            }
            SessionMode::Edit(_) => self.close(),
        }
        true
    }

    /// Close the editor, abandoning any gesture. Later events are ignored.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.machine.cancel(&mut self.host);
        self.selection = None;
        self.report_selection();
        self.closed = true;
        info!("crop session closed");
        self.host.on_close();
    }

    /// Dismiss the notification once it has expired.
    ///
    /// Safe to call after close.
    pub fn tick(&mut self, now_ms: f64) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now_ms))
        {
            self.notification = None;
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn sample(
        &self,
        pointer_id: i32,
        client: DevicePoint,
        bounds: &ElementBounds,
    ) -> Option<PointerSample> {
        if self.closed || !self.page_loaded {
            return None;
        }
        Some(PointerSample {
            pointer_id,
            device: client,
            normalized: to_normalized(client, bounds, self.page().raster_size()),
        })
    }

    fn hit(&self, sample: &PointerSample, bounds: &ElementBounds) -> HitTarget {
        let tolerance =
            HandleTolerance::from_display(self.config.handle_size_px, bounds.width, bounds.height);
        hit_test(
            self.tool,
            self.selection.as_ref(),
            sample.normalized,
            tolerance,
        )
    }

    fn apply_effect(&mut self, effect: PointerEffect) {
        match effect {
            PointerEffect::None => {}
            PointerEffect::SelectionChanged => {
                self.layers.invalidate_overlay();
                self.report_selection();
            }
            PointerEffect::ScrollBy { dx, dy } => {
                if let Some(position) = self.viewport.scroll_by(dx, dy) {
                    self.host.apply_scroll(position);
                }
            }
        }
    }

    /// Cancel an active gesture and drop a selection too small to keep.
    fn abandon_gesture(&mut self) {
        if !self.machine.is_active() {
            return;
        }
        self.machine.cancel(&mut self.host);
        if self
            .selection
            .is_some_and(|rect| !is_committable(&rect, self.config.min_span))
        {
            self.selection = None;
        }
        self.layers.invalidate_overlay();
        self.report_selection();
    }

    fn layout(&mut self) {
        let outcome = self.viewport.resolve_layout();
        if let Some(zoom) = outcome.default_zoom {
            self.host.on_zoom_change(zoom);
            self.layers.invalidate_overlay();
        }
        if let Some(position) = outcome.scroll {
            self.host.apply_scroll(position);
        }
    }

    fn report_selection(&mut self) {
        let has = self.selection.is_some();
        if has != self.reported_selection {
            self.reported_selection = has;
            self.host.on_selection_change(has);
        }
    }
}
