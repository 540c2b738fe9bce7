//! The pointer interaction state machine.
//!
//! The machine owns the current [`InteractionMode`] and the gesture-scoped
//! trackers (drag origin, selection snapshot, last pan position, captured
//! pointer). Trackers are reset at the start and end of every gesture so a
//! stale snapshot can never leak into the next one.
//!
//! The selection itself belongs to the session; it is passed in by mutable
//! reference on each event.

use tracing::{debug, trace};

use crate::error::CaptureError;
use crate::geometry::{drag_rect, is_committable, DevicePoint, NormalizedPoint, NormalizedRect};

use super::mode::{HitTarget, InteractionMode, Tool};

/// Pointer capture on the interactive surface.
///
/// Implementations report failures, but the machine always swallows them:
/// capture races are environmental, not logic errors.
pub trait PointerCapture {
    fn capture_pointer(&mut self, pointer_id: i32) -> Result<(), CaptureError>;
    fn release_pointer(&mut self, pointer_id: i32) -> Result<(), CaptureError>;
}

/// One pointer event, in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer_id: i32,
    /// Client position, used for panning.
    pub device: DevicePoint,
    /// Page position, used for selection geometry.
    pub normalized: NormalizedPoint,
}

/// What the session has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEffect {
    /// Nothing changed.
    None,
    /// The selection was created, edited or discarded.
    SelectionChanged,
    /// Scroll the viewport by this many CSS pixels.
    ScrollBy { dx: f64, dy: f64 },
}

/// Pointer-driven state machine for one editor session.
#[derive(Debug)]
pub struct InteractionMachine {
    mode: InteractionMode,
    min_span: f64,
    active_pointer: Option<i32>,
    drag_start: Option<NormalizedPoint>,
    initial_selection: Option<NormalizedRect>,
    pan_last: Option<DevicePoint>,
}

impl InteractionMachine {
    pub fn new(min_span: f64) -> Self {
        Self {
            mode: InteractionMode::None,
            min_span,
            active_pointer: None,
            drag_start: None,
            initial_selection: None,
            pan_last: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !self.mode.is_idle()
    }

    /// Start a gesture.
    ///
    /// A second pointer going down while a gesture is active is ignored.
    pub fn pointer_down<C: PointerCapture + ?Sized>(
        &mut self,
        tool: Tool,
        target: HitTarget,
        sample: &PointerSample,
        selection: &mut Option<NormalizedRect>,
        capture: &mut C,
    ) -> PointerEffect {
        if self.is_active() {
            trace!(pointer = sample.pointer_id, "ignoring pointer-down during gesture");
            return PointerEffect::None;
        }

        self.reset_trackers();

        let mut effect = PointerEffect::None;
        self.mode = match tool {
            Tool::Pan => {
                self.pan_last = Some(sample.device);
                InteractionMode::Panning
            }
            Tool::Select => match (target, *selection) {
                (HitTarget::Handle(handle), Some(rect)) => {
                    self.begin_drag(sample.normalized, rect);
                    InteractionMode::Resizing(handle)
                }
                (HitTarget::Selection, Some(rect)) => {
                    self.begin_drag(sample.normalized, rect);
                    InteractionMode::Moving
                }
                _ => {
                    let seed = NormalizedRect::from_corners(sample.normalized, sample.normalized);
                    self.begin_drag(sample.normalized, seed);
                    *selection = Some(seed);
                    effect = PointerEffect::SelectionChanged;
                    InteractionMode::Drawing
                }
            },
        };

        self.active_pointer = Some(sample.pointer_id);
        if let Err(err) = capture.capture_pointer(sample.pointer_id) {
            debug!(pointer = sample.pointer_id, %err, "pointer capture failed");
        }

        debug!(mode = self.mode.name(), pointer = sample.pointer_id, "gesture started");
        effect
    }

    /// Advance the active gesture.
    pub fn pointer_move(
        &mut self,
        sample: &PointerSample,
        selection: &mut Option<NormalizedRect>,
    ) -> PointerEffect {
        if self.active_pointer != Some(sample.pointer_id) {
            return PointerEffect::None;
        }

        if self.mode == InteractionMode::Panning {
            let last = match self.pan_last {
                Some(last) => last,
                None => return PointerEffect::None,
            };
            self.pan_last = Some(sample.device);
            // Content follows the pointer, so the scroll offset moves the other way.
            return PointerEffect::ScrollBy {
                dx: last.x - sample.device.x,
                dy: last.y - sample.device.y,
            };
        }

        let tracked = (self.mode.drag_op(), self.drag_start, self.initial_selection);
        let (op, start, initial) = match tracked {
            (Some(op), Some(start), Some(initial)) => (op, start, initial),
            _ => return PointerEffect::None,
        };

        let next = drag_rect(op, start, sample.normalized, &initial, self.min_span);
        trace!(mode = self.mode.name(), ?next, "drag");
        *selection = Some(next);
        PointerEffect::SelectionChanged
    }

    /// Finish the active gesture and return to idle.
    ///
    /// A draw that ends below the minimum span discards the selection.
    pub fn pointer_up<C: PointerCapture + ?Sized>(
        &mut self,
        pointer_id: i32,
        selection: &mut Option<NormalizedRect>,
        capture: &mut C,
    ) -> PointerEffect {
        if self.active_pointer != Some(pointer_id) {
            // Still release: the host may hold a capture we no longer track.
            release(capture, pointer_id);
            return PointerEffect::None;
        }

        let mut effect = PointerEffect::None;
        if self.mode == InteractionMode::Drawing {
            let keep = selection
                .as_ref()
                .is_some_and(|rect| is_committable(rect, self.min_span));
            if !keep {
                debug!("draw below minimum span discarded");
                *selection = None;
                effect = PointerEffect::SelectionChanged;
            }
        }

        debug!(mode = self.mode.name(), pointer = pointer_id, "gesture finished");
        self.finish(capture);
        effect
    }

    /// Abandon any gesture without applying commit rules.
    ///
    /// The selection keeps whatever the last move produced; callers that
    /// close the editor or change page clear it themselves.
    pub fn cancel<C: PointerCapture + ?Sized>(&mut self, capture: &mut C) {
        if self.is_active() {
            debug!(mode = self.mode.name(), "gesture cancelled");
        }
        self.finish(capture);
    }

    fn begin_drag(&mut self, start: NormalizedPoint, snapshot: NormalizedRect) {
        self.drag_start = Some(start);
        self.initial_selection = Some(snapshot);
    }

    fn finish<C: PointerCapture + ?Sized>(&mut self, capture: &mut C) {
        if let Some(pointer_id) = self.active_pointer {
            release(capture, pointer_id);
        }
        self.mode = InteractionMode::None;
        self.reset_trackers();
    }

    fn reset_trackers(&mut self) {
        self.active_pointer = None;
        self.drag_start = None;
        self.initial_selection = None;
        self.pan_last = None;
    }
}

fn release<C: PointerCapture + ?Sized>(capture: &mut C, pointer_id: i32) {
    if let Err(err) = capture.release_pointer(pointer_id) {
        debug!(pointer = pointer_id, %err, "pointer release failed");
    }
}
