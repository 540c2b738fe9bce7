//! Selection drag rules.
//!
//! A drag is described by the point where it started, the current pointer
//! point and a snapshot of the selection at drag start. Each frame recomputes
//! the selection from those three values rather than accumulating deltas, so
//! rounding never drifts and a drag back to the start point restores the
//! snapshot exactly.

use serde::{Deserialize, Serialize};

use super::rect::{NormalizedPoint, NormalizedRect};
use super::{clamp_coord, NORMALIZED_MAX};

/// One of the eight resize handles, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NW,
    NE,
    SW,
    SE,
}

impl ResizeHandle {
    /// All handles, corners first (corners win hit-test ties).
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SW,
        ResizeHandle::SE,
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
    ];

    #[inline]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::NW | Self::NE)
    }

    #[inline]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::SW | Self::SE)
    }

    #[inline]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    #[inline]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    /// Anchor of the handle on `rect`.
    pub fn position(self, rect: &NormalizedRect) -> NormalizedPoint {
        let c = rect.center();
        let x = if self.moves_left() {
            rect.xmin
        } else if self.moves_right() {
            rect.xmax
        } else {
            c.x
        };
        let y = if self.moves_top() {
            rect.ymin
        } else if self.moves_bottom() {
            rect.ymax
        } else {
            c.y
        };
        NormalizedPoint::new(x, y)
    }

    /// CSS cursor name for hovering this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::NW | Self::SE => "nwse-resize",
            Self::NE | Self::SW => "nesw-resize",
        }
    }
}

/// The geometric operation performed by an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOp {
    /// Rubber-band a new rectangle from the drag origin.
    Drawing,
    /// Translate the whole selection.
    Moving,
    /// Move the edges named by the handle.
    Resizing(ResizeHandle),
}

/// Compute the selection for the current drag frame.
///
/// `start` and `current` are normalized pointer positions (already clamped
/// by the coordinate mapper). `initial` is the selection when the drag began.
pub fn drag_rect(
    op: DragOp,
    start: NormalizedPoint,
    current: NormalizedPoint,
    initial: &NormalizedRect,
    min_span: f64,
) -> NormalizedRect {
    match op {
        DragOp::Drawing => NormalizedRect::from_corners(start, current),
        DragOp::Moving => move_rect(initial, current.x - start.x, current.y - start.y),
        DragOp::Resizing(handle) => resize_rect(
            handle,
            initial,
            current.x - start.x,
            current.y - start.y,
            min_span,
        ),
    }
}

/// Check whether a drawn rectangle is large enough to keep.
pub fn is_committable(rect: &NormalizedRect, min_span: f64) -> bool {
    rect.meets_min_span(min_span)
}

fn move_rect(initial: &NormalizedRect, dx: f64, dy: f64) -> NormalizedRect {
    let w = initial.width();
    let h = initial.height();

    // Clamp the origin per axis; the size never changes.
    let xmin = (initial.xmin + dx).clamp(0.0, (NORMALIZED_MAX - w).max(0.0));
    let ymin = (initial.ymin + dy).clamp(0.0, (NORMALIZED_MAX - h).max(0.0));

    NormalizedRect {
        xmin,
        ymin,
        xmax: xmin + w,
        ymax: ymin + h,
    }
}

fn resize_rect(
    handle: ResizeHandle,
    initial: &NormalizedRect,
    dx: f64,
    dy: f64,
    min_span: f64,
) -> NormalizedRect {
    let mut rect = *initial;

    // The gap bound is itself kept on the page, so a rect narrower than
    // `min_span` against a page edge cannot be pushed off it.
    if handle.moves_left() {
        rect.xmin = clamp_coord(initial.xmin + dx).min(clamp_coord(initial.xmax - min_span));
    }
    if handle.moves_right() {
        rect.xmax = clamp_coord(initial.xmax + dx).max(clamp_coord(initial.xmin + min_span));
    }
    if handle.moves_top() {
        rect.ymin = clamp_coord(initial.ymin + dy).min(clamp_coord(initial.ymax - min_span));
    }
    if handle.moves_bottom() {
        rect.ymax = clamp_coord(initial.ymax + dy).max(clamp_coord(initial.ymin + min_span));
    }

    rect
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const SPAN: f64 = 10.0;

    /// Strategy for a committed selection (both spans at least SPAN).
    fn rect_strategy() -> impl Strategy<Value = NormalizedRect> {
        (0.0f64..=980.0, 0.0f64..=980.0, 10.0f64..=1000.0, 10.0f64..=1000.0).prop_map(
            |(x, y, w, h)| {
                let w = w.min(1000.0 - x);
                let h = h.min(1000.0 - y);
                NormalizedRect {
                    xmin: x,
                    ymin: y,
                    xmax: x + w.max(SPAN),
                    ymax: y + h.max(SPAN),
                }
            },
        )
    }

    /// Any valid rect, including slivers and rects flush with a page edge.
    fn any_rect_strategy() -> impl Strategy<Value = NormalizedRect> {
        let coord = prop_oneof![
            Just(0.0f64),
            Just(1000.0f64),
            0.0f64..=1000.0,
        ]
        .boxed();
        let sliver = (0.0f64..=1000.0, 0.0f64..=1000.0, 0.0f64..SPAN, 0.0f64..SPAN)
            .prop_map(|(x, y, w, h)| NormalizedRect::new(x, y, x + w, y + h));
        let flush = (0.0f64..SPAN, 0.0f64..=1000.0, 0.0f64..=1000.0).prop_map(|(w, a, b)| {
            NormalizedRect::new(1000.0 - w, a, 1000.0, b)
        });
        prop_oneof![
            (coord.clone(), coord.clone(), coord.clone(), coord)
                .prop_map(|(a, b, c, d)| NormalizedRect::new(a, b, c, d)),
            sliver,
            flush,
        ]
    }

    fn point_strategy() -> impl Strategy<Value = NormalizedPoint> {
        (0.0f64..=1000.0, 0.0f64..=1000.0).prop_map(|(x, y)| NormalizedPoint::new(x, y))
    }

    fn handle_strategy() -> impl Strategy<Value = ResizeHandle> {
        prop::sample::select(ResizeHandle::ALL.to_vec())
    }

    proptest! {
        /// Property: moving preserves size and keeps the rect on the page
        /// after every intermediate step.
        #[test]
        fn prop_move_preserves_size(
            initial in rect_strategy(),
            start in point_strategy(),
            path in prop::collection::vec(point_strategy(), 1..12),
        ) {
            for current in path {
                let r = drag_rect(DragOp::Moving, start, current, &initial, SPAN);
                prop_assert!((r.width() - initial.width()).abs() < 1e-9);
                prop_assert!((r.height() - initial.height()).abs() < 1e-9);
                prop_assert!(r.xmin >= 0.0 && r.ymin >= 0.0);
                prop_assert!(r.xmax <= 1000.0 + 1e-9 && r.ymax <= 1000.0 + 1e-9);
            }
        }

        /// Property: resizing never inverts or collapses the rectangle.
        #[test]
        fn prop_resize_never_inverts(
            initial in rect_strategy(),
            handle in handle_strategy(),
            start in point_strategy(),
            path in prop::collection::vec(point_strategy(), 1..12),
        ) {
            for current in path {
                let r = drag_rect(DragOp::Resizing(handle), start, current, &initial, SPAN);
                prop_assert!(r.xmin <= r.xmax - SPAN + 1e-9, "x inverted: {:?}", r);
                prop_assert!(r.ymin <= r.ymax - SPAN + 1e-9, "y inverted: {:?}", r);
            }
        }

        /// Property: whatever the starting rect, a resize stays on the page
        /// and ordered.
        #[test]
        fn prop_resize_stays_on_page(
            initial in any_rect_strategy(),
            handle in handle_strategy(),
            start in point_strategy(),
            path in prop::collection::vec(point_strategy(), 1..12),
        ) {
            for current in path {
                let r = drag_rect(DragOp::Resizing(handle), start, current, &initial, SPAN);
                prop_assert!(r.is_valid(), "left the page: {:?} from {:?}", r, initial);
            }
        }

        /// Property: a resize only changes the edges its handle names.
        #[test]
        fn prop_resize_touches_named_edges_only(
            initial in rect_strategy(),
            handle in handle_strategy(),
            start in point_strategy(),
            current in point_strategy(),
        ) {
            let r = drag_rect(DragOp::Resizing(handle), start, current, &initial, SPAN);
            if !handle.moves_left() { prop_assert_eq!(r.xmin, initial.xmin); }
            if !handle.moves_right() { prop_assert_eq!(r.xmax, initial.xmax); }
            if !handle.moves_top() { prop_assert_eq!(r.ymin, initial.ymin); }
            if !handle.moves_bottom() { prop_assert_eq!(r.ymax, initial.ymax); }
        }

        /// Property: drawing is commutative in its two corner points.
        #[test]
        fn prop_draw_commutative(a in point_strategy(), b in point_strategy()) {
            let empty = NormalizedRect::default();
            let ab = drag_rect(DragOp::Drawing, a, b, &empty, SPAN);
            let ba = drag_rect(DragOp::Drawing, b, a, &empty, SPAN);
            prop_assert_eq!(ab, ba);
            prop_assert!(ab.is_valid());
        }

        /// Property: returning to the drag origin restores the snapshot.
        #[test]
        fn prop_zero_delta_is_identity(
            initial in rect_strategy(),
            handle in handle_strategy(),
            start in point_strategy(),
        ) {
            prop_assert_eq!(drag_rect(DragOp::Moving, start, start, &initial, SPAN), initial);
            prop_assert_eq!(
                drag_rect(DragOp::Resizing(handle), start, start, &initial, SPAN),
                initial
            );
        }
    }
}
