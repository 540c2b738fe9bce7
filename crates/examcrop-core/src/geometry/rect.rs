//! Normalized points and rectangles.

use serde::{Deserialize, Serialize};

use super::{clamp_coord, NORMALIZED_MAX};

/// A point in normalized page space (0 to 1000 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Horizontal position (0 = left edge, 1000 = right edge)
    pub x: f64,
    /// Vertical position (0 = top edge, 1000 = bottom edge)
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return the point clamped into the page.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_coord(self.x),
            y: clamp_coord(self.y),
        }
    }
}

/// A crop region expressed in normalized page space.
///
/// Field names match the box schema produced by the segmentation service
/// (`xmin`, `ymin`, `xmax`, `ymax` on a 0-1000 scale), so committed
/// selections and machine-proposed boxes share one type.
///
/// # Invariants
///
/// - `xmin <= xmax` and `ymin <= ymax`
/// - all coordinates in `0..=1000`
///
/// Constructors and the drag engine maintain these; a minimum span is only
/// enforced when a selection is committed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl NormalizedRect {
    /// Create a rectangle from edge coordinates.
    ///
    /// Edges are clamped into the page and swapped if given out of order, so
    /// the result always satisfies the invariants.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        let (x0, x1) = (clamp_coord(xmin), clamp_coord(xmax));
        let (y0, y1) = (clamp_coord(ymin), clamp_coord(ymax));
        Self {
            xmin: x0.min(x1),
            ymin: y0.min(y1),
            xmax: x0.max(x1),
            ymax: y0.max(y1),
        }
    }

    /// The whole page.
    pub fn full_page() -> Self {
        Self::new(0.0, 0.0, NORMALIZED_MAX, NORMALIZED_MAX)
    }

    /// The min/max envelope of two points, in either drag direction.
    pub fn from_corners(a: NormalizedPoint, b: NormalizedPoint) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> NormalizedPoint {
        NormalizedPoint::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// Check whether both spans reach `min_span`.
    pub fn meets_min_span(&self, min_span: f64) -> bool {
        self.width() >= min_span && self.height() >= min_span
    }

    /// Widen any span shorter than `min_span` around its center, shifting it
    /// back onto the page where it would overhang an edge.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let (xmin, xmax) = widen(self.xmin, self.xmax, min_span);
        let (ymin, ymax) = widen(self.ymin, self.ymax, min_span);
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Check whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: NormalizedPoint) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Check that the rectangle is ordered, finite and inside the page.
    pub fn is_valid(&self) -> bool {
        let coords = [self.xmin, self.ymin, self.xmax, self.ymax];
        coords
            .iter()
            .all(|c| c.is_finite() && (0.0..=NORMALIZED_MAX).contains(c))
            && self.xmin <= self.xmax
            && self.ymin <= self.ymax
    }
}

fn widen(min: f64, max: f64, span: f64) -> (f64, f64) {
    if max - min >= span {
        return (min, max);
    }
    let span = span.min(NORMALIZED_MAX);
    let start = ((min + max) / 2.0 - span / 2.0).clamp(0.0, NORMALIZED_MAX - span);
    (start, start + span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_edges() {
        let r = NormalizedRect::new(300.0, 400.0, 100.0, 200.0);
        assert_eq!(r, NormalizedRect::new(100.0, 200.0, 300.0, 400.0));
        assert!(r.is_valid());
    }

    #[test]
    fn test_new_clamps_to_page() {
        let r = NormalizedRect::new(-50.0, -1.0, 1200.0, 999.0);
        assert_eq!(r.xmin, 0.0);
        assert_eq!(r.ymin, 0.0);
        assert_eq!(r.xmax, 1000.0);
        assert_eq!(r.ymax, 999.0);
    }

    #[test]
    fn test_dimensions_and_center() {
        let r = NormalizedRect::new(100.0, 200.0, 300.0, 600.0);
        assert_eq!(r.width(), 200.0);
        assert_eq!(r.height(), 400.0);
        assert_eq!(r.center(), NormalizedPoint::new(200.0, 400.0));
    }

    #[test]
    fn test_min_span() {
        let r = NormalizedRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.meets_min_span(10.0));

        let thin = NormalizedRect::new(0.0, 0.0, 9.5, 500.0);
        assert!(!thin.meets_min_span(10.0));
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let r = NormalizedRect::new(100.0, 100.0, 200.0, 200.0);
        assert!(r.contains(NormalizedPoint::new(100.0, 100.0)));
        assert!(r.contains(NormalizedPoint::new(150.0, 200.0)));
        assert!(!r.contains(NormalizedPoint::new(99.9, 150.0)));
    }

    #[test]
    fn test_is_valid_rejects_inverted_literal() {
        let r = NormalizedRect {
            xmin: 500.0,
            ymin: 0.0,
            xmax: 100.0,
            ymax: 10.0,
        };
        assert!(!r.is_valid());
    }

    #[test]
    fn test_full_page() {
        let r = NormalizedRect::full_page();
        assert_eq!(r.width(), 1000.0);
        assert_eq!(r.height(), 1000.0);
    }

    #[test]
    fn test_with_min_span_widens_around_center() {
        let r = NormalizedRect::new(500.0, 200.0, 504.0, 400.0).with_min_span(10.0);
        assert_eq!(r, NormalizedRect::new(497.0, 200.0, 507.0, 400.0));
    }

    #[test]
    fn test_with_min_span_shifts_off_edge() {
        let r = NormalizedRect::new(995.0, 0.0, 1000.0, 3.0).with_min_span(10.0);
        assert_eq!(r, NormalizedRect::new(990.0, 0.0, 1000.0, 10.0));
        assert!(r.meets_min_span(10.0));
        assert!(r.is_valid());
    }

    #[test]
    fn test_with_min_span_keeps_large_rect() {
        let r = NormalizedRect::new(100.0, 100.0, 300.0, 300.0);
        assert_eq!(r.with_min_span(10.0), r);
    }

    #[test]
    fn test_point_clamped() {
        let p = NormalizedPoint::new(-3.0, 1001.0).clamped();
        assert_eq!(p, NormalizedPoint::new(0.0, 1000.0));
    }
}
