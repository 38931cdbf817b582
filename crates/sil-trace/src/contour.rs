use sil_core::{Coordinate, Point2f, Polyline2f};

use crate::direction::Direction;

/// Closed boundary polygon in pixel coordinates.
///
/// The first point is the seed pixel. The closing edge from the last point
/// back to the first is implicit and not stored. Consecutive points are
/// 8-adjacent; a pixel may appear more than once where the shape is one pixel
/// thick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Coordinate>,
    closed: bool,
    probes: usize,
}

impl Contour {
    pub(crate) fn closed(points: Vec<Coordinate>, probes: usize) -> Self {
        debug_assert!(!points.is_empty(), "contour must hold the seed pixel");
        Self {
            points,
            closed: true,
            probes,
        }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn first(&self) -> Coordinate {
        self.points[0]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for traced contours; kept for slice-like symmetry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of neighbor probes the walk performed.
    pub fn probes(&self) -> usize {
        self.probes
    }

    /// Segments in walk order, ending with the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        let closing = (self.closed && self.points.len() > 1)
            .then(|| (self.points[self.points.len() - 1], self.points[0]));
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// Euclidean length through pixel centers, closing edge included.
    pub fn perimeter(&self) -> f32 {
        self.edges()
            .map(|(a, b)| a.to_point().distance(b.to_point()))
            .sum()
    }

    /// Inclusive `(min, max)` corners.
    pub fn bounding_box(&self) -> (Coordinate, Coordinate) {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Drops vertices whose incoming and outgoing steps point the same way.
    ///
    /// The seed is always kept so the result starts where the trace did.
    pub fn without_collinear(&self) -> Contour {
        let n = self.points.len();
        if n < 3 {
            return self.clone();
        }

        let mut kept = Vec::with_capacity(n);
        kept.push(self.points[0]);
        for i in 1..n {
            let prev = self.points[i - 1];
            let cur = self.points[i];
            let next = self.points[(i + 1) % n];

            let incoming = Direction::between(prev, cur);
            let outgoing = Direction::between(cur, next);
            if incoming.is_none() || incoming != outgoing {
                kept.push(cur);
            }
        }

        Contour {
            points: kept,
            closed: self.closed,
            probes: self.probes,
        }
    }

    /// Maps every point, e.g. back into source-image space after downscaling.
    pub fn to_polyline(&self, map: impl Fn(Coordinate) -> Point2f) -> Polyline2f {
        Polyline2f {
            points: self.points.iter().copied().map(map).collect(),
            closed: self.closed,
        }
    }
}
