use crate::math::distance_2d::{point_to_segment_dist, segment_to_segment_dist};
use crate::math::{orientation_index, LineIntersector, Orientation};

use super::Coordinate;

/// A directed segment `p0 -> p1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p0: Coordinate,
    pub p1: Coordinate,
}

impl LineSegment {
    #[must_use]
    pub fn new(p0: Coordinate, p1: Coordinate) -> Self {
        Self { p0, p1 }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.p0.distance(&self.p1)
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_horizontal(&self) -> bool {
        self.p0.y == self.p1.y
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_vertical(&self) -> bool {
        self.p0.x == self.p1.x
    }

    /// Angle of the segment direction in radians, in `(-PI, PI]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        (self.p1.y - self.p0.y).atan2(self.p1.x - self.p0.x)
    }

    #[must_use]
    pub fn reversed(&self) -> LineSegment {
        LineSegment::new(self.p1, self.p0)
    }

    /// Orientation of `p` relative to this segment.
    #[must_use]
    pub fn orientation_of(&self, p: &Coordinate) -> Orientation {
        orientation_index(&self.p0, &self.p1, p)
    }

    /// Orientation of another segment relative to this one.
    ///
    /// Returns the common orientation if both endpoints of `seg` lie on the
    /// same side (or on the line), and `Collinear` if they straddle it.
    #[must_use]
    pub fn orientation_of_segment(&self, seg: &LineSegment) -> Orientation {
        let o0 = self.orientation_of(&seg.p0).index();
        let o1 = self.orientation_of(&seg.p1).index();
        if o0 >= 0 && o1 >= 0 {
            return Orientation::from_index(o0.max(o1));
        }
        if o0 <= 0 && o1 <= 0 {
            return Orientation::from_index(o0.min(o1));
        }
        Orientation::Collinear
    }

    /// Returns the projection factor of `p` onto the line through this
    /// segment: `0` at `p0`, `1` at `p1`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn project_factor(&self, p: &Coordinate) -> f64 {
        if p.equals_2d(&self.p0) {
            return 0.0;
        }
        if p.equals_2d(&self.p1) {
            return 1.0;
        }
        let dx = self.p1.x - self.p0.x;
        let dy = self.p1.y - self.p0.y;
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return 0.0;
        }
        ((p.x - self.p0.x) * dx + (p.y - self.p0.y) * dy) / len2
    }

    /// Point at fraction `t` along the segment.
    #[must_use]
    pub fn point_along(&self, t: f64) -> Coordinate {
        Coordinate::new(
            self.p0.x + t * (self.p1.x - self.p0.x),
            self.p0.y + t * (self.p1.y - self.p0.y),
        )
    }

    /// Closest point on the segment to `p`.
    #[must_use]
    pub fn closest_point(&self, p: &Coordinate) -> Coordinate {
        let factor = self.project_factor(p);
        if factor > 0.0 && factor < 1.0 {
            return self.point_along(factor);
        }
        if self.p0.distance(p) < self.p1.distance(p) {
            self.p0
        } else {
            self.p1
        }
    }

    /// Returns the pair of closest points: the first on this segment, the
    /// second on `other`.
    #[must_use]
    pub fn closest_points(&self, other: &LineSegment) -> [Coordinate; 2] {
        if let Some(pt) = self.intersection(other) {
            return [pt, pt];
        }

        let mut best = [self.closest_point(&other.p0), other.p0];
        let mut min_dist = best[0].distance(&other.p0);

        let close = self.closest_point(&other.p1);
        let d = close.distance(&other.p1);
        if d < min_dist {
            min_dist = d;
            best = [close, other.p1];
        }
        let close = other.closest_point(&self.p0);
        let d = close.distance(&self.p0);
        if d < min_dist {
            min_dist = d;
            best = [self.p0, close];
        }
        let close = other.closest_point(&self.p1);
        if close.distance(&self.p1) < min_dist {
            best = [self.p1, close];
        }
        best
    }

    /// Returns an intersection point with `other`, if the segments meet.
    #[must_use]
    pub fn intersection(&self, other: &LineSegment) -> Option<Coordinate> {
        let r = LineIntersector::new().compute_intersection(&self.p0, &self.p1, &other.p0, &other.p1);
        r.has_intersection().then(|| r.intersection(0))
    }

    #[must_use]
    pub fn distance(&self, other: &LineSegment) -> f64 {
        segment_to_segment_dist(&self.p0, &self.p1, &other.p0, &other.p1)
    }

    #[must_use]
    pub fn distance_to_point(&self, p: &Coordinate) -> f64 {
        point_to_segment_dist(p, &self.p0, &self.p1)
    }
}
