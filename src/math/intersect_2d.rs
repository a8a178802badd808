use crate::geometry::{Coordinate, Envelope, PrecisionModel};

use super::distance_2d::point_to_segment_dist;
use super::orientation::orientation_index;

/// Classification of a segment-segment intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionKind {
    /// The segments do not meet.
    None,
    /// The segments meet in a single point.
    Point,
    /// The segments are collinear and overlap in a sub-segment.
    Collinear,
}

/// Result of intersecting segment `p1-p2` (input 0) with `q1-q2` (input 1).
#[derive(Debug, Clone, Copy)]
pub struct SegmentIntersection {
    kind: IntersectionKind,
    points: [Coordinate; 2],
    proper: bool,
    inputs: [[Coordinate; 2]; 2],
}

impl SegmentIntersection {
    fn none(inputs: [[Coordinate; 2]; 2]) -> Self {
        Self {
            kind: IntersectionKind::None,
            points: [inputs[0][0], inputs[0][0]],
            proper: false,
            inputs,
        }
    }

    fn point(inputs: [[Coordinate; 2]; 2], pt: Coordinate, proper: bool) -> Self {
        Self {
            kind: IntersectionKind::Point,
            points: [pt, pt],
            proper,
            inputs,
        }
    }

    fn collinear(inputs: [[Coordinate; 2]; 2], a: Coordinate, b: Coordinate) -> Self {
        Self {
            kind: IntersectionKind::Collinear,
            points: [a, b],
            proper: false,
            inputs,
        }
    }

    #[must_use]
    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    #[must_use]
    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    /// Number of intersection points: 0, 1 or 2.
    #[must_use]
    pub fn intersection_count(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    /// Returns the `i`-th intersection point.
    ///
    /// # Panics
    ///
    /// Panics if `i > 1`.
    #[must_use]
    pub fn intersection(&self, i: usize) -> Coordinate {
        self.points[i]
    }

    /// Returns the intersection points.
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points[..self.intersection_count()]
    }

    /// A proper intersection lies strictly in the interior of both segments.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    /// Returns `true` if some intersection point is not an endpoint of the
    /// given input segment.
    #[must_use]
    pub fn is_interior_intersection_for(&self, input_index: usize) -> bool {
        let [a, b] = &self.inputs[input_index];
        self.points()
            .iter()
            .any(|pt| !(pt.equals_2d(a) || pt.equals_2d(b)))
    }

    /// Returns `true` if some intersection point is interior to either input
    /// segment.
    #[must_use]
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_for(0) || self.is_interior_intersection_for(1)
    }

    /// Returns the input segment `input_index` as a coordinate pair.
    #[must_use]
    pub fn input(&self, input_index: usize) -> [Coordinate; 2] {
        self.inputs[input_index]
    }
}

/// Robust segment intersector.
///
/// Topological classification comes from robust orientation tests; only the
/// location of a proper crossing is computed numerically, and that point is
/// kept within both segment envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineIntersector {
    precision_model: Option<PrecisionModel>,
}

impl LineIntersector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds computed intersection points with the given model.
    #[must_use]
    pub fn with_precision_model(mut self, pm: PrecisionModel) -> Self {
        self.precision_model = Some(pm);
        self
    }

    /// Computes the intersection of segments `p1-p2` and `q1-q2`.
    #[must_use]
    pub fn compute_intersection(
        &self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> SegmentIntersection {
        let inputs = [[*p1, *p2], [*q1, *q2]];

        if !Envelope::segments_intersect(p1, p2, q1, q2) {
            return SegmentIntersection::none(inputs);
        }

        let pq1 = orientation_index(p1, p2, q1).index();
        let pq2 = orientation_index(p1, p2, q2).index();
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return SegmentIntersection::none(inputs);
        }

        let qp1 = orientation_index(q1, q2, p1).index();
        let qp2 = orientation_index(q1, q2, p2).index();
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return SegmentIntersection::none(inputs);
        }

        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return Self::collinear_intersection(inputs);
        }

        // An endpoint lies on the other segment: the intersection is that
        // endpoint, copied exactly.
        if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            let pt = if p1.equals_2d(q1) || p1.equals_2d(q2) {
                *p1
            } else if p2.equals_2d(q1) || p2.equals_2d(q2) {
                *p2
            } else if pq1 == 0 {
                *q1
            } else if pq2 == 0 {
                *q2
            } else if qp1 == 0 {
                *p1
            } else {
                *p2
            };
            return SegmentIntersection::point(inputs, pt, false);
        }

        let pt = self.proper_intersection(p1, p2, q1, q2);
        SegmentIntersection::point(inputs, pt, true)
    }

    fn collinear_intersection(inputs: [[Coordinate; 2]; 2]) -> SegmentIntersection {
        let [p1, p2] = inputs[0];
        let [q1, q2] = inputs[1];
        let p1q1p2 = Envelope::segment_contains(&p1, &p2, &q1);
        let p1q2p2 = Envelope::segment_contains(&p1, &p2, &q2);
        let q1p1q2 = Envelope::segment_contains(&q1, &q2, &p1);
        let q1p2q2 = Envelope::segment_contains(&q1, &q2, &p2);

        if p1q1p2 && p1q2p2 {
            return SegmentIntersection::collinear(inputs, q1, q2);
        }
        if q1p1q2 && q1p2q2 {
            return SegmentIntersection::collinear(inputs, p1, p2);
        }
        if p1q1p2 && q1p1q2 {
            return if q1.equals_2d(&p1) && !p1q2p2 && !q1p2q2 {
                SegmentIntersection::point(inputs, q1, false)
            } else {
                SegmentIntersection::collinear(inputs, q1, p1)
            };
        }
        if p1q1p2 && q1p2q2 {
            return if q1.equals_2d(&p2) && !p1q2p2 && !q1p1q2 {
                SegmentIntersection::point(inputs, q1, false)
            } else {
                SegmentIntersection::collinear(inputs, q1, p2)
            };
        }
        if p1q2p2 && q1p1q2 {
            return if q2.equals_2d(&p1) && !p1q1p2 && !q1p2q2 {
                SegmentIntersection::point(inputs, q2, false)
            } else {
                SegmentIntersection::collinear(inputs, q2, p1)
            };
        }
        if p1q2p2 && q1p2q2 {
            return if q2.equals_2d(&p2) && !p1q1p2 && !q1p1q2 {
                SegmentIntersection::point(inputs, q2, false)
            } else {
                SegmentIntersection::collinear(inputs, q2, p2)
            };
        }
        SegmentIntersection::none(inputs)
    }

    /// Computes a proper crossing point.
    ///
    /// The lines are intersected in coordinates translated to the centre of
    /// the segments' common envelope, which keeps the determinant well
    /// conditioned. If round-off still places the result outside that
    /// envelope, the endpoint nearest to the other segment is used.
    fn proper_intersection(
        &self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> Coordinate {
        let min_x = p1.x.min(p2.x).max(q1.x.min(q2.x));
        let max_x = p1.x.max(p2.x).min(q1.x.max(q2.x));
        let min_y = p1.y.min(p2.y).max(q1.y.min(q2.y));
        let max_y = p1.y.max(p2.y).min(q1.y.max(q2.y));
        let mid_x = (min_x + max_x) / 2.0;
        let mid_y = (min_y + max_y) / 2.0;

        let (ax, ay) = (p1.x - mid_x, p1.y - mid_y);
        let (bx, by) = (p2.x - mid_x, p2.y - mid_y);
        let (cx, cy) = (q1.x - mid_x, q1.y - mid_y);
        let (dx, dy) = (q2.x - mid_x, q2.y - mid_y);

        // Homogeneous line coordinates.
        let (px, py, pw) = (ay - by, bx - ax, ax * by - bx * ay);
        let (qx, qy, qw) = (cy - dy, dx - cx, cx * dy - dx * cy);
        let w = px * qy - qx * py;
        let x = py * qw - qy * pw;
        let y = qx * pw - px * qw;

        let mut pt = if w == 0.0 || !(x / w).is_finite() || !(y / w).is_finite() {
            nearest_endpoint(p1, p2, q1, q2)
        } else {
            Coordinate::new(x / w + mid_x, y / w + mid_y)
        };

        let common = Envelope {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        if !common.intersects_coord(&pt) {
            pt = nearest_endpoint(p1, p2, q1, q2);
        }
        if let Some(pm) = &self.precision_model {
            pm.make_precise_coord(&mut pt);
        }
        pt
    }
}

/// Intersects the infinite lines through `p1`-`p2` and `q1`-`q2`.
///
/// Returns `None` for parallel or degenerate lines.
#[must_use]
pub fn line_intersection(
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
) -> Option<Coordinate> {
    let (px, py, pw) = (p1.y - p2.y, p2.x - p1.x, p1.x * p2.y - p2.x * p1.y);
    let (qx, qy, qw) = (q1.y - q2.y, q2.x - q1.x, q1.x * q2.y - q2.x * q1.y);
    let w = px * qy - qx * py;
    let x = (py * qw - qy * pw) / w;
    let y = (qx * pw - px * qw) / w;
    (x.is_finite() && y.is_finite()).then(|| Coordinate::new(x, y))
}

/// Returns the endpoint of either segment that is closest to the other
/// segment.
fn nearest_endpoint(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
    let mut nearest = *p1;
    let mut min_dist = point_to_segment_dist(p1, q1, q2);
    for (pt, a, b) in [(p2, q1, q2), (q1, p1, p2), (q2, p1, p2)] {
        let d = point_to_segment_dist(pt, a, b);
        if d < min_dist {
            min_dist = d;
            nearest = *pt;
        }
    }
    nearest
}
