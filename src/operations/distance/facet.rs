use crate::geometry::{Coordinate, Envelope, Geometry, LineSegment};
use crate::math::distance_2d::{point_to_segment_dist, segment_to_segment_dist};

use super::location::{components, ComponentRef, GeometryLocation};

/// A contiguous run of points of one component: a single point, or the
/// vertices of a line string or polygon ring.
#[derive(Debug, Clone)]
pub struct FacetSequence<'a> {
    component: ComponentRef<'a>,
    pts: &'a [Coordinate],
    envelope: Envelope,
}

/// Distance between two facet sequences and the locations achieving it.
#[derive(Debug, Clone, Copy)]
pub struct FacetDistance<'a> {
    pub distance: f64,
    pub locations: [GeometryLocation<'a>; 2],
}

impl<'a> FacetSequence<'a> {
    /// A sequence over `pts`, reported as lying on `component`.
    #[must_use]
    pub fn new(component: ComponentRef<'a>, pts: &'a [Coordinate]) -> Self {
        Self {
            component,
            pts,
            envelope: Envelope::from_coords(pts),
        }
    }

    /// Splits a geometry into its facet sequences: lines and polygon rings
    /// first, then points.
    #[must_use]
    pub fn of_geometry(geometry: &'a Geometry) -> Vec<Self> {
        let comps = components(geometry);
        let mut lines = Vec::new();
        let mut points = Vec::new();
        for comp in comps {
            match comp {
                ComponentRef::Point(c) => {
                    points.push(Self::new(comp, std::slice::from_ref(c)));
                }
                ComponentRef::Line(ls) => lines.push(Self::new(comp, ls.coords())),
                ComponentRef::Polygon(poly) => {
                    for ring in poly.rings().filter(|r| !r.is_empty()) {
                        lines.push(Self::new(ComponentRef::Line(ring), ring.coords()));
                    }
                }
            }
        }
        lines.extend(points);
        lines
    }

    #[must_use]
    pub fn component(&self) -> ComponentRef<'a> {
        self.component
    }

    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    #[must_use]
    pub fn is_point(&self) -> bool {
        self.pts.len() == 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// Minimum distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &FacetSequence<'_>) -> f64 {
        match (self.is_point(), other.is_point()) {
            (true, true) => self.pts[0].distance(&other.pts[0]),
            (true, false) => point_to_run_distance(&self.pts[0], other.pts),
            (false, true) => point_to_run_distance(&other.pts[0], self.pts),
            (false, false) => {
                let mut min = f64::MAX;
                for a in self.pts.windows(2) {
                    for b in other.pts.windows(2) {
                        let d = segment_to_segment_dist(&a[0], &a[1], &b[0], &b[1]);
                        if d < min {
                            min = d;
                            if min <= 0.0 {
                                return min;
                            }
                        }
                    }
                }
                min
            }
        }
    }

    /// Minimum distance to `other` together with a nearest location on each
    /// sequence, or `None` if either sequence is empty.
    #[must_use]
    pub fn nearest_locations(&self, other: &FacetSequence<'a>) -> Option<FacetDistance<'a>> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let result = match (self.is_point(), other.is_point()) {
            (true, true) => {
                let (p, q) = (self.pts[0], other.pts[0]);
                FacetDistance {
                    distance: p.distance(&q),
                    locations: [
                        GeometryLocation::on_segment(self.component, 0, p),
                        GeometryLocation::on_segment(other.component, 0, q),
                    ],
                }
            }
            (true, false) => {
                let (distance, [b, a]) = other.nearest_to_point(self.pts[0], self.component);
                FacetDistance {
                    distance,
                    locations: [a, b],
                }
            }
            (false, true) => {
                let (distance, locations) = self.nearest_to_point(other.pts[0], other.component);
                FacetDistance {
                    distance,
                    locations,
                }
            }
            (false, false) => self.nearest_line_line(other),
        };
        Some(result)
    }

    /// Nearest location on this run of segments to the point `p` of
    /// `point_component`; the point's own location comes second.
    fn nearest_to_point(
        &self,
        p: Coordinate,
        point_component: ComponentRef<'a>,
    ) -> (f64, [GeometryLocation<'a>; 2]) {
        let mut best = (f64::MAX, 0, self.pts[0]);
        for (i, w) in self.pts.windows(2).enumerate() {
            let seg = LineSegment::new(w[0], w[1]);
            let d = seg.distance_to_point(&p);
            if d < best.0 {
                best = (d, i, seg.closest_point(&p));
                if d <= 0.0 {
                    break;
                }
            }
        }
        (
            best.0,
            [
                GeometryLocation::on_segment(self.component, best.1, best.2),
                GeometryLocation::on_segment(point_component, 0, p),
            ],
        )
    }

    fn nearest_line_line(&self, other: &FacetSequence<'a>) -> FacetDistance<'a> {
        let mut min = f64::MAX;
        let mut best = (0, 0, [self.pts[0], other.pts[0]]);
        'outer: for (i, a) in self.pts.windows(2).enumerate() {
            for (j, b) in other.pts.windows(2).enumerate() {
                let d = segment_to_segment_dist(&a[0], &a[1], &b[0], &b[1]);
                if d < min {
                    min = d;
                    let sa = LineSegment::new(a[0], a[1]);
                    let sb = LineSegment::new(b[0], b[1]);
                    best = (i, j, sa.closest_points(&sb));
                    if min <= 0.0 {
                        break 'outer;
                    }
                }
            }
        }
        FacetDistance {
            distance: min,
            locations: [
                GeometryLocation::on_segment(self.component, best.0, best.2[0]),
                GeometryLocation::on_segment(other.component, best.1, best.2[1]),
            ],
        }
    }
}

fn point_to_run_distance(p: &Coordinate, pts: &[Coordinate]) -> f64 {
    let mut min = f64::MAX;
    for w in pts.windows(2) {
        min = min.min(point_to_segment_dist(p, &w[0], &w[1]));
        if min <= 0.0 {
            break;
        }
    }
    min
}
