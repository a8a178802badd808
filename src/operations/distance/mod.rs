//! Minimum distance and nearest points between two geometries.

mod element_points;
mod facet;
mod location;
mod point_locator;

pub use element_points::{connected_element_locations, connected_element_points};
pub use facet::{FacetDistance, FacetSequence};
pub use location::{components, ComponentRef, GeometryLocation, SegmentRef};
pub use point_locator::{is_on_line, PointLocator};

use tracing::trace;

use crate::geometry::{Coordinate, Geometry, Location};

/// Computes the minimum distance between two geometries and a pair of
/// locations achieving it.
///
/// A point of one geometry lying in the area of the other gives distance
/// zero. Otherwise every facet of one geometry is compared with every facet
/// of the other. Both stages stop as soon as the distance found is within
/// the terminate distance.
///
/// Empty geometries are at distance zero from everything and have no
/// nearest points.
#[derive(Debug, Clone, Copy)]
pub struct DistanceOp<'a> {
    geometries: [&'a Geometry; 2],
    terminate_distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct MinDistance<'a> {
    distance: f64,
    locations: Option<[GeometryLocation<'a>; 2]>,
}

impl<'a> DistanceOp<'a> {
    #[must_use]
    pub fn new(g0: &'a Geometry, g1: &'a Geometry) -> Self {
        Self {
            geometries: [g0, g1],
            terminate_distance: 0.0,
        }
    }

    /// Stops the search once any distance not greater than `distance` is
    /// found. The reported distance is then an upper bound only.
    #[must_use]
    pub fn with_terminate_distance(mut self, distance: f64) -> Self {
        self.terminate_distance = distance;
        self
    }

    /// Returns `true` if the geometries lie within `distance` of each
    /// other.
    #[must_use]
    pub fn is_within_distance(g0: &Geometry, g1: &Geometry, distance: f64) -> bool {
        if g0.is_empty() || g1.is_empty() {
            return distance >= 0.0;
        }
        if g0.envelope().distance(&g1.envelope()) > distance {
            return false;
        }
        DistanceOp::new(g0, g1)
            .with_terminate_distance(distance)
            .distance()
            <= distance
    }

    #[must_use]
    pub fn distance(&self) -> f64 {
        self.compute().distance
    }

    /// The nearest points, the first on `g0` and the second on `g1`.
    #[must_use]
    pub fn nearest_points(&self) -> Option<[Coordinate; 2]> {
        self.nearest_locations()
            .map(|[a, b]| [a.coordinate, b.coordinate])
    }

    /// The nearest locations, the first on `g0` and the second on `g1`.
    #[must_use]
    pub fn nearest_locations(&self) -> Option<[GeometryLocation<'a>; 2]> {
        self.compute().locations
    }

    fn compute(&self) -> MinDistance<'a> {
        if self.geometries.iter().any(|g| g.is_empty()) {
            return MinDistance {
                distance: 0.0,
                locations: None,
            };
        }
        let mut min = MinDistance {
            distance: f64::MAX,
            locations: None,
        };
        self.compute_containment_distance(&mut min);
        if min.distance <= self.terminate_distance {
            return min;
        }
        self.compute_facet_distance(&mut min);
        min
    }

    fn compute_containment_distance(&self, min: &mut MinDistance<'a>) {
        let locator = PointLocator::new();
        for poly_index in 0..2 {
            let polygons = self.geometries[poly_index].polygons();
            if polygons.is_empty() {
                continue;
            }
            let loc_index = 1 - poly_index;
            for loc in connected_element_locations(self.geometries[loc_index]) {
                for &poly in &polygons {
                    if locator.locate_in_polygon(&loc.coordinate, poly) == Location::Exterior {
                        continue;
                    }
                    trace!(
                        x = loc.coordinate.x,
                        y = loc.coordinate.y,
                        "element of geometry {loc_index} lies in an area of geometry {poly_index}"
                    );
                    let mut locations = [loc, loc];
                    locations[poly_index] = GeometryLocation::inside_area(poly, loc.coordinate);
                    min.distance = 0.0;
                    min.locations = Some(locations);
                    return;
                }
            }
        }
    }

    fn compute_facet_distance(&self, min: &mut MinDistance<'a>) {
        let seqs0 = FacetSequence::of_geometry(self.geometries[0]);
        let seqs1 = FacetSequence::of_geometry(self.geometries[1]);
        for a in &seqs0 {
            for b in &seqs1 {
                if a.envelope().distance(b.envelope()) > min.distance {
                    continue;
                }
                if let Some(r) = a.nearest_locations(b) {
                    if r.distance < min.distance {
                        min.distance = r.distance;
                        min.locations = Some(r.locations);
                    }
                }
                if min.distance <= self.terminate_distance {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, Polygon};
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, size: f64) -> LineString {
        LineString::from_xy(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ])
    }

    fn square_poly(x0: f64, y0: f64, size: f64) -> Geometry {
        Geometry::Polygon(Polygon::new(square(x0, y0, size), vec![]))
    }

    #[test]
    fn disjoint_unit_squares() {
        let a = square_poly(0.0, 0.0, 1.0);
        let b = square_poly(3.0, 0.0, 1.0);
        let op = DistanceOp::new(&a, &b);
        assert_eq!(op.distance(), 2.0);
        let [p, q] = op.nearest_points().unwrap();
        assert_eq!(p.x, 1.0);
        assert_eq!(q.x, 3.0);
        assert!((0.0..=1.0).contains(&p.y));
        assert_eq!(p.y, q.y);
    }

    #[test]
    fn point_inside_polygon_is_at_zero() {
        let poly = square_poly(0.0, 0.0, 10.0);
        let pt = Geometry::Point(Coordinate::new(3.0, 4.0));
        let op = DistanceOp::new(&pt, &poly);
        assert_eq!(op.distance(), 0.0);
        let [on_pt, in_poly] = op.nearest_locations().unwrap();
        assert!(!on_pt.is_inside_area());
        assert!(in_poly.is_inside_area());
        assert_eq!(in_poly.coordinate, Coordinate::new(3.0, 4.0));
        // Same answer with the polygon first.
        let [in_poly, _] = DistanceOp::new(&poly, &pt).nearest_locations().unwrap();
        assert!(in_poly.is_inside_area());
    }

    #[test]
    fn polygon_inside_polygon_is_at_zero() {
        let outer = square_poly(0.0, 0.0, 10.0);
        let inner = square_poly(2.0, 2.0, 1.0);
        assert_eq!(DistanceOp::new(&inner, &outer).distance(), 0.0);
    }

    #[test]
    fn point_in_hole_measures_to_hole_ring() {
        let poly = Geometry::Polygon(Polygon::new(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0)]));
        let pt = Geometry::Point(Coordinate::new(5.0, 5.5));
        let op = DistanceOp::new(&poly, &pt);
        assert_relative_eq!(op.distance(), 0.5);
        let [on_ring, _] = op.nearest_points().unwrap();
        assert_relative_eq!(on_ring.y, 6.0);
    }

    #[test]
    fn line_to_point() {
        let line = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0)]));
        let pt = Geometry::Point(Coordinate::new(4.0, 3.0));
        let op = DistanceOp::new(&line, &pt);
        assert_relative_eq!(op.distance(), 3.0);
        assert_eq!(
            op.nearest_points().unwrap(),
            [Coordinate::new(4.0, 0.0), Coordinate::new(4.0, 3.0)]
        );
    }

    #[test]
    fn symmetric() {
        let geoms = [
            square_poly(0.0, 0.0, 1.0),
            Geometry::LineString(LineString::from_xy(&[(5.0, -2.0), (2.0, 3.0)])),
            Geometry::MultiPoint(vec![Coordinate::new(-3.0, 7.0), Coordinate::new(8.0, 1.5)]),
        ];
        for a in &geoms {
            for b in &geoms {
                assert_eq!(DistanceOp::new(a, b).distance(), DistanceOp::new(b, a).distance());
            }
        }
    }

    #[test]
    fn empty_input_is_at_zero() {
        let empty = Geometry::empty_polygon();
        let pt = Geometry::Point(Coordinate::new(4.0, 3.0));
        let op = DistanceOp::new(&empty, &pt);
        assert_eq!(op.distance(), 0.0);
        assert!(op.nearest_points().is_none());
        assert!(DistanceOp::is_within_distance(&pt, &empty, 0.0));
    }

    #[test]
    fn terminate_distance_stops_early() {
        let pts = Geometry::MultiPoint(vec![Coordinate::new(0.0, 0.0), Coordinate::new(4.0, 0.0)]);
        let pt = Geometry::Point(Coordinate::new(5.0, 0.0));
        assert_eq!(DistanceOp::new(&pts, &pt).distance(), 1.0);
        let bounded = DistanceOp::new(&pts, &pt).with_terminate_distance(6.0);
        assert_eq!(bounded.distance(), 5.0);
    }

    #[test]
    fn within_distance() {
        let a = square_poly(0.0, 0.0, 1.0);
        let b = square_poly(3.0, 0.0, 1.0);
        assert!(DistanceOp::is_within_distance(&a, &b, 2.0));
        assert!(!DistanceOp::is_within_distance(&a, &b, 1.9));
        let far = square_poly(100.0, 100.0, 1.0);
        assert!(!DistanceOp::is_within_distance(&a, &far, 10.0));
    }
}
