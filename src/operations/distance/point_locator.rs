use crate::geometry::{Coordinate, Envelope, Geometry, LineString, Location, Polygon};
use crate::math::orientation::locate_point_in_ring;
use crate::math::{orientation_index, Orientation};

/// Computes the topological location of a point relative to a geometry.
///
/// Boundaries follow the mod-2 rule: a point lies on the boundary of a
/// collection if it is on the boundary of an odd number of its components.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointLocator;

impl PointLocator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` unless `p` is in the exterior of `geometry`.
    #[must_use]
    pub fn intersects(&self, p: &Coordinate, geometry: &Geometry) -> bool {
        self.locate(p, geometry) != Location::Exterior
    }

    #[must_use]
    pub fn locate(&self, p: &Coordinate, geometry: &Geometry) -> Location {
        if geometry.is_empty() {
            return Location::Exterior;
        }
        match geometry {
            Geometry::LineString(ls) => return locate_on_line_string(p, ls),
            Geometry::Polygon(poly) => return self.locate_in_polygon(p, poly),
            _ => {}
        }

        let mut state = LocateState::default();
        state.compute(p, geometry);
        if state.num_boundaries % 2 == 1 {
            Location::Boundary
        } else if state.num_boundaries > 0 || state.is_in {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Locates `p` relative to a polygon: the interior excludes the holes,
    /// and every ring belongs to the boundary.
    #[must_use]
    pub fn locate_in_polygon(&self, p: &Coordinate, polygon: &Polygon) -> Location {
        if polygon.is_empty() {
            return Location::Exterior;
        }
        match locate_in_ring(p, polygon.shell()) {
            Location::Exterior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            _ => {}
        }
        for hole in polygon.holes() {
            match locate_in_ring(p, hole) {
                Location::Interior => return Location::Exterior,
                Location::Boundary => return Location::Boundary,
                _ => {}
            }
        }
        Location::Interior
    }
}

#[derive(Default)]
struct LocateState {
    is_in: bool,
    num_boundaries: usize,
}

impl LocateState {
    fn compute(&mut self, p: &Coordinate, geometry: &Geometry) {
        match geometry {
            Geometry::Point(c) => {
                if c.equals_2d(p) {
                    self.is_in = true;
                }
            }
            Geometry::MultiPoint(pts) => {
                if pts.iter().any(|c| c.equals_2d(p)) {
                    self.is_in = true;
                }
            }
            Geometry::LineString(ls) => self.update(locate_on_line_string(p, ls)),
            Geometry::MultiLineString(lines) => {
                for ls in lines {
                    self.update(locate_on_line_string(p, ls));
                }
            }
            Geometry::Polygon(poly) => self.update(PointLocator.locate_in_polygon(p, poly)),
            Geometry::MultiPolygon(polys) => {
                for poly in polys {
                    self.update(PointLocator.locate_in_polygon(p, poly));
                }
            }
            Geometry::GeometryCollection(geoms) => {
                for g in geoms {
                    self.compute(p, g);
                }
            }
        }
    }

    fn update(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.num_boundaries += 1,
            _ => {}
        }
    }
}

fn locate_in_ring(p: &Coordinate, ring: &LineString) -> Location {
    if !ring.envelope().intersects_coord(p) {
        return Location::Exterior;
    }
    locate_point_in_ring(p, ring.coords())
}

fn locate_on_line_string(p: &Coordinate, line: &LineString) -> Location {
    if !line.envelope().intersects_coord(p) {
        return Location::Exterior;
    }
    let pts = line.coords();
    if !line.is_closed() {
        if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
            if p.equals_2d(first) || p.equals_2d(last) {
                return Location::Boundary;
            }
        }
    }
    if is_on_line(p, pts) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Returns `true` if `p` lies on some segment of `pts`.
#[must_use]
pub fn is_on_line(p: &Coordinate, pts: &[Coordinate]) -> bool {
    pts.windows(2).any(|w| {
        Envelope::segment_contains(&w[0], &w[1], p)
            && orientation_index(&w[0], &w[1], p) == Orientation::Collinear
    })
}
