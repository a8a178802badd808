use crate::geometry::{
    remove_repeated_points, Coordinate, Envelope, Geometry, LineString, Location, Polygon,
    Position,
};
use crate::math::distance_2d::point_to_line_perpendicular_dist;
use crate::math::orientation::is_ccw;
use crate::math::polygon_2d::triangle_incentre;
use crate::noding::SegmentString;
use crate::topology::Label;

use super::OffsetCurveBuilder;

/// Collects the labelled raw offset curves of every component of a
/// geometry.
///
/// Each curve is labelled with the locations on its left and right so that
/// the depth deltas of the noded edges can be derived from the labels.
#[derive(Debug)]
pub struct OffsetCurveSetBuilder<'a> {
    geometry: &'a Geometry,
    distance: f64,
    builder: &'a OffsetCurveBuilder,
    curves: Vec<SegmentString>,
}

impl<'a> OffsetCurveSetBuilder<'a> {
    #[must_use]
    pub fn new(geometry: &'a Geometry, distance: f64, builder: &'a OffsetCurveBuilder) -> Self {
        Self {
            geometry,
            distance,
            builder,
            curves: Vec::new(),
        }
    }

    /// Computes the curves of all components.
    #[must_use]
    pub fn curves(mut self) -> Vec<SegmentString> {
        self.add(self.geometry);
        self.curves
    }

    fn add(&mut self, geometry: &Geometry) {
        if geometry.is_empty() {
            return;
        }
        match geometry {
            Geometry::Point(c) => self.add_point(c),
            Geometry::MultiPoint(pts) => {
                for c in pts {
                    self.add_point(c);
                }
            }
            Geometry::LineString(ls) => self.add_line(ls),
            Geometry::MultiLineString(lines) => {
                for ls in lines {
                    self.add_line(ls);
                }
            }
            Geometry::Polygon(p) => self.add_polygon(p),
            Geometry::MultiPolygon(polys) => {
                for p in polys {
                    self.add_polygon(p);
                }
            }
            Geometry::GeometryCollection(geoms) => {
                for g in geoms {
                    self.add(g);
                }
            }
        }
    }

    fn add_curve(&mut self, coords: Vec<Coordinate>, left: Location, right: Location) {
        if coords.len() < 2 {
            return;
        }
        self.curves.push(SegmentString::new(
            coords,
            Label::area(Location::Boundary, left, right),
        ));
    }

    fn add_point(&mut self, c: &Coordinate) {
        if self.distance <= 0.0 {
            return;
        }
        let curve = self.builder.line_curve(&[*c], self.distance);
        self.add_curve(curve, Location::Exterior, Location::Interior);
    }

    fn add_line(&mut self, line: &LineString) {
        if self.distance <= 0.0 || line.is_empty() {
            return;
        }
        let coords = remove_repeated_points(line.coords());
        let curve = self.builder.line_curve(&coords, self.distance);
        self.add_curve(curve, Location::Exterior, Location::Interior);
    }

    fn add_polygon(&mut self, polygon: &Polygon) {
        let (offset_distance, offset_side) = if self.distance < 0.0 {
            (-self.distance, Position::Right)
        } else {
            (self.distance, Position::Left)
        };

        let shell = remove_repeated_points(polygon.shell().coords());
        if self.distance < 0.0 && is_eroded_completely(&shell, self.distance) {
            return;
        }
        self.add_ring_side(
            &shell,
            offset_distance,
            offset_side,
            Location::Exterior,
            Location::Interior,
        );

        for hole in polygon.holes() {
            let coords = remove_repeated_points(hole.coords());
            // Dilating the polygon erodes its holes.
            if self.distance > 0.0 && is_eroded_completely(&coords, -self.distance) {
                continue;
            }
            self.add_ring_side(
                &coords,
                offset_distance,
                offset_side.opposite(),
                Location::Interior,
                Location::Exterior,
            );
        }
    }

    /// Adds the curve of one ring. `cw_left` and `cw_right` are the
    /// locations to the left and right of the ring when it runs clockwise.
    fn add_ring_side(
        &mut self,
        coords: &[Coordinate],
        offset_distance: f64,
        side: Position,
        cw_left: Location,
        cw_right: Location,
    ) {
        let (mut left, mut right, mut side) = (cw_left, cw_right, side);
        if coords.len() >= 4 && is_ccw(coords) {
            left = cw_right;
            right = cw_left;
            side = side.opposite();
        }
        let curve = self.builder.ring_curve(coords, side, offset_distance);
        self.add_curve(curve, left, right);
    }
}

/// Returns `true` if a negative buffer of `buffer_distance` leaves nothing
/// of the ring.
///
/// Exact for triangles; larger rings are tested against the smaller side of
/// their envelope, which only detects some of the eroded cases.
fn is_eroded_completely(ring: &[Coordinate], buffer_distance: f64) -> bool {
    match ring.len() {
        0..=3 => buffer_distance < 0.0,
        4 => is_triangle_eroded_completely(ring, buffer_distance),
        _ => {
            let env = Envelope::from_coords(ring);
            let min_dimension = env.width().min(env.height());
            buffer_distance < 0.0 && 2.0 * buffer_distance.abs() > min_dimension
        }
    }
}

fn is_triangle_eroded_completely(tri: &[Coordinate], buffer_distance: f64) -> bool {
    let centre = triangle_incentre(&tri[0], &tri[1], &tri[2]);
    let dist_to_centre = point_to_line_perpendicular_dist(&centre, &tri[0], &tri[1]);
    dist_to_centre < buffer_distance.abs()
}
