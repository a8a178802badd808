//! Planar geometry model consumed and produced by the kernel's operations.

use crate::math::polygon_2d::{polyline_length, ring_area};
use crate::math::Matrix4;

use super::{Coordinate, Envelope};

/// An ordered sequence of coordinates. A ring is a closed line string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    coords: Vec<Coordinate>,
}

impl LineString {
    #[must_use]
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self { coords }
    }

    /// Builds a line string from planar `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(pts: &[(f64, f64)]) -> Self {
        Self::new(pts.iter().map(|&p| Coordinate::from(p)).collect())
    }

    #[must_use]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    #[must_use]
    pub fn into_coords(self) -> Vec<Coordinate> {
        self.coords
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns `true` if the first and last coordinates coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(a), Some(b)) => self.coords.len() > 1 && a.equals_2d(b),
            _ => false,
        }
    }

    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(&self.coords)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        polyline_length(&self.coords)
    }

    #[must_use]
    pub fn reversed(&self) -> LineString {
        let mut coords = self.coords.clone();
        coords.reverse();
        LineString::new(coords)
    }

    fn transformed(&self, m: &Matrix4) -> LineString {
        LineString::new(self.coords.iter().map(|c| m.transform_coordinate(c)).collect())
    }
}

impl From<Vec<Coordinate>> for LineString {
    fn from(coords: Vec<Coordinate>) -> Self {
        Self::new(coords)
    }
}

/// A polygon with one outer shell and zero or more holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    shell: LineString,
    holes: Vec<LineString>,
}

impl Polygon {
    #[must_use]
    pub fn new(shell: LineString, holes: Vec<LineString>) -> Self {
        Self { shell, holes }
    }

    /// The empty polygon.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shell(&self) -> &LineString {
        &self.shell
    }

    #[must_use]
    pub fn holes(&self) -> &[LineString] {
        &self.holes
    }

    /// Iterates the shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LineString> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Shell area minus hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| ring_area(h.coords())).sum();
        ring_area(self.shell.coords()) - holes
    }

    #[must_use]
    pub fn envelope(&self) -> Envelope {
        self.shell.envelope()
    }

    fn transformed(&self, m: &Matrix4) -> Polygon {
        Polygon::new(
            self.shell.transformed(m),
            self.holes.iter().map(|h| h.transformed(m)).collect(),
        )
    }
}

/// Kind tag of a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// A planar geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// The empty geometry produced by operations with no area result.
    #[must_use]
    pub fn empty_polygon() -> Self {
        Geometry::Polygon(Polygon::empty())
    }

    #[must_use]
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(ls) => ls.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(pts) => pts.is_empty(),
            Geometry::MultiLineString(lines) => lines.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(polys) => polys.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(geoms) => geoms.iter().all(Geometry::is_empty),
        }
    }

    #[must_use]
    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::null();
        self.for_each_coordinate(&mut |c| env.expand_to_include(c));
        env
    }

    /// Total area of the polygonal components.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons().iter().map(|p| p.area()).sum()
    }

    /// Total length of the linear components and polygon rings.
    #[must_use]
    pub fn length(&self) -> f64 {
        let lines: f64 = self.lines().iter().map(|l| l.length()).sum();
        let rings: f64 = self
            .polygons()
            .iter()
            .flat_map(|p| p.rings())
            .map(LineString::length)
            .sum();
        lines + rings
    }

    /// Number of coordinates in the geometry.
    #[must_use]
    pub fn num_points(&self) -> usize {
        let mut n = 0;
        self.for_each_coordinate(&mut |_| n += 1);
        n
    }

    /// Point components, including those nested in collections.
    #[must_use]
    pub fn points(&self) -> Vec<&Coordinate> {
        let mut out = Vec::new();
        self.collect_components(&mut out, &mut Vec::new(), &mut Vec::new());
        out
    }

    /// Line string components, including those nested in collections.
    #[must_use]
    pub fn lines(&self) -> Vec<&LineString> {
        let mut out = Vec::new();
        self.collect_components(&mut Vec::new(), &mut out, &mut Vec::new());
        out
    }

    /// Polygon components, including those nested in collections.
    #[must_use]
    pub fn polygons(&self) -> Vec<&Polygon> {
        let mut out = Vec::new();
        self.collect_components(&mut Vec::new(), &mut Vec::new(), &mut out);
        out
    }

    pub(crate) fn collect_components<'a>(
        &'a self,
        points: &mut Vec<&'a Coordinate>,
        lines: &mut Vec<&'a LineString>,
        polygons: &mut Vec<&'a Polygon>,
    ) {
        match self {
            Geometry::Point(c) => points.push(c),
            Geometry::MultiPoint(pts) => points.extend(pts.iter()),
            Geometry::LineString(ls) => lines.push(ls),
            Geometry::MultiLineString(ls) => lines.extend(ls.iter()),
            Geometry::Polygon(p) => polygons.push(p),
            Geometry::MultiPolygon(ps) => polygons.extend(ps.iter()),
            Geometry::GeometryCollection(geoms) => {
                for g in geoms {
                    g.collect_components(points, lines, polygons);
                }
            }
        }
    }

    fn for_each_coordinate(&self, f: &mut impl FnMut(&Coordinate)) {
        match self {
            Geometry::Point(c) => f(c),
            Geometry::MultiPoint(pts) => pts.iter().for_each(f),
            Geometry::LineString(ls) => ls.coords().iter().for_each(f),
            Geometry::MultiLineString(lines) => {
                lines.iter().flat_map(LineString::coords).for_each(f);
            }
            Geometry::Polygon(p) => p.rings().flat_map(LineString::coords).for_each(f),
            Geometry::MultiPolygon(polys) => polys
                .iter()
                .flat_map(Polygon::rings)
                .flat_map(LineString::coords)
                .for_each(f),
            Geometry::GeometryCollection(geoms) => {
                for g in geoms {
                    g.for_each_coordinate(f);
                }
            }
        }
    }

    /// Returns a copy with every coordinate mapped through `m`.
    #[must_use]
    pub fn transformed(&self, m: &Matrix4) -> Geometry {
        match self {
            Geometry::Point(c) => Geometry::Point(m.transform_coordinate(c)),
            Geometry::MultiPoint(pts) => {
                Geometry::MultiPoint(pts.iter().map(|c| m.transform_coordinate(c)).collect())
            }
            Geometry::LineString(ls) => Geometry::LineString(ls.transformed(m)),
            Geometry::MultiLineString(lines) => {
                Geometry::MultiLineString(lines.iter().map(|l| l.transformed(m)).collect())
            }
            Geometry::Polygon(p) => Geometry::Polygon(p.transformed(m)),
            Geometry::MultiPolygon(polys) => {
                Geometry::MultiPolygon(polys.iter().map(|p| p.transformed(m)).collect())
            }
            Geometry::GeometryCollection(geoms) => {
                Geometry::GeometryCollection(geoms.iter().map(|g| g.transformed(m)).collect())
            }
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<LineString> for Geometry {
    fn from(ls: LineString) -> Self {
        Geometry::LineString(ls)
    }
}

impl From<Coordinate> for Geometry {
    fn from(c: Coordinate) -> Self {
        Geometry::Point(c)
    }
}
