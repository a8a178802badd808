use crate::geometry::{Coordinate, Geometry, LineString, Polygon};

/// A simple component of a geometry: a point, a line string (polygon rings
/// included) or a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentRef<'a> {
    Point(&'a Coordinate),
    Line(&'a LineString),
    Polygon(&'a Polygon),
}

impl<'a> ComponentRef<'a> {
    /// Coordinates of the component; the shell for polygons.
    #[must_use]
    pub fn coords(&self) -> &'a [Coordinate] {
        match *self {
            ComponentRef::Point(c) => std::slice::from_ref(c),
            ComponentRef::Line(ls) => ls.coords(),
            ComponentRef::Polygon(p) => p.shell().coords(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ComponentRef::Point(_) => false,
            ComponentRef::Line(ls) => ls.is_empty(),
            ComponentRef::Polygon(p) => p.is_empty(),
        }
    }
}

/// Which part of a component a location lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRef {
    /// Index of the segment (or of the point, for point components).
    Index(usize),
    /// The location lies inside the area of a polygon.
    InsideArea,
}

/// A coordinate on a geometry, with the component and segment it lies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryLocation<'a> {
    pub component: ComponentRef<'a>,
    pub segment: SegmentRef,
    pub coordinate: Coordinate,
}

impl<'a> GeometryLocation<'a> {
    /// A location on segment `index` of `component`.
    #[must_use]
    pub fn on_segment(component: ComponentRef<'a>, index: usize, coordinate: Coordinate) -> Self {
        Self {
            component,
            segment: SegmentRef::Index(index),
            coordinate,
        }
    }

    /// A location inside the area of `polygon`.
    #[must_use]
    pub fn inside_area(polygon: &'a Polygon, coordinate: Coordinate) -> Self {
        Self {
            component: ComponentRef::Polygon(polygon),
            segment: SegmentRef::InsideArea,
            coordinate,
        }
    }

    #[must_use]
    pub fn is_inside_area(&self) -> bool {
        self.segment == SegmentRef::InsideArea
    }

    /// The segment index, or `None` for locations inside an area.
    #[must_use]
    pub fn segment_index(&self) -> Option<usize> {
        match self.segment {
            SegmentRef::Index(i) => Some(i),
            SegmentRef::InsideArea => None,
        }
    }
}

/// Simple components of `geometry` in structural order, skipping empty ones.
#[must_use]
pub fn components(geometry: &Geometry) -> Vec<ComponentRef<'_>> {
    let mut out = Vec::new();
    collect(geometry, &mut out);
    out.retain(|c| !c.is_empty());
    out
}

fn collect<'a>(geometry: &'a Geometry, out: &mut Vec<ComponentRef<'a>>) {
    match geometry {
        Geometry::Point(c) => out.push(ComponentRef::Point(c)),
        Geometry::MultiPoint(pts) => out.extend(pts.iter().map(ComponentRef::Point)),
        Geometry::LineString(ls) => out.push(ComponentRef::Line(ls)),
        Geometry::MultiLineString(lines) => out.extend(lines.iter().map(ComponentRef::Line)),
        Geometry::Polygon(p) => out.push(ComponentRef::Polygon(p)),
        Geometry::MultiPolygon(polys) => out.extend(polys.iter().map(ComponentRef::Polygon)),
        Geometry::GeometryCollection(geoms) => {
            for g in geoms {
                collect(g, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_flatten_collections() {
        let g = Geometry::GeometryCollection(vec![
            Geometry::MultiPoint(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)]),
            Geometry::GeometryCollection(vec![Geometry::LineString(LineString::from_xy(&[
                (0.0, 0.0),
                (1.0, 1.0),
            ]))]),
            Geometry::empty_polygon(),
        ]);
        let comps = components(&g);
        assert_eq!(comps.len(), 3);
        assert!(matches!(comps[0], ComponentRef::Point(_)));
        assert!(matches!(comps[2], ComponentRef::Line(_)));
    }

    #[test]
    fn inside_area_has_no_segment() {
        let poly = Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
            vec![],
        );
        let loc = GeometryLocation::inside_area(&poly, Coordinate::new(0.6, 0.3));
        assert!(loc.is_inside_area());
        assert_eq!(loc.segment_index(), None);
        let loc = GeometryLocation::on_segment(ComponentRef::Polygon(&poly), 2, Coordinate::new(0.5, 0.5));
        assert_eq!(loc.segment_index(), Some(2));
    }
}
