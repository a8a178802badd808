//! One representative point per connected element of a geometry.
//!
//! Points, line strings and polygons are each connected, so any single
//! coordinate of each stands for the whole element when testing whether one
//! geometry lies partly inside another.

use crate::geometry::{Coordinate, Geometry};

use super::location::{components, GeometryLocation};

/// The first coordinate of every point, line string and polygon component.
#[must_use]
pub fn connected_element_points(geometry: &Geometry) -> Vec<Coordinate> {
    components(geometry)
        .iter()
        .filter_map(|c| c.coords().first().copied())
        .collect()
}

/// Like [`connected_element_points`], with each point located on segment 0
/// of its component.
#[must_use]
pub fn connected_element_locations(geometry: &Geometry) -> Vec<GeometryLocation<'_>> {
    components(geometry)
        .into_iter()
        .filter_map(|c| {
            c.coords()
                .first()
                .map(|&pt| GeometryLocation::on_segment(c, 0, pt))
        })
        .collect()
}
