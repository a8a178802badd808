#![allow(clippy::unwrap_used)]

mod common;

use std::f64::consts::{PI, TAU};

use approx::assert_relative_eq;
use rand::Rng;

use geotopo::geometry::{Coordinate, Geometry, LineString, Location, Polygon};
use geotopo::operations::distance::PointLocator;
use geotopo::operations::{BufferOp, BufferParameters, DistanceOp, JoinStyle};

/// Convex polygon with `n` vertices jittered around a circle of radius 10.
fn random_convex(seed: u64, n: usize) -> Polygon {
    let mut rng = common::rng(seed);
    let step = TAU / n as f64;
    let mut pts: Vec<Coordinate> = (0..n)
        .map(|i| {
            let a = (i as f64 + rng.gen_range(0.0..0.8)) * step;
            Coordinate::new(50.0 + 10.0 * a.cos(), 50.0 + 10.0 * a.sin())
        })
        .collect();
    pts.push(pts[0]);
    Polygon::new(LineString::new(pts), vec![])
}

fn unit_square() -> Geometry {
    Geometry::Polygon(Polygon::new(
        LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
        vec![],
    ))
}

#[test]
fn unit_square_sign_convention() {
    common::init_tracing();
    let mitre = BufferParameters::default().with_join_style(JoinStyle::Mitre);
    let grown = BufferOp::new(&unit_square(), 1.0)
        .with_parameters(mitre)
        .execute()
        .unwrap();
    assert_relative_eq!(grown.area(), 9.0, epsilon = 1e-9);

    let eroded = BufferOp::new(&unit_square(), -0.6).execute().unwrap();
    assert!(eroded.is_empty());
}

#[test]
fn dilation_grows_convex_polygons() {
    common::init_tracing();
    let mut rng = common::rng(7);
    for seed in 0..16 {
        let poly = random_convex(seed, 5 + (seed as usize % 6));
        let d = rng.gen_range(0.1..3.0);
        let input = Geometry::Polygon(poly.clone());
        let result = BufferOp::new(&input, d).execute().unwrap();
        let (area, perimeter) = (poly.area(), poly.shell().length());

        assert!(matches!(result, Geometry::Polygon(_)), "seed {seed}");
        assert!(result.area() > area + perimeter * d, "seed {seed}");
        assert!(result.area() < area + perimeter * d + PI * d * d, "seed {seed}");
        for c in poly.shell().coords() {
            let pt = Geometry::Point(*c);
            assert_eq!(DistanceOp::new(&pt, &result).distance(), 0.0, "seed {seed}");
        }
    }
}

#[test]
fn erosion_shrinks_convex_polygons() {
    common::init_tracing();
    let mut rng = common::rng(11);
    let locator = PointLocator::new();
    for seed in 20..36 {
        let poly = random_convex(seed, 5 + (seed as usize % 6));
        let d = rng.gen_range(0.1..3.0);
        let result = BufferOp::new(&Geometry::Polygon(poly.clone()), -d)
            .execute()
            .unwrap();

        assert!(result.area() < poly.area(), "seed {seed}");
        for r in result.polygons() {
            for c in r.shell().coords() {
                assert_eq!(locator.locate_in_polygon(c, &poly), Location::Interior, "seed {seed}");
            }
        }
    }
}

#[test]
fn zero_distance_keeps_polygon_area() {
    common::init_tracing();
    let poly = random_convex(3, 7);
    let result = BufferOp::new(&Geometry::Polygon(poly.clone()), 0.0)
        .execute()
        .unwrap();
    assert_relative_eq!(result.area(), poly.area(), epsilon = 1e-9);
}

#[test]
fn round_capped_segment_lies_between_bounds() {
    common::init_tracing();
    let line = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0)]));
    let area = BufferOp::new(&line, 1.0).execute().unwrap().area();
    assert!(area > 20.0);
    assert!(area < 20.0 + PI);
}

#[test]
fn point_buffer_approximates_disk() {
    let pt = Geometry::Point(Coordinate::new(3.0, 4.0));
    let area = BufferOp::new(&pt, 1.0).execute().unwrap().area();
    // Regular 32-gon inscribed in the unit circle.
    assert_relative_eq!(area, 16.0 * (TAU / 32.0).sin(), epsilon = 1e-9);
}
