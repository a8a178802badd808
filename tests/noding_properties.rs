#![allow(clippy::unwrap_used)]

mod common;

use geotopo::error::{GeotopoError, NodingError};
use geotopo::geometry::{Coordinate, Location};
use geotopo::math::LineIntersector;
use geotopo::noding::{IteratedNoder, Noder, NodingValidator, SegmentString};
use geotopo::topology::Label;

fn random_strings(seed: u64, count: usize) -> Vec<SegmentString> {
    let mut rng = common::rng(seed);
    (0..count)
        .map(|_| {
            let pts = (0..3).map(|_| common::random_coord(&mut rng, 100.0)).collect();
            SegmentString::new(pts, Label::line(Location::Interior))
        })
        .collect()
}

fn node(strings: Vec<SegmentString>) -> Option<Vec<SegmentString>> {
    match IteratedNoder::default().compute_nodes(strings) {
        Ok(noded) => Some(noded),
        Err(GeotopoError::Noding(NodingError::NonConvergence { .. })) => None,
        Err(e) => panic!("unexpected noding error: {e}"),
    }
}

fn total_length(strings: &[SegmentString]) -> f64 {
    strings
        .iter()
        .flat_map(|s| s.coords().windows(2).map(|w| w[0].distance(&w[1])))
        .sum()
}

fn has_vertex(strings: &[SegmentString], p: &Coordinate) -> bool {
    strings
        .iter()
        .flat_map(SegmentString::coords)
        .any(|c| c.distance(p) < 1e-9)
}

#[test]
fn random_batteries_are_fully_noded() {
    common::init_tracing();
    for seed in 0..20 {
        let input = random_strings(seed, 8);
        let Some(noded) = node(input.clone()) else {
            continue;
        };
        assert!(
            NodingValidator::new(&noded).validate().is_ok(),
            "seed {seed} left interior intersections"
        );
        let (before, after) = (total_length(&input), total_length(&noded));
        assert!((before - after).abs() < 1e-9 * before, "seed {seed} changed length");
    }
}

#[test]
fn every_input_intersection_becomes_a_vertex() {
    common::init_tracing();
    let li = LineIntersector::new();
    for seed in 100..110 {
        let input = random_strings(seed, 6);
        let Some(noded) = node(input.clone()) else {
            continue;
        };
        for (i, a) in input.iter().enumerate() {
            for b in &input[i + 1..] {
                for sa in a.coords().windows(2) {
                    for sb in b.coords().windows(2) {
                        let r = li.compute_intersection(&sa[0], &sa[1], &sb[0], &sb[1]);
                        for k in 0..r.intersection_count() {
                            assert!(has_vertex(&noded, &r.intersection(k)), "seed {seed}");
                        }
                    }
                }
            }
        }
        for c in input.iter().flat_map(SegmentString::coords) {
            assert!(has_vertex(&noded, c), "seed {seed} lost an input vertex");
        }
    }
}

#[test]
fn renoding_is_idempotent() {
    common::init_tracing();
    for seed in 200..210 {
        let Some(once) = node(random_strings(seed, 6)) else {
            continue;
        };
        let twice = node(once.clone()).unwrap();
        assert_eq!(once.len(), twice.len(), "seed {seed}");
        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.coords(), b.coords(), "seed {seed}");
        }
    }
}

#[test]
fn validator_rejects_unnoded_input() {
    let crossing = vec![
        SegmentString::new(
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0)],
            Label::line(Location::Interior),
        ),
        SegmentString::new(
            vec![Coordinate::new(0.0, 10.0), Coordinate::new(10.0, 0.0)],
            Label::line(Location::Interior),
        ),
    ];
    assert!(NodingValidator::new(&crossing).validate().is_err());
    let noded = node(crossing).unwrap();
    assert_eq!(noded.len(), 4);
    NodingValidator::new(&noded).check_valid();
}
