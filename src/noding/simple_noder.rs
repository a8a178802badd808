use crate::error::Result;
use crate::math::LineIntersector;

use super::{noded_substrings, IntersectionAdder, Noder, SegmentString};

/// Brute-force noder testing every pair of segments. Quadratic; useful as a
/// reference for the indexed noder.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleNoder {
    li: LineIntersector,
}

impl SimpleNoder {
    #[must_use]
    pub fn new(li: LineIntersector) -> Self {
        Self { li }
    }
}

impl Noder for SimpleNoder {
    fn compute_nodes(&self, mut strings: Vec<SegmentString>) -> Result<Vec<SegmentString>> {
        let mut adder = IntersectionAdder::new(self.li);
        for e0 in 0..strings.len() {
            for e1 in e0..strings.len() {
                for s0 in 0..strings[e0].segment_count() {
                    let start = if e0 == e1 { s0 + 1 } else { 0 };
                    for s1 in start..strings[e1].segment_count() {
                        adder.process_intersections(&mut strings, e0, s0, e1, s1);
                    }
                }
            }
        }
        Ok(noded_substrings(&strings))
    }
}
