use crate::error::Result;
use crate::geometry::{Envelope, Interval};
use crate::index::Bintree;
use crate::math::LineIntersector;

use super::{noded_substrings, IntersectionAdder, Noder, SegmentString};

/// Single-pass noder that filters candidate segment pairs through an
/// x-interval [`Bintree`] before testing their envelopes.
///
/// One pass does not guarantee a fully noded result when computed
/// intersection points are rounded; see [`super::IteratedNoder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedNoder {
    li: LineIntersector,
}

impl IndexedNoder {
    #[must_use]
    pub fn new(li: LineIntersector) -> Self {
        Self { li }
    }

    /// Adds nodes to `strings` for every intersection and returns the adder
    /// holding the pass statistics.
    pub fn add_nodes(&self, strings: &mut [SegmentString]) -> IntersectionAdder {
        let mut adder = IntersectionAdder::new(self.li);
        let mut index: Bintree<(usize, usize)> = Bintree::new();

        for si in 0..strings.len() {
            for seg in 0..strings[si].segment_count() {
                let (p0, p1) = strings[si].segment(seg);
                let x_range = Interval::new(p0.x, p1.x);

                let candidates: Vec<(usize, usize)> =
                    index.query(&x_range).into_iter().copied().collect();
                for (sj, seg_j) in candidates {
                    let (q0, q1) = strings[sj].segment(seg_j);
                    if !Envelope::segments_intersect(&p0, &p1, &q0, &q1) {
                        continue;
                    }
                    adder.process_intersections(strings, si, seg, sj, seg_j);
                }
                index.insert(x_range, (si, seg));
            }
        }
        adder
    }
}

impl Noder for IndexedNoder {
    fn compute_nodes(&self, mut strings: Vec<SegmentString>) -> Result<Vec<SegmentString>> {
        self.add_nodes(&mut strings);
        Ok(noded_substrings(&strings))
    }
}
