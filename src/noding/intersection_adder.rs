use crate::math::LineIntersector;

use super::SegmentString;

/// Computes intersections between pairs of segments and records them as
/// nodes on the segment strings involved.
///
/// Strings are addressed by index into the slice being noded, so both sides
/// of a pair may belong to the same string.
#[derive(Debug, Clone, Default)]
pub struct IntersectionAdder {
    li: LineIntersector,
    num_tests: usize,
    num_intersections: usize,
    num_interior_intersections: usize,
    num_proper_intersections: usize,
}

impl IntersectionAdder {
    #[must_use]
    pub fn new(li: LineIntersector) -> Self {
        Self {
            li,
            ..Self::default()
        }
    }

    /// Tests segment `seg0` of `strings[e0]` against segment `seg1` of
    /// `strings[e1]`.
    ///
    /// # Panics
    ///
    /// Panics if a string or segment index is out of range.
    pub fn process_intersections(
        &mut self,
        strings: &mut [SegmentString],
        e0: usize,
        seg0: usize,
        e1: usize,
        seg1: usize,
    ) {
        if e0 == e1 && seg0 == seg1 {
            return;
        }
        self.num_tests += 1;

        let (p00, p01) = strings[e0].segment(seg0);
        let (p10, p11) = strings[e1].segment(seg1);
        let result = self.li.compute_intersection(&p00, &p01, &p10, &p11);
        if !result.has_intersection() {
            return;
        }

        self.num_intersections += 1;
        if result.is_interior_intersection() {
            self.num_interior_intersections += 1;
        }
        if Self::is_trivial_intersection(strings, e0, seg0, e1, seg1, result.intersection_count()) {
            return;
        }

        strings[e0].add_intersections(&result, seg0);
        strings[e1].add_intersections(&result, seg1);
        if result.is_proper() {
            self.num_proper_intersections += 1;
        }
    }

    /// A single-point intersection between adjacent segments of one string
    /// (including the closing pair of a ring) is just the shared vertex.
    fn is_trivial_intersection(
        strings: &[SegmentString],
        e0: usize,
        seg0: usize,
        e1: usize,
        seg1: usize,
        count: usize,
    ) -> bool {
        if e0 != e1 || count != 1 {
            return false;
        }
        if seg0.abs_diff(seg1) == 1 {
            return true;
        }
        let ss = &strings[e0];
        if ss.is_closed() {
            let max_seg = ss.segment_count().saturating_sub(1);
            if (seg0 == 0 && seg1 == max_seg) || (seg1 == 0 && seg0 == max_seg) {
                return true;
            }
        }
        false
    }

    #[must_use]
    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    #[must_use]
    pub fn num_intersections(&self) -> usize {
        self.num_intersections
    }

    /// Intersections with a point interior to at least one segment.
    #[must_use]
    pub fn num_interior_intersections(&self) -> usize {
        self.num_interior_intersections
    }

    #[must_use]
    pub fn num_proper_intersections(&self) -> usize {
        self.num_proper_intersections
    }

    #[must_use]
    pub fn has_interior_intersection(&self) -> bool {
        self.num_interior_intersections > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Coordinate, Location};
    use crate::topology::Label;

    fn string(pts: &[(f64, f64)]) -> SegmentString {
        SegmentString::new(
            pts.iter().map(|&p| Coordinate::from(p)).collect(),
            Label::line(Location::Interior),
        )
    }

    #[test]
    fn crossing_adds_node_to_both() {
        let mut strings = vec![string(&[(0.0, 0.0), (2.0, 2.0)]), string(&[(0.0, 2.0), (2.0, 0.0)])];
        let mut adder = IntersectionAdder::new(LineIntersector::new());
        adder.process_intersections(&mut strings, 0, 0, 1, 0);
        assert_eq!(adder.num_proper_intersections(), 1);
        assert!(adder.has_interior_intersection());
        assert_eq!(strings[0].nodes().len(), 1);
        assert_eq!(strings[1].nodes().len(), 1);
    }

    #[test]
    fn same_segment_is_skipped() {
        let mut strings = vec![string(&[(0.0, 0.0), (2.0, 2.0)])];
        let mut adder = IntersectionAdder::new(LineIntersector::new());
        adder.process_intersections(&mut strings, 0, 0, 0, 0);
        assert_eq!(adder.num_tests(), 0);
    }

    #[test]
    fn adjacent_segments_are_trivial() {
        let mut strings = vec![string(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])];
        let mut adder = IntersectionAdder::new(LineIntersector::new());
        adder.process_intersections(&mut strings, 0, 0, 0, 1);
        assert_eq!(adder.num_intersections(), 1);
        assert!(strings[0].nodes().is_empty());
    }

    #[test]
    fn ring_closing_pair_is_trivial() {
        let mut strings = vec![string(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)])];
        let mut adder = IntersectionAdder::new(LineIntersector::new());
        adder.process_intersections(&mut strings, 0, 0, 0, 2);
        assert!(strings[0].nodes().is_empty());
    }

    #[test]
    fn self_crossing_is_noded() {
        // Bow tie: segments 0 and 2 cross at (1, 1).
        let mut strings = vec![string(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])];
        let mut adder = IntersectionAdder::new(LineIntersector::new());
        adder.process_intersections(&mut strings, 0, 0, 0, 2);
        assert_eq!(strings[0].nodes().len(), 2);
    }
}
