use std::cmp::Ordering;

use crate::geometry::Coordinate;

use super::octant::compare_segment_points;

/// An intersection point recorded on a segment of a segment string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentNode {
    pub coord: Coordinate,
    /// Index of the segment the node lies on.
    pub segment_index: usize,
    /// Octant of that segment, used to order nodes along it.
    pub segment_octant: u8,
    /// `false` if the node coincides with the segment's start vertex.
    pub is_interior: bool,
}

/// Orders nodes by segment index, then by position along the segment.
#[must_use]
pub fn compare_segment_nodes(a: &SegmentNode, b: &SegmentNode) -> Ordering {
    a.segment_index.cmp(&b.segment_index).then_with(|| {
        if a.coord.equals_2d(&b.coord) {
            Ordering::Equal
        } else {
            compare_segment_points(a.segment_octant, &a.coord, &b.coord)
        }
    })
}

/// Sorted, duplicate-free set of nodes on one segment string.
#[derive(Debug, Clone, Default)]
pub struct SegmentNodeList {
    nodes: Vec<SegmentNode>,
}

impl SegmentNodeList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` unless an equal node is already present.
    ///
    /// Returns `true` if the node was added.
    pub fn insert(&mut self, node: SegmentNode) -> bool {
        match self
            .nodes
            .binary_search_by(|probe| compare_segment_nodes(probe, &node))
        {
            Ok(_) => false,
            Err(pos) => {
                self.nodes.insert(pos, node);
                true
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SegmentNode> {
        self.nodes.iter()
    }

    /// Vertex indices at which the noded string would fold back on itself:
    /// both `a-b-a` vertex patterns and pairs of equal nodes separated by a
    /// single vertex.
    pub(crate) fn collapsed_vertex_indices(&self, pts: &[Coordinate]) -> Vec<usize> {
        let mut out: Vec<usize> = pts
            .windows(3)
            .enumerate()
            .filter(|(_, w)| w[0].equals_2d(&w[2]))
            .map(|(i, _)| i + 1)
            .collect();

        for pair in self.nodes.windows(2) {
            let (n0, n1) = (&pair[0], &pair[1]);
            if !n0.coord.equals_2d(&n1.coord) {
                continue;
            }
            let mut between = n1.segment_index - n0.segment_index;
            if !n1.is_interior {
                between = between.saturating_sub(1);
            }
            if between == 1 {
                out.push(n0.segment_index + 1);
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a SegmentNodeList {
    type Item = &'a SegmentNode;
    type IntoIter = std::slice::Iter<'a, SegmentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
