use crate::geometry::{Coordinate, Envelope};
use crate::math::SegmentIntersection;
use crate::topology::Label;

use super::octant::segment_octant;
use super::segment_node::{SegmentNode, SegmentNodeList};

/// A linear run of coordinates to be noded, tagged with the topological
/// label of the geometry it came from.
#[derive(Debug, Clone)]
pub struct SegmentString {
    coords: Vec<Coordinate>,
    label: Label,
    nodes: SegmentNodeList,
}

impl SegmentString {
    #[must_use]
    pub fn new(coords: Vec<Coordinate>, label: Label) -> Self {
        Self {
            coords,
            label,
            nodes: SegmentNodeList::new(),
        }
    }

    #[must_use]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    #[must_use]
    pub fn nodes(&self) -> &SegmentNodeList {
        &self.nodes
    }

    /// Number of coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

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

    /// Octant of segment `index`. The last vertex has no segment and reports
    /// octant 0, as does a zero-length segment.
    #[must_use]
    pub fn segment_octant(&self, index: usize) -> u8 {
        match (self.coords.get(index), self.coords.get(index + 1)) {
            (Some(p0), Some(p1)) => segment_octant(p0, p1),
            _ => 0,
        }
    }

    /// Returns the endpoints of segment `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index + 1` is out of range.
    #[must_use]
    pub fn segment(&self, index: usize) -> (Coordinate, Coordinate) {
        (self.coords[index], self.coords[index + 1])
    }

    /// Records every point of `result` as a node on segment `segment_index`.
    pub fn add_intersections(&mut self, result: &SegmentIntersection, segment_index: usize) {
        for pt in result.points() {
            self.add_intersection(*pt, segment_index);
        }
    }

    /// Records `pt` as a node on segment `segment_index`.
    ///
    /// A point equal to the segment's end vertex is stored on the next
    /// segment, so every node has a unique representation.
    pub fn add_intersection(&mut self, pt: Coordinate, segment_index: usize) {
        let mut index = segment_index;
        if self
            .coords
            .get(index + 1)
            .is_some_and(|next| pt.equals_2d(next))
        {
            index += 1;
        }
        self.add_node(pt, index);
    }

    fn add_node(&mut self, coord: Coordinate, segment_index: usize) {
        let is_interior = self
            .coords
            .get(segment_index)
            .is_none_or(|start| !coord.equals_2d(start));
        let node = SegmentNode {
            coord,
            segment_index,
            segment_octant: self.segment_octant(segment_index),
            is_interior,
        };
        self.nodes.insert(node);
    }

    /// Splits this string at its nodes into fully noded substrings.
    ///
    /// The endpoints are always nodes. Vertices where the string would fold
    /// back on itself are made nodes too, so no substring contains an
    /// `a-b-a` collapse.
    #[must_use]
    pub fn split(&self) -> Vec<SegmentString> {
        let Some(last) = self.coords.len().checked_sub(1) else {
            return Vec::new();
        };

        let mut list = self.clone();
        list.add_node(self.coords[0], 0);
        list.add_node(self.coords[last], last);
        for index in list.nodes.collapsed_vertex_indices(&self.coords) {
            list.add_node(self.coords[index], index);
        }

        let nodes: Vec<&SegmentNode> = list.nodes.iter().collect();
        nodes
            .windows(2)
            .map(|pair| self.split_edge(pair[0], pair[1]))
            .collect()
    }

    fn split_edge(&self, n0: &SegmentNode, n1: &SegmentNode) -> SegmentString {
        let last_seg_start = &self.coords[n1.segment_index];
        // The end node is only needed if it is not the last vertex copied.
        let use_end_node = n1.is_interior || !n1.coord.equals_2d(last_seg_start);

        let mut pts = Vec::with_capacity(n1.segment_index - n0.segment_index + 2);
        pts.push(n0.coord);
        pts.extend_from_slice(&self.coords[n0.segment_index + 1..=n1.segment_index]);
        if use_end_node {
            pts.push(n1.coord);
        }
        SegmentString::new(pts, self.label)
    }
}
