use std::collections::BTreeMap;

use crate::geometry::{CoordKey, Coordinate, Envelope, Location};

use super::Label;

slotmap::new_key_type! {
    /// Key of an [`Edge`] in a [`super::PlanarGraph`].
    pub struct EdgeId;
}

/// An edge of a planar graph: a noded polyline with a label and the change
/// in depth from its right side to its left side.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) coords: Vec<Coordinate>,
    pub(crate) label: Label,
    pub(crate) depth_delta: i32,
}

impl Edge {
    #[must_use]
    pub fn new(coords: Vec<Coordinate>, label: Label) -> Self {
        Self {
            coords,
            label,
            depth_delta: 0,
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
    pub fn depth_delta(&self) -> i32 {
        self.depth_delta
    }

    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(&self.coords)
    }

    /// Returns `true` if both edges have the same coordinates in the same
    /// order.
    #[must_use]
    pub fn is_pointwise_equal(&self, other: &Edge) -> bool {
        self.coords.len() == other.coords.len()
            && self
                .coords
                .iter()
                .zip(&other.coords)
                .all(|(a, b)| a.equals_2d(b))
    }

    /// Key identifying the edge regardless of direction.
    fn key(&self) -> Vec<CoordKey> {
        let fwd: Vec<CoordKey> = self.coords.iter().map(CoordKey::new).collect();
        let rev: Vec<CoordKey> = fwd.iter().rev().copied().collect();
        fwd.min(rev)
    }
}

/// Depth change across a boundary with the given side locations: `+1` when
/// the interior is on the left, `-1` when it is on the right.
#[must_use]
pub fn depth_delta(label: &Label) -> i32 {
    match (label.left, label.right) {
        (Location::Interior, Location::Exterior) => 1,
        (Location::Exterior, Location::Interior) => -1,
        _ => 0,
    }
}

/// A list of edges in which equal edges, in either direction, are stored
/// once with their depth deltas summed.
#[derive(Debug, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
    index: BTreeMap<Vec<CoordKey>, usize>,
}

impl EdgeList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `edge`, or merges it into an existing equal edge.
    pub fn insert_unique(&mut self, mut edge: Edge) {
        let key = edge.key();
        if let Some(&i) = self.index.get(&key) {
            let existing = &mut self.edges[i];
            let mut label = edge.label;
            if !existing.is_pointwise_equal(&edge) {
                label.flip();
            }
            existing.label.merge(&label);
            existing.depth_delta += depth_delta(&label);
            return;
        }
        edge.depth_delta = depth_delta(&edge.label);
        self.index.insert(key, self.edges.len());
        self.edges.push(edge);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    #[must_use]
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}
