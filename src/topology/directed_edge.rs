use std::cmp::Ordering;

use crate::geometry::{Coordinate, Location, Position};
use crate::math::orientation_index;

use super::{EdgeId, Label, NodeId};

slotmap::new_key_type! {
    /// Key of a [`DirectedEdge`] in a [`super::PlanarGraph`].
    pub struct DirectedEdgeId;
}

/// Quadrant of a direction vector, numbered counter-clockwise from the
/// positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    #[must_use]
    pub fn of(dx: f64, dy: f64) -> Self {
        match (dx >= 0.0, dy >= 0.0) {
            (true, true) => Quadrant::NorthEast,
            (false, true) => Quadrant::NorthWest,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::SouthEast,
        }
    }

    #[must_use]
    pub fn is_northern(self) -> bool {
        matches!(self, Quadrant::NorthEast | Quadrant::NorthWest)
    }
}

/// One traversal direction of an edge, leaving `origin`.
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    pub(crate) edge: EdgeId,
    pub(crate) forward: bool,
    pub(crate) sym: Option<DirectedEdgeId>,
    pub(crate) origin: NodeId,
    /// Start point and the next distinct point, fixing the direction.
    pub(crate) p0: Coordinate,
    pub(crate) p1: Coordinate,
    pub(crate) quadrant: Quadrant,
    pub(crate) label: Label,
    pub(crate) depth_left: Option<i32>,
    pub(crate) depth_right: Option<i32>,
    pub(crate) visited: bool,
    pub(crate) in_result: bool,
    pub(crate) next: Option<DirectedEdgeId>,
    pub(crate) next_min: Option<DirectedEdgeId>,
    pub(crate) edge_ring: Option<usize>,
    pub(crate) min_edge_ring: Option<usize>,
}

impl DirectedEdge {
    pub(crate) fn new(
        edge: EdgeId,
        forward: bool,
        origin: NodeId,
        p0: Coordinate,
        p1: Coordinate,
        edge_label: &Label,
    ) -> Self {
        let label = if forward {
            *edge_label
        } else {
            edge_label.flipped()
        };
        Self {
            edge,
            forward,
            sym: None,
            origin,
            p0,
            p1,
            quadrant: Quadrant::of(p1.x - p0.x, p1.y - p0.y),
            label,
            depth_left: None,
            depth_right: None,
            visited: false,
            in_result: false,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
        }
    }

    #[must_use]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    #[must_use]
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.p0
    }

    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    #[must_use]
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    #[must_use]
    pub fn dy(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    #[must_use]
    pub fn depth(&self, pos: Position) -> Option<i32> {
        match pos {
            Position::Left => self.depth_left,
            Position::Right => self.depth_right,
            Position::On => None,
        }
    }

    #[must_use]
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Returns `true` if both sides lie in the interior of the source area,
    /// so the edge cannot be part of the result boundary.
    #[must_use]
    pub fn is_interior_area_edge(&self) -> bool {
        self.label.is_area()
            && self.label.left == Location::Interior
            && self.label.right == Location::Interior
    }

    /// Orders edges leaving the same point counter-clockwise, starting from
    /// the positive x axis.
    #[must_use]
    pub fn compare_direction(&self, other: &DirectedEdge) -> Ordering {
        self.quadrant.cmp(&other.quadrant).then_with(|| {
            match orientation_index(&other.p0, &other.p1, &self.p1).index() {
                i if i < 0 => Ordering::Less,
                0 => Ordering::Equal,
                _ => Ordering::Greater,
            }
        })
    }
}
