pub mod directed_edge;
pub mod edge;
pub mod label;
pub mod node;

pub use directed_edge::{DirectedEdge, DirectedEdgeId, Quadrant};
pub use edge::{depth_delta, Edge, EdgeId, EdgeList};
pub use label::Label;
pub use node::{Node, NodeId};

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::{CoordKey, Coordinate, Position};

/// Arena holding a planar graph of nodes, edges and directed edges.
///
/// Entities reference each other through generational keys. Each edge owns
/// two directed edges, one per direction, linked through `sym`. Nodes are
/// unique per coordinate.
#[derive(Debug, Default)]
pub struct PlanarGraph {
    nodes: SlotMap<NodeId, Node>,
    edges: SlotMap<EdgeId, Edge>,
    dir_edges: SlotMap<DirectedEdgeId, DirectedEdge>,
    node_index: BTreeMap<CoordKey, NodeId>,
}

impl PlanarGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a list of edges.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge has fewer than two distinct points.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Result<Self> {
        let mut graph = Self::new();
        for e in edges {
            graph.add_edge(e)?;
        }
        Ok(graph)
    }

    // --- Node operations ---

    /// Returns the node at `coord`, creating it if needed.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeId {
        let key = CoordKey::new(&coord);
        if let Some(&id) = self.node_index.get(&key) {
            return id;
        }
        let id = self.nodes.insert(Node::new(coord));
        self.node_index.insert(key, id);
        id
    }

    /// Returns the node at `coord`, if any.
    #[must_use]
    pub fn find_node(&self, coord: &Coordinate) -> Option<NodeId> {
        self.node_index.get(&CoordKey::new(coord)).copied()
    }

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        Ok(self
            .nodes
            .get(id)
            .ok_or(TopologyError::EntityNotFound("node"))?)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        Ok(self
            .nodes
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("node"))?)
    }

    /// Node ids in ascending coordinate order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.node_index.values().copied().collect()
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    // --- Edge operations ---

    /// Inserts an edge with its pair of directed edges, creating end nodes
    /// as needed.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the edge has no two distinct
    /// points.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId> {
        let coords = edge.coords();
        let (Some(&first), Some(&last)) = (coords.first(), coords.last()) else {
            return Err(GeometryError::Degenerate("edge without coordinates".into()).into());
        };
        let Some(&second) = coords.iter().find(|c| !c.equals_2d(&first)) else {
            return Err(GeometryError::Degenerate(format!("zero-length edge at {first}")).into());
        };
        let Some(&second_last) = coords.iter().rev().find(|c| !c.equals_2d(&last)) else {
            return Err(GeometryError::Degenerate(format!("zero-length edge at {last}")).into());
        };
        let label = edge.label;

        let start = self.add_node(first);
        let end = self.add_node(last);
        let id = self.edges.insert(edge);

        let fwd = self
            .dir_edges
            .insert(DirectedEdge::new(id, true, start, first, second, &label));
        let bwd = self
            .dir_edges
            .insert(DirectedEdge::new(id, false, end, last, second_last, &label));
        self.dir_edge_mut(fwd)?.sym = Some(bwd);
        self.dir_edge_mut(bwd)?.sym = Some(fwd);
        self.insert_into_star(start, fwd)?;
        self.insert_into_star(end, bwd)?;
        Ok(id)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        Ok(self
            .edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))?)
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    // --- Directed edge operations ---

    /// Returns a reference to the directed edge data, or an error if not
    /// found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn dir_edge(&self, id: DirectedEdgeId) -> Result<&DirectedEdge> {
        Ok(self
            .dir_edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("directed edge"))?)
    }

    pub(crate) fn dir_edge_mut(&mut self, id: DirectedEdgeId) -> Result<&mut DirectedEdge> {
        Ok(self
            .dir_edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("directed edge"))?)
    }

    /// Returns the directed edge running the other way along the same edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the directed edge is missing or unpaired.
    pub fn sym(&self, id: DirectedEdgeId) -> Result<DirectedEdgeId> {
        Ok(self
            .dir_edge(id)?
            .sym
            .ok_or(TopologyError::EntityNotFound("sym directed edge"))?)
    }

    /// Coordinates of the underlying edge in the direction of `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directed edge or its edge is missing.
    pub fn dir_edge_coords(&self, id: DirectedEdgeId) -> Result<Vec<Coordinate>> {
        let de = self.dir_edge(id)?;
        let coords = self.edge(de.edge)?.coords();
        Ok(if de.forward {
            coords.to_vec()
        } else {
            coords.iter().rev().copied().collect()
        })
    }

    /// Depth delta of the edge seen from `id`: negated for the backward
    /// direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the directed edge or its edge is missing.
    pub fn dir_edge_depth_delta(&self, id: DirectedEdgeId) -> Result<i32> {
        let de = self.dir_edge(id)?;
        let delta = self.edge(de.edge)?.depth_delta;
        Ok(if de.forward { delta } else { -delta })
    }

    /// Sets one side depth of a directed edge.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DepthConflict` if that side already carries a
    /// different depth.
    pub fn set_depth(&mut self, id: DirectedEdgeId, pos: Position, depth: i32) -> Result<()> {
        let de = self.dir_edge_mut(id)?;
        let slot = match pos {
            Position::Left => &mut de.depth_left,
            Position::Right => &mut de.depth_right,
            Position::On => return Ok(()),
        };
        match *slot {
            Some(existing) if existing != depth => {
                Err(TopologyError::DepthConflict(de.p0).into())
            }
            _ => {
                *slot = Some(depth);
                Ok(())
            }
        }
    }

    /// Sets the depth on side `pos` and derives the opposite side from the
    /// edge's depth delta.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DepthConflict` if either side already carries
    /// a different depth.
    pub fn set_edge_depths(&mut self, id: DirectedEdgeId, pos: Position, depth: i32) -> Result<()> {
        let delta = self.dir_edge_depth_delta(id)?;
        let factor = if pos == Position::Left { -1 } else { 1 };
        self.set_depth(id, pos, depth)?;
        self.set_depth(id, pos.opposite(), depth + delta * factor)
    }

    /// Copies the depths of `id` onto its sym with sides swapped.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DepthConflict` if the sym already carries
    /// different depths.
    pub fn copy_sym_depths(&mut self, id: DirectedEdgeId) -> Result<()> {
        let sym = self.sym(id)?;
        let de = self.dir_edge(id)?;
        let (left, right) = (de.depth_left, de.depth_right);
        if let Some(r) = right {
            self.set_depth(sym, Position::Left, r)?;
        }
        if let Some(l) = left {
            self.set_depth(sym, Position::Right, l)?;
        }
        Ok(())
    }

    /// Links result directed edges into maximal rings at every given node.
    ///
    /// # Errors
    ///
    /// Returns an error if a node cannot be linked consistently.
    pub fn link_result_directed_edges(&mut self, nodes: &[NodeId]) -> Result<()> {
        for &n in nodes {
            self.link_result_directed_edges_at(n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Location;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn area_edge(pts: &[(f64, f64)]) -> Edge {
        let mut e = Edge::new(
            pts.iter().map(|&p| Coordinate::from(p)).collect(),
            Label::area(Location::Boundary, Location::Interior, Location::Exterior),
        );
        e.depth_delta = 1;
        e
    }

    #[test]
    fn nodes_are_shared_and_stars_sorted() {
        let graph = PlanarGraph::from_edges([
            area_edge(&[(0.0, 0.0), (1.0, 0.0)]),
            area_edge(&[(0.0, 0.0), (0.0, 1.0)]),
            area_edge(&[(0.0, 0.0), (-1.0, -1.0)]),
        ])
        .unwrap();
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 3);

        let origin = graph.find_node(&c(0.0, 0.0)).unwrap();
        let star = graph.node(origin).unwrap().star();
        assert_eq!(star.len(), 3);
        let ends: Vec<Coordinate> = star
            .iter()
            .map(|&d| graph.dir_edge(d).unwrap().p1)
            .collect();
        assert_eq!(ends, vec![c(1.0, 0.0), c(0.0, 1.0), c(-1.0, -1.0)]);
    }

    #[test]
    fn sym_pairs_and_reversed_coords() {
        let mut graph = PlanarGraph::new();
        graph.add_edge(area_edge(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])).unwrap();
        let start = graph.find_node(&c(0.0, 0.0)).unwrap();
        let fwd = graph.node(start).unwrap().star()[0];
        let bwd = graph.sym(fwd).unwrap();
        assert_eq!(graph.sym(bwd).unwrap(), fwd);
        assert_eq!(
            graph.dir_edge_coords(bwd).unwrap(),
            vec![c(1.0, 1.0), c(1.0, 0.0), c(0.0, 0.0)]
        );
        assert_eq!(graph.dir_edge_depth_delta(bwd).unwrap(), -1);
        assert_eq!(graph.dir_edge(bwd).unwrap().label().left, Location::Exterior);
    }

    #[test]
    fn edge_depths_follow_delta() {
        let mut graph = PlanarGraph::new();
        graph.add_edge(area_edge(&[(0.0, 0.0), (1.0, 0.0)])).unwrap();
        let start = graph.find_node(&c(0.0, 0.0)).unwrap();
        let fwd = graph.node(start).unwrap().star()[0];
        graph.set_edge_depths(fwd, Position::Right, 0).unwrap();
        graph.copy_sym_depths(fwd).unwrap();
        let de = graph.dir_edge(fwd).unwrap();
        assert_eq!((de.depth(Position::Left), de.depth(Position::Right)), (Some(1), Some(0)));
        let sym = graph.dir_edge(graph.sym(fwd).unwrap()).unwrap();
        assert_eq!((sym.depth(Position::Left), sym.depth(Position::Right)), (Some(0), Some(1)));

        let err = graph.set_edge_depths(fwd, Position::Right, 3).unwrap_err();
        assert!(matches!(
            err,
            crate::error::GeotopoError::Topology(TopologyError::DepthConflict(_))
        ));
    }

    #[test]
    fn degenerate_edge_is_rejected() {
        let mut graph = PlanarGraph::new();
        assert!(graph.add_edge(area_edge(&[(1.0, 1.0), (1.0, 1.0)])).is_err());
    }

    #[test]
    fn rightmost_edge_prefers_non_horizontal() {
        // Edges leaving (0,0) to the north-west and south-west.
        let graph = PlanarGraph::from_edges([
            area_edge(&[(0.0, 0.0), (-1.0, 1.0)]),
            area_edge(&[(0.0, 0.0), (-1.0, -1.0)]),
        ])
        .unwrap();
        let n = graph.find_node(&c(0.0, 0.0)).unwrap();
        let de = graph.rightmost_edge(n).unwrap().unwrap();
        assert_eq!(graph.dir_edge(de).unwrap().p1, c(-1.0, 1.0));
    }

    #[test]
    fn star_depths_around_node() {
        // A closed ring: both directed edges at its start node belong to
        // the same edge, interior on the left going forward.
        let mut graph = PlanarGraph::new();
        graph.add_edge(area_edge(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])).unwrap();
        let n = graph.find_node(&c(0.0, 0.0)).unwrap();
        let star = graph.node(n).unwrap().star().to_vec();
        assert_eq!(star.len(), 2);
        let fwd = star
            .iter()
            .copied()
            .find(|&d| graph.dir_edge(d).unwrap().is_forward())
            .unwrap();
        graph.set_edge_depths(fwd, Position::Right, 0).unwrap();
        graph.compute_star_depths(n, fwd).unwrap();
        let other = star.iter().copied().find(|&d| d != fwd).unwrap();
        assert_eq!(other, graph.sym(fwd).unwrap());
        let o = graph.dir_edge(other).unwrap();
        assert_eq!((o.depth(Position::Left), o.depth(Position::Right)), (Some(0), Some(1)));
    }
}
