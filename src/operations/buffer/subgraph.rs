use std::collections::{HashSet, VecDeque};

use crate::error::{Result, TopologyError};
use crate::geometry::{Coordinate, Envelope, Position};
use crate::topology::{DirectedEdgeId, NodeId, PlanarGraph};

use super::{RightmostEdge, RightmostEdgeFinder};

/// A connected component of the buffer graph, with its rightmost point and
/// the edge through it whose right side is known to face outward.
#[derive(Debug)]
pub struct BufferSubgraph {
    dir_edges: Vec<DirectedEdgeId>,
    nodes: Vec<NodeId>,
    rightmost: RightmostEdge,
    envelope: Envelope,
}

impl BufferSubgraph {
    /// Collects every node and directed edge reachable from `start`,
    /// marking the nodes visited.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the graph is inconsistent
    /// or the component has no edges.
    pub fn create(graph: &mut PlanarGraph, start: NodeId) -> Result<Self> {
        let mut dir_edges = Vec::new();
        let mut nodes = Vec::new();
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if graph.node(node)?.is_visited() {
                continue;
            }
            graph.node_mut(node)?.visited = true;
            nodes.push(node);
            for &de in graph.node(node)?.star() {
                dir_edges.push(de);
                let sym_node = graph.dir_edge(graph.sym(de)?)?.origin();
                if !graph.node(sym_node)?.is_visited() {
                    stack.push(sym_node);
                }
            }
        }

        let rightmost = RightmostEdgeFinder::new(graph)
            .find(&dir_edges)?
            .ok_or(TopologyError::EntityNotFound("edge in buffer subgraph"))?;

        let mut envelope = Envelope::null();
        for &de in &dir_edges {
            let e = graph.edge(graph.dir_edge(de)?.edge())?;
            envelope.expand_to_include_envelope(&e.envelope());
        }

        Ok(Self {
            dir_edges,
            nodes,
            rightmost,
            envelope,
        })
    }

    #[must_use]
    pub fn dir_edges(&self) -> &[DirectedEdgeId] {
        &self.dir_edges
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    #[must_use]
    pub fn rightmost_coordinate(&self) -> Coordinate {
        self.rightmost.coordinate
    }

    #[must_use]
    pub fn rightmost_edge(&self) -> &RightmostEdge {
        &self.rightmost
    }

    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Assigns depths to every edge of the subgraph, given the depth of the
    /// region outside it.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if depths cannot be assigned consistently.
    pub fn compute_depth(&self, graph: &mut PlanarGraph, outside_depth: i32) -> Result<()> {
        for &de in &self.dir_edges {
            graph.dir_edge_mut(de)?.visited = false;
        }
        let start = self.rightmost.edge;
        graph.set_edge_depths(start, Position::Right, outside_depth)?;
        graph.copy_sym_depths(start)?;
        self.compute_depths(graph, start)
    }

    /// Breadth-first propagation of depths from `start` through the node
    /// stars.
    fn compute_depths(&self, graph: &mut PlanarGraph, start: DirectedEdgeId) -> Result<()> {
        let start_node = graph.dir_edge(start)?.origin();
        let mut visited_nodes = HashSet::from([start_node]);
        let mut queue = VecDeque::from([start_node]);
        graph.dir_edge_mut(start)?.visited = true;

        while let Some(node) = queue.pop_front() {
            compute_node_depth(graph, node)?;
            for &de in graph.node(node)?.star() {
                let sym = graph.sym(de)?;
                let sym_de = graph.dir_edge(sym)?;
                if sym_de.is_visited() {
                    continue;
                }
                let adj = sym_de.origin();
                if visited_nodes.insert(adj) {
                    queue.push_back(adj);
                }
            }
        }
        Ok(())
    }

    /// Marks as in the result every edge with the interior on its right and
    /// the exterior on its left. Negative depths count as exterior.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if an edge is missing.
    pub fn find_result_edges(&self, graph: &mut PlanarGraph) -> Result<()> {
        for &id in &self.dir_edges {
            let de = graph.dir_edge_mut(id)?;
            let right_inside = de.depth(Position::Right).is_some_and(|d| d >= 1);
            let left_outside = de.depth(Position::Left).is_none_or(|d| d <= 0);
            if right_inside && left_outside && !de.is_interior_area_edge() {
                de.in_result = true;
            }
        }
        Ok(())
    }
}

/// Computes the depths around `node` from an edge whose depths are already
/// known.
fn compute_node_depth(graph: &mut PlanarGraph, node: NodeId) -> Result<()> {
    let star = graph.node(node)?.star().to_vec();
    let mut start = None;
    for &de in &star {
        if graph.dir_edge(de)?.is_visited() || graph.dir_edge(graph.sym(de)?)?.is_visited() {
            start = Some(de);
            break;
        }
    }
    let start = start.ok_or(TopologyError::NoDepthStartEdge(graph.node(node)?.coordinate()))?;
    graph.compute_star_depths(node, start)?;

    for de in star {
        graph.dir_edge_mut(de)?.visited = true;
        graph.copy_sym_depths(de)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Location;
    use crate::topology::{Edge, Label};

    fn edge(pts: &[(f64, f64)]) -> Edge {
        let mut e = Edge::new(
            pts.iter().map(|&p| Coordinate::from(p)).collect(),
            Label::area(Location::Boundary, Location::Interior, Location::Exterior),
        );
        e.depth_delta = 1;
        e
    }

    #[test]
    fn depths_of_counter_clockwise_ring() {
        let mut graph = PlanarGraph::from_edges([
            edge(&[(0.0, 0.0), (2.0, 1.0)]),
            edge(&[(2.0, 1.0), (0.0, 2.0), (0.0, 0.0)]),
        ])
        .unwrap();
        let start = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
        let sg = BufferSubgraph::create(&mut graph, start).unwrap();
        assert_eq!(sg.nodes().len(), 2);
        assert_eq!(sg.dir_edges().len(), 4);
        assert_eq!(sg.rightmost_coordinate(), Coordinate::new(2.0, 1.0));
        assert_eq!(sg.envelope().max_y, 2.0);

        sg.compute_depth(&mut graph, 0).unwrap();
        for &id in sg.dir_edges() {
            let de = graph.dir_edge(id).unwrap();
            let expected = if de.is_forward() { (Some(1), Some(0)) } else { (Some(0), Some(1)) };
            assert_eq!((de.depth(Position::Left), de.depth(Position::Right)), expected);
        }

        sg.find_result_edges(&mut graph).unwrap();
        let in_result: Vec<bool> = sg
            .dir_edges()
            .iter()
            .map(|&id| {
                let de = graph.dir_edge(id).unwrap();
                de.is_in_result() && !de.is_forward()
            })
            .collect();
        assert_eq!(in_result.iter().filter(|&&b| b).count(), 2);
    }

    #[test]
    fn nested_depth_offset() {
        let mut graph =
            PlanarGraph::from_edges([edge(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)])])
                .unwrap();
        let start = graph.node_ids()[0];
        let sg = BufferSubgraph::create(&mut graph, start).unwrap();
        sg.compute_depth(&mut graph, 1).unwrap();
        sg.find_result_edges(&mut graph).unwrap();
        // Depth 2 inside and 1 outside: nothing on the boundary of the
        // result.
        assert!(sg
            .dir_edges()
            .iter()
            .all(|&id| !graph.dir_edge(id).unwrap().is_in_result()));
    }

    #[test]
    fn disconnected_components_are_separate() {
        let mut graph = PlanarGraph::from_edges([
            edge(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
            edge(&[(5.0, 0.0), (6.0, 0.0), (6.0, 1.0), (5.0, 0.0)]),
        ])
        .unwrap();
        let start = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
        let sg = BufferSubgraph::create(&mut graph, start).unwrap();
        assert_eq!(sg.nodes().len(), 1);
        assert_eq!(sg.rightmost_coordinate(), Coordinate::new(1.0, 0.0));
        let other = graph.find_node(&Coordinate::new(5.0, 0.0)).unwrap();
        assert!(!graph.node(other).unwrap().is_visited());
    }
}
