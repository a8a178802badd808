use crate::error::{Result, TopologyError};
use crate::geometry::{Coordinate, Position};

use super::{DirectedEdgeId, PlanarGraph};

slotmap::new_key_type! {
    /// Key of a [`Node`] in a [`PlanarGraph`].
    pub struct NodeId;
}

/// A graph node with its star of outgoing directed edges, sorted
/// counter-clockwise from the positive x axis.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) coord: Coordinate,
    pub(crate) star: Vec<DirectedEdgeId>,
    pub(crate) visited: bool,
}

impl Node {
    pub(crate) fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            star: Vec::new(),
            visited: false,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coord
    }

    /// Outgoing directed edges in counter-clockwise order.
    #[must_use]
    pub fn star(&self) -> &[DirectedEdgeId] {
        &self.star
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.star.len()
    }

    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.visited
    }
}

// Star operations.
impl PlanarGraph {
    /// Inserts `de` into the star of its origin node, keeping the star
    /// sorted by direction.
    pub(crate) fn insert_into_star(&mut self, node: NodeId, de: DirectedEdgeId) -> Result<()> {
        let new_de = self.dir_edge(de)?;
        let star = &self.node(node)?.star;
        let pos = star.partition_point(|&other| {
            self.dir_edges
                .get(other)
                .is_some_and(|o| o.compare_direction(new_de).is_le())
        });
        self.node_mut(node)?.star.insert(pos, de);
        Ok(())
    }

    /// Returns the outgoing edge whose first segment is rightmost at the
    /// node, or `None` if both extreme edges are horizontal.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or one of its edges is missing.
    #[allow(clippy::float_cmp)]
    pub fn rightmost_edge(&self, node: NodeId) -> Result<Option<DirectedEdgeId>> {
        let star = &self.node(node)?.star;
        let (Some(&first), Some(&last)) = (star.first(), star.last()) else {
            return Ok(None);
        };
        if star.len() == 1 {
            return Ok(Some(first));
        }
        let de0 = self.dir_edge(first)?;
        let de_last = self.dir_edge(last)?;
        let north0 = de0.quadrant().is_northern();
        let north_last = de_last.quadrant().is_northern();
        if north0 && north_last {
            return Ok(Some(first));
        }
        if !north0 && !north_last {
            return Ok(Some(last));
        }
        if de0.dy() != 0.0 {
            return Ok(Some(first));
        }
        if de_last.dy() != 0.0 {
            return Ok(Some(last));
        }
        Ok(None)
    }

    /// Propagates depths around the star of `node`, starting from `start`,
    /// whose depths must already be set.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DepthMismatch` if walking around the star does
    /// not return to the starting right depth, and
    /// `TopologyError::DepthConflict` if an edge already carries different
    /// depths.
    pub fn compute_star_depths(&mut self, node: NodeId, start: DirectedEdgeId) -> Result<()> {
        let star = self.node(node)?.star.clone();
        let start_de = self.dir_edge(start)?;
        let start_depth = start_de.depth(Position::Left).unwrap_or(0);
        let target_last = start_de.depth(Position::Right).unwrap_or(0);
        let index = star.iter().position(|&d| d == start).ok_or(TopologyError::EntityNotFound(
            "directed edge in node star",
        ))?;

        let mut depth = start_depth;
        for &de in star[index + 1..].iter().chain(&star[..index]) {
            self.set_edge_depths(de, Position::Right, depth)?;
            depth = self.dir_edge(de)?.depth(Position::Left).unwrap_or(depth);
        }
        if depth != target_last {
            return Err(TopologyError::DepthMismatch(self.node(node)?.coord).into());
        }
        Ok(())
    }

    /// Outgoing edges of `node` that are, or whose sym is, in the result.
    pub(crate) fn result_area_edges(&self, node: NodeId) -> Result<Vec<DirectedEdgeId>> {
        let mut out = Vec::new();
        for &de in &self.node(node)?.star {
            let sym = self.sym(de)?;
            if self.dir_edge(de)?.in_result || self.dir_edge(sym)?.in_result {
                out.push(de);
            }
        }
        Ok(out)
    }

    /// Links each incoming result edge at `node` to the next outgoing result
    /// edge clockwise around the node.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NoOutgoingEdge` if an incoming result edge has
    /// no outgoing partner.
    pub fn link_result_directed_edges_at(&mut self, node: NodeId) -> Result<()> {
        let edges = self.result_area_edges(node)?;
        let mut first_out: Option<DirectedEdgeId> = None;
        let mut incoming: Option<DirectedEdgeId> = None;

        for &next_out in &edges {
            let next_in = self.sym(next_out)?;
            let out_de = self.dir_edge(next_out)?;
            if !out_de.label.is_area() {
                continue;
            }
            let out_in_result = out_de.in_result;
            if first_out.is_none() && out_in_result {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if self.dir_edge(next_in)?.in_result {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if out_in_result {
                        self.dir_edge_mut(inc)?.next = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let first = first_out.ok_or(TopologyError::NoOutgoingEdge(self.node(node)?.coord))?;
            self.dir_edge_mut(inc)?.next = Some(first);
        }
        Ok(())
    }

    /// Links the edges of maximal ring `ring` at `node` into minimal rings,
    /// pairing each incoming edge with the next outgoing edge
    /// counter-clockwise.
    pub(crate) fn link_minimal_directed_edges(&mut self, node: NodeId, ring: usize) -> Result<()> {
        let edges = self.result_area_edges(node)?;
        let mut first_out: Option<DirectedEdgeId> = None;
        let mut incoming: Option<DirectedEdgeId> = None;

        for &next_out in edges.iter().rev() {
            let next_in = self.sym(next_out)?;
            let out_in_ring = self.dir_edge(next_out)?.edge_ring == Some(ring);
            if first_out.is_none() && out_in_ring {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if self.dir_edge(next_in)?.edge_ring == Some(ring) {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if out_in_ring {
                        self.dir_edge_mut(inc)?.next_min = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let first = first_out.ok_or(TopologyError::NoOutgoingEdge(self.node(node)?.coord))?;
            self.dir_edge_mut(inc)?.next_min = Some(first);
        }
        Ok(())
    }

    /// Number of outgoing edges at `node` belonging to edge ring `ring`.
    pub(crate) fn outgoing_degree(&self, node: NodeId, ring: usize) -> Result<usize> {
        let mut degree = 0;
        for &de in &self.node(node)?.star {
            if self.dir_edge(de)?.edge_ring == Some(ring) {
                degree += 1;
            }
        }
        Ok(degree)
    }
}
