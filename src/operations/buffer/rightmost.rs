use tracing::warn;

use crate::error::Result;
use crate::geometry::{Coordinate, Position};
use crate::math::{orientation_index, Orientation};
use crate::topology::{DirectedEdgeId, PlanarGraph};

/// The rightmost coordinate of a set of directed edges, with an edge through
/// it oriented so that its right side faces outward.
#[derive(Debug, Clone, Copy)]
pub struct RightmostEdge {
    pub edge: DirectedEdgeId,
    pub coordinate: Coordinate,
    /// Side of the underlying forward edge that faces outward, or `None` if
    /// every segment at the rightmost point is horizontal.
    pub side: Option<Position>,
}

/// Finds the directed edge incident on the rightmost point of a connected
/// set of edges, oriented so that its right side is exterior.
#[derive(Debug)]
pub struct RightmostEdgeFinder<'g> {
    graph: &'g PlanarGraph,
    min_de: Option<DirectedEdgeId>,
    min_index: usize,
    min_coord: Option<Coordinate>,
}

impl<'g> RightmostEdgeFinder<'g> {
    #[must_use]
    pub fn new(graph: &'g PlanarGraph) -> Self {
        Self {
            graph,
            min_de: None,
            min_index: 0,
            min_coord: None,
        }
    }

    /// Scans `dir_edges` and returns the oriented rightmost edge, or `None`
    /// if there are no forward edges.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge id is not in the graph.
    pub fn find(mut self, dir_edges: &[DirectedEdgeId]) -> Result<Option<RightmostEdge>> {
        for &de in dir_edges {
            if self.graph.dir_edge(de)?.is_forward() {
                self.check_for_rightmost_coordinate(de)?;
            }
        }
        let (Some(min_de), Some(min_coord)) = (self.min_de, self.min_coord) else {
            return Ok(None);
        };

        let last = self.edge_coords(min_de)?.len() - 1;
        if self.min_index == 0 || self.min_index == last {
            self.find_rightmost_edge_at_node()?;
        } else {
            self.find_rightmost_edge_at_vertex()?;
        }

        let min_de = self.min_de.unwrap_or(min_de);
        let side = self.rightmost_side(min_de, self.min_index)?;
        let edge = match side {
            Some(Position::Left) => self.graph.sym(min_de)?,
            Some(_) => min_de,
            None => {
                warn!(
                    x = min_coord.x,
                    y = min_coord.y,
                    "rightmost edge side undetermined; keeping forward orientation"
                );
                min_de
            }
        };
        Ok(Some(RightmostEdge {
            edge,
            coordinate: min_coord,
            side,
        }))
    }

    fn edge_coords(&self, de: DirectedEdgeId) -> Result<&'g [Coordinate]> {
        let graph = self.graph;
        Ok(graph.edge(graph.dir_edge(de)?.edge())?.coords())
    }

    fn check_for_rightmost_coordinate(&mut self, de: DirectedEdgeId) -> Result<()> {
        for (i, c) in self.edge_coords(de)?.iter().enumerate() {
            if self.min_coord.is_none_or(|m| c.x > m.x) {
                self.min_de = Some(de);
                self.min_index = i;
                self.min_coord = Some(*c);
            }
        }
        Ok(())
    }

    /// The rightmost point is a node: pick the rightmost edge of its star.
    fn find_rightmost_edge_at_node(&mut self) -> Result<()> {
        let Some(min_de) = self.min_de else {
            return Ok(());
        };
        let node = if self.min_index == 0 {
            self.graph.dir_edge(min_de)?.origin()
        } else {
            self.graph.dir_edge(self.graph.sym(min_de)?)?.origin()
        };
        let Some(star_de) = self.graph.rightmost_edge(node)? else {
            return Ok(());
        };
        if self.graph.dir_edge(star_de)?.is_forward() {
            self.min_de = Some(star_de);
            self.min_index = 0;
        } else {
            let fwd = self.graph.sym(star_de)?;
            self.min_de = Some(fwd);
            self.min_index = self.edge_coords(fwd)?.len() - 1;
        }
        Ok(())
    }

    /// The rightmost point is an interior vertex: use the segment before it
    /// when that one lies on the outer side.
    fn find_rightmost_edge_at_vertex(&mut self) -> Result<()> {
        let (Some(min_de), Some(min_coord)) = (self.min_de, self.min_coord) else {
            return Ok(());
        };
        let pts = self.edge_coords(min_de)?;
        let prev = pts[self.min_index - 1];
        let next = pts[self.min_index + 1];
        let orientation = orientation_index(&min_coord, &next, &prev);
        let use_prev = (prev.y < min_coord.y
            && next.y < min_coord.y
            && orientation == Orientation::CounterClockwise)
            || (prev.y > min_coord.y
                && next.y > min_coord.y
                && orientation == Orientation::Clockwise);
        if use_prev {
            self.min_index -= 1;
        }
        Ok(())
    }

    fn rightmost_side(&self, de: DirectedEdgeId, index: usize) -> Result<Option<Position>> {
        let side = self.rightmost_side_of_segment(de, Some(index))?;
        if side.is_some() {
            return Ok(side);
        }
        self.rightmost_side_of_segment(de, index.checked_sub(1))
    }

    #[allow(clippy::float_cmp)]
    fn rightmost_side_of_segment(
        &self,
        de: DirectedEdgeId,
        index: Option<usize>,
    ) -> Result<Option<Position>> {
        let coords = self.edge_coords(de)?;
        let Some(i) = index.filter(|&i| i + 1 < coords.len()) else {
            return Ok(None);
        };
        if coords[i].y == coords[i + 1].y {
            return Ok(None);
        }
        Ok(Some(if coords[i].y < coords[i + 1].y {
            Position::Right
        } else {
            Position::Left
        }))
    }
}
