use crate::error::{Result, TopologyError};
use crate::geometry::{Coordinate, Envelope, LineString, Polygon};
use crate::math::orientation::{is_ccw, is_point_in_ring};
use crate::topology::{DirectedEdgeId, NodeId, PlanarGraph};

/// A closed ring of result directed edges.
///
/// Maximal rings follow the `next` links set when result edges are linked
/// at their nodes; minimal rings follow `next_min` and never revisit a node.
#[derive(Debug)]
struct EdgeRing {
    start: Coordinate,
    edges: Vec<DirectedEdgeId>,
    pts: Vec<Coordinate>,
    is_hole: bool,
    shell: Option<usize>,
    holes: Vec<usize>,
}

/// Assembles polygons from the result edges of buffer subgraphs.
#[derive(Debug, Default)]
pub struct PolygonBuilder {
    rings: Vec<EdgeRing>,
    shells: Vec<usize>,
}

impl PolygonBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the result edges among `dir_edges`, linking them at `nodes`.
    ///
    /// # Errors
    ///
    /// Returns a `TopologyError` if the result edges do not form consistent
    /// rings or a hole has no enclosing shell.
    pub fn add(
        &mut self,
        graph: &mut PlanarGraph,
        dir_edges: &[DirectedEdgeId],
        nodes: &[NodeId],
    ) -> Result<()> {
        graph.link_result_directed_edges(nodes)?;

        let mut max_rings = Vec::new();
        for &id in dir_edges {
            let de = graph.dir_edge(id)?;
            if de.is_in_result() && de.label().is_area() && de.edge_ring.is_none() {
                max_rings.push(self.build_ring(graph, id, true)?);
            }
        }

        let mut free_holes = Vec::new();
        let mut edge_rings = Vec::new();
        for er in max_rings {
            if self.max_node_degree(graph, er)? > 2 {
                self.link_minimal_directed_edges(graph, er)?;
                let min_rings = self.build_minimal_rings(graph, er)?;
                if let Some(shell) = self.find_shell(&min_rings)? {
                    for &r in &min_rings {
                        if self.rings[r].is_hole {
                            self.set_shell(r, shell);
                        }
                    }
                    self.shells.push(shell);
                } else {
                    free_holes.extend(min_rings);
                }
            } else {
                edge_rings.push(er);
            }
        }

        for er in edge_rings {
            if self.rings[er].is_hole {
                free_holes.push(er);
            } else {
                self.shells.push(er);
            }
        }
        self.place_free_holes(&free_holes)
    }

    /// Polygons built so far, one per shell.
    #[must_use]
    pub fn polygons(&self) -> Vec<Polygon> {
        self.shells
            .iter()
            .map(|&s| {
                let shell = &self.rings[s];
                Polygon::new(
                    LineString::new(shell.pts.clone()),
                    shell
                        .holes
                        .iter()
                        .map(|&h| LineString::new(self.rings[h].pts.clone()))
                        .collect(),
                )
            })
            .collect()
    }

    /// Walks a ring from `start` and records its points.
    fn build_ring(
        &mut self,
        graph: &mut PlanarGraph,
        start: DirectedEdgeId,
        maximal: bool,
    ) -> Result<usize> {
        let index = self.rings.len();
        let start_coord = graph.dir_edge(start)?.coordinate();
        let mut edges = Vec::new();
        let mut pts: Vec<Coordinate> = Vec::new();
        let mut id = start;

        loop {
            let de = graph.dir_edge(id)?;
            let ring = if maximal { de.edge_ring } else { de.min_edge_ring };
            if ring == Some(index) {
                return Err(TopologyError::RingVisitedTwice(de.coordinate()).into());
            }
            if !de.label().is_area() {
                return Err(TopologyError::Invalid(format!(
                    "non-area edge in result ring at {}",
                    de.coordinate()
                ))
                .into());
            }
            let next = if maximal { de.next } else { de.next_min };
            let coord = de.coordinate();

            let coords = graph.edge(de.edge())?.coords();
            let skip = usize::from(!pts.is_empty());
            if de.is_forward() {
                pts.extend(coords.iter().skip(skip));
            } else {
                pts.extend(coords.iter().rev().skip(skip));
            }
            edges.push(id);

            let de = graph.dir_edge_mut(id)?;
            if maximal {
                de.edge_ring = Some(index);
            } else {
                de.min_edge_ring = Some(index);
            }

            id = next.ok_or(TopologyError::NoOutgoingEdge(coord))?;
            if id == start {
                break;
            }
        }

        let is_hole = is_ccw(&pts);
        self.rings.push(EdgeRing {
            start: start_coord,
            edges,
            pts,
            is_hole,
            shell: None,
            holes: Vec::new(),
        });
        Ok(index)
    }

    /// Twice the largest number of outgoing ring edges at any node of the
    /// ring: above 2 the ring touches itself.
    fn max_node_degree(&self, graph: &PlanarGraph, ring: usize) -> Result<usize> {
        let mut max = 0;
        for &de in &self.rings[ring].edges {
            let node = graph.dir_edge(de)?.origin();
            max = max.max(graph.outgoing_degree(node, ring)?);
        }
        Ok(max * 2)
    }

    fn link_minimal_directed_edges(&self, graph: &mut PlanarGraph, ring: usize) -> Result<()> {
        for &de in &self.rings[ring].edges {
            let node = graph.dir_edge(de)?.origin();
            graph.link_minimal_directed_edges(node, ring)?;
        }
        Ok(())
    }

    fn build_minimal_rings(&mut self, graph: &mut PlanarGraph, ring: usize) -> Result<Vec<usize>> {
        let edges = self.rings[ring].edges.clone();
        let mut out = Vec::new();
        for de in edges {
            if graph.dir_edge(de)?.min_edge_ring.is_none() {
                out.push(self.build_ring(graph, de, false)?);
            }
        }
        Ok(out)
    }

    /// The single shell among the minimal rings of a maximal ring, if any.
    fn find_shell(&self, rings: &[usize]) -> Result<Option<usize>> {
        let mut shells = rings.iter().copied().filter(|&r| !self.rings[r].is_hole);
        let shell = shells.next();
        if shells.next().is_some() {
            return Err(TopologyError::Invalid(
                "found two shells in minimal edge ring list".to_owned(),
            )
            .into());
        }
        Ok(shell)
    }

    fn set_shell(&mut self, hole: usize, shell: usize) {
        self.rings[hole].shell = Some(shell);
        self.rings[shell].holes.push(hole);
    }

    fn place_free_holes(&mut self, holes: &[usize]) -> Result<()> {
        for &hole in holes {
            if self.rings[hole].shell.is_some() {
                continue;
            }
            let shell = self
                .find_containing_shell(hole)
                .ok_or(TopologyError::UnassignedHole(self.rings[hole].start))?;
            self.set_shell(hole, shell);
        }
        Ok(())
    }

    /// The smallest shell whose envelope and ring contain the hole.
    fn find_containing_shell(&self, hole: usize) -> Option<usize> {
        let test = &self.rings[hole];
        let test_env = Envelope::from_coords(&test.pts);
        let mut min: Option<(usize, Envelope)> = None;

        for &s in &self.shells {
            let shell = &self.rings[s];
            let shell_env = Envelope::from_coords(&shell.pts);
            if !shell_env.contains(&test_env) {
                continue;
            }
            let test_pt = test
                .pts
                .iter()
                .find(|p| !shell.pts.iter().any(|q| q.equals_2d(p)))
                .or(test.pts.first());
            let Some(test_pt) = test_pt else {
                continue;
            };
            if !is_point_in_ring(test_pt, &shell.pts) {
                continue;
            }
            if min.as_ref().is_none_or(|(_, env)| env.contains(&shell_env)) {
                min = Some((s, shell_env));
            }
        }
        min.map(|(s, _)| s)
    }
}
