use std::cmp::Ordering;

use crate::geometry::{Coordinate, LineSegment, Position};
use crate::math::{orientation_index, Orientation};
use crate::topology::{DirectedEdgeId, PlanarGraph};

use super::BufferSubgraph;

/// Locates the depth of a point relative to already processed subgraphs by
/// casting a ray from the point towards positive x and reading the depth of
/// the nearest edge it crosses.
#[derive(Debug)]
pub struct SubgraphDepthLocater<'a> {
    graph: &'a PlanarGraph,
    subgraphs: &'a [BufferSubgraph],
}

impl<'a> SubgraphDepthLocater<'a> {
    #[must_use]
    pub fn new(graph: &'a PlanarGraph, subgraphs: &'a [BufferSubgraph]) -> Self {
        Self { graph, subgraphs }
    }

    /// Depth of the region containing `p`; `0` if the ray crosses nothing.
    #[must_use]
    pub fn depth(&self, p: &Coordinate) -> i32 {
        self.stabbed_segments(p)
            .into_iter()
            .min_by(DepthSegment::compare)
            .map_or(0, |ds| ds.left_depth)
    }

    fn stabbed_segments(&self, p: &Coordinate) -> Vec<DepthSegment> {
        let mut out = Vec::new();
        for sg in self.subgraphs {
            let env = sg.envelope();
            if p.y < env.min_y || p.y > env.max_y {
                continue;
            }
            for &de in sg.dir_edges() {
                self.stabbed_segments_of_edge(p, de, &mut out);
            }
        }
        out
    }

    fn stabbed_segments_of_edge(
        &self,
        p: &Coordinate,
        id: DirectedEdgeId,
        out: &mut Vec<DepthSegment>,
    ) {
        let Ok(de) = self.graph.dir_edge(id) else {
            return;
        };
        if !de.is_forward() {
            return;
        }
        let Ok(edge) = self.graph.edge(de.edge()) else {
            return;
        };
        for w in edge.coords().windows(2) {
            let mut seg = LineSegment::new(w[0], w[1]);
            // Orient upward; the depths swap sides when reversed.
            let reversed = seg.p0.y > seg.p1.y;
            if reversed {
                seg = seg.reversed();
            }
            if seg.p0.x.max(seg.p1.x) < p.x || seg.is_horizontal() {
                continue;
            }
            if p.y < seg.p0.y || p.y > seg.p1.y {
                continue;
            }
            if orientation_index(&seg.p0, &seg.p1, p) == Orientation::Clockwise {
                continue;
            }
            let pos = if reversed { Position::Right } else { Position::Left };
            out.push(DepthSegment {
                upward_seg: seg,
                left_depth: de.depth(pos).unwrap_or(0),
            });
        }
    }
}

/// An upward-oriented segment crossed by the stabbing ray, with the depth
/// on its left.
#[derive(Debug, Clone, Copy)]
struct DepthSegment {
    upward_seg: LineSegment,
    left_depth: i32,
}

impl DepthSegment {
    /// Orders segments so that the one nearest the ray origin, i.e. leftmost,
    /// comes first.
    fn compare(a: &Self, b: &Self) -> Ordering {
        let (s0, s1) = (&a.upward_seg, &b.upward_seg);
        if s0.p0.x.min(s0.p1.x) >= s1.p0.x.max(s1.p1.x) {
            return Ordering::Greater;
        }
        if s0.p0.x.max(s0.p1.x) <= s1.p0.x.min(s1.p1.x) {
            return Ordering::Less;
        }
        let orient = s0.orientation_of_segment(s1).index();
        if orient != 0 {
            return orient.cmp(&0);
        }
        let orient = -s1.orientation_of_segment(s0).index();
        if orient != 0 {
            return orient.cmp(&0);
        }
        s0.p0
            .compare_2d(&s1.p0)
            .then_with(|| s0.p1.compare_2d(&s1.p1))
    }
}
