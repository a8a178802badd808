mod curve_set;
mod depth_locater;
mod offset_curve;
mod polygon_builder;
mod rightmost;
mod subgraph;

pub use curve_set::OffsetCurveSetBuilder;
pub use depth_locater::SubgraphDepthLocater;
pub use offset_curve::OffsetCurveBuilder;
pub use polygon_builder::PolygonBuilder;
pub use rightmost::{RightmostEdge, RightmostEdgeFinder};
pub use subgraph::BufferSubgraph;

use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::{remove_repeated_points, Geometry};
use crate::noding::{IteratedNoder, Noder, NodingConfig};
use crate::topology::{Edge, EdgeList, PlanarGraph};

/// Shape of the curve closing the ends of a buffered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndCapStyle {
    #[default]
    Round,
    Flat,
    Square,
}

/// Shape of the curve joining offset segments at an outside corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStyle {
    #[default]
    Round,
    Mitre,
    Bevel,
}

/// Parameters controlling buffer curve generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferParameters {
    /// Number of segments approximating a quarter circle.
    pub quadrant_segments: u32,
    pub end_cap_style: EndCapStyle,
    pub join_style: JoinStyle,
    /// Largest mitre length, as a multiple of the buffer distance, before a
    /// mitre join falls back to a bevel.
    pub mitre_limit: f64,
    pub noding: NodingConfig,
}

impl Default for BufferParameters {
    fn default() -> Self {
        Self {
            quadrant_segments: 8,
            end_cap_style: EndCapStyle::Round,
            join_style: JoinStyle::Round,
            mitre_limit: 5.0,
            noding: NodingConfig::default(),
        }
    }
}

impl BufferParameters {
    #[must_use]
    pub fn with_quadrant_segments(mut self, quadrant_segments: u32) -> Self {
        self.quadrant_segments = quadrant_segments.max(1);
        self
    }

    #[must_use]
    pub fn with_end_cap_style(mut self, style: EndCapStyle) -> Self {
        self.end_cap_style = style;
        self
    }

    #[must_use]
    pub fn with_join_style(mut self, style: JoinStyle) -> Self {
        self.join_style = style;
        self
    }

    #[must_use]
    pub fn with_mitre_limit(mut self, mitre_limit: f64) -> Self {
        self.mitre_limit = mitre_limit;
        self
    }

    #[must_use]
    pub fn with_noding(mut self, noding: NodingConfig) -> Self {
        self.noding = noding;
        self
    }
}

/// Computes the area within a given distance of a geometry.
///
/// Positive distances dilate, negative distances erode polygonal input.
/// Points and lines only produce area for positive distances.
#[derive(Debug)]
pub struct BufferOp<'a> {
    geometry: &'a Geometry,
    distance: f64,
    params: BufferParameters,
}

impl<'a> BufferOp<'a> {
    /// Creates a new buffer operation with default parameters.
    #[must_use]
    pub fn new(geometry: &'a Geometry, distance: f64) -> Self {
        Self {
            geometry,
            distance,
            params: BufferParameters::default(),
        }
    }

    /// Sets the curve generation parameters.
    #[must_use]
    pub fn with_parameters(mut self, params: BufferParameters) -> Self {
        self.params = params;
        self
    }

    /// Executes the buffer, returning a polygon, a multipolygon, or an empty
    /// polygon when nothing remains.
    ///
    /// # Errors
    ///
    /// Returns `NodingError::NonConvergence` if the offset curves cannot be
    /// noded, or a `TopologyError` if the noded arrangement is inconsistent.
    pub fn execute(&self) -> Result<Geometry> {
        let builder =
            OffsetCurveBuilder::new(&self.params, self.params.noding.precision_model);
        let curves = OffsetCurveSetBuilder::new(self.geometry, self.distance, &builder).curves();
        if curves.is_empty() {
            debug!(distance = self.distance, "buffer produced no curves");
            return Ok(Geometry::empty_polygon());
        }

        let noded = IteratedNoder::new(self.params.noding).compute_nodes(curves)?;

        let mut edges = EdgeList::new();
        for ss in &noded {
            let coords = remove_repeated_points(ss.coords());
            if coords.len() < 2 {
                continue;
            }
            edges.insert_unique(Edge::new(coords, *ss.label()));
        }
        trace!(strings = noded.len(), edges = edges.len(), "buffer edges merged");

        let mut graph = PlanarGraph::from_edges(edges.into_edges())?;
        let subgraphs = create_subgraphs(&mut graph)?;

        let mut polygon_builder = PolygonBuilder::new();
        for (i, sg) in subgraphs.iter().enumerate() {
            let outside_depth =
                SubgraphDepthLocater::new(&graph, &subgraphs[..i]).depth(&sg.rightmost_coordinate());
            sg.compute_depth(&mut graph, outside_depth)?;
            sg.find_result_edges(&mut graph)?;
            polygon_builder.add(&mut graph, sg.dir_edges(), sg.nodes())?;
        }

        let polygons = polygon_builder.polygons();
        debug!(
            subgraphs = subgraphs.len(),
            polygons = polygons.len(),
            "buffer assembled"
        );
        Ok(match polygons.len() {
            0 => Geometry::empty_polygon(),
            1 => polygons
                .into_iter()
                .next()
                .map_or_else(Geometry::empty_polygon, Geometry::Polygon),
            _ => Geometry::MultiPolygon(polygons),
        })
    }
}

/// Splits the graph into connected subgraphs, ordered by decreasing
/// rightmost x so that enclosing shells come before what they contain.
fn create_subgraphs(graph: &mut PlanarGraph) -> Result<Vec<BufferSubgraph>> {
    let mut subgraphs = Vec::new();
    for node in graph.node_ids() {
        if !graph.node(node)?.is_visited() {
            subgraphs.push(BufferSubgraph::create(graph, node)?);
        }
    }
    subgraphs.sort_by(|a, b| {
        b.rightmost_coordinate()
            .x
            .total_cmp(&a.rightmost_coordinate().x)
    });
    Ok(subgraphs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Coordinate, LineString, Polygon};
    use approx::assert_relative_eq;

    fn unit_square() -> Geometry {
        Geometry::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        ))
    }

    #[test]
    fn mitre_dilation_of_square() {
        let params = BufferParameters::default().with_join_style(JoinStyle::Mitre);
        let result = BufferOp::new(&unit_square(), 1.0)
            .with_parameters(params)
            .execute()
            .unwrap();
        assert!(matches!(result, Geometry::Polygon(_)));
        assert_relative_eq!(result.area(), 9.0, epsilon = 1e-9);
        let env = result.envelope();
        assert_relative_eq!(env.min_x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(env.max_y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn round_dilation_of_square() {
        let result = BufferOp::new(&unit_square(), 1.0).execute().unwrap();
        // Four unit strips plus a circle approximated by 32 chords.
        assert!((result.area() - (5.0 + std::f64::consts::PI)).abs() < 0.05);
        assert!(result.area() < 5.0 + std::f64::consts::PI);
    }

    #[test]
    fn erosion_of_square() {
        let result = BufferOp::new(&unit_square(), -0.2).execute().unwrap();
        assert_relative_eq!(result.area(), 0.36, epsilon = 1e-9);
    }

    #[test]
    fn complete_erosion_is_empty() {
        let result = BufferOp::new(&unit_square(), -0.6).execute().unwrap();
        assert!(result.is_empty());
        assert_eq!(result, Geometry::empty_polygon());
    }

    #[test]
    fn polygon_with_hole() {
        let poly = Geometry::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from_xy(&[
                (4.0, 4.0),
                (4.0, 6.0),
                (6.0, 6.0),
                (6.0, 4.0),
                (4.0, 4.0),
            ])],
        ));
        let params = BufferParameters::default().with_join_style(JoinStyle::Mitre);
        let result = BufferOp::new(&poly, 0.5)
            .with_parameters(params)
            .execute()
            .unwrap();
        let Geometry::Polygon(p) = &result else {
            panic!("expected a polygon, got {result:?}");
        };
        assert_eq!(p.holes().len(), 1);
        assert_relative_eq!(result.area(), 11.0 * 11.0 - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn growing_fills_small_hole() {
        let poly = Geometry::Polygon(Polygon::new(
            LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from_xy(&[
                (4.0, 4.0),
                (4.0, 6.0),
                (6.0, 6.0),
                (6.0, 4.0),
                (4.0, 4.0),
            ])],
        ));
        let result = BufferOp::new(&poly, 1.5).execute().unwrap();
        let Geometry::Polygon(p) = &result else {
            panic!("expected a polygon, got {result:?}");
        };
        assert!(p.holes().is_empty());
    }

    #[test]
    fn flat_capped_line() {
        let line = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0)]));
        let params = BufferParameters::default().with_end_cap_style(EndCapStyle::Flat);
        let result = BufferOp::new(&line, 1.0)
            .with_parameters(params)
            .execute()
            .unwrap();
        assert_relative_eq!(result.area(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn square_capped_point() {
        let pt = Geometry::Point(Coordinate::new(5.0, 5.0));
        let params = BufferParameters::default().with_end_cap_style(EndCapStyle::Square);
        let result = BufferOp::new(&pt, 2.0)
            .with_parameters(params)
            .execute()
            .unwrap();
        assert_relative_eq!(result.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn non_positive_distance_on_line_is_empty() {
        let line = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0)]));
        assert!(BufferOp::new(&line, 0.0).execute().unwrap().is_empty());
        assert!(BufferOp::new(&line, -1.0).execute().unwrap().is_empty());
    }

    #[test]
    fn distant_points_give_multipolygon() {
        let pts = Geometry::MultiPoint(vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)]);
        let result = BufferOp::new(&pts, 1.0).execute().unwrap();
        let Geometry::MultiPolygon(polys) = &result else {
            panic!("expected a multipolygon, got {result:?}");
        };
        assert_eq!(polys.len(), 2);
    }

    #[test]
    fn overlapping_points_merge() {
        let pts = Geometry::MultiPoint(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)]);
        let result = BufferOp::new(&pts, 1.0).execute().unwrap();
        assert!(matches!(result, Geometry::Polygon(_)));
        let single = BufferOp::new(&Geometry::Point(Coordinate::new(0.0, 0.0)), 1.0)
            .execute()
            .unwrap();
        assert!(result.area() > single.area());
        assert!(result.area() < 2.0 * single.area());
    }
}
