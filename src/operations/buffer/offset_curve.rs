use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::{Coordinate, LineSegment, Position, PrecisionModel};
use crate::math::{line_intersection, orientation_index, LineIntersector, Orientation};

use super::{BufferParameters, EndCapStyle, JoinStyle};

/// Vertices closer than this fraction of the distance are merged.
const CURVE_VERTEX_SNAP_DISTANCE_FACTOR: f64 = 1e-6;

/// Offset points of adjacent segments closer than this fraction of the
/// distance are treated as coincident at an outside turn.
const OFFSET_SEGMENT_SEPARATION_FACTOR: f64 = 1e-3;

/// As above, for inside turns.
const INSIDE_TURN_VERTEX_SNAP_DISTANCE_FACTOR: f64 = 1e-3;

/// Builds the raw offset curves of lines, rings and points.
///
/// The curves may self-intersect; they are meant to be noded and assembled
/// into a buffer polygon.
#[derive(Debug, Clone)]
pub struct OffsetCurveBuilder {
    end_cap_style: EndCapStyle,
    join_style: JoinStyle,
    mitre_limit: f64,
    fillet_angle_quantum: f64,
    precision_model: PrecisionModel,
}

impl OffsetCurveBuilder {
    #[must_use]
    pub fn new(params: &BufferParameters, precision_model: PrecisionModel) -> Self {
        Self {
            end_cap_style: params.end_cap_style,
            join_style: params.join_style,
            mitre_limit: params.mitre_limit,
            fillet_angle_quantum: FRAC_PI_2 / f64::from(params.quadrant_segments.max(1)),
            precision_model,
        }
    }

    /// Closed curve enclosing a line, or a point when `pts` has a single
    /// coordinate. Travels clockwise around the line: left side forward,
    /// right side backward. Empty for non-positive distances.
    #[must_use]
    pub fn line_curve(&self, pts: &[Coordinate], distance: f64) -> Vec<Coordinate> {
        if distance <= 0.0 || pts.is_empty() {
            return Vec::new();
        }
        let mut g = CurveGenerator::new(self, distance);
        if pts.len() == 1 {
            match self.end_cap_style {
                EndCapStyle::Round => g.add_circle(&pts[0]),
                EndCapStyle::Square => g.add_square(&pts[0]),
                EndCapStyle::Flat => {}
            }
        } else {
            g.compute_line_curve(pts);
        }
        g.into_coords()
    }

    /// Offset curve of a closed ring on the given side.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn ring_curve(&self, pts: &[Coordinate], side: Position, distance: f64) -> Vec<Coordinate> {
        if pts.len() <= 2 {
            return self.line_curve(pts, distance);
        }
        let mut g = CurveGenerator::new(self, distance);
        if distance == 0.0 {
            for p in pts {
                g.add_pt(*p);
            }
        } else {
            g.compute_ring_curve(pts, side);
        }
        g.into_coords()
    }
}

/// Mutable state while generating one curve.
struct CurveGenerator<'a> {
    builder: &'a OffsetCurveBuilder,
    distance: f64,
    min_vertex_distance: f64,
    pts: Vec<Coordinate>,
    li: LineIntersector,
    s0: Coordinate,
    s1: Coordinate,
    s2: Coordinate,
    side: Position,
    offset0: LineSegment,
    offset1: LineSegment,
}

impl<'a> CurveGenerator<'a> {
    fn new(builder: &'a OffsetCurveBuilder, distance: f64) -> Self {
        let origin = Coordinate::new(0.0, 0.0);
        Self {
            builder,
            distance,
            min_vertex_distance: distance.abs() * CURVE_VERTEX_SNAP_DISTANCE_FACTOR,
            pts: Vec::new(),
            li: LineIntersector::new(),
            s0: origin,
            s1: origin,
            s2: origin,
            side: Position::Left,
            offset0: LineSegment::new(origin, origin),
            offset1: LineSegment::new(origin, origin),
        }
    }

    fn into_coords(self) -> Vec<Coordinate> {
        self.pts
    }

    fn add_pt(&mut self, pt: Coordinate) {
        let mut pt = pt;
        self.builder.precision_model.make_precise_coord(&mut pt);
        if let Some(last) = self.pts.last() {
            if pt.distance(last) < self.min_vertex_distance {
                return;
            }
        }
        self.pts.push(pt);
    }

    fn close_ring(&mut self) {
        if let (Some(&first), Some(last)) = (self.pts.first(), self.pts.last()) {
            if !first.equals_2d(last) {
                self.pts.push(first);
            }
        }
    }

    fn compute_line_curve(&mut self, pts: &[Coordinate]) {
        let n = pts.len() - 1;

        self.init_side_segments(pts[0], pts[1], Position::Left);
        for p in &pts[2..] {
            self.add_next_segment(*p, true);
        }
        self.add_last_segment();
        self.add_line_end_cap(pts[n - 1], pts[n]);

        self.init_side_segments(pts[n], pts[n - 1], Position::Left);
        for p in pts[..n - 1].iter().rev() {
            self.add_next_segment(*p, true);
        }
        self.add_last_segment();
        self.add_line_end_cap(pts[1], pts[0]);

        self.close_ring();
    }

    fn compute_ring_curve(&mut self, pts: &[Coordinate], side: Position) {
        let n = pts.len() - 1;
        self.init_side_segments(pts[n - 1], pts[0], side);
        for (i, p) in pts.iter().enumerate().skip(1) {
            self.add_next_segment(*p, i != 1);
        }
        self.close_ring();
    }

    fn init_side_segments(&mut self, s1: Coordinate, s2: Coordinate, side: Position) {
        self.s1 = s1;
        self.s2 = s2;
        self.side = side;
        self.offset1 = self.offset_segment(&s1, &s2, side);
    }

    /// Offsets a segment parallel to itself on `side`.
    fn offset_segment(&self, p0: &Coordinate, p1: &Coordinate, side: Position) -> LineSegment {
        let side_sign = if side == Position::Left { 1.0 } else { -1.0 };
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let len = dx.hypot(dy);
        let ux = side_sign * self.distance * dx / len;
        let uy = side_sign * self.distance * dy / len;
        LineSegment::new(
            Coordinate::new(p0.x - uy, p0.y + ux),
            Coordinate::new(p1.x - uy, p1.y + ux),
        )
    }

    fn add_next_segment(&mut self, p: Coordinate, add_start_point: bool) {
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.s2 = p;
        self.offset0 = self.offset_segment(&self.s0, &self.s1, self.side);
        self.offset1 = self.offset_segment(&self.s1, &self.s2, self.side);

        if self.s1.equals_2d(&self.s2) {
            return;
        }

        let orientation = orientation_index(&self.s0, &self.s1, &self.s2);
        let outside_turn = (orientation == Orientation::Clockwise && self.side == Position::Left)
            || (orientation == Orientation::CounterClockwise && self.side == Position::Right);

        if orientation == Orientation::Collinear {
            self.add_collinear(add_start_point);
        } else if outside_turn {
            self.add_outside_turn(orientation, add_start_point);
        } else {
            self.add_inside_turn();
        }
    }

    fn add_collinear(&mut self, add_start_point: bool) {
        let r = self
            .li
            .compute_intersection(&self.s0, &self.s1, &self.s1, &self.s2);
        // Two intersection points: the line doubles back on itself.
        if r.intersection_count() >= 2 {
            match self.builder.join_style {
                JoinStyle::Bevel | JoinStyle::Mitre => {
                    if add_start_point {
                        self.add_pt(self.offset0.p1);
                    }
                    self.add_pt(self.offset1.p0);
                }
                JoinStyle::Round => {
                    let (p, p0, p1) = (self.s1, self.offset0.p1, self.offset1.p0);
                    self.add_corner_fillet(&p, &p0, &p1, Orientation::Clockwise, self.distance);
                }
            }
        }
    }

    fn add_outside_turn(&mut self, orientation: Orientation, add_start_point: bool) {
        let (p, off0, off1) = (self.s1, self.offset0, self.offset1);
        if off0.p1.distance(&off1.p0) < self.distance * OFFSET_SEGMENT_SEPARATION_FACTOR {
            self.add_pt(off0.p1);
            return;
        }
        match self.builder.join_style {
            JoinStyle::Mitre => self.add_mitre_join(&p, &off0, &off1),
            JoinStyle::Bevel => {
                self.add_pt(off0.p1);
                self.add_pt(off1.p0);
            }
            JoinStyle::Round => {
                if add_start_point {
                    self.add_pt(off0.p1);
                }
                self.add_corner_fillet(&p, &off0.p1, &off1.p0, orientation, self.distance);
                self.add_pt(off1.p0);
            }
        }
    }

    fn add_inside_turn(&mut self) {
        let (off0, off1) = (self.offset0, self.offset1);
        let r = self
            .li
            .compute_intersection(&off0.p0, &off0.p1, &off1.p0, &off1.p1);
        if r.has_intersection() {
            self.add_pt(r.intersection(0));
        } else if off0.p1.distance(&off1.p0) < self.distance * INSIDE_TURN_VERTEX_SNAP_DISTANCE_FACTOR
        {
            self.add_pt(off0.p1);
        } else {
            // Close the gap through the input vertex; the noder cuts the
            // resulting loop away.
            self.add_pt(off0.p1);
            self.add_pt(self.s1);
            self.add_pt(off1.p0);
        }
    }

    /// Extends both offset segments to their intersection, falling back to
    /// a bevel when the mitre would exceed the limit.
    fn add_mitre_join(&mut self, p: &Coordinate, off0: &LineSegment, off1: &LineSegment) {
        let within_limit = line_intersection(&off0.p0, &off0.p1, &off1.p0, &off1.p1)
            .filter(|int_pt| {
                let ratio = if self.distance <= 0.0 {
                    1.0
                } else {
                    int_pt.distance(p) / self.distance.abs()
                };
                ratio <= self.builder.mitre_limit
            });
        match within_limit {
            Some(int_pt) => self.add_pt(int_pt),
            None => {
                self.add_pt(off0.p1);
                self.add_pt(off1.p0);
            }
        }
    }

    fn add_last_segment(&mut self) {
        self.add_pt(self.offset1.p1);
    }

    fn add_line_end_cap(&mut self, p0: Coordinate, p1: Coordinate) {
        let offset_l = self.offset_segment(&p0, &p1, Position::Left);
        let offset_r = self.offset_segment(&p0, &p1, Position::Right);
        let angle = (p1.y - p0.y).atan2(p1.x - p0.x);

        match self.builder.end_cap_style {
            EndCapStyle::Round => {
                self.add_pt(offset_l.p1);
                self.add_fillet_angles(
                    &p1,
                    angle + FRAC_PI_2,
                    angle - FRAC_PI_2,
                    Orientation::Clockwise,
                    self.distance,
                );
                self.add_pt(offset_r.p1);
            }
            EndCapStyle::Flat => {
                self.add_pt(offset_l.p1);
                self.add_pt(offset_r.p1);
            }
            EndCapStyle::Square => {
                let (dx, dy) = (self.distance.abs() * angle.cos(), self.distance.abs() * angle.sin());
                self.add_pt(Coordinate::new(offset_l.p1.x + dx, offset_l.p1.y + dy));
                self.add_pt(Coordinate::new(offset_r.p1.x + dx, offset_r.p1.y + dy));
            }
        }
    }

    /// Arc around `p` from `p0` to `p1` turning in `direction`.
    fn add_corner_fillet(
        &mut self,
        p: &Coordinate,
        p0: &Coordinate,
        p1: &Coordinate,
        direction: Orientation,
        radius: f64,
    ) {
        let mut start_angle = (p0.y - p.y).atan2(p0.x - p.x);
        let end_angle = (p1.y - p.y).atan2(p1.x - p.x);
        if direction == Orientation::Clockwise {
            if start_angle <= end_angle {
                start_angle += 2.0 * PI;
            }
        } else if start_angle >= end_angle {
            start_angle -= 2.0 * PI;
        }
        self.add_pt(*p0);
        self.add_fillet_angles(p, start_angle, end_angle, direction, radius);
        self.add_pt(*p1);
    }

    /// Arc points around `p` from `start_angle` towards `end_angle`, spaced
    /// by the fillet angle quantum. The end point itself is not added.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn add_fillet_angles(
        &mut self,
        p: &Coordinate,
        start_angle: f64,
        end_angle: f64,
        direction: Orientation,
        radius: f64,
    ) {
        let direction_factor = if direction == Orientation::Clockwise { -1.0 } else { 1.0 };
        let total_angle = (start_angle - end_angle).abs();
        let n_segs = (total_angle / self.builder.fillet_angle_quantum + 0.5) as usize;
        if n_segs < 1 {
            return;
        }
        let angle_inc = total_angle / n_segs as f64;
        for i in 0..n_segs {
            let angle = start_angle + direction_factor * angle_inc * i as f64;
            self.add_pt(Coordinate::new(
                p.x + radius * angle.cos(),
                p.y + radius * angle.sin(),
            ));
        }
    }

    fn add_circle(&mut self, p: &Coordinate) {
        self.add_pt(Coordinate::new(p.x + self.distance, p.y));
        self.add_fillet_angles(p, 0.0, 2.0 * PI, Orientation::Clockwise, self.distance);
        self.close_ring();
    }

    fn add_square(&mut self, p: &Coordinate) {
        let d = self.distance;
        self.add_pt(Coordinate::new(p.x + d, p.y + d));
        self.add_pt(Coordinate::new(p.x + d, p.y - d));
        self.add_pt(Coordinate::new(p.x - d, p.y - d));
        self.add_pt(Coordinate::new(p.x - d, p.y + d));
        self.close_ring();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::orientation::is_ccw;
    use crate::math::polygon_2d::ring_area;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn builder(params: BufferParameters) -> OffsetCurveBuilder {
        OffsetCurveBuilder::new(&params, PrecisionModel::floating())
    }

    #[test]
    fn line_curve_is_closed_and_clockwise() {
        let b = builder(BufferParameters::default());
        let curve = b.line_curve(&[c(0.0, 0.0), c(10.0, 0.0)], 1.0);
        assert!(curve.first().unwrap().equals_2d(curve.last().unwrap()));
        assert!(!is_ccw(&curve));
        // Each cap is a half circle of 16 chords.
        let expected = 20.0 + 16.0 * (PI / 16.0).sin();
        assert!((ring_area(&curve) - expected).abs() < 1e-9);
    }

    #[test]
    fn flat_cap_line_curve() {
        let b = builder(BufferParameters::default().with_end_cap_style(EndCapStyle::Flat));
        let curve = b.line_curve(&[c(0.0, 0.0), c(10.0, 0.0)], 1.0);
        assert_eq!(
            curve,
            vec![c(10.0, 1.0), c(10.0, -1.0), c(0.0, -1.0), c(0.0, 1.0), c(10.0, 1.0)]
        );
    }

    #[test]
    fn mitre_ring_curve() {
        let b = builder(BufferParameters::default().with_join_style(JoinStyle::Mitre));
        let ring = [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)];
        let curve = b.ring_curve(&ring, Position::Right, 1.0);
        assert_eq!(
            curve,
            vec![c(-1.0, -1.0), c(2.0, -1.0), c(2.0, 2.0), c(-1.0, 2.0), c(-1.0, -1.0)]
        );
    }

    #[test]
    fn mitre_limit_falls_back_to_bevel() {
        let b = builder(
            BufferParameters::default()
                .with_join_style(JoinStyle::Mitre)
                .with_mitre_limit(1.0),
        );
        let ring = [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)];
        let curve = b.ring_curve(&ring, Position::Right, 1.0);
        // Two points per corner plus the closing point.
        assert_eq!(curve.len(), 9);
        assert!((ring_area(&curve) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn inside_ring_curve() {
        let b = builder(BufferParameters::default());
        let ring = [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)];
        let curve = b.ring_curve(&ring, Position::Left, 0.25);
        assert!((ring_area(&curve) - 0.25).abs() < 1e-9);
        assert!(is_ccw(&curve));
    }

    #[test]
    fn point_curves() {
        let round = builder(BufferParameters::default()).line_curve(&[c(1.0, 1.0)], 2.0);
        assert_eq!(round.len(), 33);
        assert!(round.iter().all(|p| (p.distance(&c(1.0, 1.0)) - 2.0).abs() < 1e-12));

        let square = builder(BufferParameters::default().with_end_cap_style(EndCapStyle::Square))
            .line_curve(&[c(1.0, 1.0)], 2.0);
        assert!((ring_area(&square) - 16.0).abs() < 1e-12);

        let flat = builder(BufferParameters::default().with_end_cap_style(EndCapStyle::Flat))
            .line_curve(&[c(1.0, 1.0)], 2.0);
        assert!(flat.is_empty());
    }

    #[test]
    fn reversing_line_gets_round_end() {
        let b = builder(BufferParameters::default());
        let curve = b.line_curve(&[c(0.0, 0.0), c(5.0, 0.0), c(2.0, 0.0)], 1.0);
        assert!(curve.iter().any(|p| p.x > 5.9));
    }

    #[test]
    fn precision_model_applied_to_vertices() {
        let b = OffsetCurveBuilder::new(&BufferParameters::default(), PrecisionModel::fixed(10.0));
        let curve = b.line_curve(&[c(0.0, 0.0)], 1.0);
        for p in &curve {
            assert!(((p.x * 10.0).round() - p.x * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn non_positive_line_distance_is_empty() {
        let b = builder(BufferParameters::default());
        assert!(b.line_curve(&[c(0.0, 0.0), c(1.0, 0.0)], 0.0).is_empty());
        assert!(b.line_curve(&[c(0.0, 0.0), c(1.0, 0.0)], -1.0).is_empty());
    }
}
