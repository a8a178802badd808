//! Robust orientation and point-in-ring predicates.
//!
//! The orientation test is the sign of Shewchuk's adaptive-precision
//! determinant, so callers get consistent answers even for nearly collinear
//! triples.

use robust::{orient2d, Coord};

use crate::geometry::{Coordinate, Envelope, Location};

/// Orientation of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Right turn.
    Clockwise,
    /// Left turn.
    CounterClockwise,
    /// The three points are collinear.
    Collinear,
}

impl Orientation {
    /// Signed index: `-1` clockwise, `0` collinear, `1` counter-clockwise.
    #[must_use]
    pub fn index(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }

    #[must_use]
    pub fn from_index(index: i32) -> Self {
        match index.signum() {
            -1 => Orientation::Clockwise,
            1 => Orientation::CounterClockwise,
            _ => Orientation::Collinear,
        }
    }
}

/// Orientation of `q` relative to the directed line `p1 -> p2`.
///
/// Counter-clockwise means `q` lies to the left.
#[must_use]
pub fn orientation_index(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> Orientation {
    let det = orient2d(
        Coord { x: p1.x, y: p1.y },
        Coord { x: p2.x, y: p2.y },
        Coord { x: q.x, y: q.y },
    );
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `true` if a closed ring is oriented counter-clockwise.
///
/// Uses the orientation at the highest vertex, which is robust against
/// self-touching rings and flat spikes. Rings with fewer than four points
/// are reported as clockwise.
#[must_use]
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    let n_pts = ring.len().saturating_sub(1);
    if n_pts < 3 {
        return false;
    }

    let mut hi_index = 0;
    for i in 1..=n_pts {
        if ring[i].y > ring[hi_index].y {
            hi_index = i;
        }
    }
    let hi = ring[hi_index];

    // Walk backwards to the first distinct point.
    let mut i_prev = hi_index;
    loop {
        i_prev = if i_prev == 0 { n_pts - 1 } else { i_prev - 1 };
        if !ring[i_prev].equals_2d(&hi) || i_prev == hi_index {
            break;
        }
    }

    // Walk forwards to the first distinct point.
    let mut i_next = hi_index;
    loop {
        i_next = (i_next + 1) % n_pts;
        if !ring[i_next].equals_2d(&hi) || i_next == hi_index {
            break;
        }
    }

    let prev = ring[i_prev];
    let next = ring[i_next];
    if prev.equals_2d(&hi) || next.equals_2d(&hi) || prev.equals_2d(&next) {
        return false;
    }

    match orientation_index(&prev, &hi, &next) {
        Orientation::CounterClockwise => true,
        Orientation::Clockwise => false,
        // Flat top: the ring is CCW if the previous point is to the right.
        Orientation::Collinear => prev.x > next.x,
    }
}

/// Locates a point relative to a closed ring using a robust ray-crossing
/// count.
#[must_use]
pub fn locate_point_in_ring(p: &Coordinate, ring: &[Coordinate]) -> Location {
    let mut crossings = 0usize;
    for seg in ring.windows(2) {
        let (p1, p2) = (&seg[0], &seg[1]);

        if p1.x < p.x && p2.x < p.x {
            continue;
        }
        if p.equals_2d(p2) {
            return Location::Boundary;
        }
        // Horizontal segment at the point's height.
        #[allow(clippy::float_cmp)]
        if p1.y == p.y && p2.y == p.y {
            let min_x = p1.x.min(p2.x);
            let max_x = p1.x.max(p2.x);
            if p.x >= min_x && p.x <= max_x {
                return Location::Boundary;
            }
            continue;
        }
        // Half-open rule: count segments that straddle the ray's height.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p).index();
            if orient == 0 {
                return Location::Boundary;
            }
            if p2.y < p1.y {
                orient = -orient;
            }
            if orient > 0 {
                crossings += 1;
            }
        }
    }

    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Returns `true` if `p` is inside or on the boundary of the ring.
#[must_use]
pub fn is_point_in_ring(p: &Coordinate, ring: &[Coordinate]) -> bool {
    if !Envelope::from_coords(ring).intersects_coord(p) {
        return false;
    }
    locate_point_in_ring(p, ring) != Location::Exterior
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn ccw_square() -> Vec<Coordinate> {
        vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)]
    }

    #[test]
    fn orientation_left_right_collinear() {
        let a = c(0.0, 0.0);
        let b = c(1.0, 0.0);
        assert_eq!(orientation_index(&a, &b, &c(0.5, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation_index(&a, &b, &c(0.5, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation_index(&a, &b, &c(2.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn orientation_is_consistent_near_degenerate() {
        // Nearly collinear triple: swapping the first two points must flip the sign.
        let a = c(0.1, 0.1);
        let b = c(0.3, 0.3);
        let q = c(0.2, 0.200_000_000_000_000_04);
        let fwd = orientation_index(&a, &b, &q).index();
        let rev = orientation_index(&b, &a, &q).index();
        assert_eq!(fwd, -rev);
    }

    #[test]
    fn ring_orientation() {
        let ring = ccw_square();
        assert!(is_ccw(&ring));
        let mut rev = ring.clone();
        rev.reverse();
        assert!(!is_ccw(&rev));
    }

    #[test]
    fn ring_orientation_flat_top() {
        // Highest edge is horizontal.
        let ring = vec![c(0.0, 0.0), c(2.0, 0.0), c(2.0, 1.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)];
        assert!(is_ccw(&ring));
    }

    #[test]
    fn point_in_ring_locations() {
        let ring = ccw_square();
        assert_eq!(locate_point_in_ring(&c(0.5, 0.5), &ring), Location::Interior);
        assert_eq!(locate_point_in_ring(&c(1.5, 0.5), &ring), Location::Exterior);
        assert_eq!(locate_point_in_ring(&c(1.0, 0.5), &ring), Location::Boundary);
        assert_eq!(locate_point_in_ring(&c(0.5, 0.0), &ring), Location::Boundary);
        assert_eq!(locate_point_in_ring(&c(0.0, 0.0), &ring), Location::Boundary);
        assert!(is_point_in_ring(&c(0.25, 0.75), &ring));
        assert!(!is_point_in_ring(&c(-0.25, 0.75), &ring));
    }

    #[test]
    fn point_in_ring_ray_through_vertex() {
        // The ray from (0.5, 1) passes exactly through the vertex (2, 1).
        let ring = vec![c(0.0, 0.0), c(2.0, 1.0), c(0.0, 2.0), c(0.0, 0.0)];
        assert_eq!(locate_point_in_ring(&c(0.5, 1.0), &ring), Location::Interior);
        assert_eq!(locate_point_in_ring(&c(-0.5, 1.0), &ring), Location::Exterior);
    }
}
