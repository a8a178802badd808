use std::cmp::Ordering;

use crate::geometry::Coordinate;

/// Returns the octant of the direction `(dx, dy)`, numbered 0 to 7
/// counter-clockwise from the positive x axis, or `None` for a zero vector.
///
/// ```text
///      \ 2 | 1 /
///     3 \  |  / 0
///   ------ + ------
///     4 /  |  \ 7
///      / 5 | 6 \
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn octant(dx: f64, dy: f64) -> Option<u8> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    let adx = dx.abs();
    let ady = dy.abs();
    let oct = if dx >= 0.0 {
        if dy >= 0.0 {
            if adx >= ady { 0 } else { 1 }
        } else if adx >= ady {
            7
        } else {
            6
        }
    } else if dy >= 0.0 {
        if adx >= ady { 3 } else { 2 }
    } else if adx >= ady {
        4
    } else {
        5
    };
    Some(oct)
}

/// Octant of the segment `p0 -> p1`; a zero-length segment reports octant 0.
#[must_use]
pub fn segment_octant(p0: &Coordinate, p1: &Coordinate) -> u8 {
    octant(p1.x - p0.x, p1.y - p0.y).unwrap_or(0)
}

fn relative_sign(x0: f64, x1: f64) -> i32 {
    if x0 < x1 {
        -1
    } else if x0 > x1 {
        1
    } else {
        0
    }
}

fn compare_value(major: i32, minor: i32) -> Ordering {
    match (major.signum(), minor.signum()) {
        (-1, _) => Ordering::Less,
        (1, _) => Ordering::Greater,
        (_, -1) => Ordering::Less,
        (_, 1) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Orders two points that lie on a segment with the given octant by their
/// position along the segment's direction.
///
/// The comparison uses only the signs of the ordinate differences, ordered
/// by the dominant axis of the octant, so it is exact for points that are
/// near-collinear rather than precisely on the segment.
#[must_use]
pub fn compare_segment_points(octant: u8, p0: &Coordinate, p1: &Coordinate) -> Ordering {
    if p0.equals_2d(p1) {
        return Ordering::Equal;
    }
    let xs = relative_sign(p0.x, p1.x);
    let ys = relative_sign(p0.y, p1.y);
    match octant {
        0 => compare_value(xs, ys),
        1 => compare_value(ys, xs),
        2 => compare_value(ys, -xs),
        3 => compare_value(-xs, ys),
        4 => compare_value(-xs, -ys),
        5 => compare_value(-ys, -xs),
        6 => compare_value(-ys, xs),
        _ => compare_value(xs, -ys),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn octant_buckets() {
        assert_eq!(octant(2.0, 1.0), Some(0));
        assert_eq!(octant(1.0, 2.0), Some(1));
        assert_eq!(octant(-1.0, 2.0), Some(2));
        assert_eq!(octant(-2.0, 1.0), Some(3));
        assert_eq!(octant(-2.0, -1.0), Some(4));
        assert_eq!(octant(-1.0, -2.0), Some(5));
        assert_eq!(octant(1.0, -2.0), Some(6));
        assert_eq!(octant(2.0, -1.0), Some(7));
        assert_eq!(octant(0.0, 0.0), None);
        assert_eq!(segment_octant(&c(1.0, 1.0), &c(1.0, 1.0)), 0);
    }

    #[test]
    fn points_ordered_along_direction() {
        // Segment heading south-west (octant 4): larger x comes first.
        let o = segment_octant(&c(10.0, 10.0), &c(0.0, 5.0));
        assert_eq!(o, 4);
        assert_eq!(compare_segment_points(o, &c(8.0, 9.0), &c(2.0, 6.0)), Ordering::Less);
        assert_eq!(compare_segment_points(o, &c(2.0, 6.0), &c(8.0, 9.0)), Ordering::Greater);
        assert_eq!(compare_segment_points(o, &c(2.0, 6.0), &c(2.0, 6.0)), Ordering::Equal);
    }

    #[test]
    fn vertical_segment_uses_minor_axis() {
        // Octant 1 segment going straight up.
        let o = segment_octant(&c(0.0, 0.0), &c(0.0, 10.0));
        assert_eq!(o, 1);
        assert_eq!(compare_segment_points(o, &c(0.0, 2.0), &c(0.0, 3.0)), Ordering::Less);
    }
}
