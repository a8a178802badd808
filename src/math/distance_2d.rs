use crate::geometry::Coordinate;

/// Returns the minimum distance from point `p` to the segment `a-b`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn point_to_segment_dist(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    if a.x == b.x && a.y == b.y {
        // Degenerate segment (zero length).
        return p.distance(a);
    }

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    // Projection factor of p onto the segment line.
    let r = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    if r <= 0.0 {
        return p.distance(a);
    }
    if r >= 1.0 {
        return p.distance(b);
    }

    // Perpendicular distance via the cross product, which avoids computing
    // the projected point.
    let s = ((a.y - p.y) * dx - (a.x - p.x) * dy) / len_sq;
    s.abs() * len_sq.sqrt()
}

/// Returns the perpendicular distance from `p` to the infinite line through
/// `a` and `b`.
#[must_use]
pub fn point_to_line_perpendicular_dist(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return p.distance(a);
    }
    let s = ((a.y - p.y) * dx - (a.x - p.x) * dy) / len_sq;
    s.abs() * len_sq.sqrt()
}

/// Returns the minimum distance between segments `a-b` and `c-d`.
///
/// Zero when the segments intersect; otherwise the least of the four
/// endpoint-to-segment distances.
#[must_use]
pub fn segment_to_segment_dist(
    a: &Coordinate,
    b: &Coordinate,
    c: &Coordinate,
    d: &Coordinate,
) -> f64 {
    if a.equals_2d(b) {
        return point_to_segment_dist(a, c, d);
    }
    if c.equals_2d(d) {
        return point_to_segment_dist(c, a, b);
    }

    let r_top = (a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y);
    let r_bot = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    let s_top = (a.y - c.y) * (b.x - a.x) - (a.x - c.x) * (b.y - a.y);
    let s_bot = r_bot;

    if r_bot != 0.0 && s_bot != 0.0 {
        let r = r_top / r_bot;
        let s = s_top / s_bot;
        if (0.0..=1.0).contains(&r) && (0.0..=1.0).contains(&s) {
            return 0.0;
        }
    }

    point_to_segment_dist(a, c, d)
        .min(point_to_segment_dist(b, c, d))
        .min(point_to_segment_dist(c, a, b))
        .min(point_to_segment_dist(d, a, b))
}
