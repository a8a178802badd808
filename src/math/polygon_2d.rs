use crate::geometry::Coordinate;

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring may be
/// given closed or open; the closing segment is implied.
#[must_use]
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    // Shift to the first vertex to limit cancellation on large coordinates.
    let x0 = ring[0].x;
    let y0 = ring[0].y;
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += (ring[i].x - x0) * (ring[j].y - y0) - (ring[j].x - x0) * (ring[i].y - y0);
    }
    sum * 0.5
}

/// Unsigned area of a ring.
#[must_use]
pub fn ring_area(ring: &[Coordinate]) -> f64 {
    signed_area(ring).abs()
}

/// Total length of a polyline.
#[must_use]
pub fn polyline_length(pts: &[Coordinate]) -> f64 {
    pts.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// Computes the incentre of a triangle: the centre of its inscribed circle.
///
/// A degenerate triangle yields the centroid of its vertices.
#[must_use]
pub fn triangle_incentre(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> Coordinate {
    let len0 = b.distance(c);
    let len1 = a.distance(c);
    let len2 = a.distance(b);
    let circum = len0 + len1 + len2;
    if circum <= 0.0 {
        return *a;
    }
    let x = (len0 * a.x + len1 * b.x + len2 * c.x) / circum;
    let y = (len0 * a.y + len1 * b.y + len2 * c.y) / circum;
    Coordinate::new(x, y)
}
