use std::cmp::Ordering;
use std::fmt;

use crate::math::Point2;

/// A planar position with an optional elevation.
///
/// Equality is 2D value equality: two coordinates are equal when their `x`
/// and `y` ordinates match, regardless of `z`.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    /// Elevation, `NaN` when absent.
    pub z: f64,
}

impl Coordinate {
    /// Creates a 2D coordinate.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: f64::NAN }
    }

    /// Creates a coordinate carrying an elevation.
    #[must_use]
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns `true` if the elevation is present.
    #[must_use]
    pub fn has_z(&self) -> bool {
        !self.z.is_nan()
    }

    /// Returns `true` if both planar ordinates match exactly.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Euclidean distance in the plane.
    #[must_use]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Lexicographic comparison on `x`, then `y`.
    #[must_use]
    pub fn compare_2d(&self, other: &Coordinate) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap_or(Ordering::Equal)
            .then(self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal))
    }

    /// Returns the planar part as an nalgebra point.
    #[must_use]
    pub fn to_point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_2d(other)
    }
}

impl From<Point2> for Coordinate {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_z() {
            write!(f, "({}, {}, {})", self.x, self.y, self.z)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Totally ordered key for using coordinates in ordered maps.
///
/// Negative zero is folded onto positive zero so keys agree with
/// [`Coordinate::equals_2d`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordKey {
    x: f64,
    y: f64,
}

impl CoordKey {
    pub(crate) fn new(c: &Coordinate) -> Self {
        Self {
            x: c.x + 0.0,
            y: c.y + 0.0,
        }
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x).then(self.y.total_cmp(&other.y))
    }
}

/// Removes consecutive duplicate coordinates.
#[must_use]
pub fn remove_repeated_points(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last().is_some_and(|last| last.equals_2d(c)) {
            continue;
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_z() {
        let a = Coordinate::with_z(1.0, 2.0, 3.0);
        let b = Coordinate::new(1.0, 2.0);
        assert_eq!(a, b);
        assert!(a.has_z());
        assert!(!b.has_z());
    }

    #[test]
    fn compare_is_lexicographic() {
        let a = Coordinate::new(0.0, 5.0);
        let b = Coordinate::new(1.0, 0.0);
        let c = Coordinate::new(1.0, 1.0);
        assert_eq!(a.compare_2d(&b), Ordering::Less);
        assert_eq!(c.compare_2d(&b), Ordering::Greater);
        assert_eq!(b.compare_2d(&b), Ordering::Equal);
    }

    #[test]
    fn key_folds_negative_zero() {
        let a = CoordKey::new(&Coordinate::new(-0.0, 1.0));
        let b = CoordKey::new(&Coordinate::new(0.0, 1.0));
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_points_removed() {
        let pts = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(0.0, 0.0),
        ];
        let out = remove_repeated_points(&pts);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Coordinate::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
