pub mod distance_2d;
pub mod float_vector;
pub mod intersect_2d;
pub mod matrix;
pub mod orientation;
pub mod polygon_2d;

pub use float_vector::FloatVector3;
pub use intersect_2d::{line_intersection, IntersectionKind, LineIntersector, SegmentIntersection};
pub use matrix::{Matrix, Matrix4, MatrixD};
pub use orientation::{orientation_index, Orientation};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
