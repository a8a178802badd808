pub mod coordinate;
pub mod envelope;
pub mod interval;
pub mod line_segment;
pub mod location;
pub mod precision;
pub mod shape;

pub(crate) use coordinate::CoordKey;
pub use coordinate::{remove_repeated_points, Coordinate};
pub use envelope::Envelope;
pub use interval::Interval;
pub use line_segment::LineSegment;
pub use location::{Location, Position};
pub use precision::{PrecisionModel, PrecisionModelType};
pub use shape::{Geometry, GeometryType, LineString, Polygon};
