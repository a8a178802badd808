pub mod buffer;
pub mod distance;

pub use buffer::{BufferOp, BufferParameters, EndCapStyle, JoinStyle};
pub use distance::{DistanceOp, GeometryLocation, PointLocator};
