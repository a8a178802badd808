use thiserror::Error;

use crate::geometry::Coordinate;

/// Top-level error type for the geotopo kernel.
#[derive(Debug, Error)]
pub enum GeotopoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Noding(#[from] NodingError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Errors related to geometric input.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while building or labelling a topology graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("assigned depths do not match at {0}")]
    DepthConflict(Coordinate),

    #[error("depth mismatch at {0}")]
    DepthMismatch(Coordinate),

    #[error("unable to find edge to compute depths at {0}")]
    NoDepthStartEdge(Coordinate),

    #[error("directed edge visited twice during ring-building at {0}")]
    RingVisitedTwice(Coordinate),

    #[error("no outgoing directed edge found at {0}")]
    NoOutgoingEdge(Coordinate),

    #[error("unable to assign hole starting at {0} to a shell")]
    UnassignedHole(Coordinate),

    #[error("invalid topology: {0}")]
    Invalid(String),
}

/// Errors raised by the production noders.
#[derive(Debug, Error)]
pub enum NodingError {
    #[error("iterated noding failed to converge after {iterations} iterations ({nodes_created} nodes created in the last pass)")]
    NonConvergence {
        iterations: usize,
        nodes_created: usize,
    },
}

/// Errors related to matrix and vector arithmetic.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("cannot multiply a {left_rows}x{left_cols} matrix by a {right_rows}x{right_cols} matrix")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("matrix data length {len} does not fit {rows}x{cols}")]
    DataLength { rows: usize, cols: usize, len: usize },

    #[error("division by zero")]
    DivideByZero,
}

/// Convenience type alias for results using [`GeotopoError`].
pub type Result<T> = std::result::Result<T, GeotopoError>;
