//! Noding: computing all intersections among a set of segment strings and
//! splitting the strings there, so that the result meets only at endpoints.

mod indexed_noder;
mod intersection_adder;
mod iterated_noder;
pub mod octant;
mod segment_node;
mod segment_string;
mod simple_noder;
mod validator;

pub use indexed_noder::IndexedNoder;
pub use intersection_adder::IntersectionAdder;
pub use iterated_noder::IteratedNoder;
pub use segment_node::{compare_segment_nodes, SegmentNode, SegmentNodeList};
pub use segment_string::SegmentString;
pub use simple_noder::SimpleNoder;
pub use validator::{NodingValidationError, NodingValidator};

use crate::error::Result;
use crate::geometry::PrecisionModel;

/// Computes a noded arrangement of segment strings.
pub trait Noder {
    /// Nodes `strings` and returns the split substrings.
    ///
    /// # Errors
    ///
    /// Returns an error if the noder cannot produce a fully noded result.
    fn compute_nodes(&self, strings: Vec<SegmentString>) -> Result<Vec<SegmentString>>;
}

/// Settings for iterated noding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodingConfig {
    /// Precision model applied to computed intersection points.
    pub precision_model: PrecisionModel,
    /// Number of passes allowed before a pass that fails to reduce the node
    /// count is reported as non-convergence.
    pub max_iterations: usize,
}

impl Default for NodingConfig {
    fn default() -> Self {
        Self {
            precision_model: PrecisionModel::floating(),
            max_iterations: 5,
        }
    }
}

impl NodingConfig {
    #[must_use]
    pub fn with_precision_model(mut self, pm: PrecisionModel) -> Self {
        self.precision_model = pm;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Splits every string at its recorded nodes.
pub(crate) fn noded_substrings(strings: &[SegmentString]) -> Vec<SegmentString> {
    strings.iter().flat_map(SegmentString::split).collect()
}
