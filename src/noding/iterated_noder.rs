use tracing::{debug, warn};

use crate::error::{NodingError, Result};
use crate::math::LineIntersector;

use super::{noded_substrings, IndexedNoder, Noder, NodingConfig, SegmentString};

/// Nodes a set of segment strings robustly by re-noding until a pass finds
/// no interior intersections.
///
/// Rounding computed intersection points can create new intersections, so a
/// single pass is not always enough. Each pass is a full [`IndexedNoder`]
/// run over the previous pass's output.
#[derive(Debug, Clone, Copy, Default)]
pub struct IteratedNoder {
    config: NodingConfig,
}

impl IteratedNoder {
    #[must_use]
    pub fn new(config: NodingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &NodingConfig {
        &self.config
    }

    fn line_intersector(&self) -> LineIntersector {
        LineIntersector::new().with_precision_model(self.config.precision_model)
    }
}

impl Noder for IteratedNoder {
    /// # Errors
    ///
    /// Returns `NodingError::NonConvergence` if, after more than
    /// `max_iterations` passes, a pass creates at least as many nodes as the
    /// previous one.
    fn compute_nodes(&self, strings: Vec<SegmentString>) -> Result<Vec<SegmentString>> {
        let noder = IndexedNoder::new(self.line_intersector());
        let mut noded = strings;
        let mut iterations = 0usize;
        let mut last_created: Option<usize> = None;

        loop {
            let stats = noder.add_nodes(&mut noded);
            noded = noded_substrings(&noded);
            iterations += 1;

            let created = stats.num_interior_intersections();
            debug!(
                iteration = iterations,
                nodes_created = created,
                strings = noded.len(),
                "noding pass"
            );

            if let Some(last) = last_created {
                if last > 0 && created >= last && iterations > self.config.max_iterations {
                    warn!(
                        iterations,
                        nodes_created = created,
                        "iterated noding failed to converge"
                    );
                    return Err(NodingError::NonConvergence {
                        iterations,
                        nodes_created: created,
                    }
                    .into());
                }
            }
            last_created = Some(created);
            if created == 0 {
                return Ok(noded);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Coordinate, Location, PrecisionModel};
    use crate::noding::NodingValidator;
    use crate::topology::Label;

    fn string(pts: &[(f64, f64)]) -> SegmentString {
        SegmentString::new(
            pts.iter().map(|&p| Coordinate::from(p)).collect(),
            Label::line(Location::Interior),
        )
    }

    #[test]
    fn star_of_lines_is_fully_noded() {
        let strings = vec![
            string(&[(0.0, 0.0), (10.0, 10.0)]),
            string(&[(0.0, 10.0), (10.0, 0.0)]),
            string(&[(0.0, 3.0), (10.0, 6.0)]),
            string(&[(4.0, -1.0), (6.0, 11.0)]),
        ];
        let noded = IteratedNoder::default().compute_nodes(strings).unwrap();
        assert!(NodingValidator::new(&noded).validate().is_ok());
    }

    #[test]
    fn noding_is_idempotent() {
        let strings = vec![
            string(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]),
            string(&[(-1.0, 5.0), (11.0, 5.0)]),
        ];
        let noder = IteratedNoder::default();
        let once = noder.compute_nodes(strings).unwrap();
        let twice = noder.compute_nodes(once.clone()).unwrap();
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.coords(), b.coords());
        }
    }

    #[test]
    fn fixed_precision_nodes_are_rounded() {
        let config = NodingConfig::default().with_precision_model(PrecisionModel::fixed(1.0));
        let strings = vec![string(&[(0.0, 0.0), (3.0, 1.0)]), string(&[(0.0, 1.0), (3.0, 0.0)])];
        let noded = IteratedNoder::new(config).compute_nodes(strings).unwrap();
        for s in &noded {
            for c in s.coords() {
                assert_eq!(c.x, c.x.round());
                assert_eq!(c.y, c.y.round());
            }
        }
    }
}
