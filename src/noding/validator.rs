use thiserror::Error;

use crate::geometry::Coordinate;
use crate::math::{LineIntersector, SegmentIntersection};

use super::SegmentString;

/// A defect found in a supposedly noded set of segment strings.
#[derive(Debug, Error, PartialEq)]
pub enum NodingValidationError {
    #[error("found non-noded collapse at {0} {1} {2}")]
    Collapse(Coordinate, Coordinate, Coordinate),

    #[error("found non-noded intersection between {0}-{1} and {2}-{3}")]
    InteriorIntersection(Coordinate, Coordinate, Coordinate, Coordinate),

    #[error("found endpoint/interior vertex intersection at index {index}: {point}")]
    EndpointInteriorVertex { index: usize, point: Coordinate },
}

/// Checks that segment strings are fully noded: no string folds back on
/// itself, no two segments meet except at shared endpoints, and no string
/// endpoint coincides with an interior vertex of any string.
///
/// Brute force; intended for tests and assertions.
#[derive(Debug)]
pub struct NodingValidator<'a> {
    strings: &'a [SegmentString],
    li: LineIntersector,
}

impl<'a> NodingValidator<'a> {
    #[must_use]
    pub fn new(strings: &'a [SegmentString]) -> Self {
        Self {
            strings,
            li: LineIntersector::new(),
        }
    }

    /// Runs every check and reports the first defect found.
    ///
    /// # Errors
    ///
    /// Returns the first [`NodingValidationError`] encountered.
    pub fn validate(&self) -> Result<(), NodingValidationError> {
        self.check_endpoint_vertices()?;
        self.check_interior_intersections()?;
        self.check_collapses()
    }

    /// Asserting form of [`Self::validate`].
    ///
    /// # Panics
    ///
    /// Panics with the defect's description if the strings are not noded.
    pub fn check_valid(&self) {
        if let Err(e) = self.validate() {
            panic!("{e}");
        }
    }

    fn check_collapses(&self) -> Result<(), NodingValidationError> {
        for ss in self.strings {
            for w in ss.coords().windows(3) {
                if w[0].equals_2d(&w[2]) {
                    return Err(NodingValidationError::Collapse(w[0], w[1], w[2]));
                }
            }
        }
        Ok(())
    }

    fn check_interior_intersections(&self) -> Result<(), NodingValidationError> {
        for (i0, ss0) in self.strings.iter().enumerate() {
            for (i1, ss1) in self.strings.iter().enumerate() {
                for s0 in 0..ss0.segment_count() {
                    for s1 in 0..ss1.segment_count() {
                        if i0 == i1 && s0 == s1 {
                            continue;
                        }
                        let (p00, p01) = ss0.segment(s0);
                        let (p10, p11) = ss1.segment(s1);
                        let r = self.li.compute_intersection(&p00, &p01, &p10, &p11);
                        if r.has_intersection()
                            && (r.is_proper()
                                || has_interior_point(&r, &p00, &p01)
                                || has_interior_point(&r, &p10, &p11))
                        {
                            return Err(NodingValidationError::InteriorIntersection(
                                p00, p01, p10, p11,
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_endpoint_vertices(&self) -> Result<(), NodingValidationError> {
        for ss in self.strings {
            let (Some(first), Some(last)) = (ss.coords().first(), ss.coords().last()) else {
                continue;
            };
            self.check_endpoint_vertex(first)?;
            self.check_endpoint_vertex(last)?;
        }
        Ok(())
    }

    fn check_endpoint_vertex(&self, pt: &Coordinate) -> Result<(), NodingValidationError> {
        for ss in self.strings {
            let coords = ss.coords();
            if coords.len() < 3 {
                continue;
            }
            for (index, c) in coords.iter().enumerate().take(coords.len() - 1).skip(1) {
                if c.equals_2d(pt) {
                    return Err(NodingValidationError::EndpointInteriorVertex { index, point: *pt });
                }
            }
        }
        Ok(())
    }
}

fn has_interior_point(r: &SegmentIntersection, p0: &Coordinate, p1: &Coordinate) -> bool {
    r.points()
        .iter()
        .any(|pt| !(pt.equals_2d(p0) || pt.equals_2d(p1)))
}
