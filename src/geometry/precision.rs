use super::Coordinate;

/// How coordinates produced by the kernel are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionModelType {
    /// Full double precision.
    Floating,
    /// Rounded to single precision.
    FloatingSingle,
    /// Rounded to a fixed grid of `1 / scale`.
    Fixed,
}

/// Precision model applied to constructed coordinates (intersection points,
/// offset curve vertices).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionModel {
    kind: PrecisionModelType,
    scale: f64,
}

impl Default for PrecisionModel {
    fn default() -> Self {
        Self::floating()
    }
}

impl PrecisionModel {
    #[must_use]
    pub fn floating() -> Self {
        Self {
            kind: PrecisionModelType::Floating,
            scale: 0.0,
        }
    }

    #[must_use]
    pub fn floating_single() -> Self {
        Self {
            kind: PrecisionModelType::FloatingSingle,
            scale: 0.0,
        }
    }

    /// Fixed precision model; a scale of `1000.0` keeps three decimals.
    #[must_use]
    pub fn fixed(scale: f64) -> Self {
        Self {
            kind: PrecisionModelType::Fixed,
            scale: scale.abs(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PrecisionModelType {
        self.kind
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(
            self.kind,
            PrecisionModelType::Floating | PrecisionModelType::FloatingSingle
        )
    }

    /// Rounds a single ordinate to this model.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn make_precise(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        match self.kind {
            PrecisionModelType::Floating => value,
            PrecisionModelType::FloatingSingle => f64::from(value as f32),
            PrecisionModelType::Fixed => (value * self.scale).round() / self.scale,
        }
    }

    /// Rounds the planar ordinates of a coordinate in place.
    pub fn make_precise_coord(&self, coord: &mut Coordinate) {
        if self.kind == PrecisionModelType::Floating {
            return;
        }
        coord.x = self.make_precise(coord.x);
        coord.y = self.make_precise(coord.y);
    }
}
