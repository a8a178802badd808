/// A closed one-dimensional range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Creates an interval, swapping the bounds if given backwards.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a > b {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn centre(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Grows this interval to cover `other`.
    pub fn expand_to_include(&mut self, other: &Interval) {
        if other.max > self.max {
            self.max = other.max;
        }
        if other.min < self.min {
            self.min = other.min;
        }
    }

    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.overlaps_range(other.min, other.max)
    }

    #[must_use]
    pub fn overlaps_range(&self, min: f64, max: f64) -> bool {
        !(self.min > max || self.max < min)
    }

    #[must_use]
    pub fn contains(&self, other: &Interval) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    #[must_use]
    pub fn contains_value(&self, p: f64) -> bool {
        p >= self.min && p <= self.max
    }
}
