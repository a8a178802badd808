use crate::geometry::Interval;

/// Binary exponent of a double, read straight from its bit pattern.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(super) fn exponent(d: f64) -> i32 {
    let bits = d.to_bits();
    ((bits >> 52) & 0x7ff) as i32 - 1023
}

/// Exponent below which an interval's width is negligible relative to its
/// magnitude.
const MIN_BINARY_EXPONENT: i32 = -50;

/// Returns `true` if `[min, max]` is too narrow to be split further at its
/// position on the number line.
pub(super) fn is_zero_width(min: f64, max: f64) -> bool {
    let max_abs = min.abs().max(max.abs());
    if max_abs == 0.0 {
        return true;
    }
    exponent((max - min) / max_abs) <= MIN_BINARY_EXPONENT
}

/// Power-of-two aligned interval that contains a given item interval.
///
/// The level is the exponent of the key's width; the key's lower bound is a
/// multiple of that width.
#[derive(Debug, Clone, Copy)]
pub(super) struct Key {
    pub(super) level: i32,
    pub(super) interval: Interval,
}

impl Key {
    pub(super) fn new(item: &Interval) -> Self {
        let mut level = exponent(item.width()) + 1;
        let mut interval = aligned_interval(level, item);
        while !interval.contains(item) {
            level += 1;
            interval = aligned_interval(level, item);
        }
        Self { level, interval }
    }
}

fn aligned_interval(level: i32, item: &Interval) -> Interval {
    let size = 2f64.powi(level);
    let start = (item.min / size).floor() * size;
    Interval::new(start, start + size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_of_powers_of_two() {
        assert_eq!(exponent(1.0), 0);
        assert_eq!(exponent(8.0), 3);
        assert_eq!(exponent(0.5), -1);
        assert_eq!(exponent(3.0), 1);
    }

    #[test]
    fn key_contains_item() {
        let item = Interval::new(5.3, 6.1);
        let key = Key::new(&item);
        assert!(key.interval.contains(&item));
        let size = key.interval.width();
        assert_eq!(size, 2f64.powi(key.level));
        assert_eq!((key.interval.min / size).fract(), 0.0);
    }

    #[test]
    fn key_grows_across_alignment_boundary() {
        // Width 0.2 straddles 4.0, so the first candidate [3.75, 4.0) is too small.
        let item = Interval::new(3.9, 4.1);
        let key = Key::new(&item);
        assert!(key.interval.contains(&item));
    }

    #[test]
    fn zero_width_detection() {
        assert!(is_zero_width(1.0e6, 1.0e6));
        assert!(is_zero_width(1.0e6, 1.0e6 + 1.0e-12));
        assert!(!is_zero_width(1.0, 2.0));
        assert!(is_zero_width(0.0, 0.0));
    }
}
