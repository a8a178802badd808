/// Topological location of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
    /// Location not yet determined.
    #[default]
    None,
}

impl Location {
    /// Returns `true` unless the location is [`Location::None`].
    #[must_use]
    pub fn is_known(self) -> bool {
        self != Location::None
    }
}

/// Position relative to a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    On,
    Left,
    Right,
}

impl Position {
    /// Returns the opposite side; `On` is its own opposite.
    #[must_use]
    pub fn opposite(self) -> Position {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::On => Position::On,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_sides() {
        assert_eq!(Position::Left.opposite(), Position::Right);
        assert_eq!(Position::Right.opposite(), Position::Left);
        assert_eq!(Position::On.opposite(), Position::On);
    }

    #[test]
    fn default_is_unknown() {
        assert!(!Location::default().is_known());
        assert!(Location::Exterior.is_known());
    }
}
