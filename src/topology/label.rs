use std::fmt;

use crate::geometry::{Location, Position};

/// Topological locations on and to either side of an edge.
///
/// A line label only carries the `on` location; an area label also carries
/// `left` and `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Label {
    pub on: Location,
    pub left: Location,
    pub right: Location,
}

impl Label {
    /// Label of a linear component.
    #[must_use]
    pub fn line(on: Location) -> Self {
        Self {
            on,
            left: Location::None,
            right: Location::None,
        }
    }

    /// Label of an area boundary.
    #[must_use]
    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self { on, left, right }
    }

    #[must_use]
    pub fn location(&self, pos: Position) -> Location {
        match pos {
            Position::On => self.on,
            Position::Left => self.left,
            Position::Right => self.right,
        }
    }

    pub fn set_location(&mut self, pos: Position, loc: Location) {
        match pos {
            Position::On => self.on = loc,
            Position::Left => self.left = loc,
            Position::Right => self.right = loc,
        }
    }

    /// Returns `true` if the label carries side locations.
    #[must_use]
    pub fn is_area(&self) -> bool {
        self.left.is_known() || self.right.is_known()
    }

    /// Returns `true` if no location is known.
    #[must_use]
    pub fn is_null(&self) -> bool {
        !(self.on.is_known() || self.is_area())
    }

    /// Returns `true` if every position has location `loc`.
    #[must_use]
    pub fn all_positions_equal(&self, loc: Location) -> bool {
        self.on == loc && self.left == loc && self.right == loc
    }

    /// Swaps the side locations.
    #[must_use]
    pub fn flipped(&self) -> Label {
        Label {
            on: self.on,
            left: self.right,
            right: self.left,
        }
    }

    pub fn flip(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    /// Fills positions that are unknown here from `other`.
    pub fn merge(&mut self, other: &Label) {
        for pos in [Position::On, Position::Left, Position::Right] {
            if !self.location(pos).is_known() {
                self.set_location(pos, other.location(pos));
            }
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = |l: Location| match l {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
            Location::None => '-',
        };
        write!(f, "{}{}{}", sym(self.left), sym(self.on), sym(self.right))
    }
}
