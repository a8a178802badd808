//! A binary interval tree over the real line.
//!
//! The tree is rooted at the origin with one lazily created subtree per
//! half-line. Nodes cover power-of-two aligned intervals and split at their
//! centre; an item lives at the deepest node whose interval contains it.
//! Queries may return items that do not overlap the search interval, but
//! never miss one that does.

mod key;
mod node;

use crate::geometry::Interval;

use node::{subnode_index, Node, NodeBase};

const ORIGIN: f64 = 0.0;

/// Interval index returning candidate items for a query interval.
#[derive(Debug)]
pub struct Bintree<T> {
    root: NodeBase<T>,
    /// Smallest non-zero item width seen so far; used to give zero-width
    /// items a usable extent.
    min_extent: f64,
}

impl<T> Default for Bintree<T> {
    fn default() -> Self {
        Self {
            root: NodeBase::default(),
            min_extent: 1.0,
        }
    }
}

impl<T> Bintree<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` with the range `interval`.
    pub fn insert(&mut self, interval: Interval, item: T) {
        let width = interval.width();
        if width < self.min_extent && width > 0.0 {
            self.min_extent = width;
        }
        let interval = self.ensure_extent(interval);

        let Some(index) = subnode_index(&interval, ORIGIN) else {
            self.root.items.push(item);
            return;
        };

        let slot = &mut self.root.subnodes[index];
        if !slot.as_ref().is_some_and(|n| n.interval.contains(&interval)) {
            let existing = slot.take();
            *slot = Some(Node::create_expanded(existing, &interval));
        }
        if let Some(node) = slot.as_mut() {
            node.insert_contained(&interval, item);
        }
    }

    /// Returns every item whose range may overlap `interval`.
    #[must_use]
    pub fn query(&self, interval: &Interval) -> Vec<&T> {
        let mut out = Vec::new();
        self.root.collect_overlapping(interval, &mut out);
        out
    }

    /// Returns every item whose range may contain `x`.
    #[must_use]
    pub fn query_point(&self, x: f64) -> Vec<&T> {
        self.query(&Interval::new(x, x))
    }

    /// Removes one occurrence of `item` inserted with `interval`.
    ///
    /// Returns `true` if the item was found.
    pub fn remove(&mut self, interval: &Interval, item: &T) -> bool
    where
        T: PartialEq,
    {
        let interval = self.ensure_extent(*interval);
        self.root.remove(&interval, item)
    }

    /// Number of items in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        self.root.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of levels, counting the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of nodes, counting the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    #[allow(clippy::float_cmp)]
    fn ensure_extent(&self, interval: Interval) -> Interval {
        if interval.min != interval.max {
            return interval;
        }
        let half = self.min_extent / 2.0;
        Interval::new(interval.min - half, interval.max + half)
    }
}
