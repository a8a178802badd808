use crate::geometry::Interval;

use super::key::{is_zero_width, Key};

/// Returns the half an interval falls into relative to `centre`, or `None`
/// if it straddles the centre.
pub(super) fn subnode_index(interval: &Interval, centre: f64) -> Option<usize> {
    if interval.min >= centre {
        Some(1)
    } else if interval.max <= centre {
        Some(0)
    } else {
        None
    }
}

/// Items and children shared by the root and interior nodes.
#[derive(Debug)]
pub(super) struct NodeBase<T> {
    pub(super) items: Vec<T>,
    pub(super) subnodes: [Option<Box<Node<T>>>; 2],
}

impl<T> Default for NodeBase<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            subnodes: [None, None],
        }
    }
}

impl<T> NodeBase<T> {
    pub(super) fn collect_overlapping<'a>(&'a self, search: &Interval, out: &mut Vec<&'a T>) {
        out.extend(self.items.iter());
        for node in self.subnodes.iter().flatten() {
            node.collect_overlapping(search, out);
        }
    }

    /// Removes one occurrence of `item`, pruning children left empty.
    pub(super) fn remove(&mut self, search: &Interval, item: &T) -> bool
    where
        T: PartialEq,
    {
        for slot in &mut self.subnodes {
            let Some(node) = slot.as_mut() else {
                continue;
            };
            if node.remove(search, item) {
                if node.base.is_prunable() {
                    *slot = None;
                }
                return true;
            }
        }
        if let Some(pos) = self.items.iter().position(|it| it == item) {
            self.items.remove(pos);
            return true;
        }
        false
    }

    pub(super) fn is_prunable(&self) -> bool {
        self.items.is_empty() && self.subnodes.iter().all(Option::is_none)
    }

    pub(super) fn depth(&self) -> usize {
        let max_sub = self
            .subnodes
            .iter()
            .flatten()
            .map(|n| n.base.depth())
            .max()
            .unwrap_or(0);
        max_sub + 1
    }

    pub(super) fn size(&self) -> usize {
        self.items.len()
            + self
                .subnodes
                .iter()
                .flatten()
                .map(|n| n.base.size())
                .sum::<usize>()
    }

    pub(super) fn node_count(&self) -> usize {
        1 + self
            .subnodes
            .iter()
            .flatten()
            .map(|n| n.base.node_count())
            .sum::<usize>()
    }

    fn drain_into(&mut self, out: &mut Vec<T>) {
        out.append(&mut self.items);
        for slot in &mut self.subnodes {
            if let Some(mut node) = slot.take() {
                node.base.drain_into(out);
            }
        }
    }
}

/// An interior node covering a power-of-two aligned interval.
#[derive(Debug)]
pub(super) struct Node<T> {
    pub(super) base: NodeBase<T>,
    pub(super) interval: Interval,
    centre: f64,
    level: i32,
}

impl<T> Node<T> {
    fn new(interval: Interval, level: i32) -> Self {
        Self {
            base: NodeBase::default(),
            centre: interval.centre(),
            interval,
            level,
        }
    }

    /// Creates the smallest keyed node covering `add` and the existing
    /// `node`, re-inserting `node` beneath it.
    pub(super) fn create_expanded(node: Option<Box<Node<T>>>, add: &Interval) -> Box<Node<T>> {
        let mut expand = *add;
        if let Some(n) = &node {
            expand.expand_to_include(&n.interval);
        }
        let key = Key::new(&expand);
        let mut larger = Box::new(Node::new(key.interval, key.level));
        if let Some(n) = node {
            larger.insert_node(n);
        }
        larger
    }

    fn create_subnode(&self, index: usize) -> Node<T> {
        let (min, max) = if index == 0 {
            (self.interval.min, self.centre)
        } else {
            (self.centre, self.interval.max)
        };
        Node::new(Interval::new(min, max), self.level - 1)
    }

    fn insert_node(&mut self, mut node: Box<Node<T>>) {
        let Some(index) = subnode_index(&node.interval, self.centre) else {
            // Keys are aligned, so this only happens on degenerate input:
            // keep the items here rather than lose them.
            node.base.drain_into(&mut self.base.items);
            return;
        };
        if node.level == self.level - 1 {
            self.base.subnodes[index] = Some(node);
        } else {
            let mut child = Box::new(self.create_subnode(index));
            child.insert_node(node);
            self.base.subnodes[index] = Some(child);
        }
    }

    /// Stores `item` in the node for `interval`, creating nodes down to the
    /// smallest one containing it. Intervals of negligible relative width
    /// stop at the deepest existing node instead.
    pub(super) fn insert_contained(&mut self, interval: &Interval, item: T) {
        if is_zero_width(interval.min, interval.max) {
            self.add_at_existing(interval, item);
        } else {
            self.add_at_new(interval, item);
        }
    }

    fn add_at_new(&mut self, interval: &Interval, item: T) {
        if let Some(index) = subnode_index(interval, self.centre) {
            if self.base.subnodes[index].is_none() {
                let child = self.create_subnode(index);
                self.base.subnodes[index] = Some(Box::new(child));
            }
            if let Some(child) = self.base.subnodes[index].as_mut() {
                child.add_at_new(interval, item);
                return;
            }
        }
        self.base.items.push(item);
    }

    fn add_at_existing(&mut self, interval: &Interval, item: T) {
        if let Some(index) = subnode_index(interval, self.centre) {
            if let Some(child) = self.base.subnodes[index].as_mut() {
                child.add_at_existing(interval, item);
                return;
            }
        }
        self.base.items.push(item);
    }

    fn collect_overlapping<'a>(&'a self, search: &Interval, out: &mut Vec<&'a T>) {
        if !self.interval.overlaps(search) {
            return;
        }
        self.base.collect_overlapping(search, out);
    }

    fn remove(&mut self, search: &Interval, item: &T) -> bool
    where
        T: PartialEq,
    {
        if !self.interval.overlaps(search) {
            return false;
        }
        self.base.remove(search, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subnode_index_by_centre() {
        assert_eq!(subnode_index(&Interval::new(1.0, 2.0), 0.0), Some(1));
        assert_eq!(subnode_index(&Interval::new(-2.0, 0.0), 0.0), Some(0));
        assert_eq!(subnode_index(&Interval::new(-1.0, 1.0), 0.0), None);
    }

    #[test]
    fn expanded_node_keeps_existing_subtree() {
        let mut small = Node::create_expanded(None, &Interval::new(1.0, 1.5));
        small.insert_contained(&Interval::new(1.0, 1.5), 7);
        let big = Node::create_expanded(Some(small), &Interval::new(5.0, 6.0));
        assert!(big.interval.contains(&Interval::new(1.0, 6.0)));
        assert_eq!(big.base.size(), 1);
        let mut out = Vec::new();
        big.collect_overlapping(&Interval::new(1.2, 1.3), &mut out);
        assert_eq!(out, vec![&7]);
    }
}
