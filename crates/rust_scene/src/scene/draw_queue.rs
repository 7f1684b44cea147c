//! Per-frame draw queue
//!
//! Built by the visit pass and consumed by the draw pass. Entries are kept in
//! non-increasing world order. An entry is inserted after every entry with an
//! equal or greater world order, so nodes that share an order stay in
//! traversal order.

use super::NodeId;

/// One queued node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawEntry {
    /// The queued node
    pub node: NodeId,
    /// World order at the time of the visit
    pub world_order: i32,
}

/// Ordered list of nodes to draw this frame
#[derive(Debug, Clone, Default)]
pub struct DrawQueue {
    entries: Vec<DrawEntry>,
}

impl DrawQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Create an empty queue with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a node at the upper bound of its world order
    pub fn insert(&mut self, node: NodeId, world_order: i32) {
        let index = self.entries.partition_point(|entry| entry.world_order >= world_order);
        self.entries.insert(index, DrawEntry { node, world_order });
    }

    /// Entries in draw order
    pub fn entries(&self) -> &[DrawEntry] {
        &self.entries
    }

    /// Queued nodes in draw order
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.entries.iter().map(|entry| entry.node)
    }

    /// Number of queued nodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, keeping the allocation
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a DrawQueue {
    type Item = &'a DrawEntry;
    type IntoIter = std::slice::Iter<'a, DrawEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
