//! Per-frame update registration
//!
//! Nodes with an animator register here; the frame loop asks the scheduler
//! which nodes to tick. The scheduler is injected into the
//! [`SceneGraph`](super::SceneGraph) rather than reached through a global.

use super::NodeId;

/// Registration of nodes for per-frame animation ticks
pub trait UpdateScheduler {
    /// Register a node. Registering twice is a no-op.
    fn schedule_update(&mut self, node: NodeId);

    /// Unregister a node. Unregistering an unknown node is a no-op.
    fn unschedule_update(&mut self, node: NodeId);

    /// Whether the node is registered
    fn is_scheduled(&self, node: NodeId) -> bool;

    /// Snapshot of registered nodes in tick order
    fn scheduled(&self) -> Vec<NodeId>;
}

/// Insertion-ordered, duplicate-free update list
#[derive(Debug, Clone, Default)]
pub struct UpdateList {
    nodes: Vec<NodeId>,
}

impl UpdateList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl UpdateScheduler for UpdateList {
    fn schedule_update(&mut self, node: NodeId) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    fn unschedule_update(&mut self, node: NodeId) {
        self.nodes.retain(|scheduled| *scheduled != node);
    }

    fn is_scheduled(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    fn scheduled(&self) -> Vec<NodeId> {
        self.nodes.clone()
    }
}
