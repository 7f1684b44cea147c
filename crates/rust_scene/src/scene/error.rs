//! Scene graph errors

use thiserror::Error;

use super::{AnimatorId, ComponentId, NodeId};

/// Errors raised by handle-based scene graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The node handle is stale or was never issued by this graph
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The component handle is stale or was never issued by this graph
    #[error("Component not found: {0:?}")]
    ComponentNotFound(ComponentId),

    /// The animator handle is stale or was never issued by this graph
    #[error("Animator not found: {0:?}")]
    AnimatorNotFound(AnimatorId),

    /// Attaching would make a node its own ancestor
    #[error("Cannot attach {child:?} under {parent:?}: would create a cycle")]
    CyclicHierarchy {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },
}
