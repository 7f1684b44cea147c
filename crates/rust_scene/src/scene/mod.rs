//! Scene graph
//!
//! Hierarchical 2D nodes with lazily cached transforms, per-frame draw
//! ordering with camera culling, attached components for drawing and hit
//! testing, and one animator per node driven through an injected
//! [`UpdateScheduler`].

pub mod aabb;
pub mod animator;
pub mod camera;
pub mod commands;
pub mod component;
pub mod draw_queue;
pub mod error;
pub mod graph;
pub mod node;
pub mod scheduler;
pub mod transform_cache;

#[cfg(test)]
mod tests;

pub use aabb::Aabb2;
pub use animator::{Animator, AnimatorId};
pub use camera::{Camera, OrthoCamera};
pub use commands::{CommandBuffer, DrawCommand, Primitive, Vertex};
pub use component::{Component, ComponentId};
pub use draw_queue::{DrawEntry, DrawQueue};
pub use error::SceneError;
pub use graph::SceneGraph;
pub use node::{Node, NodeFlags, NodeId};
pub use scheduler::{UpdateList, UpdateScheduler};
pub use transform_cache::{CacheState, LocalPose, TransformCache};
