//! Animator capability: time-driven mutation of one node
//!
//! Animators live in the graph's animator arena. A node has at most one
//! current animator and the animator entry points back at that node.

use std::fmt;

use slotmap::new_key_type;

use super::Node;

new_key_type! {
    /// Generational handle to an animator in a [`SceneGraph`](super::SceneGraph)
    pub struct AnimatorId;
}

/// Time-driven mutator of a node
pub trait Animator: fmt::Debug {
    /// Begin animating `node`, capturing whatever start state is needed
    fn start(&mut self, node: &Node);

    /// Stop where it is; further updates do nothing until restarted
    fn stop(&mut self);

    /// Advance by `delta` seconds, writing the result into `node`
    fn update(&mut self, delta: f32, node: &mut Node);

    /// True once the animation has reached its end
    fn is_done(&self) -> bool;
}
