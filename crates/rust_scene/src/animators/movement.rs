//! Position tween

use super::Tween;
use crate::foundation::math::Vec2;
use crate::scene::{Animator, Node};

/// Move a node's 2D position to a target, keeping its z
#[derive(Debug, Clone)]
pub struct Move {
    tween: Tween,
    from: Vec2,
    target: Vec2,
}

impl Move {
    /// Move to `target` over `duration` seconds
    pub const fn to(target: Vec2, duration: f32) -> Self {
        Self {
            tween: Tween::new(duration),
            from: target,
            target,
        }
    }

    /// Destination position
    pub const fn target(&self) -> Vec2 {
        self.target
    }
}

impl Animator for Move {
    fn start(&mut self, node: &Node) {
        self.from = node.position().xy();
        self.tween.start();
    }

    fn stop(&mut self) {
        self.tween.stop();
    }

    fn update(&mut self, delta: f32, node: &mut Node) {
        if let Some(t) = self.tween.advance(delta) {
            node.set_position_2d(self.from.lerp(&self.target, t));
        }
    }

    fn is_done(&self) -> bool {
        self.tween.is_done()
    }
}
