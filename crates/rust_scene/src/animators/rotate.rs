//! Rotation tween

use super::Tween;
use crate::scene::{Animator, Node};

/// Rotate a node by a relative angle in radians
#[derive(Debug, Clone)]
pub struct Rotate {
    tween: Tween,
    from: f32,
    angle: f32,
}

impl Rotate {
    /// Turn by `angle` radians over `duration` seconds; positive is clockwise
    pub const fn by(angle: f32, duration: f32) -> Self {
        Self {
            tween: Tween::new(duration),
            from: 0.0,
            angle,
        }
    }
}

impl Animator for Rotate {
    fn start(&mut self, node: &Node) {
        self.from = node.rotation();
        self.tween.start();
    }

    fn stop(&mut self) {
        self.tween.stop();
    }

    fn update(&mut self, delta: f32, node: &mut Node) {
        if let Some(t) = self.tween.advance(delta) {
            node.set_rotation(self.angle.mul_add(t, self.from));
        }
    }

    fn is_done(&self) -> bool {
        self.tween.is_done()
    }
}
