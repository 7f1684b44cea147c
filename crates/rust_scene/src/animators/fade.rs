//! Opacity tween

use super::Tween;
use crate::foundation::math::utils::lerp;
use crate::scene::{Animator, Node};

/// Fade a node's opacity to a target
#[derive(Debug, Clone)]
pub struct Fade {
    tween: Tween,
    from: f32,
    target: f32,
}

impl Fade {
    /// Reach `target` opacity over `duration` seconds
    pub fn to(target: f32, duration: f32) -> Self {
        Self {
            tween: Tween::new(duration),
            from: 1.0,
            target: target.clamp(0.0, 1.0),
        }
    }

    /// Fade to fully transparent
    pub fn out(duration: f32) -> Self {
        Self::to(0.0, duration)
    }
}

impl Animator for Fade {
    fn start(&mut self, node: &Node) {
        self.from = node.opacity();
        self.tween.start();
    }

    fn stop(&mut self) {
        self.tween.stop();
    }

    fn update(&mut self, delta: f32, node: &mut Node) {
        if let Some(t) = self.tween.advance(delta) {
            node.set_opacity(lerp(self.from, self.target, t));
        }
    }

    fn is_done(&self) -> bool {
        self.tween.is_done()
    }
}
