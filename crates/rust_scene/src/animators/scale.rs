//! Scale tween

use super::Tween;
use crate::foundation::math::Vec2;
use crate::scene::{Animator, Node};

/// Scale a node to a target scale
#[derive(Debug, Clone)]
pub struct Scale {
    tween: Tween,
    from: Vec2,
    target: Vec2,
}

impl Scale {
    /// Reach `target` over `duration` seconds
    pub const fn to(target: Vec2, duration: f32) -> Self {
        Self {
            tween: Tween::new(duration),
            from: target,
            target,
        }
    }
}

impl Animator for Scale {
    fn start(&mut self, node: &Node) {
        self.from = node.scale();
        self.tween.start();
    }

    fn stop(&mut self) {
        self.tween.stop();
    }

    fn update(&mut self, delta: f32, node: &mut Node) {
        if let Some(t) = self.tween.advance(delta) {
            node.set_scale(self.from.lerp(&self.target, t));
        }
    }

    fn is_done(&self) -> bool {
        self.tween.is_done()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scales_towards_target() {
        let mut node = Node::new();
        let mut animator = Scale::to(Vec2::new(3.0, 0.0), 1.0);
        animator.start(&node);

        animator.update(0.5, &mut node);
        assert_relative_eq!(node.scale(), Vec2::new(2.0, 0.5));
        assert!(node.is_transform_dirty());

        animator.update(0.5, &mut node);
        assert_relative_eq!(node.scale(), Vec2::new(3.0, 0.0));
        assert!(animator.is_done());
        assert!(node.inverse_transform().is_none());
    }
}
