//! Back-to-back composition of animators

use crate::scene::{Animator, Node};

/// Runs its animators one after another
///
/// Each step is started when the previous one finishes, so it captures the
/// node state left behind by its predecessor. Time left over in the frame a
/// step finishes is not carried into the next step.
#[derive(Debug, Default)]
pub struct Sequence {
    steps: Vec<Box<dyn Animator>>,
    current: usize,
    running: bool,
    started: bool,
}

impl Sequence {
    /// Empty sequence; done as soon as it is started
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    #[must_use]
    pub fn then<A: Animator + 'static>(mut self, step: A) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when there are no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the running step
    pub const fn current_step(&self) -> usize {
        self.current
    }
}

impl Animator for Sequence {
    fn start(&mut self, node: &Node) {
        self.current = 0;
        self.running = true;
        self.started = true;
        if let Some(first) = self.steps.first_mut() {
            first.start(node);
        }
    }

    fn stop(&mut self) {
        self.running = false;
        if let Some(step) = self.steps.get_mut(self.current) {
            step.stop();
        }
    }

    fn update(&mut self, delta: f32, node: &mut Node) {
        if !self.running {
            return;
        }
        let Some(step) = self.steps.get_mut(self.current) else {
            return;
        };
        step.update(delta, node);
        if step.is_done() {
            self.current += 1;
            if let Some(next) = self.steps.get_mut(self.current) {
                next.start(node);
            }
        }
    }

    fn is_done(&self) -> bool {
        self.started && self.current >= self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animators::{Fade, Move};
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn test_steps_run_in_order() {
        let mut node = Node::new();
        let mut sequence = Sequence::new()
            .then(Move::to(Vec2::new(2.0, 0.0), 1.0))
            .then(Fade::out(1.0));
        sequence.start(&node);

        sequence.update(1.0, &mut node);
        assert_relative_eq!(node.position().x, 2.0);
        assert_eq!(sequence.current_step(), 1);
        assert_relative_eq!(node.opacity(), 1.0);

        sequence.update(0.5, &mut node);
        assert_relative_eq!(node.opacity(), 0.5);
        assert!(!sequence.is_done());

        sequence.update(0.5, &mut node);
        assert!(sequence.is_done());
    }

    #[test]
    fn test_empty_sequence_done_after_start() {
        let node = Node::new();
        let mut sequence = Sequence::new();
        assert!(!sequence.is_done());
        sequence.start(&node);
        assert!(sequence.is_done());
    }

    #[test]
    fn test_stop_freezes_current_step() {
        let mut node = Node::new();
        let mut sequence = Sequence::new().then(Move::to(Vec2::new(4.0, 0.0), 1.0));
        sequence.start(&node);
        sequence.update(0.25, &mut node);
        sequence.stop();
        sequence.update(0.5, &mut node);
        assert_relative_eq!(node.position().x, 1.0);
        assert!(!sequence.is_done());
    }
}
