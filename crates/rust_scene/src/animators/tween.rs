//! Elapsed-time bookkeeping shared by the tweening animators

/// Linear progress over a fixed duration
///
/// A tween does nothing until started. Stopping freezes it at its current
/// progress without marking it done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    duration: f32,
    elapsed: f32,
    running: bool,
    done: bool,
}

impl Tween {
    /// Tween lasting `duration` seconds; non-positive durations finish on the first advance
    pub const fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            running: false,
            done: false,
        }
    }

    /// Total duration in seconds
    pub const fn duration(&self) -> f32 {
        self.duration
    }

    /// Rewind and begin running
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
        self.done = false;
    }

    /// Freeze at the current progress
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the tween is advancing
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the end was reached
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Progress in `0..=1`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            if self.done { 1.0 } else { 0.0 }
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Advance by `delta` seconds and return the new progress
    ///
    /// Returns `None` while the tween is not running.
    pub fn advance(&mut self, delta: f32) -> Option<f32> {
        if !self.running {
            return None;
        }
        self.elapsed += delta.max(0.0);
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.done = true;
            self.running = false;
        }
        Some(self.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_idle_until_started() {
        let mut tween = Tween::new(1.0);
        assert_eq!(tween.advance(0.5), None);

        tween.start();
        assert_relative_eq!(tween.advance(0.25).unwrap(), 0.25);
        assert!(!tween.is_done());
    }

    #[test]
    fn test_finishes_and_clamps() {
        let mut tween = Tween::new(1.0);
        tween.start();
        tween.advance(0.75);
        assert_relative_eq!(tween.advance(0.75).unwrap(), 1.0);
        assert!(tween.is_done());
        assert_eq!(tween.advance(0.1), None);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_advance() {
        let mut tween = Tween::new(0.0);
        tween.start();
        assert_relative_eq!(tween.progress(), 0.0);
        assert_relative_eq!(tween.advance(0.0).unwrap(), 1.0);
        assert!(tween.is_done());
    }

    #[test]
    fn test_stop_freezes() {
        let mut tween = Tween::new(2.0);
        tween.start();
        tween.advance(1.0);
        tween.stop();

        assert_eq!(tween.advance(1.0), None);
        assert_relative_eq!(tween.progress(), 0.5);
        assert!(!tween.is_done());

        tween.start();
        assert_relative_eq!(tween.progress(), 0.0);
    }
}
