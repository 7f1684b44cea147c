//! Stock animator implementations
//!
//! Each tweens one node attribute linearly over a duration in seconds.
//! [`Sequence`] chains animators back to back.

mod fade;
mod movement;
mod rotate;
mod scale;
mod sequence;
mod tween;

pub use fade::Fade;
pub use movement::Move;
pub use rotate::Rotate;
pub use scale::Scale;
pub use sequence::Sequence;
pub use tween::Tween;
