//! Stock component implementations
//!
//! - [`ShapeRenderer`]: filled convex polygon
//! - [`SpriteRenderer`]: anchored quad standing in for a textured sprite

mod geometry;
mod shape;
mod sprite;

pub use geometry::{convex_contains_point, convex_polygons_overlap};
pub use shape::ShapeRenderer;
pub use sprite::SpriteRenderer;
