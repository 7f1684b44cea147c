//! Anchored quad component

use crate::foundation::math::{Color, Mat4, Vec2};
use crate::scene::{Aabb2, Camera, CommandBuffer, Component, DrawCommand, Primitive};

/// Axis-aligned quad of a given size placed relative to an anchor
///
/// The anchor is normalized: `(0, 0)` puts the node origin at the quad's
/// minimum corner, `(0.5, 0.5)` centers it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRenderer {
    size: Vec2,
    anchor: Vec2,
    hidden: bool,
}

impl SpriteRenderer {
    /// Centered quad of `size`
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            anchor: Vec2::new(0.5, 0.5),
            hidden: false,
        }
    }

    /// Same sprite with a different anchor
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Quad size in local units
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Resize the quad
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Normalized anchor
    pub const fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Move the anchor
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
    }

    fn rect(&self) -> Aabb2 {
        let min = -self.size.component_mul(&self.anchor);
        Aabb2::new(min, min + self.size)
    }
}

impl Component for SpriteRenderer {
    fn draw(&self, transform: &Mat4, color: Color, _camera: &dyn Camera, commands: &mut CommandBuffer) {
        let rect = self.rect();
        if rect.is_empty() {
            return;
        }
        commands.push(DrawCommand {
            transform: *transform,
            vertices: rect.corners().to_vec(),
            color,
            primitive: Primitive::Fill,
        });
    }

    fn bounding_box(&self) -> Aabb2 {
        self.rect()
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::OrthoCamera;
    use approx::assert_relative_eq;

    #[test]
    fn test_anchor_places_quad() {
        let sprite = SpriteRenderer::new(Vec2::new(4.0, 2.0));
        assert_relative_eq!(sprite.bounding_box().min, Vec2::new(-2.0, -1.0));

        let sprite = sprite.with_anchor(Vec2::zeros());
        assert_relative_eq!(sprite.bounding_box().min, Vec2::zeros());
        assert_relative_eq!(sprite.bounding_box().max, Vec2::new(4.0, 2.0));
    }

    #[test]
    fn test_default_hit_tests_use_quad() {
        let sprite = SpriteRenderer::new(Vec2::new(2.0, 2.0)).with_anchor(Vec2::new(1.0, 1.0));
        assert!(sprite.point_contains(Vec2::new(-1.0, -1.0)));
        assert!(!sprite.point_contains(Vec2::new(0.5, 0.5)));
        assert!(sprite.shape_overlaps(&[Vec2::new(-0.5, -0.5), Vec2::new(3.0, 3.0)]));
    }

    #[test]
    fn test_draw_and_wireframe() {
        let sprite = SpriteRenderer::new(Vec2::new(1.0, 1.0));
        let camera = OrthoCamera::new(Vec2::new(10.0, 10.0));
        let mut commands = CommandBuffer::new();

        sprite.draw(&Mat4::identity(), Color::WHITE, &camera, &mut commands);
        sprite.draw_wireframe(&Mat4::identity(), Color::BLACK, &camera, &mut commands);

        let primitives: Vec<Primitive> = commands.commands().iter().map(|command| command.primitive).collect();
        assert_eq!(primitives, vec![Primitive::Fill, Primitive::Wireframe]);
        assert_eq!(commands.commands()[1].color, Color::BLACK);
    }

    #[test]
    fn test_zero_size_draws_nothing() {
        let sprite = SpriteRenderer::new(Vec2::zeros());
        let camera = OrthoCamera::new(Vec2::new(10.0, 10.0));
        let mut commands = CommandBuffer::new();
        sprite.draw(&Mat4::identity(), Color::WHITE, &camera, &mut commands);
        // a zero-size rect is a single point, not empty
        assert_eq!(commands.len(), 1);
    }
}
