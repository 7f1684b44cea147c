//! Filled convex polygon component

use super::geometry::{convex_contains_point, convex_polygons_overlap};
use crate::foundation::math::{Color, Mat4, Vec2};
use crate::scene::{Aabb2, Camera, CommandBuffer, Component, DrawCommand, Primitive};

/// Convex polygon drawn in the node's color
///
/// Vertices are in the node's local space. Hit tests assume the polygon is
/// convex.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRenderer {
    vertices: Vec<Vec2>,
    bounds: Aabb2,
    tint: Color,
    hidden: bool,
}

impl ShapeRenderer {
    /// Polygon from its vertices in winding order
    pub fn new(vertices: Vec<Vec2>) -> Self {
        let bounds = Aabb2::from_points(&vertices);
        Self {
            vertices,
            bounds,
            tint: Color::WHITE,
            hidden: false,
        }
    }

    /// Axis-aligned rectangle of `size` centered on the local origin
    pub fn rectangle(size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(vec![
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ])
    }

    /// Regular polygon with `sides` corners on a circle of `radius`
    pub fn regular(sides: usize, radius: f32) -> Self {
        let sides = sides.max(3);
        #[allow(clippy::cast_precision_loss)]
        let step = std::f32::consts::TAU / sides as f32;
        #[allow(clippy::cast_precision_loss)]
        let vertices = (0..sides)
            .map(|i| {
                let angle = step * i as f32;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(vertices)
    }

    /// Multiply the node color by a per-shape tint
    #[must_use]
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Polygon vertices in local space
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Per-shape tint
    pub const fn tint(&self) -> Color {
        self.tint
    }

    #[allow(clippy::cast_possible_truncation)]
    fn tinted(&self, color: Color) -> Color {
        let channel = |a: u8, b: u8| ((u16::from(a) * u16::from(b) + 127) / 255) as u8;
        Color::new(
            channel(color.r, self.tint.r),
            channel(color.g, self.tint.g),
            channel(color.b, self.tint.b),
            channel(color.a, self.tint.a),
        )
    }

    fn command(&self, transform: &Mat4, color: Color, primitive: Primitive) -> DrawCommand {
        DrawCommand {
            transform: *transform,
            vertices: self.vertices.clone(),
            color,
            primitive,
        }
    }
}

impl Component for ShapeRenderer {
    fn draw(&self, transform: &Mat4, color: Color, _camera: &dyn Camera, commands: &mut CommandBuffer) {
        if self.vertices.len() < 3 {
            return;
        }
        commands.push(self.command(transform, self.tinted(color), Primitive::Fill));
    }

    fn draw_wireframe(&self, transform: &Mat4, color: Color, _camera: &dyn Camera, commands: &mut CommandBuffer) {
        if self.vertices.len() < 2 {
            return;
        }
        commands.push(self.command(transform, color, Primitive::Wireframe));
    }

    fn point_contains(&self, local_point: Vec2) -> bool {
        self.bounds.contains_point(local_point) && convex_contains_point(&self.vertices, local_point)
    }

    fn shape_overlaps(&self, local_edges: &[Vec2]) -> bool {
        self.bounds.intersects(&Aabb2::from_points(local_edges))
            && convex_polygons_overlap(&self.vertices, local_edges)
    }

    fn bounding_box(&self) -> Aabb2 {
        self.bounds
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
