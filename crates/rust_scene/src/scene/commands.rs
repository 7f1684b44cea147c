//! Draw commands emitted by components
//!
//! The scene graph decides what to draw and in which order. Components turn
//! that decision into [`DrawCommand`]s; submitting them to a GPU is left to
//! the renderer that consumes the [`CommandBuffer`].

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Color, Mat4, Mat4Ext, Vec2};

/// How a command's vertices are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Filled convex polygon (triangle fan)
    Fill,
    /// Closed outline (line loop)
    Wireframe,
}

/// One convex polygon to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Model-to-world transform of the owning node
    pub transform: Mat4,
    /// Polygon vertices in the node's local space
    pub vertices: Vec<Vec2>,
    /// Effective color after opacity
    pub color: Color,
    /// Fill or outline
    pub primitive: Primitive,
}

impl DrawCommand {
    /// Append this command as world-space triangles (fill) or line segments (wireframe)
    pub fn append_vertices(&self, out: &mut Vec<Vertex>) {
        let world: Vec<Vec2> = self
            .vertices
            .iter()
            .map(|vertex| self.transform.transform_point_2d(*vertex))
            .collect();
        let vertex = |point: Vec2| Vertex {
            position: [point.x, point.y],
            color: self.color,
        };

        match self.primitive {
            Primitive::Fill => {
                for i in 1..world.len().saturating_sub(1) {
                    out.extend([vertex(world[0]), vertex(world[i]), vertex(world[i + 1])]);
                }
            }
            Primitive::Wireframe => {
                if world.len() < 2 {
                    return;
                }
                for (i, point) in world.iter().enumerate() {
                    let next = world[(i + 1) % world.len()];
                    out.extend([vertex(*point), vertex(next)]);
                }
            }
        }
    }
}

/// GPU-ready vertex record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// World-space position
    pub position: [f32; 2],
    /// RGBA8 color
    pub color: Color,
}

/// Commands recorded during one draw pass
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Record a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Recorded commands in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Remove every command, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Flatten fill commands into triangles and wireframe commands into lines
    pub fn vertices(&self) -> (Vec<Vertex>, Vec<Vertex>) {
        let mut triangles = Vec::new();
        let mut lines = Vec::new();
        for command in &self.commands {
            match command.primitive {
                Primitive::Fill => command.append_vertices(&mut triangles),
                Primitive::Wireframe => command.append_vertices(&mut lines),
            }
        }
        (triangles, lines)
    }

    /// Raw bytes of a vertex slice, ready for a buffer upload
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn square(primitive: Primitive) -> DrawCommand {
        DrawCommand {
            transform: Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0)),
            vertices: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            color: Color::WHITE,
            primitive,
        }
    }

    #[test]
    fn test_fill_triangulates_fan() {
        let mut out = Vec::new();
        square(Primitive::Fill).append_vertices(&mut out);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].position, [10.0, 0.0]);
        assert_eq!(out[5].position, [10.0, 1.0]);
    }

    #[test]
    fn test_wireframe_closes_loop() {
        let mut out = Vec::new();
        square(Primitive::Wireframe).append_vertices(&mut out);
        assert_eq!(out.len(), 8);
        assert_eq!(out[7].position, [10.0, 0.0]);
    }

    #[test]
    fn test_buffer_splits_and_uploads() {
        let mut buffer = CommandBuffer::new();
        buffer.push(square(Primitive::Fill));
        buffer.push(square(Primitive::Wireframe));

        let (triangles, lines) = buffer.vertices();
        assert_eq!(triangles.len(), 6);
        assert_eq!(lines.len(), 8);
        assert_eq!(CommandBuffer::as_bytes(&triangles).len(), 6 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
    }
}
