//! Component capability: drawing and hit testing attached to a node
//!
//! Components live in the graph's component arena, not inside the node. A
//! node lists the handles of its components and each component entry keeps a
//! back-reference to the node it is attached to.

use std::fmt;

use slotmap::new_key_type;

use super::{Aabb2, Camera, CommandBuffer, DrawCommand, Primitive};
use crate::foundation::math::{Color, Mat4, Vec2};

new_key_type! {
    /// Generational handle to a component in a [`SceneGraph`](super::SceneGraph)
    pub struct ComponentId;
}

/// Drawable, hit-testable attachment of a node
///
/// Points and polygons passed to the hit tests are already in the node's
/// local space.
pub trait Component: fmt::Debug {
    /// Record draw commands for this component
    fn draw(&self, transform: &Mat4, color: Color, camera: &dyn Camera, commands: &mut CommandBuffer);

    /// Record outline commands; defaults to the bounding box outline
    fn draw_wireframe(&self, transform: &Mat4, color: Color, _camera: &dyn Camera, commands: &mut CommandBuffer) {
        let bounds = self.bounding_box();
        if bounds.is_empty() {
            return;
        }
        commands.push(DrawCommand {
            transform: *transform,
            vertices: bounds.corners().to_vec(),
            color,
            primitive: Primitive::Wireframe,
        });
    }

    /// Local-space point containment; defaults to the bounding box
    fn point_contains(&self, local_point: Vec2) -> bool {
        self.bounding_box().contains_point(local_point)
    }

    /// Local-space polygon overlap; defaults to a bounding box test
    fn shape_overlaps(&self, local_edges: &[Vec2]) -> bool {
        self.bounding_box().intersects(&Aabb2::from_points(local_edges))
    }

    /// Local-space bounds used for culling
    fn bounding_box(&self) -> Aabb2;

    /// Hidden components are skipped by drawing and by the node's bounding box
    fn is_hidden(&self) -> bool;

    /// Hide or show this component
    fn set_hidden(&mut self, hidden: bool);
}
