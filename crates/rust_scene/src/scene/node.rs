//! Scene node: spatial and visual state of one tree entity
//!
//! A [`Node`] is stored in the [`SceneGraph`](super::SceneGraph) arena. Its
//! relationship slots (parent, children, components, animator) hold handles
//! only and are maintained by the graph, so they are read-only here.

use bitflags::bitflags;
use slotmap::new_key_type;

use super::transform_cache::{LocalPose, TransformCache};
use super::{AnimatorId, ComponentId};
use crate::foundation::math::{Color, Mat4, Mat4Ext, Point3, Vec2, Vec3};

new_key_type! {
    /// Generational handle to a node in a [`SceneGraph`](super::SceneGraph)
    pub struct NodeId;
}

bitflags! {
    /// Boolean node state that does not affect transforms
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Skip this node (not its children) when building the draw queue
        const HIDDEN = 1 << 0;
        /// Queue this node even when the camera would cull it
        const CULL_DISABLED = 1 << 1;
    }
}

/// A spatial tree entity
#[derive(Debug, Clone)]
pub struct Node {
    name: Option<String>,
    pose: LocalPose,
    cache: TransformCache,
    color: Color,
    opacity: f32,
    flags: NodeFlags,
    order: i32,
    world_order: i32,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) components: Vec<ComponentId>,
    pub(crate) animator: Option<AnimatorId>,
    pub(crate) sequence: u64,
}

impl Node {
    /// Create a detached node at the origin, white and fully opaque
    pub fn new() -> Self {
        Self {
            name: None,
            pose: LocalPose::default(),
            cache: TransformCache::new(),
            color: Color::WHITE,
            opacity: 1.0,
            flags: NodeFlags::empty(),
            order: 0,
            world_order: 0,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
            animator: None,
            sequence: 0,
        }
    }

    /// Optional debug name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the debug name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    // Spatial state. Every setter here invalidates local, world and inverse.

    /// Local position
    pub const fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Set the local position
    pub fn set_position(&mut self, position: Vec3) {
        self.pose.position = position;
        self.cache.invalidate_local();
    }

    /// Set the local x and y, keeping z
    pub fn set_position_2d(&mut self, position: Vec2) {
        self.pose.position.x = position.x;
        self.pose.position.y = position.y;
        self.cache.invalidate_local();
    }

    /// Rotation around Z in radians, positive is clockwise
    pub const fn rotation(&self) -> f32 {
        self.pose.rotation
    }

    /// Set the rotation
    pub fn set_rotation(&mut self, rotation: f32) {
        self.pose.rotation = rotation;
        self.cache.invalidate_local();
    }

    /// Scale along X and Y
    pub const fn scale(&self) -> Vec2 {
        self.pose.scale
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vec2) {
        self.pose.scale = scale;
        self.cache.invalidate_local();
    }

    /// Mirrored along X
    pub const fn flip_x(&self) -> bool {
        self.pose.flip_x
    }

    /// Mirror along X
    pub fn set_flip_x(&mut self, flip_x: bool) {
        self.pose.flip_x = flip_x;
        self.cache.invalidate_local();
    }

    /// Mirrored along Y
    pub const fn flip_y(&self) -> bool {
        self.pose.flip_y
    }

    /// Mirror along Y
    pub fn set_flip_y(&mut self, flip_y: bool) {
        self.pose.flip_y = flip_y;
        self.cache.invalidate_local();
    }

    // Visual state. None of it touches the transform caches.

    /// Base color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Set the base color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Opacity in 0..=1
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the opacity, clamped to 0..=1
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Excluded from the draw queue
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(NodeFlags::HIDDEN)
    }

    /// Hide or show this node. Children are visited either way.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.flags.set(NodeFlags::HIDDEN, hidden);
    }

    /// Queued regardless of camera visibility
    pub fn is_cull_disabled(&self) -> bool {
        self.flags.contains(NodeFlags::CULL_DISABLED)
    }

    /// Enable or disable culling for this node
    pub fn set_cull_disabled(&mut self, cull_disabled: bool) {
        self.flags.set(NodeFlags::CULL_DISABLED, cull_disabled);
    }

    /// Current flag set
    pub const fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Draw-order bias added to the parent's world order
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Set the draw-order bias
    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    /// World order computed by the last visit
    pub const fn world_order(&self) -> i32 {
        self.world_order
    }

    pub(crate) fn set_world_order(&mut self, world_order: i32) {
        self.world_order = world_order;
    }

    /// Color handed to components on draw: alpha scaled by opacity
    pub fn draw_color(&self) -> Color {
        self.color.modulate_alpha(self.opacity)
    }

    /// Color handed to components on wireframe draw: fully opaque
    pub const fn wireframe_color(&self) -> Color {
        self.color.with_alpha(u8::MAX)
    }

    // Relationships (maintained by the graph)

    /// Parent handle, `None` at a root
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in visit order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached components in draw order
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Active animator
    pub const fn animator(&self) -> Option<AnimatorId> {
        self.animator
    }

    // Transforms

    /// Local transform, recomputed if dirty
    pub fn local_transform(&self) -> Mat4 {
        self.cache.local_transform(&self.pose)
    }

    /// World transform, recomputed if dirty
    pub fn transform(&self) -> Mat4 {
        self.cache.transform(&self.pose)
    }

    /// Inverse world transform, `None` while the world transform is singular
    pub fn inverse_transform(&self) -> Option<Mat4> {
        self.cache.inverse_transform(&self.pose)
    }

    /// Parent transform last pushed into this node
    pub const fn parent_transform(&self) -> &Mat4 {
        self.cache.parent_transform()
    }

    /// Whether the world transform is stale
    pub fn is_transform_dirty(&self) -> bool {
        self.cache.is_transform_dirty()
    }

    pub(crate) fn update_parent_transform(&mut self, parent_transform: Mat4) {
        self.cache.set_parent_transform(parent_transform);
    }

    pub(crate) fn children_need_refresh(&self) -> bool {
        self.cache.children_need_refresh()
    }

    pub(crate) fn clear_children_refresh(&self) {
        self.cache.clear_children_refresh();
    }

    /// World position of the local origin
    pub fn world_position(&self) -> Vec3 {
        self.transform().transform_point(&Point3::origin()).coords
    }

    /// Map a local 2D point to world space
    pub fn convert_local_to_world(&self, local: Vec2) -> Vec2 {
        self.transform().transform_point_2d(local)
    }

    /// Map a world 2D point to local space, `None` if the transform is singular
    pub fn convert_world_to_local(&self, world: Vec2) -> Option<Vec2> {
        self.inverse_transform().map(|inverse| inverse.transform_point_2d(world))
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
