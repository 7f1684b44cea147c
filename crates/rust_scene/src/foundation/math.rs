//! Math utilities and types
//!
//! Provides the vector, matrix and color types shared by the scene graph.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Build the local transform of a scene node.
///
/// `translate(position) * rotate_z(-rotation) * scale(sx, sy, 1)`, where a flip
/// negates the matching scale axis. Positive rotation turns clockwise.
pub fn local_transform(position: Vec3, rotation: f32, scale: Vec2, flip_x: bool, flip_y: bool) -> Mat4 {
    let real_scale = Vec3::new(
        scale.x * if flip_x { -1.0 } else { 1.0 },
        scale.y * if flip_y { -1.0 } else { 1.0 },
        1.0,
    );

    let mut matrix = Mat4::new_translation(&position);
    if rotation != 0.0 {
        matrix *= Mat4::rotation_z(-rotation);
    }
    matrix * Mat4::new_nonuniform_scaling(&real_scale)
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Transform a 2D point (z = 0, w = 1) and drop the resulting z
    fn transform_point_2d(&self, point: Vec2) -> Vec2;
}

impl Mat4Ext for Mat4 {
    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn transform_point_2d(&self, point: Vec2) -> Vec2 {
        let transformed = self.transform_point(&Point3::new(point.x, point.y, 0.0));
        Vec2::new(transformed.x, transformed.y)
    }
}

/// 8-bit RGBA color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Opaque black
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha channel
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Multiply alpha by `opacity` (clamped to 0..1), rounded to the channel range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn modulate_alpha(self, opacity: f32) -> Self {
        let alpha = (f32::from(self.a) * opacity.clamp(0.0, 1.0)).round();
        self.with_alpha(alpha.clamp(0.0, 255.0) as u8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}
