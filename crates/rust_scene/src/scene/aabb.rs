//! Axis-aligned bounding box in a node's local 2D space

use crate::foundation::math::{Mat4, Mat4Ext, Vec2};

/// Axis-Aligned Bounding Box for culling
///
/// A box with `min > max` on either axis is empty. [`Aabb2::empty`] is the
/// identity for [`Aabb2::merge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box
    pub min: Vec2,
    /// Maximum corner of the bounding box
    pub max: Vec2,
}

impl Aabb2 {
    /// Create a new AABB from min and max points
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// An empty box that contains nothing
    pub fn empty() -> Self {
        Self {
            min: Vec2::new(f32::INFINITY, f32::INFINITY),
            max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point, empty for no points
    pub fn from_points(points: &[Vec2]) -> Self {
        points.iter().fold(Self::empty(), |mut aabb, point| {
            aabb.insert_point(*point);
            aabb
        })
    }

    /// True when the box contains no points
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Grow the box to include a point
    pub fn insert_point(&mut self, point: Vec2) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Grow the box to include another box. Merging an empty box is a no-op.
    pub fn merge(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Width and height, zero for an empty box
    pub fn size(&self) -> Vec2 {
        if self.is_empty() {
            Vec2::zeros()
        } else {
            self.max - self.min
        }
    }

    /// The four corners, counter-clockwise from `min`
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Check if this AABB contains a point (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() &&
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y
    }

    /// World-space box enclosing this box after `transform`
    pub fn transformed(&self, transform: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        let corners = self.corners().map(|corner| transform.transform_point_2d(corner));
        Self::from_points(&corners)
    }
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::empty()
    }
}
