//! Lazily computed node transforms
//!
//! Each cached matrix carries its own [`CacheState`]. Reads recompute a dirty
//! value in place, so the cache is read through `&self` and a stale matrix is
//! never observable.
//!
//! Invalidation is shallow: recomputing the world transform only raises the
//! "children need refresh" flag. The visit pass is what pushes the new matrix
//! into each child.

use std::cell::Cell;

use crate::foundation::math::{local_transform, Mat4, Vec2, Vec3};

/// Freshness of a cached value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// The value matches its inputs
    Clean,
    /// The value must be recomputed before the next read
    Dirty,
}

#[derive(Debug, Clone)]
struct Cached<T: Copy> {
    value: Cell<T>,
    state: Cell<CacheState>,
}

impl<T: Copy> Cached<T> {
    fn dirty(value: T) -> Self {
        Self {
            value: Cell::new(value),
            state: Cell::new(CacheState::Dirty),
        }
    }

    fn invalidate(&self) {
        self.state.set(CacheState::Dirty);
    }

    fn is_dirty(&self) -> bool {
        self.state.get() == CacheState::Dirty
    }

    fn store(&self, value: T) -> T {
        self.value.set(value);
        self.state.set(CacheState::Clean);
        value
    }
}

/// Inputs of a node's local transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPose {
    /// Translation; z is carried through for layering
    pub position: Vec3,
    /// Rotation around Z in radians, positive is clockwise
    pub rotation: f32,
    /// Scale along X and Y
    pub scale: Vec2,
    /// Mirror along X
    pub flip_x: bool,
    /// Mirror along Y
    pub flip_y: bool,
}

impl LocalPose {
    /// Compose the local matrix
    pub fn to_matrix(&self) -> Mat4 {
        local_transform(self.position, self.rotation, self.scale, self.flip_x, self.flip_y)
    }
}

impl Default for LocalPose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            flip_x: false,
            flip_y: false,
        }
    }
}

/// Local, world and inverse transforms of one node
#[derive(Debug, Clone)]
pub struct TransformCache {
    local: Cached<Mat4>,
    world: Cached<Mat4>,
    inverse: Cached<Option<Mat4>>,
    parent_transform: Mat4,
    update_children: Cell<bool>,
}

impl TransformCache {
    /// A cache with identity parent and every value dirty
    pub fn new() -> Self {
        Self {
            local: Cached::dirty(Mat4::identity()),
            world: Cached::dirty(Mat4::identity()),
            inverse: Cached::dirty(Some(Mat4::identity())),
            parent_transform: Mat4::identity(),
            update_children: Cell::new(false),
        }
    }

    /// The pose changed: local, world and inverse are all stale
    pub fn invalidate_local(&mut self) {
        self.local.invalidate();
        self.world.invalidate();
        self.inverse.invalidate();
    }

    /// Store a new parent transform; world and inverse become stale
    pub fn set_parent_transform(&mut self, parent_transform: Mat4) {
        self.parent_transform = parent_transform;
        self.world.invalidate();
        self.inverse.invalidate();
    }

    /// Last parent transform pushed into this cache
    pub const fn parent_transform(&self) -> &Mat4 {
        &self.parent_transform
    }

    /// Whether the world transform will be recomputed on next read
    pub fn is_transform_dirty(&self) -> bool {
        self.world.is_dirty()
    }

    /// Whether the local transform will be recomputed on next read
    pub fn is_local_dirty(&self) -> bool {
        self.local.is_dirty()
    }

    /// Whether the inverse transform will be recomputed on next read
    pub fn is_inverse_dirty(&self) -> bool {
        self.inverse.is_dirty()
    }

    /// Local transform, recomputed from `pose` if dirty
    pub fn local_transform(&self, pose: &LocalPose) -> Mat4 {
        if self.local.is_dirty() {
            return self.local.store(pose.to_matrix());
        }
        self.local.value.get()
    }

    /// World transform (`parent * local`), recomputed if dirty
    ///
    /// A recomputation raises the children-refresh flag.
    pub fn transform(&self, pose: &LocalPose) -> Mat4 {
        if self.world.is_dirty() {
            let world = self.parent_transform * self.local_transform(pose);
            self.update_children.set(true);
            return self.world.store(world);
        }
        self.world.value.get()
    }

    /// Inverse of the world transform, `None` while it is singular
    pub fn inverse_transform(&self, pose: &LocalPose) -> Option<Mat4> {
        if self.inverse.is_dirty() {
            let inverse = self.transform(pose).try_inverse();
            if inverse.is_none() {
                log::debug!("World transform is singular, node has no inverse transform");
            }
            return self.inverse.store(inverse);
        }
        self.inverse.value.get()
    }

    /// Whether children must take this node's world transform on their next visit
    pub fn children_need_refresh(&self) -> bool {
        self.update_children.get()
    }

    /// Reset the children-refresh flag after the children were visited
    pub fn clear_children_refresh(&self) {
        self.update_children.set(false);
    }
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pose_at(x: f32, y: f32) -> LocalPose {
        LocalPose {
            position: Vec3::new(x, y, 0.0),
            ..LocalPose::default()
        }
    }

    #[test]
    fn test_new_cache_is_dirty() {
        let cache = TransformCache::new();
        assert!(cache.is_local_dirty());
        assert!(cache.is_transform_dirty());
        assert!(cache.is_inverse_dirty());
        assert!(!cache.children_need_refresh());
    }

    #[test]
    fn test_transform_read_cleans_and_flags_children() {
        let cache = TransformCache::new();
        let pose = pose_at(3.0, 4.0);

        let world = cache.transform(&pose);
        assert_relative_eq!(world, Mat4::new_translation(&Vec3::new(3.0, 4.0, 0.0)));
        assert!(!cache.is_transform_dirty());
        assert!(!cache.is_local_dirty());
        assert!(cache.is_inverse_dirty());
        assert!(cache.children_need_refresh());

        cache.clear_children_refresh();
        cache.transform(&pose);
        assert!(!cache.children_need_refresh(), "clean read must not raise the flag");
    }

    #[test]
    fn test_invalidate_local_marks_all_dirty() {
        let mut cache = TransformCache::new();
        let pose = pose_at(1.0, 1.0);
        cache.inverse_transform(&pose);

        cache.invalidate_local();
        assert!(cache.is_local_dirty());
        assert!(cache.is_transform_dirty());
        assert!(cache.is_inverse_dirty());

        let moved = pose_at(2.0, 0.0);
        assert_relative_eq!(cache.transform(&moved), Mat4::new_translation(&Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_parent_transform_keeps_local_clean() {
        let mut cache = TransformCache::new();
        let pose = pose_at(1.0, 0.0);
        cache.transform(&pose);

        cache.set_parent_transform(Mat4::new_translation(&Vec3::new(0.0, 5.0, 0.0)));
        assert!(!cache.is_local_dirty());
        assert!(cache.is_transform_dirty());
        assert_relative_eq!(cache.transform(&pose), Mat4::new_translation(&Vec3::new(1.0, 5.0, 0.0)));
    }

    #[test]
    fn test_inverse_refreshes_world_first() {
        let cache = TransformCache::new();
        let pose = LocalPose {
            position: Vec3::new(2.0, -1.0, 0.0),
            rotation: 0.3,
            scale: Vec2::new(2.0, 0.5),
            ..LocalPose::default()
        };

        let inverse = cache.inverse_transform(&pose).unwrap();
        assert!(!cache.is_transform_dirty());
        assert_relative_eq!(inverse * cache.transform(&pose), Mat4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_singular_transform_has_no_inverse() {
        let cache = TransformCache::new();
        let pose = LocalPose {
            scale: Vec2::new(0.0, 1.0),
            ..LocalPose::default()
        };

        assert!(cache.inverse_transform(&pose).is_none());
        assert!(!cache.is_inverse_dirty());
    }
}
