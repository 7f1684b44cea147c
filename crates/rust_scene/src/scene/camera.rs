//! Camera collaborator: view transform and visibility test
//!
//! The scene graph only asks a camera whether a node's bounds are on screen.
//! [`OrthoCamera`] is the stock 2D implementation.

use super::Aabb2;
use crate::foundation::math::{Mat4, Vec2, Vec3};

/// Visibility oracle and view transform used by the visit and draw passes
pub trait Camera {
    /// Combined view and projection transform
    fn view_projection(&self) -> Mat4;

    /// Whether `bounds`, in the local space of `transform`, is visible
    fn check_visibility(&self, transform: &Mat4, bounds: &Aabb2) -> bool;
}

/// 2D orthographic camera
///
/// `viewport` is the visible size in world units at zoom 1. Zooming in
/// shrinks the visible rectangle around `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthoCamera {
    /// Center of the view in world space
    pub position: Vec2,
    /// Visible width and height at zoom 1
    pub viewport: Vec2,
    /// Magnification, must be positive
    pub zoom: f32,
}

impl OrthoCamera {
    /// Create a camera centered at the origin
    pub fn new(viewport: Vec2) -> Self {
        Self {
            position: Vec2::zeros(),
            viewport,
            zoom: 1.0,
        }
    }

    /// Move the view center
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Set the zoom; non-positive values are ignored
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom > 0.0 {
            self.zoom = zoom;
        } else {
            log::warn!("Ignoring non-positive camera zoom {}", zoom);
        }
    }

    /// World-space rectangle currently on screen
    pub fn visible_rect(&self) -> Aabb2 {
        let half = self.viewport / (2.0 * self.zoom);
        Aabb2::new(self.position - half, self.position + half)
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::new_scaling(self.zoom) * Mat4::new_translation(&Vec3::new(-self.position.x, -self.position.y, 0.0))
    }

    /// View to clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        let half = self.viewport / 2.0;
        Mat4::new_orthographic(-half.x, half.x, -half.y, half.y, -1.0, 1.0)
    }
}

impl Camera for OrthoCamera {
    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn check_visibility(&self, transform: &Mat4, bounds: &Aabb2) -> bool {
        bounds.transformed(transform).intersects(&self.visible_rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb2 {
        Aabb2::new(Vec2::new(-0.5, -0.5), Vec2::new(0.5, 0.5))
    }

    #[test]
    fn test_visibility_against_viewport() {
        let camera = OrthoCamera::new(Vec2::new(100.0, 50.0));

        assert!(camera.check_visibility(&Mat4::identity(), &unit_box()));

        let far = Mat4::new_translation(&Vec3::new(60.0, 0.0, 0.0));
        assert!(!camera.check_visibility(&far, &unit_box()));

        let edge = Mat4::new_translation(&Vec3::new(50.4, 0.0, 0.0));
        assert!(camera.check_visibility(&edge, &unit_box()));
    }

    #[test]
    fn test_zoom_shrinks_visible_rect() {
        let mut camera = OrthoCamera::new(Vec2::new(100.0, 100.0));
        let at = Mat4::new_translation(&Vec3::new(40.0, 0.0, 0.0));
        assert!(camera.check_visibility(&at, &unit_box()));

        camera.set_zoom(2.0);
        assert!(!camera.check_visibility(&at, &unit_box()));

        camera.set_zoom(-1.0);
        assert_relative_eq!(camera.zoom, 2.0);
    }

    #[test]
    fn test_view_projection_maps_visible_corner_to_ndc() {
        let mut camera = OrthoCamera::new(Vec2::new(200.0, 100.0));
        camera.set_position(Vec2::new(10.0, 10.0));
        let corner = camera.visible_rect().max;

        let ndc = camera.view_projection().transform_point_2d(corner);
        assert_relative_eq!(ndc, Vec2::new(1.0, 1.0), epsilon = 1e-5);
    }
}
