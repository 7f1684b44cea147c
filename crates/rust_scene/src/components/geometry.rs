//! Convex polygon tests shared by the stock components

use crate::foundation::math::Vec2;

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Whether `point` lies inside or on a convex polygon of either winding
pub fn convex_contains_point(polygon: &[Vec2], point: Vec2) -> bool {
    match polygon.len() {
        0 => false,
        1 => polygon[0] == point,
        2 => on_segment(polygon[0], polygon[1], point),
        count => {
            let mut sign = 0.0_f32;
            for i in 0..count {
                let a = polygon[i];
                let b = polygon[(i + 1) % count];
                let side = cross(b - a, point - a);
                if side == 0.0 {
                    continue;
                }
                if sign == 0.0 {
                    sign = side.signum();
                } else if side.signum() != sign {
                    return false;
                }
            }
            true
        }
    }
}

fn on_segment(start: Vec2, end: Vec2, point: Vec2) -> bool {
    let direction = end - start;
    let length_squared = direction.norm_squared();
    if length_squared == 0.0 {
        return start == point;
    }
    let offset = point - start;
    if cross(direction, offset).abs() > f32::EPSILON * length_squared.max(1.0) {
        return false;
    }
    let t = offset.dot(&direction) / length_squared;
    (0.0..=1.0).contains(&t)
}

fn project(polygon: &[Vec2], axis: Vec2) -> (f32, f32) {
    polygon.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), point| {
        let distance = point.dot(&axis);
        (min.min(distance), max.max(distance))
    })
}

fn has_separating_axis(edges_of: &[Vec2], a: &[Vec2], b: &[Vec2]) -> bool {
    let count = edges_of.len();
    (0..count).any(|i| {
        let edge = edges_of[(i + 1) % count] - edges_of[i];
        let axis = Vec2::new(-edge.y, edge.x);
        if axis == Vec2::zeros() {
            return false;
        }
        let (min_a, max_a) = project(a, axis);
        let (min_b, max_b) = project(b, axis);
        max_a < min_b || max_b < min_a
    })
}

/// Separating-axis overlap test between two convex polygons
///
/// Touching polygons overlap. Either input may be a single point or a
/// segment.
pub fn convex_polygons_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.len() == 1 {
        return convex_contains_point(b, a[0]);
    }
    if b.len() == 1 {
        return convex_contains_point(a, b[0]);
    }
    !has_separating_axis(a, a, b) && !has_separating_axis(b, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ]
    }

    #[test]
    fn test_contains_point_either_winding() {
        let ccw = square(0.0, 2.0);
        let cw: Vec<Vec2> = ccw.iter().rev().copied().collect();

        for polygon in [&ccw, &cw] {
            assert!(convex_contains_point(polygon, Vec2::new(1.0, 1.0)));
            assert!(convex_contains_point(polygon, Vec2::new(2.0, 1.0)));
            assert!(!convex_contains_point(polygon, Vec2::new(2.5, 1.0)));
        }
        assert!(!convex_contains_point(&[], Vec2::zeros()));
    }

    #[test]
    fn test_segment_contains_only_its_own_points() {
        let segment = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        assert!(convex_contains_point(&segment, Vec2::new(1.0, 0.0)));
        assert!(convex_contains_point(&segment, Vec2::new(2.0, 0.0)));
        assert!(!convex_contains_point(&segment, Vec2::new(5.0, 0.0)));
        assert!(!convex_contains_point(&segment, Vec2::new(-1.0, 0.0)));
        assert!(!convex_contains_point(&segment, Vec2::new(1.0, 0.5)));

        assert!(!convex_polygons_overlap(&segment, &[Vec2::new(10.0, 0.0)]));
        assert!(convex_polygons_overlap(&[Vec2::new(0.5, 0.0)], &segment));
    }

    #[test]
    fn test_overlap() {
        let a = square(0.0, 2.0);
        assert!(convex_polygons_overlap(&a, &square(1.0, 3.0)));
        assert!(convex_polygons_overlap(&a, &square(2.0, 3.0)));
        assert!(!convex_polygons_overlap(&a, &square(2.5, 3.0)));
        assert!(convex_polygons_overlap(&a, &square(0.5, 1.5)));
    }

    #[test]
    fn test_diagonal_separation() {
        let triangle = vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)];
        let near_corner = square(1.2, 2.0);
        assert!(!convex_polygons_overlap(&triangle, &near_corner));
    }

    #[test]
    fn test_point_and_segment_inputs() {
        let a = square(0.0, 2.0);
        assert!(convex_polygons_overlap(&a, &[Vec2::new(1.0, 1.0)]));
        assert!(!convex_polygons_overlap(&[Vec2::new(5.0, 5.0)], &a));

        let crossing = [Vec2::new(-1.0, 1.0), Vec2::new(3.0, 1.0)];
        assert!(convex_polygons_overlap(&a, &crossing));
        let outside = [Vec2::new(-1.0, 3.0), Vec2::new(3.0, 3.0)];
        assert!(!convex_polygons_overlap(&a, &outside));
        assert!(!convex_polygons_overlap(&a, &[]));
    }
}
