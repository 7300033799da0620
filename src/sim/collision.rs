//! Collision detection and response for axis-aligned boxes and circles
//!
//! Boxes are given by centre and half extents; every test is y-up.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the box to the circle centre
    pub point: Vec2,
    /// Surface normal pointing from the box toward the circle centre
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Offset that pushes the circle out of the box
    pub fn push_out(&self) -> Vec2 {
        self.normal * self.penetration
    }
}

/// Circle against an axis-aligned box
///
/// A centre inside the box (distance under 1e-4 to the clamped point) gets
/// an upward normal.
pub fn circle_aabb(center: Vec2, radius: f32, box_center: Vec2, half: Vec2) -> CollisionResult {
    let closest = center.clamp(box_center - half, box_center + half);
    let delta = center - closest;
    let d2 = delta.length_squared();
    if d2 > radius * radius {
        return CollisionResult::miss();
    }

    let d = d2.max(1e-6).sqrt();
    let normal = if d > 1e-4 { delta / d } else { Vec2::Y };
    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: radius - d,
    }
}

/// Two boxes overlap (touching counts)
#[inline]
pub fn aabb_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let d = (a_center - b_center).abs();
    d.x <= a_half.x + b_half.x && d.y <= a_half.y + b_half.y
}

/// Point inside a box (edges count)
#[inline]
pub fn point_in_rect(p: Vec2, center: Vec2, half: Vec2) -> bool {
    let d = (p - center).abs();
    d.x <= half.x && d.y <= half.y
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Normalise, falling back to +x for near-zero vectors
#[inline]
pub fn normalize_or_x(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 1e-6 { v / len } else { Vec2::X }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_above_box() {
        let result = circle_aabb(Vec2::new(0.0, 12.0), 5.0, Vec2::ZERO, Vec2::new(20.0, 8.0));
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        assert!((result.penetration - 1.0).abs() < 1e-5);
        assert_eq!(result.push_out(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_circle_corner_normal_is_diagonal() {
        let result = circle_aabb(Vec2::new(13.0, 13.0), 5.0, Vec2::ZERO, Vec2::splat(10.0));
        assert!(result.hit);
        let expected = Vec2::splat(std::f32::consts::FRAC_1_SQRT_2);
        assert!(result.normal.distance(expected) < 1e-5);
    }

    #[test]
    fn test_circle_miss() {
        let result = circle_aabb(Vec2::new(0.0, 30.0), 5.0, Vec2::ZERO, Vec2::splat(10.0));
        assert!(!result.hit);
    }

    #[test]
    fn test_centre_inside_box_pushes_up() {
        let result = circle_aabb(Vec2::new(1.0, 1.0), 5.0, Vec2::ZERO, Vec2::splat(10.0));
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_overlap_and_point_tests() {
        assert!(aabb_overlap(Vec2::ZERO, Vec2::splat(5.0), Vec2::new(10.0, 0.0), Vec2::splat(5.0)));
        assert!(!aabb_overlap(Vec2::ZERO, Vec2::splat(5.0), Vec2::new(11.0, 0.0), Vec2::splat(5.0)));
        assert!(point_in_rect(Vec2::new(5.0, -5.0), Vec2::ZERO, Vec2::splat(5.0)));
        assert!(!point_in_rect(Vec2::new(5.1, 0.0), Vec2::ZERO, Vec2::splat(5.0)));
        assert_eq!(normalize_or_x(Vec2::ZERO), Vec2::X);
    }
}
