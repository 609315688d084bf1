//! Point and size math in normalized space
//!
//! The field is the unit square [0,1]×[0,1]. Angles are radians, counter-clockwise
//! positive in math axes (clockwise on screen, since y grows downward).

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Rotate `point` about `pivot` by `angle` radians
#[inline]
pub fn rotate_around(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    pivot + Vec2::from_angle(angle).rotate(point - pivot)
}

/// Scale a point (or a width/height pair) by independent factors
#[inline]
pub fn scale(v: Vec2, x_scale: f32, y_scale: f32) -> Vec2 {
    Vec2::new(v.x * x_scale, v.y * y_scale)
}

/// Perpendicular distance from `point` to the infinite line through `a` and `b`
///
/// Falls back to the distance to `a` when the two line points coincide.
pub fn point_line_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    let len = d.length();
    if len <= f32::EPSILON {
        return distance(point, a);
    }
    d.perp_dot(point - a).abs() / len
}

/// Clamp a circle's center so the whole circle stays inside the unit square
#[inline]
pub fn keep_in_unit_square(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.min(1.0 - radius).max(radius),
        pos.y.min(1.0 - radius).max(radius),
    )
}

/// True if the two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}
