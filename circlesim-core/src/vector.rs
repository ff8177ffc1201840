//! 2D vector helpers
//!
//! `Vector2` is `glam::Vec2`. The free functions below give the collision
//! code the same small vocabulary the physics formulas are written in.

pub use glam::Vec2 as Vector2;

#[inline]
pub fn add(a: Vector2, b: Vector2) -> Vector2 {
    a + b
}

#[inline]
pub fn sub(a: Vector2, b: Vector2) -> Vector2 {
    a - b
}

#[inline]
pub fn scale(k: f32, v: Vector2) -> Vector2 {
    v * k
}

#[inline]
pub fn dot(a: Vector2, b: Vector2) -> f32 {
    a.dot(b)
}

/// Squared length, avoids the square root when only comparisons are needed
#[inline]
pub fn squared_magnitude(v: Vector2) -> f32 {
    v.length_squared()
}

#[inline]
pub fn magnitude(v: Vector2) -> f32 {
    v.length()
}
