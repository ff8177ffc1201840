use crate::vector::Vector2;

/// Shared simulation parameters: the global force and the rectangular
/// boundary every body is kept inside.
///
/// Screen convention: `top < bottom`, `left < right`. This is not enforced
/// here; scene loading rejects inverted bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub global_force: Vector2,
    /// Reserved. Not read by the engine.
    pub friction: f32,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Environment {
    pub fn new(global_force: Vector2, top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            global_force,
            friction: 0.0,
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when `top < bottom` and `left < right`
    pub fn has_valid_bounds(&self) -> bool {
        self.top < self.bottom && self.left < self.right
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Vector2::ZERO, 0.0, 100.0, 0.0, 100.0)
    }
}
