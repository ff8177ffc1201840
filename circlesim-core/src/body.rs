use crate::environment::Environment;
use crate::error::SimError;
use crate::integrator::{integrate, AccelerationMode};
use crate::vector::Vector2;

/// Whether a body responds to forces and collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    /// Never moved by the engine. The host may still drive it.
    Static,
}

impl BodyKind {
    pub fn is_static(self) -> bool {
        matches!(self, BodyKind::Static)
    }
}

/// Opaque render tag carried alongside a body or segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color::rgba(r, g, b, a)
    }
}

/// A circle in the simulation
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub force: Vector2,
    pub radius: f32,
    pub mass: f32,
    pub bounciness: f32,
    pub uses_global_force: bool,
    pub kind: BodyKind,
    pub environment: Environment,
    pub color: Color,
}

impl Body {
    /// Create a body, rejecting non-positive mass or radius.
    ///
    /// The initial force is the environment's global force when
    /// `uses_global_force` is set, zero otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vector2,
        velocity: Vector2,
        radius: f32,
        bounciness: f32,
        mass: f32,
        uses_global_force: bool,
        kind: BodyKind,
        environment: Environment,
        color: Color,
    ) -> Result<Self, SimError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { mass });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius { radius });
        }

        let force = if uses_global_force {
            environment.global_force
        } else {
            Vector2::ZERO
        };

        Ok(Self {
            position,
            velocity,
            acceleration: Vector2::ZERO,
            force,
            radius,
            mass,
            bounciness,
            uses_global_force,
            kind,
            environment,
            color,
        })
    }

    pub fn is_static(&self) -> bool {
        self.kind.is_static()
    }

    /// Keep the circle inside the environment rectangle.
    ///
    /// Each axis is an independent if / else-if pair, so at most one
    /// correction per axis is applied even when the bounds are inverted.
    /// Static bodies are left where the host put them.
    pub fn apply_boundaries(&mut self) {
        if self.is_static() {
            return;
        }

        let env = &self.environment;

        if self.position.x - self.radius <= env.left {
            self.position.x = env.left + self.radius;
            self.velocity.x *= -self.bounciness;
        } else if self.position.x + self.radius >= env.right {
            self.position.x = env.right - self.radius;
            self.velocity.x *= -self.bounciness;
        }

        if self.position.y - self.radius <= env.top {
            self.position.y = env.top + self.radius;
            self.velocity.y *= -self.bounciness;
        } else if self.position.y + self.radius >= env.bottom {
            self.position.y = env.bottom - self.radius;
            self.velocity.y *= -self.bounciness;
        }
    }

    /// Boundary clamp followed by one integration step
    pub fn update(&mut self, dt: f32, mode: AccelerationMode) {
        self.apply_boundaries();
        integrate(self, dt, mode);
    }

    /// Move the body to `target`, deriving its velocity from the displacement.
    ///
    /// Used by hosts that steer a body directly (e.g. a pointer-driven
    /// static circle), so collisions see a meaningful velocity.
    pub fn drive_to(&mut self, target: Vector2, dt: f32) {
        self.velocity = if dt > 0.0 {
            (target - self.position) / dt
        } else {
            Vector2::ZERO
        };
        self.position = target;
    }
}
