//! Test helper utilities for circlesim tests

use crate::body::{Body, BodyKind, Color};
use crate::environment::Environment;
use crate::runtime::SimulationResult;
use crate::vector::Vector2;
use std::fs;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Component-wise approximate equality
pub fn approx_eq_vec2(a: Vector2, b: Vector2, tol: f32) -> bool {
    approx_eq_f32(a.x, b.x, tol) && approx_eq_f32(a.y, b.y, tol)
}

/// A large box with no global force, so bodies in the middle never touch a wall
pub fn open_environment() -> Environment {
    Environment::new(Vector2::ZERO, -1000.0, 1000.0, -1000.0, 1000.0)
}

/// Dynamic, unforced, perfectly bouncy circle in [`open_environment`]
pub fn dynamic_body(position: Vector2, velocity: Vector2, radius: f32, mass: f32) -> Body {
    Body::new(
        position,
        velocity,
        radius,
        1.0,
        mass,
        false,
        BodyKind::Dynamic,
        open_environment(),
        Color::WHITE,
    )
    .expect("valid test body")
}

/// Static circle in [`open_environment`]
pub fn static_body(position: Vector2, radius: f32) -> Body {
    Body::new(
        position,
        Vector2::ZERO,
        radius,
        1.0,
        1.0,
        false,
        BodyKind::Static,
        open_environment(),
        Color::RED,
    )
    .expect("valid test body")
}

/// Run a scene from a file path
pub fn run_scene_file(file: &str) -> Result<SimulationResult, Box<dyn std::error::Error>> {
    let src = fs::read_to_string(file)?;
    Ok(crate::run_scene(&src)?)
}

/// Run a scene from source string
pub fn run_scene_source(source: &str) -> Result<SimulationResult, Box<dyn std::error::Error>> {
    Ok(crate::run_scene(source)?)
}

/// Compare two simulation results body by body with tolerance
pub fn results_approx_equal(a: &SimulationResult, b: &SimulationResult, tol: f32) -> bool {
    if a.steps != b.steps || a.bodies.len() != b.bodies.len() {
        return false;
    }

    a.bodies.iter().zip(b.bodies.iter()).all(|(x, y)| {
        approx_eq_vec2(x.position, y.position, tol)
            && approx_eq_vec2(x.velocity, y.velocity, tol)
            && approx_eq_vec2(x.acceleration, y.acceleration, tol)
    })
}
