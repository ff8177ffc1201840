use crate::body::Body;
use serde::Deserialize;

/// How acceleration is carried between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationMode {
    /// Acceleration persists and grows by `force / mass * dt` every tick.
    /// Under a constant force, velocity grows super-linearly.
    #[default]
    Accumulate,
    /// Acceleration is recomputed as `force / mass` every tick
    ResetEachTick,
}

/// Advance a body by dt using semi-implicit Euler integration.
///
/// The acceleration update depends on `mode`, then `v += a*dt` and
/// `x += v*dt`. Static bodies are skipped. `dt` is used as given.
pub fn integrate(body: &mut Body, dt: f32, mode: AccelerationMode) {
    if body.is_static() {
        return;
    }

    match mode {
        AccelerationMode::Accumulate => body.acceleration += body.force / body.mass * dt,
        AccelerationMode::ResetEachTick => body.acceleration = body.force / body.mass,
    }

    body.velocity += body.acceleration * dt;
    body.position += body.velocity * dt;
}
