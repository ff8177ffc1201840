use crate::body::{Body, BodyKind, Color};
use crate::engine::Simulation;
use crate::environment::Environment;
use crate::error::SimError;
use crate::scene::{build_simulation, parse_scene, SceneConfig, SceneError, SpawnConfig};
use crate::vector::Vector2;
use tracing::debug;

/// Read-only snapshot of a body, as handed to a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub radius: f32,
    pub kind: BodyKind,
    pub color: Color,
}

impl From<&Body> for BodyState {
    fn from(body: &Body) -> Self {
        Self {
            position: body.position,
            velocity: body.velocity,
            acceleration: body.acceleration,
            radius: body.radius,
            kind: body.kind,
            color: body.color,
        }
    }
}

/// Final result of running a scene
#[derive(Debug)]
pub struct SimulationResult {
    pub steps: u64,
    pub bodies: Vec<BodyState>,
}

/// A simulation plus the stepping state needed to drive it frame by frame
#[derive(Debug)]
pub struct SimulationContext {
    pub simulation: Simulation,
    pub dt: f32,
    pub max_steps: u64,
    pub current_step: u64,
    pub environment: Environment,
    pub spawn: SpawnConfig,
    /// Body 0 is a host-driven cursor
    pub has_cursor: bool,
}

/// Main entry point: parse a scene and run it to completion
pub fn run_scene(source: &str) -> Result<SimulationResult, SceneError> {
    let mut ctx = build_simulation_context_from_source(source)?;

    while !step_simulation(&mut ctx) {}

    Ok(SimulationResult {
        steps: ctx.current_step,
        bodies: get_body_states(&ctx),
    })
}

pub fn build_simulation_context(scene: &SceneConfig) -> Result<SimulationContext, SceneError> {
    let simulation = build_simulation(scene)?;
    Ok(SimulationContext {
        simulation,
        dt: scene.simulation.dt,
        max_steps: scene.simulation.steps,
        current_step: 0,
        environment: scene.environment(),
        spawn: scene.spawn.clone(),
        has_cursor: scene.cursor.is_some(),
    })
}

pub fn build_simulation_context_from_source(source: &str) -> Result<SimulationContext, SceneError> {
    let scene = parse_scene(source)?;
    build_simulation_context(&scene)
}

/// Step the simulation once with the scene's dt.
/// Returns true once `max_steps` ticks have run.
pub fn step_simulation(ctx: &mut SimulationContext) -> bool {
    step_simulation_with_dt(ctx, ctx.dt)
}

/// Step once with a caller-supplied dt (e.g. measured frame time)
pub fn step_simulation_with_dt(ctx: &mut SimulationContext, dt: f32) -> bool {
    if ctx.current_step >= ctx.max_steps {
        return true;
    }

    ctx.simulation.tick(dt);
    ctx.current_step += 1;

    ctx.current_step >= ctx.max_steps
}

/// Add a body from the spawn template at `position`, evicting the oldest
/// dynamic bodies past the cap. Returns the evicted bodies.
pub fn spawn_body(ctx: &mut SimulationContext, position: Vector2) -> Result<Vec<Body>, SimError> {
    let body = ctx.spawn.body.instantiate(position, ctx.environment)?;
    let evicted = ctx.simulation.push_capped(body, ctx.spawn.max_bodies);
    if !evicted.is_empty() {
        debug!(evicted = evicted.len(), "population cap reached");
    }
    Ok(evicted)
}

/// Move the cursor body to `target`. No-op when the scene has no cursor.
pub fn drive_cursor(ctx: &mut SimulationContext, target: Vector2, dt: f32) {
    if !ctx.has_cursor {
        return;
    }
    if let Some(cursor) = ctx.simulation.bodies.first_mut() {
        cursor.drive_to(target, dt);
    }
}

/// Get the current state of all bodies (for visualization)
pub fn get_body_states(ctx: &SimulationContext) -> Vec<BodyState> {
    ctx.simulation.bodies.iter().map(BodyState::from).collect()
}
