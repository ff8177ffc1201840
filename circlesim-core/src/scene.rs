//! Scene files: a YAML description of a world to simulate.
//!
//! ```yaml
//! environment:
//!   global_force: [0.0, 100.0]
//!   bounds: { top: 0.0, bottom: 100.0, left: 0.0, right: 100.0 }
//!
//! simulation:
//!   dt: 0.1
//!   steps: 10
//!   pairs: unordered            # or ordered
//!   dynamic_response: elastic   # or swap
//!   segment_response: flip_vertical  # or reflect
//!   acceleration: accumulate    # or reset_each_tick
//!
//! bodies:
//!   - position: [50.0, 50.0]
//!     radius: 5.0
//!
//! grids:
//!   - min: [10.0, 10.0]
//!     max: [90.0, 40.0]
//!     spacing: 20.0
//!     body: { radius: 4.0, bounciness: 0.2 }
//!
//! segments:
//!   - start: [0.0, 80.0]
//!     end: [100.0, 90.0]
//!
//! spawn:
//!   radius: 4.0
//!   max_bodies: 200
//!
//! cursor:
//!   radius: 15.0
//! ```
//!
//! Every body field except `position` and `radius` has a default, see
//! [`BodyTemplate`].

use crate::body::{Body, BodyKind, Color};
use crate::engine::{Simulation, SimulationConfig};
use crate::environment::Environment;
use crate::error::SimError;
use crate::segment::StaticSegment;
use crate::vector::Vector2;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Largest lattice a single grid entry may produce
pub const MAX_GRID_BODIES: u64 = 100_000;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to parse scene: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid bounds: need top < bottom and left < right (top={top}, bottom={bottom}, left={left}, right={right})")]
    InvalidBounds {
        top: f32,
        bottom: f32,
        left: f32,
        right: f32,
    },

    #[error("invalid time step {dt}: dt must be finite and greater than zero")]
    InvalidTimeStep { dt: f32 },

    #[error("body {index}: {source}")]
    Body {
        index: usize,
        #[source]
        source: SimError,
    },

    #[error("grid {index}: spacing must be greater than zero, got {spacing}")]
    InvalidGrid { index: usize, spacing: f32 },

    #[error("grid {index}: {count} bodies exceeds the limit of {limit}")]
    GridTooLarge { index: usize, count: u64, limit: u64 },

    #[error("grid {index}: {source}")]
    GridBody {
        index: usize,
        #[source]
        source: SimError,
    },

    #[error("spawn template: {0}")]
    Spawn(#[source] SimError),

    #[error("cursor: {0}")]
    Cursor(#[source] SimError),
}

/// Top-level scene
#[derive(Deserialize, Debug, Clone)]
pub struct SceneConfig {
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub grids: Vec<GridConfig>,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
    #[serde(default)]
    pub spawn: SpawnConfig,
    pub cursor: Option<CursorConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub global_force: [f32; 2],
    #[serde(default)]
    pub friction: f32, // carried through, not simulated
    pub bounds: BoundsConfig,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct BoundsConfig {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Stepping parameters and resolution policies
#[derive(Deserialize, Debug, Clone)]
pub struct SimulationSettings {
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default = "default_steps")]
    pub steps: u64,
    #[serde(flatten)]
    pub policies: SimulationConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            steps: default_steps(),
            policies: SimulationConfig::default(),
        }
    }
}

/// Everything needed to make a body except its position
#[derive(Deserialize, Debug, Clone)]
pub struct BodyTemplate {
    #[serde(default)]
    pub velocity: [f32; 2],
    pub radius: f32,
    #[serde(default = "one")]
    pub mass: f32,
    #[serde(default = "one")]
    pub bounciness: f32,
    #[serde(default = "yes")]
    pub global_force: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default = "white")]
    pub color: [u8; 4],
}

impl BodyTemplate {
    pub fn instantiate(&self, position: Vector2, environment: Environment) -> Result<Body, SimError> {
        let kind = if self.is_static {
            BodyKind::Static
        } else {
            BodyKind::Dynamic
        };
        Body::new(
            position,
            Vector2::from(self.velocity),
            self.radius,
            self.bounciness,
            self.mass,
            self.global_force,
            kind,
            environment,
            Color::from(self.color),
        )
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub position: [f32; 2],
    #[serde(flatten)]
    pub body: BodyTemplate,
}

/// A lattice of identical bodies filling `[min, max)` every `spacing` units
#[derive(Deserialize, Debug, Clone)]
pub struct GridConfig {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub spacing: f32,
    pub body: BodyTemplate,
}

impl GridConfig {
    /// Number of lattice points, saturating for spans the spacing cannot cover
    pub fn point_count(&self) -> u64 {
        if !(self.spacing > 0.0) {
            return 0;
        }
        let nx = axis_count(self.min[0], self.max[0], self.spacing);
        let ny = axis_count(self.min[1], self.max[1], self.spacing);
        nx.saturating_mul(ny)
    }

    /// Lattice points in x-major order. Empty when the grid is above
    /// [`MAX_GRID_BODIES`]; [`SceneConfig::validate`] reports that case.
    pub fn positions(&self) -> Vec<Vector2> {
        let count = self.point_count();
        if count == 0 || count > MAX_GRID_BODIES {
            return Vec::new();
        }
        let nx = axis_count(self.min[0], self.max[0], self.spacing);
        let ny = axis_count(self.min[1], self.max[1], self.spacing);
        let spacing = f64::from(self.spacing);

        let mut positions = Vec::with_capacity(count as usize);
        for i in 0..nx {
            let x = f64::from(self.min[0]) + i as f64 * spacing;
            for j in 0..ny {
                let y = f64::from(self.min[1]) + j as f64 * spacing;
                positions.push(Vector2::new(x as f32, y as f32));
            }
        }
        positions
    }
}

/// Points on `[min, max)` every `spacing`; the float to int cast saturates
fn axis_count(min: f32, max: f32, spacing: f32) -> u64 {
    let span = f64::from(max) - f64::from(min);
    if !(span > 0.0) {
        return 0;
    }
    (span / f64::from(spacing)).ceil() as u64
}

#[derive(Deserialize, Debug, Clone)]
pub struct SegmentConfig {
    pub start: [f32; 2],
    pub end: [f32; 2],
    #[serde(default = "white")]
    pub color: [u8; 4],
}

/// Template for bodies added by the host at runtime, with a rolling cap
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    #[serde(flatten)]
    pub body: BodyTemplate,
    #[serde(default = "default_max_bodies")]
    pub max_bodies: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            body: BodyTemplate {
                velocity: [0.0, 0.0],
                radius: 10.0,
                mass: 1.0,
                bounciness: 0.5,
                global_force: true,
                is_static: false,
                color: white(),
            },
            max_bodies: default_max_bodies(),
        }
    }
}

/// A static circle the host drags around, always stored as body 0
#[derive(Deserialize, Debug, Clone)]
pub struct CursorConfig {
    pub radius: f32,
    #[serde(default = "one")]
    pub mass: f32,
    #[serde(default = "red")]
    pub color: [u8; 4],
}

impl CursorConfig {
    pub fn instantiate(&self, environment: Environment) -> Result<Body, SimError> {
        Body::new(
            Vector2::new(environment.left, environment.top),
            Vector2::ZERO,
            self.radius,
            0.0,
            self.mass,
            false,
            BodyKind::Static,
            environment,
            Color::from(self.color),
        )
    }
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_steps() -> u64 {
    600
}

fn default_max_bodies() -> usize {
    256
}

fn one() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}

fn white() -> [u8; 4] {
    [255, 255, 255, 255]
}

fn red() -> [u8; 4] {
    [255, 0, 0, 255]
}

/// Parse a scene from YAML source
pub fn parse_scene(source: &str) -> Result<SceneConfig, SceneError> {
    Ok(serde_yaml::from_str(source)?)
}

impl SceneConfig {
    pub fn environment(&self) -> Environment {
        let b = self.environment.bounds;
        Environment::new(
            Vector2::from(self.environment.global_force),
            b.top,
            b.bottom,
            b.left,
            b.right,
        )
        .with_friction(self.environment.friction)
    }

    /// Check everything the engine itself does not guard against
    pub fn validate(&self) -> Result<(), SceneError> {
        let env = self.environment();
        if !env.has_valid_bounds() {
            return Err(SceneError::InvalidBounds {
                top: env.top,
                bottom: env.bottom,
                left: env.left,
                right: env.right,
            });
        }

        let dt = self.simulation.dt;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SceneError::InvalidTimeStep { dt });
        }

        for (index, grid) in self.grids.iter().enumerate() {
            if !(grid.spacing > 0.0) {
                return Err(SceneError::InvalidGrid {
                    index,
                    spacing: grid.spacing,
                });
            }
            let count = grid.point_count();
            if count > MAX_GRID_BODIES {
                return Err(SceneError::GridTooLarge {
                    index,
                    count,
                    limit: MAX_GRID_BODIES,
                });
            }
        }

        // The spawn template is only used later; reject a bad one up front.
        self.spawn
            .body
            .instantiate(Vector2::ZERO, env)
            .map_err(SceneError::Spawn)?;

        Ok(())
    }
}

/// Build the world described by a scene.
///
/// Body order: cursor (if any), explicit bodies, then grid bodies.
pub fn build_simulation(scene: &SceneConfig) -> Result<Simulation, SceneError> {
    scene.validate()?;
    let env = scene.environment();

    let mut bodies = Vec::new();

    if let Some(cursor) = &scene.cursor {
        bodies.push(cursor.instantiate(env).map_err(SceneError::Cursor)?);
    }

    for (index, config) in scene.bodies.iter().enumerate() {
        let body = config
            .body
            .instantiate(Vector2::from(config.position), env)
            .map_err(|source| SceneError::Body { index, source })?;
        bodies.push(body);
    }

    for (index, grid) in scene.grids.iter().enumerate() {
        for position in grid.positions() {
            let body = grid
                .body
                .instantiate(position, env)
                .map_err(|source| SceneError::GridBody { index, source })?;
            bodies.push(body);
        }
    }

    let segments: Vec<StaticSegment> = scene
        .segments
        .iter()
        .map(|s| {
            StaticSegment::new(
                Vector2::from(s.start),
                Vector2::from(s.end),
                Color::from(s.color),
            )
        })
        .collect();

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_degenerate() {
            warn!(index, "segment has zero length and will never collide");
        }
    }

    debug!(
        bodies = bodies.len(),
        segments = segments.len(),
        "built simulation from scene"
    );

    Ok(Simulation::with_config(
        bodies,
        segments,
        scene.simulation.policies,
    ))
}
