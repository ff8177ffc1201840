pub mod body;
pub mod collision;
pub mod engine;
pub mod environment;
pub mod error;
pub mod integrator;
pub mod runtime;
pub mod scene;
pub mod segment;
pub mod vector;

pub use body::{Body, BodyKind, Color};
pub use collision::{DynamicResponse, PairMode, SegmentResponse};
pub use engine::{Simulation, SimulationConfig, TickReport};
pub use environment::Environment;
pub use error::SimError;
pub use integrator::AccelerationMode;
pub use runtime::{
    build_simulation_context, build_simulation_context_from_source, drive_cursor,
    get_body_states, run_scene, spawn_body, step_simulation, step_simulation_with_dt, BodyState,
    SimulationContext, SimulationResult,
};
pub use scene::{build_simulation, parse_scene, SceneConfig, SceneError};
pub use segment::{SegmentContact, StaticSegment};
pub use vector::Vector2;

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
