use crate::body::Body;
use crate::collision::{
    circles_overlap, pair_mut, resolve_dynamic, resolve_static, respond_to_segment,
    DynamicResponse, PairMode, SegmentResponse,
};
use crate::integrator::AccelerationMode;
use crate::segment::{SegmentContact, StaticSegment};
use serde::Deserialize;
use tracing::trace;

/// Resolution policies used by [`Simulation::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub pairs: PairMode,
    pub dynamic_response: DynamicResponse,
    pub segment_response: SegmentResponse,
    pub acceleration: AccelerationMode,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Colliding circle pairs recorded for velocity resolution
    pub circle_contacts: usize,
    /// Body/segment hits
    pub segment_contacts: usize,
    /// Resolutions skipped because of coincident centers or zero-length segments
    pub skipped_degenerate: usize,
}

/// The physics world: owns every body and segment
#[derive(Debug, Default)]
pub struct Simulation {
    pub bodies: Vec<Body>,
    pub segments: Vec<StaticSegment>,
    pub config: SimulationConfig,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, segments: Vec<StaticSegment>) -> Self {
        Self::with_config(bodies, segments, SimulationConfig::default())
    }

    pub fn with_config(
        bodies: Vec<Body>,
        segments: Vec<StaticSegment>,
        config: SimulationConfig,
    ) -> Self {
        Self {
            bodies,
            segments,
            config,
        }
    }

    pub fn add_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn add_segment(&mut self, segment: StaticSegment) {
        self.segments.push(segment);
    }

    pub fn remove_body(&mut self, index: usize) -> Option<Body> {
        (index < self.bodies.len()).then(|| self.bodies.remove(index))
    }

    /// Append a body, then evict the oldest dynamic bodies until at most
    /// `max_bodies` remain. Static bodies are scenery and never evicted.
    pub fn push_capped(&mut self, body: Body, max_bodies: usize) -> Vec<Body> {
        self.bodies.push(body);

        let mut evicted = Vec::new();
        while self.bodies.len() > max_bodies {
            match self.bodies.iter().position(|b| !b.is_static()) {
                Some(oldest) => evicted.push(self.bodies.remove(oldest)),
                None => break,
            }
        }
        evicted
    }

    /// Drop every body and segment
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.segments.clear();
    }

    /// Advance the world by `dt`.
    ///
    /// Phases, in order: circle/circle detection with immediate positional
    /// correction, circle/segment response, velocity resolution of the pairs
    /// recorded in the first phase, then per-body boundary clamp and
    /// integration.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport::default();

        let colliding_pairs = self.resolve_circle_overlaps(&mut report);
        report.circle_contacts = colliding_pairs.len();

        let response = self.config.segment_response;
        for body in self.bodies.iter_mut() {
            for segment in &self.segments {
                match respond_to_segment(body, segment, response) {
                    SegmentContact::Hit => report.segment_contacts += 1,
                    SegmentContact::Degenerate => report.skipped_degenerate += 1,
                    SegmentContact::Miss => {}
                }
            }
        }

        for &(i, j) in &colliding_pairs {
            let (a, b) = pair_mut(&mut self.bodies, i, j);
            if !resolve_dynamic(a, b, self.config.dynamic_response) {
                report.skipped_degenerate += 1;
            }
        }

        for body in self.bodies.iter_mut() {
            body.update(dt, self.config.acceleration);
        }

        trace!(
            bodies = self.bodies.len(),
            circle_contacts = report.circle_contacts,
            segment_contacts = report.segment_contacts,
            skipped = report.skipped_degenerate,
            "tick"
        );

        report
    }

    /// Scan body pairs, separating overlaps as they are found. Later pairs
    /// see positions already corrected by earlier ones.
    fn resolve_circle_overlaps(&mut self, report: &mut TickReport) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let count = self.bodies.len();

        for i in 0..count {
            let first = match self.config.pairs {
                PairMode::Unordered => i + 1,
                PairMode::Ordered => 0,
            };
            for j in first..count {
                if i == j || !circles_overlap(&self.bodies[i], &self.bodies[j]) {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if !resolve_static(a, b) {
                    report.skipped_degenerate += 1;
                }
                pairs.push((i, j));
            }
        }

        pairs
    }
}
