//! Tests for the full per-tick pipeline and collection management

use circlesim_core::tests::test_helpers::{approx_eq_f32, dynamic_body, static_body};
use circlesim_core::{
    AccelerationMode, Color, DynamicResponse, PairMode, SegmentResponse, Simulation,
    SimulationConfig, StaticSegment, TickReport, Vector2,
};

fn head_on_pair() -> Vec<circlesim_core::Body> {
    vec![
        dynamic_body(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 1.0, 1.0),
        dynamic_body(Vector2::new(1.0, 0.0), Vector2::new(-1.0, 0.0), 1.0, 1.0),
    ]
}

#[test]
fn test_unordered_pairs_separate_and_exchange() {
    let mut sim = Simulation::new(head_on_pair(), vec![]);
    let report = sim.tick(0.0);

    assert_eq!(report.circle_contacts, 1);
    assert_eq!(sim.bodies[0].position, Vector2::new(-0.5, 0.0));
    assert_eq!(sim.bodies[1].position, Vector2::new(1.5, 0.0));
    assert_eq!(sim.bodies[0].velocity, Vector2::new(-1.0, 0.0));
    assert_eq!(sim.bodies[1].velocity, Vector2::new(1.0, 0.0));
}

#[test]
fn test_ordered_pairs_resolve_each_contact_twice() {
    let config = SimulationConfig {
        pairs: PairMode::Ordered,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::with_config(head_on_pair(), vec![], config);
    let report = sim.tick(0.0);

    // (0, 1) separates the circles to exactly touching, (1, 0) still
    // counts as a contact, and the second elastic pass undoes the first.
    assert_eq!(report.circle_contacts, 2);
    assert_eq!(sim.bodies[0].position, Vector2::new(-0.5, 0.0));
    assert_eq!(sim.bodies[1].position, Vector2::new(1.5, 0.0));
    assert_eq!(sim.bodies[0].velocity, Vector2::new(1.0, 0.0));
    assert_eq!(sim.bodies[1].velocity, Vector2::new(-1.0, 0.0));
}

#[test]
fn test_swap_response_in_tick() {
    let config = SimulationConfig {
        dynamic_response: DynamicResponse::Swap,
        ..SimulationConfig::default()
    };
    let mut bodies = head_on_pair();
    bodies[1].velocity = Vector2::new(0.0, 7.0);
    let mut sim = Simulation::with_config(bodies, vec![], config);
    sim.tick(0.0);

    assert_eq!(sim.bodies[0].velocity, Vector2::new(0.0, 7.0));
    assert_eq!(sim.bodies[1].velocity, Vector2::new(1.0, 0.0));
}

#[test]
fn test_concentric_bodies_do_not_produce_nan() {
    let bodies = vec![
        dynamic_body(Vector2::new(3.0, 3.0), Vector2::ZERO, 1.0, 1.0),
        dynamic_body(Vector2::new(3.0, 3.0), Vector2::ZERO, 1.0, 1.0),
    ];
    let mut sim = Simulation::new(bodies, vec![]);

    for _ in 0..10 {
        let report = sim.tick(0.016);
        assert_eq!(report.circle_contacts, 1);
        assert_eq!(report.skipped_degenerate, 2);
    }

    for body in &sim.bodies {
        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
        assert_eq!(body.position, Vector2::new(3.0, 3.0));
    }
}

#[test]
fn test_static_body_unchanged_over_many_ticks() {
    let mut anchor = static_body(Vector2::new(0.0, 0.0), 5.0);
    anchor.force = Vector2::new(0.0, 1000.0);
    let anchor_start = anchor.clone();

    let bodies = vec![
        anchor,
        dynamic_body(Vector2::new(6.0, 0.0), Vector2::new(-20.0, 0.0), 2.0, 1.0),
        dynamic_body(Vector2::new(0.0, 6.0), Vector2::new(0.0, -20.0), 2.0, 1.0),
    ];
    let floor = StaticSegment::new(Vector2::new(-50.0, 0.0), Vector2::new(50.0, 0.0), Color::WHITE);
    let mut sim = Simulation::new(bodies, vec![floor]);

    for _ in 0..200 {
        sim.tick(0.05);
        assert_eq!(sim.bodies[0].position, anchor_start.position);
        assert_eq!(sim.bodies[0].velocity, anchor_start.velocity);
        assert_eq!(sim.bodies[0].acceleration, Vector2::ZERO);
    }
}

#[test]
fn test_dynamic_body_pushed_out_of_static_body() {
    let bodies = vec![
        static_body(Vector2::new(0.0, 0.0), 2.0),
        dynamic_body(Vector2::new(3.0, 0.0), Vector2::ZERO, 2.0, 1.0),
    ];
    let mut sim = Simulation::new(bodies, vec![]);
    sim.tick(0.0);

    assert_eq!(sim.bodies[0].position, Vector2::ZERO);
    assert!(approx_eq_f32(sim.bodies[1].position.x, 4.0, 1e-5));
}

#[test]
fn test_segment_contacts_reported() {
    let floor = StaticSegment::new(Vector2::new(-50.0, 10.0), Vector2::new(50.0, 10.0), Color::WHITE);
    let bodies = vec![
        dynamic_body(Vector2::new(0.0, 8.0), Vector2::new(0.0, 5.0), 3.0, 1.0),
        dynamic_body(Vector2::new(20.0, -20.0), Vector2::new(0.0, 5.0), 3.0, 1.0),
    ];
    let mut sim = Simulation::new(bodies, vec![floor]);
    let report = sim.tick(0.1);

    assert_eq!(report.segment_contacts, 1);
    assert_eq!(sim.bodies[0].velocity, Vector2::new(0.0, -5.0));
    assert_eq!(sim.bodies[1].velocity, Vector2::new(0.0, 5.0));
}

#[test]
fn test_degenerate_segment_counted_as_skipped() {
    let dot = StaticSegment::new(Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.0), Color::WHITE);
    let bodies = vec![dynamic_body(Vector2::new(1.0, 1.0), Vector2::ZERO, 1.0, 1.0)];
    let mut sim = Simulation::new(bodies, vec![dot]);

    let report = sim.tick(0.1);
    assert_eq!(report.segment_contacts, 0);
    assert_eq!(report.skipped_degenerate, 1);
}

#[test]
fn test_reset_mode_through_simulation() {
    let config = SimulationConfig {
        acceleration: AccelerationMode::ResetEachTick,
        segment_response: SegmentResponse::Reflect,
        ..SimulationConfig::default()
    };
    let mut body = dynamic_body(Vector2::ZERO, Vector2::ZERO, 1.0, 2.0);
    body.force = Vector2::new(4.0, 0.0);
    let mut sim = Simulation::with_config(vec![body], vec![], config);

    sim.tick(0.5);
    sim.tick(0.5);

    assert_eq!(sim.bodies[0].acceleration, Vector2::new(2.0, 0.0));
    assert_eq!(sim.bodies[0].velocity, Vector2::new(2.0, 0.0));
}

#[test]
fn test_push_capped_evicts_oldest_dynamic() {
    let mut sim = Simulation::new(
        vec![
            static_body(Vector2::new(0.0, 0.0), 1.0),
            dynamic_body(Vector2::new(10.0, 0.0), Vector2::ZERO, 1.0, 1.0),
            dynamic_body(Vector2::new(20.0, 0.0), Vector2::ZERO, 1.0, 1.0),
        ],
        vec![],
    );

    let evicted = sim.push_capped(
        dynamic_body(Vector2::new(30.0, 0.0), Vector2::ZERO, 1.0, 1.0),
        3,
    );

    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].position, Vector2::new(10.0, 0.0));
    assert_eq!(sim.bodies.len(), 3);
    assert!(sim.bodies[0].is_static());
    assert_eq!(sim.bodies[2].position, Vector2::new(30.0, 0.0));
}

#[test]
fn test_push_capped_under_cap_keeps_everything() {
    let mut sim = Simulation::default();
    for i in 0..5 {
        let evicted = sim.push_capped(
            dynamic_body(Vector2::new(i as f32 * 10.0, 0.0), Vector2::ZERO, 1.0, 1.0),
            10,
        );
        assert!(evicted.is_empty());
    }
    assert_eq!(sim.bodies.len(), 5);
}

#[test]
fn test_remove_and_clear() {
    let mut sim = Simulation::new(
        vec![
            dynamic_body(Vector2::new(0.0, 0.0), Vector2::ZERO, 1.0, 1.0),
            dynamic_body(Vector2::new(10.0, 0.0), Vector2::ZERO, 1.0, 1.0),
        ],
        vec![StaticSegment::new(Vector2::ZERO, Vector2::ONE, Color::WHITE)],
    );

    assert!(sim.remove_body(5).is_none());
    let removed = sim.remove_body(0).expect("body 0 exists");
    assert_eq!(removed.position, Vector2::ZERO);
    assert_eq!(sim.bodies.len(), 1);

    sim.clear();
    assert!(sim.bodies.is_empty());
    assert!(sim.segments.is_empty());
}

#[test]
fn test_empty_simulation_ticks() {
    let mut sim = Simulation::default();
    assert_eq!(sim.tick(1.0), TickReport::default());
}
