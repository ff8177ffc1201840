//! Circle/circle and circle/segment collision resolution
//!
//! Resolution is split in two passes per contact: a positional correction
//! applied as soon as the overlap is found, and a velocity update applied
//! later from the recorded pairs.

use crate::body::Body;
use crate::segment::{SegmentContact, StaticSegment};
use crate::vector::{dot, magnitude, scale, squared_magnitude, sub, Vector2};
use serde::Deserialize;

/// Which body pairs the circle/circle scan visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairMode {
    /// Each unordered pair once
    #[default]
    Unordered,
    /// Every ordered pair `(i, j)` with `i != j`, so each contact is
    /// resolved twice per tick
    Ordered,
}

/// Velocity response for colliding circles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicResponse {
    /// Angle-free two-body elastic collision
    #[default]
    Elastic,
    /// Exchange the two velocity vectors
    Swap,
}

/// Velocity response for a circle touching a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentResponse {
    /// Negate the y velocity whatever the segment orientation. Only
    /// correct for horizontal segments.
    #[default]
    FlipVertical,
    /// Mirror the velocity about the segment normal when moving into it
    Reflect,
}

/// True when the centers are no further apart than the sum of the radii
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    magnitude(sub(b.position, a.position)) <= a.radius + b.radius
}

/// Push two overlapping circles apart along the line of centers.
///
/// Dynamic pairs split the correction evenly; against a static partner the
/// dynamic body takes all of it. Each displacement component is capped at
/// the radius sum. Returns `false` when the centers coincide, in which case
/// nothing moves.
pub fn resolve_static(a: &mut Body, b: &mut Body) -> bool {
    let delta = sub(a.position, b.position);
    let dist = magnitude(delta);
    if dist == 0.0 {
        return false;
    }

    let radius_sum = a.radius + b.radius;
    let overlap = 0.5 * (dist - a.radius - b.radius);

    let mut displace = scale(overlap / dist, delta);
    if displace.x.abs() > radius_sum {
        displace.x = overlap * delta.x / radius_sum;
    }
    if displace.y.abs() > radius_sum {
        displace.y = overlap * delta.y / radius_sum;
    }

    match (a.is_static(), b.is_static()) {
        (false, false) => {
            a.position -= displace;
            b.position += displace;
        }
        (false, true) => a.position -= displace * 2.0,
        (true, false) => b.position += displace * 2.0,
        (true, true) => {}
    }

    true
}

/// Elastic collision response, angle-free form.
///
/// `v1' = v1 - 2*m2/(m1+m2) * dot(v1-v2, p1-p2)/|p1-p2|^2 * (p1-p2)`, and
/// the mirror image for the second body using the first body's velocity
/// from before the update. A static partner acts as an infinite mass and
/// keeps its velocity. Returns `false` for concentric circles.
pub fn resolve_elastic(a: &mut Body, b: &mut Body) -> bool {
    let diff = sub(a.position, b.position);
    let dist_sq = squared_magnitude(diff);
    if dist_sq == 0.0 {
        return false;
    }

    let (a_factor, b_factor) = match (a.is_static(), b.is_static()) {
        (false, false) => {
            let total = a.mass + b.mass;
            (2.0 * b.mass / total, 2.0 * a.mass / total)
        }
        (false, true) => (2.0, 0.0),
        (true, false) => (0.0, 2.0),
        (true, true) => return true,
    };

    let a_vel = a.velocity;
    let b_vel = b.velocity;

    if a_factor != 0.0 {
        let along = dot(sub(a_vel, b_vel), diff) / dist_sq;
        a.velocity = sub(a_vel, scale(a_factor * along, diff));
    }
    if b_factor != 0.0 {
        let along = dot(sub(b_vel, a_vel), -diff) / dist_sq;
        b.velocity = sub(b_vel, scale(b_factor * along, -diff));
    }

    true
}

/// Exchange velocities. A static partner has nothing to trade, so the
/// dynamic body bounces off it elastically instead.
pub fn resolve_swap(a: &mut Body, b: &mut Body) -> bool {
    match (a.is_static(), b.is_static()) {
        (false, false) => {
            std::mem::swap(&mut a.velocity, &mut b.velocity);
            true
        }
        (true, true) => true,
        _ => resolve_elastic(a, b),
    }
}

/// Apply the configured velocity response to a colliding pair
pub fn resolve_dynamic(a: &mut Body, b: &mut Body, response: DynamicResponse) -> bool {
    match response {
        DynamicResponse::Elastic => resolve_elastic(a, b),
        DynamicResponse::Swap => resolve_swap(a, b),
    }
}

/// Test a body against a segment and apply the velocity response on a hit.
/// Static bodies are tested but never changed.
pub fn respond_to_segment(
    body: &mut Body,
    segment: &StaticSegment,
    response: SegmentResponse,
) -> SegmentContact {
    let contact = segment.contact(body.position, body.radius);
    if contact != SegmentContact::Hit || body.is_static() {
        return contact;
    }

    match response {
        SegmentResponse::FlipVertical => body.velocity.y *= -1.0,
        SegmentResponse::Reflect => {
            if let Some(normal) = segment.normal_toward(body.position) {
                body.velocity = reflect(body.velocity, normal);
            }
        }
    }

    contact
}

/// Mirror `velocity` about a unit `normal` if it points into the surface
fn reflect(velocity: Vector2, normal: Vector2) -> Vector2 {
    let into = dot(velocity, normal);
    if into < 0.0 {
        sub(velocity, scale(2.0 * into, normal))
    } else {
        velocity
    }
}

/// Borrow two distinct bodies mutably
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
