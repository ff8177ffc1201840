use crate::body::Color;
use crate::vector::{dot, squared_magnitude, Vector2};

/// Immovable line obstacle. Only takes part in collision.
#[derive(Debug, Clone)]
pub struct StaticSegment {
    pub start: Vector2,
    pub end: Vector2,
    pub color: Color,
}

/// Result of testing a circle against a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentContact {
    Miss,
    Hit,
    /// Zero-length segment, never collides
    Degenerate,
}

impl StaticSegment {
    pub fn new(start: Vector2, end: Vector2, color: Color) -> Self {
        Self { start, end, color }
    }

    pub fn is_degenerate(&self) -> bool {
        squared_magnitude(self.end - self.start) == 0.0
    }

    /// Test a circle against the segment's supporting line.
    ///
    /// The line `y = m*x + b` is substituted into the circle equation and the
    /// discriminant of the resulting quadratic decides whether they meet.
    /// The hit is then restricted to the segment's x-extent widened by the
    /// radius, which can report contacts slightly past the endpoints.
    /// Vertical segments use the line `x = x0` and their y-extent instead.
    pub fn contact(&self, center: Vector2, radius: f32) -> SegmentContact {
        if self.is_degenerate() {
            return SegmentContact::Degenerate;
        }

        let (p, q, r) = (center.x, center.y, radius);
        let dx = self.start.x - self.end.x;

        let hit = if dx == 0.0 {
            let x0 = self.start.x;
            let (lo, hi) = min_max(self.start.y, self.end.y);
            (p - x0).abs() <= r && q - r <= hi && q + r >= lo
        } else {
            // Quarter discriminant of the line/circle quadratic, rearranged as
            // r^2 * |edge|^2 - cross(edge, center - start)^2 to avoid cancellation.
            let ex = f64::from(self.end.x) - f64::from(self.start.x);
            let ey = f64::from(self.end.y) - f64::from(self.start.y);
            let cx = f64::from(p) - f64::from(self.start.x);
            let cy = f64::from(q) - f64::from(self.start.y);
            let cross = ex * cy - ey * cx;
            let r64 = f64::from(r);
            let discriminant = r64 * r64 * (ex * ex + ey * ey) - cross * cross;

            let (lo, hi) = min_max(self.start.x, self.end.x);
            discriminant >= 0.0 && p - r <= hi && p + r >= lo
        };

        if hit {
            SegmentContact::Hit
        } else {
            SegmentContact::Miss
        }
    }

    /// Closest point on the finite segment to `point`
    pub fn closest_point(&self, point: Vector2) -> Vector2 {
        let edge = self.end - self.start;
        let len_sq = squared_magnitude(edge);
        if len_sq == 0.0 {
            return self.start;
        }
        let t = (dot(point - self.start, edge) / len_sq).clamp(0.0, 1.0);
        self.start + edge * t
    }

    /// Unit normal of the segment, pointing toward `point` when possible
    pub fn normal_toward(&self, point: Vector2) -> Option<Vector2> {
        let away = point - self.closest_point(point);
        if squared_magnitude(away) > 0.0 {
            return Some(away.normalize());
        }
        let edge = self.end - self.start;
        if squared_magnitude(edge) == 0.0 {
            return None;
        }
        Some(edge.perp().normalize())
    }
}

fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
