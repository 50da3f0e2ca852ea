//! Trimmed straight runs between two waypoints.

use crate::types::Vector2;
use crate::waypoint::Waypoint;

use super::{EPSILON, Traverse};

/// The straight part of a leg, shortened at each end to leave room for the
/// neighbouring fillets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedSegment {
    from: Waypoint,
    to: Waypoint,
    direction: Vector2,
    start: Vector2,
    end: Vector2,
    degenerate: bool,
}

impl TrimmedSegment {
    /// Trim by each waypoint's own blend radius.
    pub fn new(from: &Waypoint, to: &Waypoint) -> Self {
        Self::trimmed(from, to, from.blend_radius, to.blend_radius)
    }

    /// Trim `trim_start` off the `from` end and `trim_end` off the `to` end.
    ///
    /// A zero-length leg is left untrimmed. When the trims meet or cross the
    /// segment is flagged degenerate but still computed, so `start` may lie
    /// past `end`.
    pub fn trimmed(from: &Waypoint, to: &Waypoint, trim_start: f64, trim_end: f64) -> Self {
        let direction = Vector2::diff(from.position, to.position);
        let norm = direction.norm();

        let (start, end, degenerate) = if norm < EPSILON {
            (from.position, to.position, true)
        } else {
            let start = from.position.translate(direction.scale(trim_start / norm));
            let end = to.position.translate(direction.scale(trim_end / norm).invert());
            (start, end, trim_start + trim_end >= norm)
        };

        if degenerate {
            crate::log::warn!(
                from_x = from.position.x,
                from_y = from.position.y,
                to_x = to.position.x,
                to_y = to.position.y,
                "degenerate segment: blend radii consume the whole leg"
            );
        }

        Self {
            from: from.clone(),
            to: to.clone(),
            direction,
            start,
            end,
            degenerate,
        }
    }

    pub fn from(&self) -> &Waypoint {
        &self.from
    }

    pub fn to(&self) -> &Waypoint {
        &self.to
    }

    /// Untrimmed leg vector `to - from`.
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    pub fn start(&self) -> Vector2 {
        self.start
    }

    pub fn end(&self) -> Vector2 {
        self.end
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Slope `dy/dx` of the leg. Near-vertical legs divide by `EPSILON`
    /// instead, which yields a very steep but finite slope.
    pub fn slope(&self) -> f64 {
        let dx = self.to.position.x - self.from.position.x;
        let dy = self.to.position.y - self.from.position.y;
        if dx > EPSILON { dy / dx } else { dy / EPSILON }
    }

    /// y-intercept `b` of `y = slope * x + b` through the `from` waypoint.
    pub fn intercept(&self) -> f64 {
        self.from.position.y - self.slope() * self.from.position.x
    }

    /// Intersection of the infinite lines `ab` and `cd` (Cramer's rule).
    ///
    /// A determinant smaller than `EPSILON` in magnitude is clamped to
    /// `±EPSILON`, keeping its sign. Near-parallel lines therefore return a
    /// finite point very far away rather than NaN.
    pub fn intersect(a: Vector2, b: Vector2, c: Vector2, d: Vector2) -> Vector2 {
        let mut det = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
        if det.abs() < EPSILON {
            det = EPSILON.copysign(det);
        }
        let ab = Vector2::cross(a, b);
        let cd = Vector2::cross(c, d);
        let x = (ab * (c.x - d.x) - cd * (a.x - b.x)) / det;
        let y = (ab * (c.y - d.y) - cd * (a.y - b.y)) / det;
        Vector2::new(x, y)
    }

    /// Heading of the trimmed segment, falling back to the leg heading when
    /// the trimmed part has collapsed.
    pub(crate) fn heading(&self) -> f64 {
        let delta = Vector2::diff(self.start, self.end);
        if delta.norm() < EPSILON {
            self.direction.angle()
        } else {
            delta.angle()
        }
    }
}

impl Traverse for TrimmedSegment {
    fn entry(&self) -> Vector2 {
        self.start
    }

    fn exit(&self) -> Vector2 {
        self.end
    }

    /// Distance between the trimmed endpoints.
    fn length(&self) -> f64 {
        Vector2::diff(self.start, self.end).norm()
    }

    fn point_at(&self, distance: f64) -> Vector2 {
        let delta = Vector2::diff(self.start, self.end);
        let length = delta.norm();
        if length < EPSILON {
            return self.start;
        }
        self.start.translate(delta.scale(distance / length))
    }

    fn heading_at(&self, _distance: f64) -> f64 {
        self.heading()
    }
}
