//! Tangent arcs joining consecutive trimmed segments.
//!
//! The arc center is where the perpendiculars erected at the two tangent
//! points cross; that point is equidistant from both tangent points, so the
//! arc meets each segment tangentially.

use glam::DVec2;

use crate::types::Vector2;
use crate::waypoint::Waypoint;

use super::segment::TrimmedSegment;
use super::{EPSILON, MAX_FILLET_RADIUS, Traverse};

/// Direction of travel around the fillet center, in the y-up field frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Clockwise,
    CounterClockwise,
}

impl SweepDirection {
    /// Pick the direction from `cross(center→tangent_in, center→tangent_out)`.
    ///
    /// Only a strictly positive cross product counts as counter-clockwise;
    /// zero falls through to clockwise.
    pub fn from_cross(cross: f64) -> Self {
        if cross > 0.0 {
            SweepDirection::CounterClockwise
        } else {
            SweepDirection::Clockwise
        }
    }

    /// `(start, end)` surface angles for drawing the minor arc.
    ///
    /// The surface draws with increasing angle, so a counter-clockwise turn
    /// is drawn from the outgoing tangent point back to the incoming one.
    pub fn draw_angles(self, tangent_in: f64, tangent_out: f64) -> (f64, f64) {
        match self {
            SweepDirection::CounterClockwise => (tangent_out, tangent_in),
            SweepDirection::Clockwise => (tangent_in, tangent_out),
        }
    }

    /// +1 for counter-clockwise, -1 for clockwise.
    pub fn signum(self) -> f64 {
        match self {
            SweepDirection::CounterClockwise => 1.0,
            SweepDirection::Clockwise => -1.0,
        }
    }
}

/// Shape of the joint between two segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bend {
    /// A circular arc around `center`.
    Arc {
        center: Vector2,
        radius: f64,
        sweep: SweepDirection,
    },
    /// The legs are (anti)parallel: a straight bridge between the tangent
    /// points instead of an arc of unbounded radius.
    Straight,
}

/// A corner fillet: the incoming and outgoing segments plus the joint
/// between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Fillet {
    incoming: TrimmedSegment,
    outgoing: TrimmedSegment,
    bend: Bend,
}

impl Fillet {
    /// Build the fillet at the waypoint shared by `incoming` and `outgoing`.
    pub fn new(incoming: TrimmedSegment, outgoing: TrimmedSegment) -> Self {
        let bend = solve_bend(&incoming, &outgoing);
        if bend == Bend::Straight {
            crate::log::warn!(
                x = incoming.to().position.x,
                y = incoming.to().position.y,
                "collinear corner, joining legs with a straight bridge"
            );
        }
        Self {
            incoming,
            outgoing,
            bend,
        }
    }

    /// Fillet at `b` on the path `a → b → c`.
    pub fn from_points(a: &Waypoint, b: &Waypoint, c: &Waypoint) -> Self {
        Self::new(TrimmedSegment::new(a, b), TrimmedSegment::new(b, c))
    }

    pub fn incoming(&self) -> &TrimmedSegment {
        &self.incoming
    }

    pub fn outgoing(&self) -> &TrimmedSegment {
        &self.outgoing
    }

    pub fn bend(&self) -> Bend {
        self.bend
    }

    /// Tangent point on the incoming segment.
    pub fn tangent_in(&self) -> Vector2 {
        self.incoming.end()
    }

    /// Tangent point on the outgoing segment.
    pub fn tangent_out(&self) -> Vector2 {
        self.outgoing.start()
    }

    pub fn center(&self) -> Option<Vector2> {
        match self.bend {
            Bend::Arc { center, .. } => Some(center),
            Bend::Straight => None,
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match self.bend {
            Bend::Arc { radius, .. } => Some(radius),
            Bend::Straight => None,
        }
    }

    pub fn sweep(&self) -> Option<SweepDirection> {
        match self.bend {
            Bend::Arc { sweep, .. } => Some(sweep),
            Bend::Straight => None,
        }
    }

    /// A corner without blend radius: the arc has (near) zero radius.
    pub fn is_sharp(&self) -> bool {
        matches!(self.bend, Bend::Arc { radius, .. } if radius <= EPSILON)
    }

    pub fn is_straight(&self) -> bool {
        matches!(self.bend, Bend::Straight)
    }

    /// Angle swept between the tangent points, in `[0, π]`.
    pub fn swept_angle(&self) -> f64 {
        match self.bend {
            Bend::Arc { center, radius, .. } if radius > EPSILON => Vector2::angle_between(
                self.tangent_in() - center,
                self.tangent_out() - center,
            ),
            _ => 0.0,
        }
    }

    /// `(start, end)` surface angles of the minor arc, if this is an arc.
    pub fn draw_angles(&self) -> Option<(f64, f64)> {
        match self.bend {
            Bend::Arc { center, sweep, .. } => Some(sweep.draw_angles(
                (self.tangent_in() - center).angle(),
                (self.tangent_out() - center).angle(),
            )),
            Bend::Straight => None,
        }
    }
}

impl Traverse for Fillet {
    fn entry(&self) -> Vector2 {
        self.tangent_in()
    }

    fn exit(&self) -> Vector2 {
        self.tangent_out()
    }

    /// Length travelled through the joint.
    fn length(&self) -> f64 {
        match self.bend {
            Bend::Arc { radius, .. } => self.swept_angle() * radius,
            Bend::Straight => self.tangent_in().distance(self.tangent_out()),
        }
    }

    /// Point `distance` into the joint, measured from the incoming tangent
    /// point.
    fn point_at(&self, distance: f64) -> Vector2 {
        let length = self.length();
        if length < EPSILON {
            return self.tangent_in();
        }
        let t = distance / length;
        match self.bend {
            Bend::Arc { center, sweep, .. } => {
                let rotation = DVec2::from_angle(sweep.signum() * self.swept_angle() * t);
                center + Vector2::from(rotation.rotate((self.tangent_in() - center).as_dvec2()))
            }
            Bend::Straight => {
                let delta = self.tangent_out() - self.tangent_in();
                self.tangent_in() + delta * t
            }
        }
    }

    /// Surface heading of travel `distance` into the joint.
    fn heading_at(&self, distance: f64) -> f64 {
        match self.bend {
            Bend::Arc { center, radius, sweep } if radius > EPSILON => {
                let radial = self.point_at(distance) - center;
                (radial.perp() * sweep.signum()).angle()
            }
            Bend::Arc { .. } => self.outgoing.heading(),
            Bend::Straight => {
                let delta = self.tangent_out() - self.tangent_in();
                if delta.norm() < EPSILON {
                    self.incoming.heading()
                } else {
                    delta.angle()
                }
            }
        }
    }
}

fn solve_bend(incoming: &TrimmedSegment, outgoing: &TrimmedSegment) -> Bend {
    let dir_a = incoming.direction();
    let dir_b = outgoing.direction();
    let scale = dir_a.norm() * dir_b.norm();
    if scale < EPSILON || Vector2::cross(dir_a, dir_b).abs() <= EPSILON * scale {
        return Bend::Straight;
    }

    let tangent_in = incoming.end();
    let tangent_out = outgoing.start();
    let center = TrimmedSegment::intersect(
        tangent_in,
        tangent_in.translate(dir_a.perp()),
        tangent_out,
        tangent_out.translate(dir_b.perp()),
    );
    let radius = Vector2::diff(tangent_in, center).norm();
    if !radius.is_finite() || radius >= MAX_FILLET_RADIUS {
        return Bend::Straight;
    }

    let sweep =
        SweepDirection::from_cross(Vector2::cross(tangent_in - center, tangent_out - center));
    crate::log::trace!(cx = center.x, cy = center.y, radius, ?sweep, "fillet");
    Bend::Arc { center, radius, sweep }
}
