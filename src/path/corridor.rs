//! Coverage corridor: the footprint of a rigid rectangular body stamped
//! along a built path.
//!
//! Straight parts are stamped every `linear_step` units. Arcs are stamped
//! every `radius * arc_step_fraction` units of arc length, i.e. a fixed
//! number of stamps per radian whatever the radius. An element that would
//! need more than `max_stamps` stamps gets exactly `max_stamps`, spread
//! evenly along it. The corridor is an
//! overlay for visual checking; path construction never reads it back.

use crate::errors::ConfigError;
use crate::render::defaults;
use crate::types::{Footprint, NumericError, Vector2, positive};

use super::{Bend, EPSILON, MAX_STEPS_PER_ELEMENT, Path, PathElement, Traverse, offsets};

/// A footprint placed on the field: centered at `center`, its length axis
/// pointing along `heading` (surface angle convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Vector2,
    pub heading: f64,
    pub length: f64,
    pub width: f64,
}

impl OrientedRect {
    pub fn new(center: Vector2, heading: f64, footprint: Footprint) -> Self {
        Self {
            center,
            heading,
            length: footprint.length,
            width: footprint.width,
        }
    }

    /// Unit vector along the length axis.
    pub fn forward(&self) -> Vector2 {
        Vector2::from_angle(self.heading)
    }

    /// Unit vector along the width axis.
    pub fn across(&self) -> Vector2 {
        self.forward().perp()
    }

    /// Corners in winding order: front-left, front-right, back-right, back-left.
    pub fn corners(&self) -> [Vector2; 4] {
        let f = self.forward() * (self.length / 2.0);
        let a = self.across() * (self.width / 2.0);
        [
            self.center + f + a,
            self.center + f - a,
            self.center - f - a,
            self.center - f + a,
        ]
    }

    /// Whether `point` lies inside or on the rectangle.
    pub fn contains(&self, point: Vector2) -> bool {
        let d = point - self.center;
        let along = Vector2::dot(d, self.forward()).abs();
        let across = Vector2::dot(d, self.across()).abs();
        along <= self.length / 2.0 + EPSILON && across <= self.width / 2.0 + EPSILON
    }
}

/// Footprint stamps in path order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Corridor {
    stamps: Vec<OrientedRect>,
}

impl Corridor {
    pub fn stamps(&self) -> &[OrientedRect] {
        &self.stamps
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Whether any stamp covers `point`.
    pub fn covers(&self, point: Vector2) -> bool {
        self.stamps.iter().any(|s| s.contains(point))
    }
}

/// Start and end poses of the body: on the first waypoint facing along the
/// first leg, and on the last waypoint facing along the last leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointPoses {
    pub start: OrientedRect,
    pub end: OrientedRect,
}

/// Sweeps a footprint along a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorSweeper {
    footprint: Footprint,
    linear_step: f64,
    arc_step_fraction: f64,
    max_stamps: usize,
}

impl Default for CorridorSweeper {
    fn default() -> Self {
        Self::new(Footprint::default())
    }
}

impl CorridorSweeper {
    pub fn new(footprint: Footprint) -> Self {
        Self {
            footprint,
            linear_step: defaults::LINEAR_STEP,
            arc_step_fraction: defaults::ARC_STEP_FRACTION,
            max_stamps: MAX_STEPS_PER_ELEMENT,
        }
    }

    /// Validate every setting.
    pub fn try_new(
        footprint: Footprint,
        linear_step: f64,
        arc_step_fraction: f64,
    ) -> Result<Self, ConfigError> {
        let footprint = Footprint::try_new(footprint.length, footprint.width)
            .map_err(ConfigError::invalid("footprint"))?;
        Ok(Self {
            footprint,
            linear_step: positive(linear_step).map_err(ConfigError::invalid("linear step"))?,
            arc_step_fraction: positive(arc_step_fraction)
                .map_err(ConfigError::invalid("arc step fraction"))?,
            max_stamps: MAX_STEPS_PER_ELEMENT,
        })
    }

    pub fn with_linear_step(mut self, step: f64) -> Result<Self, ConfigError> {
        self.linear_step = positive(step).map_err(ConfigError::invalid("linear step"))?;
        Ok(self)
    }

    pub fn with_arc_step_fraction(mut self, fraction: f64) -> Result<Self, ConfigError> {
        self.arc_step_fraction =
            positive(fraction).map_err(ConfigError::invalid("arc step fraction"))?;
        Ok(self)
    }

    /// Cap on the stamps placed on any one element.
    pub fn with_max_stamps(mut self, max: usize) -> Result<Self, ConfigError> {
        if max == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max stamps",
                source: NumericError::Zero,
            });
        }
        self.max_stamps = max;
        Ok(self)
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Stamp the footprint along every element of `path`.
    pub fn sweep(&self, path: &Path) -> Corridor {
        let mut stamps = Vec::new();
        for element in path.elements() {
            self.sweep_element(element, &mut stamps);
        }
        crate::log::debug!(stamps = stamps.len(), "swept corridor");
        Corridor { stamps }
    }

    fn sweep_element(&self, element: &PathElement, stamps: &mut Vec<OrientedRect>) {
        let step = match element {
            PathElement::Segment(_) => self.linear_step,
            PathElement::Fillet(fillet) => match fillet.bend() {
                Bend::Arc { radius, .. } => radius * self.arc_step_fraction,
                Bend::Straight => self.linear_step,
            },
        };
        stamps.extend(
            offsets(element.length(), step, self.max_stamps).map(|d| {
                OrientedRect::new(element.point_at(d), element.heading_at(d), self.footprint)
            }),
        );
    }

    /// Body poses at both ends of the path, if it has at least two waypoints.
    pub fn endpoint_poses(&self, path: &Path) -> Option<EndpointPoses> {
        let wps = path.waypoints();
        if wps.len() < 2 {
            return None;
        }
        let n = wps.len();
        let first_leg = Vector2::diff(wps[0].position, wps[1].position);
        let last_leg = Vector2::diff(wps[n - 2].position, wps[n - 1].position);
        Some(EndpointPoses {
            start: OrientedRect::new(wps[0].position, first_leg.angle(), self.footprint),
            end: OrientedRect::new(wps[n - 1].position, last_leg.angle(), self.footprint),
        })
    }
}
