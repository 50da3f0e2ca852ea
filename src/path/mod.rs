//! Path construction: ordered waypoints become an alternating chain of
//! trimmed segments and corner fillets.
//!
//! A [`Path`] is rebuilt from scratch whenever the waypoint list changes;
//! nothing in here is updated incrementally.

pub mod builder;
pub mod corridor;
pub mod fillet;
pub mod segment;

use enum_dispatch::enum_dispatch;

use crate::types::Vector2;
use crate::waypoint::Waypoint;

pub use builder::PathBuilder;
pub use corridor::{Corridor, CorridorSweeper, EndpointPoses, OrientedRect};
pub use fillet::{Bend, Fillet, SweepDirection};
pub use segment::TrimmedSegment;

/// Tolerance for near-zero lengths and determinants.
pub const EPSILON: f64 = 1e-9;

/// Fillets whose solved radius reaches this are treated as straight joints.
pub const MAX_FILLET_RADIUS: f64 = 1e9;

/// Most positions [`Path::sample`] places on a single element. Longer
/// elements are walked with a proportionally wider step.
pub const MAX_STEPS_PER_ELEMENT: usize = 10_000;

/// Offsets `0, step, 2·step, ..` below `length`, with the step widened so at
/// most `max` offsets come out. Nothing for empty or non-finite lengths.
pub(crate) fn offsets(length: f64, step: f64, max: usize) -> impl Iterator<Item = f64> {
    let (count, step) = if length > EPSILON && length.is_finite() && step > EPSILON && max > 0 {
        let count = (length / step).ceil();
        if count > max as f64 {
            (max, length / max as f64)
        } else {
            (count as usize, step)
        }
    } else {
        (0, step)
    };
    (0..count).map(move |k| k as f64 * step)
}

/// Walking along one element of a path, by distance from its entry point.
#[enum_dispatch]
pub trait Traverse {
    /// Where travel enters this element
    fn entry(&self) -> Vector2;

    /// Where travel leaves this element
    fn exit(&self) -> Vector2;

    /// Distance travelled through the element
    fn length(&self) -> f64;

    /// Point `distance` past the entry point
    fn point_at(&self, distance: f64) -> Vector2;

    /// Surface heading (`atan2(-y, x)` convention) of travel at `distance`
    fn heading_at(&self, distance: f64) -> f64;
}

/// One drawable piece of a path
#[enum_dispatch(Traverse)]
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    Segment(TrimmedSegment),
    Fillet(Fillet),
}

impl PathElement {
    pub fn as_segment(&self) -> Option<&TrimmedSegment> {
        match self {
            PathElement::Segment(s) => Some(s),
            PathElement::Fillet(_) => None,
        }
    }

    pub fn as_fillet(&self) -> Option<&Fillet> {
        match self {
            PathElement::Fillet(f) => Some(f),
            PathElement::Segment(_) => None,
        }
    }
}

/// A built path: `Segment, Fillet, Segment, …, Segment`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    waypoints: Vec<Waypoint>,
    elements: Vec<PathElement>,
}

impl Path {
    /// Build the path through `waypoints`.
    ///
    /// Fewer than two waypoints give an empty path.
    pub fn build(waypoints: &[Waypoint]) -> Path {
        PathBuilder::new(waypoints).build()
    }

    pub(crate) fn from_parts(waypoints: Vec<Waypoint>, elements: Vec<PathElement>) -> Path {
        Path { waypoints, elements }
    }

    /// The waypoints this path was built from
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn segments(&self) -> impl Iterator<Item = &TrimmedSegment> {
        self.elements.iter().filter_map(PathElement::as_segment)
    }

    pub fn fillets(&self) -> impl Iterator<Item = &Fillet> {
        self.elements.iter().filter_map(PathElement::as_fillet)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total travelled distance.
    pub fn length(&self) -> f64 {
        self.elements.iter().map(Traverse::length).sum()
    }

    pub fn start(&self) -> Option<Vector2> {
        self.elements.first().map(Traverse::entry)
    }

    pub fn end(&self) -> Option<Vector2> {
        self.elements.last().map(Traverse::exit)
    }

    /// Speed of the waypoint following `index`, or 0 past the end.
    pub fn next_speed(&self, index: usize) -> f64 {
        self.waypoints.get(index + 1).map_or(0.0, |w| w.speed)
    }

    /// Point and heading every `step` units of travel, ending exactly at the
    /// last waypoint.
    pub fn sample(&self, step: f64) -> Vec<(Vector2, f64)> {
        let mut samples = Vec::new();
        if step <= 0.0 || !step.is_finite() {
            return samples;
        }
        for element in &self.elements {
            samples.extend(
                offsets(element.length(), step, MAX_STEPS_PER_ELEMENT)
                    .map(|d| (element.point_at(d), element.heading_at(d))),
            );
        }
        if let Some(last) = self.elements.last() {
            let length = last.length();
            samples.push((last.exit(), last.heading_at(length)));
        }
        samples
    }
}
